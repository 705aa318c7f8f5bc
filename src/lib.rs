//! **docstub** - doc-comment skeletons for the function definition below the cursor
//!
//! Reads the (possibly multi-line) definition after the cursor line, pulls out its
//! name and parameters, and renders a comment block with editable fields.

/// Command-line interface with clap integration
pub mod cli;

/// Shell completion generation
pub mod completion;

/// Core pipeline - statement scanning, signature extraction and snippet rendering
pub mod core {
    /// Comma splitting that respects quotes and brackets
    pub mod split;
    pub use split::split_by_commas;

    /// Multi-line statement accumulation with bracket balancing
    pub mod accumulate;
    pub use accumulate::{CommentStripping, LineSource, LineSpan, Statement, StatementAccumulator};

    /// Signature extraction and per-language styles
    pub mod signature;
    pub use signature::{LuaStyle, ParsedSignature, SignatureStyle, StyleRegistry};

    /// Description and @param line synthesis
    pub mod template;
    pub use template::{TemplateBuilder, TemplateLine, escape_snippet};

    /// Snippet text rendering with aligned, numbered fields
    pub mod snippet;
    pub use snippet::{Numbering, SnippetAssembler};

    /// Editor-facing command boundary
    pub mod command;
    pub use command::{DocCommand, DocError, EditorAdapter, Outcome, Plan};

    /// `generate` subcommand handler
    pub mod generate;
    pub use generate::run as generate_run;
}

/// Infrastructure - configuration, buffers and field expansion
pub mod infra {
    /// Configuration management with TOML support and env overrides
    pub mod config;
    pub use config::{Config, init as config_init, load_config};

    /// In-memory editor buffer
    pub mod buffer;
    pub use buffer::TextBuffer;

    /// Line/offset indexing for buffers
    pub mod line_index;
    pub use line_index::LineIndex;

    /// Editable-field marker expansion
    pub mod fields;
    pub use fields::{Expanded, Field, expand_fields};
}

// Strategic re-exports for clean CLI interface
pub use cli::{AppContext, Cli, Commands};
pub use crate::core::generate_run;
pub use infra::{Config, TextBuffer, load_config};

// Core types for external consumers
pub use crate::core::{DocCommand, DocError, EditorAdapter, Outcome};
