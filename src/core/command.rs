//! The docstring command: cursor in, comment snippet out.
//!
//! The pipeline reads the statement below the cursor line, extracts its
//! signature and renders a snippet. [`DocCommand::plan`] is side-effect
//! free and reports failures as [`DocError`]. [`DocCommand::run`] is the
//! editor-facing boundary: it always erases the text after the cursor,
//! inserts on success and otherwise does nothing visible.

use std::ops::Range;

use tracing::{debug, info, instrument, warn};

use crate::{
    core::{
        accumulate::{LineSource, Statement, StatementAccumulator},
        signature::{ParsedSignature, StyleRegistry},
        snippet::SnippetAssembler,
        template::{TemplateBuilder, TemplateLine},
    },
    infra::config::Config,
};

/// What the command needs from the host editor.
pub trait EditorAdapter: LineSource
{
    fn cursor_offset(&self) -> usize;

    /// Scope name at `offset`, e.g. `source.lua meta.function`.
    fn scope_at(
        &self,
        offset: usize,
    ) -> String;

    fn erase_range(
        &mut self,
        start: usize,
        end: usize,
    );

    /// Insert at the cursor; `text` carries `${N:default}` field markers.
    fn insert_editable_template(
        &mut self,
        text: &str,
    );
}

/// Why no snippet was produced.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DocError
{
    #[error("no statement follows the cursor line")]
    EmptyStatement,

    #[error("no function signature found")]
    NoMatch,

    #[error("brackets still unbalanced after {lines_read} lines")]
    MalformedInput
    {
        lines_read: usize,
    },
}

/// Everything computed for one invocation.
#[derive(Debug, Clone)]
pub struct Plan
{
    pub language: &'static str,
    /// Text after the cursor on its line; erased before insertion.
    pub trailing: Range<usize>,
    pub statement: Statement,
    pub signature: ParsedSignature,
    pub lines: Vec<TemplateLine>,
    pub snippet: String,
}

#[derive(Debug, Clone)]
pub enum Outcome
{
    Inserted(Plan),
    Skipped(DocError),
}

/// Configured pipeline plus the style registry it dispatches through.
pub struct DocCommand
{
    registry: StyleRegistry,
    config: Config,
}

impl DocCommand
{
    pub fn new(config: Config) -> Self
    {
        Self::with_registry(config, StyleRegistry::with_defaults())
    }

    pub fn with_registry(
        config: Config,
        registry: StyleRegistry,
    ) -> Self
    {
        Self { registry, config }
    }

    pub fn registry(&self) -> &StyleRegistry
    {
        &self.registry
    }

    /// Compute the snippet for the editor's current cursor.
    pub fn plan<E>(
        &self,
        editor: &E,
    ) -> Result<Plan, DocError>
    where
        E: EditorAdapter + ?Sized,
    {
        let trailing = trailing_region(editor);
        self.plan_with(editor, trailing)
    }

    #[instrument(level = "debug", skip(self, editor))]
    fn plan_with<E>(
        &self,
        editor: &E,
        trailing: Range<usize>,
    ) -> Result<Plan, DocError>
    where
        E: EditorAdapter + ?Sized,
    {
        let scope = editor.scope_at(editor.cursor_offset());
        let style = self
            .registry
            .resolve(&scope);
        debug!(scope = %scope, language = style.language(), "style resolved");

        let statement = StatementAccumulator::new(style.opener())
            .max_lines(
                self.config
                    .scan
                    .max_lines,
            )
            .stripping(
                self.config
                    .scan
                    .comment_stripping,
            )
            .accumulate(editor, trailing.end + 1);

        if statement
            .text
            .is_empty()
        {
            return Err(DocError::EmptyStatement);
        }

        let Some(signature) = style.extract(&statement.text)
        else
        {
            return Err(if statement.hit_cap
            {
                DocError::MalformedInput { lines_read: statement.lines_read }
            }
            else
            {
                DocError::NoMatch
            });
        };

        if statement.hit_cap
        {
            warn!(name = %signature.name, "using signature from unbalanced statement");
        }

        let tpl = &self
            .config
            .template;
        let lines = TemplateBuilder::new(&tpl.description, &tpl.param_tag)
            .build(&signature.name, &signature.args);
        let snippet = SnippetAssembler::new(style.delimiters())
            .numbering(tpl.numbering)
            .placeholder(&tpl.param_placeholder)
            .gap(tpl.alignment_gap)
            .assemble(&lines);

        Ok(Plan { language: style.language(), trailing, statement, signature, lines, snippet })
    }

    /// Run against a live editor. Failures are logged, never raised.
    #[instrument(level = "debug", skip_all)]
    pub fn run<E>(
        &self,
        editor: &mut E,
    ) -> Outcome
    where
        E: EditorAdapter + ?Sized,
    {
        let trailing = trailing_region(&*editor);
        let planned = self.plan_with(&*editor, trailing.clone());

        editor.erase_range(trailing.start, trailing.end);

        match planned
        {
            Ok(plan) =>
            {
                editor.insert_editable_template(&plan.snippet);
                info!(name = %plan.signature.name, lines = plan.lines.len(), "docstring inserted");
                Outcome::Inserted(plan)
            }
            Err(err) =>
            {
                debug!(%err, "nothing inserted");
                Outcome::Skipped(err)
            }
        }
    }
}

/// From the cursor to the end of its line.
fn trailing_region<E>(editor: &E) -> Range<usize>
where
    E: EditorAdapter + ?Sized,
{
    let cursor = editor.cursor_offset();
    let end = editor
        .line_at(cursor)
        .map_or(cursor, |line| line.end);
    cursor..end
}
