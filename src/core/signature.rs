//! Signature extraction and per-language comment styles.
//!
//! A [`SignatureStyle`] knows how a function definition opens, how to pull
//! the name and raw argument list out of an accumulated statement, and which
//! comment delimiters wrap the generated block. The [`StyleRegistry`] picks a
//! style from an editor scope string and falls back to the default one.

use std::{collections::HashMap, sync::LazyLock};

use regex::Regex;
use serde::Serialize;
use tracing::{debug, trace};

/// Language used when the scope names none, or one without a style.
pub const DEFAULT_LANGUAGE: &str = "lua";

const IDENTIFIER: &str = r"[a-zA-Z_][a-zA-Z0-9_]*";

static SCOPE_LANGUAGE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\bsource\.([a-z+\-]+)").expect("scope pattern"));

/// Name and raw argument text of a matched definition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ParsedSignature
{
    /// Identifier, possibly qualified with `.` or `:`.
    pub name: String,
    /// Interior of the parentheses, up to the last `)` in the statement.
    pub args: String,
}

/// Comment tokens used when rendering a snippet.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CommentDelimiters
{
    /// Prefix of a single-line comment, including the trailing space.
    pub line: &'static str,
    pub block_open: &'static str,
    pub block_close: &'static str,
}

/// Language-specific rules for finding and documenting a definition.
pub trait SignatureStyle: Send + Sync
{
    /// Scope language id this style serves, e.g. `lua`.
    fn language(&self) -> &'static str;

    /// Pattern marking where a definition begins on its first line.
    fn opener(&self) -> &Regex;

    /// Pull name and argument text out of an accumulated statement.
    fn extract(
        &self,
        statement: &str,
    ) -> Option<ParsedSignature>;

    fn delimiters(&self) -> CommentDelimiters;
}

/// Function-style definitions: `function f(...)`, `local function`,
/// `M.f = function(...)`, `obj:method(...)`, arrow forms and `f(...) {`.
#[derive(Debug, Clone)]
pub struct LuaStyle
{
    opener: Regex,
    signature: Regex,
}

impl LuaStyle
{
    pub fn new() -> Self
    {
        let opener = format!(
            r"(?:function[\s*]*(?:{id})?\s*\(|(?:{id}|\(.*\)\s*=>)|(?:{id}\s*\(.*\)\s*\{{))",
            id = IDENTIFIER
        );
        let signature = r"(?P<name>[a-zA-Z_][a-zA-Z0-9_:.]*)\s*\(\s*(?P<args>.*)\)";

        Self {
            opener: Regex::new(&opener).expect("opener pattern"),
            signature: Regex::new(signature).expect("signature pattern"),
        }
    }
}

impl Default for LuaStyle
{
    fn default() -> Self
    {
        Self::new()
    }
}

impl SignatureStyle for LuaStyle
{
    fn language(&self) -> &'static str
    {
        "lua"
    }

    fn opener(&self) -> &Regex
    {
        &self.opener
    }

    fn extract(
        &self,
        statement: &str,
    ) -> Option<ParsedSignature>
    {
        let caps = self
            .signature
            .captures(statement)?;

        let name = caps
            .name("name")
            .map_or("", |m| m.as_str());
        let args = caps
            .name("args")
            .map_or("", |m| m.as_str());

        trace!(name, args, "signature matched");
        Some(ParsedSignature { name: name.to_string(), args: args.to_string() })
    }

    fn delimiters(&self) -> CommentDelimiters
    {
        CommentDelimiters { line: "-- ", block_open: "--[[", block_close: "]]" }
    }
}

/// Language id named by an editor scope such as `source.lua meta.function`.
pub fn scope_language(scope: &str) -> Option<&str>
{
    SCOPE_LANGUAGE
        .captures(scope)
        .and_then(|c| c.get(1))
        .map(|m| m.as_str())
}

/// Scope-keyed collection of styles with a guaranteed fallback.
pub struct StyleRegistry
{
    styles: HashMap<&'static str, Box<dyn SignatureStyle>>,
    fallback: Box<dyn SignatureStyle>,
}

impl StyleRegistry
{
    /// Registry holding only [`LuaStyle`], which also serves as fallback.
    pub fn with_defaults() -> Self
    {
        let mut registry = Self { styles: HashMap::new(), fallback: Box::new(LuaStyle::new()) };
        registry.register(Box::new(LuaStyle::new()));
        registry
    }

    /// Add or replace the style for its language.
    pub fn register(
        &mut self,
        style: Box<dyn SignatureStyle>,
    )
    {
        self.styles
            .insert(style.language(), style);
    }

    pub fn languages(&self) -> Vec<&'static str>
    {
        let mut langs: Vec<_> = self
            .styles
            .keys()
            .copied()
            .collect();
        langs.sort_unstable();
        langs
    }

    /// Style for the scope's language, or the fallback style.
    pub fn resolve(
        &self,
        scope: &str,
    ) -> &dyn SignatureStyle
    {
        let lang = scope_language(scope).unwrap_or(DEFAULT_LANGUAGE);

        match self
            .styles
            .get(lang)
        {
            Some(style) => style.as_ref(),
            None =>
            {
                debug!(lang, fallback = self.fallback.language(), "no style for language");
                self.fallback
                    .as_ref()
            }
        }
    }
}

impl Default for StyleRegistry
{
    fn default() -> Self
    {
        Self::with_defaults()
    }
}
