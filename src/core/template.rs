//! Comment line synthesis from a parsed signature.

use std::sync::LazyLock;

use regex::Regex;
use tracing::debug;

use crate::core::split::split_by_commas;

static INLINE_BLOCK_COMMENT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"/\*.*?\*/").expect("inline block comment pattern"));

/// One line of the generated comment, before rendering.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TemplateLine
{
    /// Editable description field, e.g. `${1:description}`.
    Description
    {
        index: usize,
        label: String,
    },
    /// `@param <escaped argument>`.
    Param(String),
}

impl TemplateLine
{
    /// The text as it appears in the snippet, without padding or field.
    pub fn text(&self) -> String
    {
        match self
        {
            TemplateLine::Description { index, label } => format!("${{{index}:{label}}}"),
            TemplateLine::Param(text) => text.clone(),
        }
    }

    pub fn is_param(&self) -> bool
    {
        matches!(self, TemplateLine::Param(_))
    }
}

/// Backslash-escape the characters snippet syntax reserves: `$`, `{`, `}`.
pub fn escape_snippet(text: &str) -> String
{
    let mut out = String::with_capacity(text.len());
    for ch in text.chars()
    {
        if matches!(ch, '$' | '{' | '}')
        {
            out.push('\\');
        }
        out.push(ch);
    }
    out
}

/// Builds the description line plus one line per argument.
#[derive(Debug, Clone)]
pub struct TemplateBuilder
{
    description: String,
    param_tag: String,
}

impl Default for TemplateBuilder
{
    fn default() -> Self
    {
        Self { description: "description".to_string(), param_tag: "@param".to_string() }
    }
}

impl TemplateBuilder
{
    pub fn new(
        description: impl Into<String>,
        param_tag: impl Into<String>,
    ) -> Self
    {
        Self { description: description.into(), param_tag: param_tag.into() }
    }

    /// Lines for a definition. The description label is fixed and does not
    /// use `name`; `name` is only logged.
    pub fn build(
        &self,
        name: &str,
        args: &str,
    ) -> Vec<TemplateLine>
    {
        let mut lines =
            vec![TemplateLine::Description { index: 1, label: self.description.clone() }];

        if !args.is_empty()
        {
            let args = INLINE_BLOCK_COMMENT.replace_all(args, "");
            for arg in split_by_commas(&args)
            {
                lines.push(TemplateLine::Param(format!(
                    "{} {}",
                    self.param_tag,
                    escape_snippet(&arg)
                )));
            }
        }

        debug!(name, params = lines.len() - 1, "template built");
        lines
    }
}
