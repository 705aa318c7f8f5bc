//! Rendering template lines into insertable snippet text.

use serde::{Deserialize, Serialize};

use crate::core::{signature::CommentDelimiters, template::TemplateLine};

/// How parameter field indices advance.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Numbering
{
    /// Index doubles on each parameter: 2, 4, 8, ...
    #[default]
    Doubling,
    /// Index increments on each parameter: 2, 3, 4, ...
    Sequential,
}

impl Numbering
{
    fn advance(
        self,
        index: usize,
    ) -> usize
    {
        match self
        {
            Numbering::Doubling => index + index,
            Numbering::Sequential => index + 1,
        }
    }
}

/// Turns [`TemplateLine`]s into the final text handed to the editor.
#[derive(Debug, Clone)]
pub struct SnippetAssembler
{
    delimiters: CommentDelimiters,
    numbering: Numbering,
    placeholder: String,
    gap: usize,
}

impl SnippetAssembler
{
    pub fn new(delimiters: CommentDelimiters) -> Self
    {
        Self { delimiters, numbering: Numbering::default(), placeholder: "desc".to_string(), gap: 2 }
    }

    pub fn numbering(
        mut self,
        numbering: Numbering,
    ) -> Self
    {
        self.numbering = numbering;
        self
    }

    /// Default text of each parameter field.
    pub fn placeholder(
        mut self,
        placeholder: impl Into<String>,
    ) -> Self
    {
        self.placeholder = placeholder.into();
        self
    }

    /// Spaces between the longest parameter line and its field.
    pub fn gap(
        mut self,
        gap: usize,
    ) -> Self
    {
        self.gap = gap;
        self
    }

    /// Render `lines`.
    ///
    /// A single line becomes a line comment holding that line's text as is.
    /// Otherwise a block comment is produced, with each parameter line
    /// padded so the parameter fields start in the same column.
    pub fn assemble(
        &self,
        lines: &[TemplateLine],
    ) -> String
    {
        match lines
        {
            [] => String::new(),
            [only] => format!("{}{}", self.delimiters.line, only.text()),
            _ => self.assemble_block(lines),
        }
    }

    fn assemble_block(
        &self,
        lines: &[TemplateLine],
    ) -> String
    {
        let width = lines
            .iter()
            .filter(|l| l.is_param())
            .map(|l| {
                l.text()
                    .chars()
                    .count()
            })
            .max()
            .unwrap_or(0)
            + self.gap;

        let mut out = String::from(self.delimiters.block_open);
        let mut index = 1usize;

        for line in lines
        {
            let text = line.text();
            if !text.is_empty()
            {
                out.push_str("\n  ");
                out.push_str(&text);
            }

            if line.is_param()
            {
                index = self
                    .numbering
                    .advance(index);
                let pad = width.saturating_sub(
                    text.chars()
                        .count(),
                );
                out.extend(std::iter::repeat_n(' ', pad));
                out.push_str(&format!("${{{index}:{}}}", self.placeholder));
            }
        }

        out.push('\n');
        out.push_str(self.delimiters.block_close);
        out
    }
}
