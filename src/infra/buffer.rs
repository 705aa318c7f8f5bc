//! In-memory text buffer acting as the editor for the CLI and tests.

use std::path::Path;

use anyhow::{Result, bail};
use tracing::trace;

use crate::{
    core::{
        accumulate::{LineSource, LineSpan},
        command::EditorAdapter,
    },
    infra::{
        fields::{Field, expand_fields},
        line_index::LineIndex,
    },
};

/// Scope string for a file extension, in editor `source.<lang>` form.
pub fn scope_for_extension(ext: &str) -> String
{
    let lang = match ext
    {
        "lua" => "lua",
        "js" | "mjs" | "cjs" => "js",
        "ts" | "tsx" => "ts",
        "py" => "python",
        "rs" => "rust",
        "c" | "h" => "c",
        "cc" | "cpp" | "hpp" => "c++",
        _ => return "text.plain".to_string(),
    };
    format!("source.{lang}")
}

/// LF-normalized text with a cursor, a scope and the tab stops of the last
/// inserted template.
#[derive(Debug, Clone)]
pub struct TextBuffer
{
    text: String,
    index: LineIndex,
    cursor: usize,
    scope: String,
    fields: Vec<Field>,
}

impl TextBuffer
{
    pub fn new(
        text: &str,
        scope: impl Into<String>,
    ) -> Self
    {
        let text = text.replace("\r\n", "\n");
        let index = LineIndex::build(text.as_bytes());
        Self { text, index, cursor: 0, scope: scope.into(), fields: Vec::new() }
    }

    /// Buffer whose scope is derived from `path`'s extension.
    pub fn for_path(
        path: &Path,
        text: &str,
    ) -> Self
    {
        let scope = path
            .extension()
            .and_then(|e| e.to_str())
            .map_or_else(|| "text.plain".to_string(), scope_for_extension);
        Self::new(text, scope)
    }

    pub fn text(&self) -> &str
    {
        &self.text
    }

    pub fn cursor(&self) -> usize
    {
        self.cursor
    }

    pub fn scope(&self) -> &str
    {
        &self.scope
    }

    /// Tab stops of the last inserted template, in tabbing order.
    pub fn fields(&self) -> &[Field]
    {
        &self.fields
    }

    pub fn set_scope(
        &mut self,
        scope: impl Into<String>,
    )
    {
        self.scope = scope.into();
    }

    /// Place the cursor at a byte offset, clamped to the text and moved
    /// back to a character boundary.
    pub fn set_cursor(
        &mut self,
        offset: usize,
    )
    {
        let mut offset = offset.min(self.text.len());
        while !self
            .text
            .is_char_boundary(offset)
        {
            offset -= 1;
        }
        self.cursor = offset;
    }

    /// Place the cursor at a 1-based line and character column. Without a
    /// column, or past the line's end, the cursor goes to the end of line.
    pub fn set_cursor_line_col(
        &mut self,
        line1: usize,
        col1: Option<usize>,
    ) -> Result<()>
    {
        let (Some(start), Some(end)) = (self.index.start_of_line(line1), self.index.end_of_line(line1))
        else
        {
            bail!("line {} is out of range (buffer has {} lines)", line1, self.index.line_count());
        };

        let offset = match col1
        {
            None => end,
            Some(0) => bail!("columns are 1-based"),
            Some(col) => self.text[start..end]
                .char_indices()
                .nth(col - 1)
                .map_or(end, |(i, _)| start + i),
        };
        self.cursor = offset;
        Ok(())
    }

    fn reindex(&mut self)
    {
        self.index = LineIndex::build(self.text.as_bytes());
    }
}

impl LineSource for TextBuffer
{
    fn line_at(
        &self,
        offset: usize,
    ) -> Option<LineSpan>
    {
        if offset >= self.index.len()
        {
            return None;
        }
        let line1 = self
            .index
            .line_of_offset(offset);
        let start = self
            .index
            .start_of_line(line1)?;
        let end = self
            .index
            .end_of_line(line1)?;
        Some(LineSpan { start, end, text: self.text[start..end].to_string() })
    }
}

impl EditorAdapter for TextBuffer
{
    fn cursor_offset(&self) -> usize
    {
        self.cursor
    }

    fn scope_at(
        &self,
        _offset: usize,
    ) -> String
    {
        self.scope
            .clone()
    }

    fn erase_range(
        &mut self,
        start: usize,
        end: usize,
    )
    {
        let end = end.min(self.text.len());
        if start >= end
        {
            return;
        }
        trace!(start, end, "erase");
        self.text
            .replace_range(start..end, "");
        if self.cursor > end
        {
            self.cursor -= end - start;
        }
        else if self.cursor > start
        {
            self.cursor = start;
        }
        self.reindex();
    }

    /// Expands the markers, inserts at the cursor and leaves the cursor on
    /// the first field (or after the text when there is none).
    fn insert_editable_template(
        &mut self,
        text: &str,
    )
    {
        let expanded = expand_fields(text);
        let at = self.cursor;
        self.text
            .insert_str(at, &expanded.text);

        self.fields = expanded
            .fields
            .into_iter()
            .map(|f| Field { range: f.range.start + at..f.range.end + at, ..f })
            .collect();
        self.cursor = self
            .fields
            .first()
            .map_or(at + expanded.text.len(), |f| f.range.start);
        self.reindex();
    }
}

#[cfg(test)]
mod tests
{
    use super::*;

    #[test]
    fn normalizes_crlf_and_reads_lines()
    {
        let buf = TextBuffer::new("a\r\nbc\r\n", "source.lua");
        assert_eq!(buf.text(), "a\nbc\n");
        assert_eq!(buf.line_at(2).unwrap().text, "bc");
        assert_eq!(buf.line_at(1).unwrap().text, "a");
        assert!(buf.line_at(5).is_none());
    }

    #[test]
    fn cursor_by_line_and_column()
    {
        let mut buf = TextBuffer::new("-- héllo\nfunction f()\n", "source.lua");
        buf.set_cursor_line_col(1, None).unwrap();
        assert_eq!(buf.cursor(), 9);
        buf.set_cursor_line_col(1, Some(5)).unwrap();
        assert_eq!(buf.cursor(), 4);
        buf.set_cursor_line_col(1, Some(6)).unwrap();
        assert_eq!(buf.cursor(), 6);
        buf.set_cursor_line_col(1, Some(99)).unwrap();
        assert_eq!(buf.cursor(), 9);
        assert!(buf.set_cursor_line_col(9, None).is_err());
        assert!(buf.set_cursor_line_col(1, Some(0)).is_err());
    }

    #[test]
    fn erase_and_insert_track_cursor_and_fields()
    {
        let mut buf = TextBuffer::new("-- junk\nx\n", "source.lua");
        buf.set_cursor(2);
        buf.erase_range(2, 7);
        assert_eq!(buf.text(), "--\nx\n");
        assert_eq!(buf.cursor(), 2);

        buf.insert_editable_template("[${1:one} ${2:two}]");
        assert_eq!(buf.text(), "--[one two]\nx\n");
        assert_eq!(buf.fields().len(), 2);
        assert_eq!(&buf.text()[buf.fields()[1].range.clone()], "two");
        assert_eq!(buf.cursor(), 3);
    }

    #[test]
    fn set_cursor_clamps_to_char_boundary()
    {
        let mut buf = TextBuffer::new("é", "text.plain");
        buf.set_cursor(1);
        assert_eq!(buf.cursor(), 0);
        buf.set_cursor(10);
        assert_eq!(buf.cursor(), 2);
    }

    #[test]
    fn scopes_from_extensions()
    {
        assert_eq!(scope_for_extension("lua"), "source.lua");
        assert_eq!(scope_for_extension("tsx"), "source.ts");
        assert_eq!(scope_for_extension("md"), "text.plain");
        let buf = TextBuffer::for_path(Path::new("x/init.lua"), "");
        assert_eq!(buf.scope(), "source.lua");
    }
}
