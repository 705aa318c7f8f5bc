//! Multi-line statement accumulation.
//!
//! Reads physical lines forward from an offset, strips comments, and
//! concatenates them until the parenthesis balance returns to zero or the
//! line budget runs out. Lines are joined without a separator.

use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument, trace, warn};

/// Default number of physical lines read before giving up.
pub const DEFAULT_MAX_LINES: usize = 25;

static LINE_COMMENT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"//.*").expect("line comment pattern"));

// Greedy: a line holding two block comments loses everything between them.
static BLOCK_COMMENT_GREEDY: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"/\*.*\*/").expect("greedy block comment pattern"));

static BLOCK_COMMENT_LAZY: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"/\*.*?\*/").expect("lazy block comment pattern"));

static BLOCK_COMMENT_OPEN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"/\*.*$").expect("unterminated block comment pattern"));

/// One physical line as reported by a [`LineSource`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineSpan
{
    /// Offset of the first byte of the line.
    pub start: usize,
    /// Offset one past the last byte, newline excluded.
    pub end: usize,
    pub text: String,
}

/// Anything that can hand out the line containing an offset.
pub trait LineSource
{
    /// The line containing `offset`, or `None` past the end of the text.
    fn line_at(
        &self,
        offset: usize,
    ) -> Option<LineSpan>;
}

impl LineSource for str
{
    fn line_at(
        &self,
        offset: usize,
    ) -> Option<LineSpan>
    {
        let bytes = self.as_bytes();
        if offset >= bytes.len()
        {
            return None;
        }

        let start = memchr::memrchr(b'\n', &bytes[..offset]).map_or(0, |i| i + 1);
        let end = memchr::memchr(b'\n', &bytes[offset..]).map_or(bytes.len(), |i| offset + i);

        Some(LineSpan { start, end, text: self[start..end].to_string() })
    }
}

/// How comments are removed from each physical line.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CommentStripping
{
    /// `//` to end of line, then one greedy `/* ... */` run. An
    /// unterminated `/*` is left alone.
    #[default]
    Greedy,
    /// Each `/* ... */` separately, then an unterminated `/*` tail, then `//`.
    Strict,
}

impl CommentStripping
{
    pub fn strip(
        self,
        line: &str,
    ) -> String
    {
        match self
        {
            CommentStripping::Greedy =>
            {
                let line = LINE_COMMENT.replace_all(line, "");
                BLOCK_COMMENT_GREEDY
                    .replace_all(&line, "")
                    .into_owned()
            }
            CommentStripping::Strict =>
            {
                let line = BLOCK_COMMENT_LAZY.replace_all(line, "");
                let line = BLOCK_COMMENT_OPEN.replace_all(&line, "");
                LINE_COMMENT
                    .replace_all(&line, "")
                    .into_owned()
            }
        }
    }
}

/// A candidate definition assembled from one or more physical lines.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Statement
{
    /// Concatenated, comment-stripped line text.
    pub text: String,
    /// Physical lines consumed.
    pub lines_read: usize,
    /// Unmatched `(` left at the end; zero when balanced.
    pub balance: i64,
    /// Stopped on the line budget with brackets still open.
    pub hit_cap: bool,
}

impl Statement
{
    pub fn is_balanced(&self) -> bool
    {
        self.balance == 0
    }
}

/// Pulls lines from a [`LineSource`] until a parenthesized group closes.
#[derive(Debug, Clone)]
pub struct StatementAccumulator<'a>
{
    opener: &'a Regex,
    max_lines: usize,
    stripping: CommentStripping,
}

impl<'a> StatementAccumulator<'a>
{
    pub fn new(opener: &'a Regex) -> Self
    {
        Self { opener, max_lines: DEFAULT_MAX_LINES, stripping: CommentStripping::default() }
    }

    pub fn max_lines(
        mut self,
        max_lines: usize,
    ) -> Self
    {
        self.max_lines = max_lines;
        self
    }

    pub fn stripping(
        mut self,
        stripping: CommentStripping,
    ) -> Self
    {
        self.stripping = stripping;
        self
    }

    /// Accumulate the statement whose first line starts at `start`.
    ///
    /// Bracket counting on the first non-empty line begins at the opener
    /// match, so `(function (a, b) ... )` counts from `function`. A first
    /// line without any bracket balances immediately and ends the read.
    #[instrument(level = "debug", skip(self, source))]
    pub fn accumulate<S>(
        &self,
        source: &S,
        start: usize,
    ) -> Statement
    where
        S: LineSource + ?Sized,
    {
        let mut text = String::new();
        let mut balance: i64 = 0;
        let mut lines_read = 0usize;
        let mut pos = start;

        while lines_read < self.max_lines
        {
            let Some(span) = source.line_at(pos)
            else
            {
                trace!(pos, "end of input");
                break;
            };

            lines_read += 1;
            pos = span.end + 1;

            let line = self
                .stripping
                .strip(&span.text);

            let mut scan: &str = &line;
            if text.is_empty()
            {
                if let Some(m) = self
                    .opener
                    .find(&line)
                {
                    scan = &line[m.start()..];
                }
            }

            balance += count_brackets(scan);
            trace!(lines_read, balance, line = %line, "accumulated line");

            text.push_str(&line);
            if balance == 0
            {
                break;
            }
        }

        let hit_cap = lines_read == self.max_lines && balance != 0;
        if hit_cap
        {
            warn!(lines_read, balance, "line budget exhausted with unbalanced brackets");
        }
        debug!(lines_read, balance, "statement accumulated");

        Statement { text, lines_read, balance, hit_cap }
    }
}

/// Net `(` minus `)` count.
fn count_brackets(text: &str) -> i64
{
    memchr::memchr2_iter(b'(', b')', text.as_bytes())
        .map(|i| if text.as_bytes()[i] == b'(' { 1 } else { -1 })
        .sum()
}

#[cfg(test)]
mod tests
{
    use super::*;
    use crate::core::signature::{LuaStyle, SignatureStyle};

    fn accumulate(
        text: &str,
        start: usize,
    ) -> Statement
    {
        let style = LuaStyle::new();
        StatementAccumulator::new(style.opener()).accumulate(text, start)
    }

    #[test]
    fn joins_lines_until_balanced()
    {
        let st = accumulate("function foo(a,\n  b)\nend\n", 0);
        assert_eq!(st.text, "function foo(a,  b)");
        assert_eq!(st.lines_read, 2);
        assert!(st.is_balanced());
        assert!(!st.hit_cap);
    }

    #[test]
    fn single_line_definition()
    {
        let st = accumulate("local function bar(x, y)\n  return x\nend", 0);
        assert_eq!(st.text, "local function bar(x, y)");
        assert_eq!(st.lines_read, 1);
    }

    #[test]
    fn line_without_brackets_stops_immediately()
    {
        let st = accumulate("local x = 1\nfunction foo(a)\n", 0);
        assert_eq!(st.text, "local x = 1");
        assert_eq!(st.lines_read, 1);
    }

    #[test]
    fn starts_at_given_offset()
    {
        let src = "-- cursor\nfunction m.f(a)\n";
        let st = accumulate(src, 10);
        assert_eq!(st.text, "function m.f(a)");
    }

    #[test]
    fn strips_comments_before_counting()
    {
        // Lua comments are not stripped; only C-style ones are.
        let st = accumulate("function foo(a, -- ) trailing\n b)\n", 0);
        assert_eq!(st.text, "function foo(a, -- ) trailing");
        assert_eq!(st.lines_read, 1);

        let st = accumulate("function foo(a /* ) */,\n b)\n", 0);
        assert_eq!(st.text, "function foo(a , b)");
        assert!(st.is_balanced());
    }

    #[test]
    fn unterminated_block_comment_is_kept_in_greedy_mode()
    {
        let st = accumulate("function foo(a /* ) \n b)\n", 0);
        assert_eq!(st.text, "function foo(a /* ) ");
        assert_eq!(st.lines_read, 1);
    }

    #[test]
    fn strict_stripping_handles_open_and_multiple_comments()
    {
        assert_eq!(CommentStripping::Strict.strip("f(a /* x */, b /* y */)"), "f(a , b )");
        assert_eq!(CommentStripping::Greedy.strip("f(a /* x */, b /* y */)"), "f(a )");
        assert_eq!(CommentStripping::Strict.strip("f(a, /* open"), "f(a, ");
        assert_eq!(CommentStripping::Strict.strip("f(a) // c"), "f(a) ");
    }

    #[test]
    fn opener_slice_ignores_leading_parens()
    {
        // The leading '(' sits before the opener and is not counted.
        let st = accumulate("(function (foo, bar)\n", 0);
        assert_eq!(st.text, "(function (foo, bar)");
        assert!(st.is_balanced());
    }

    #[test]
    fn stops_at_line_budget()
    {
        let mut src = String::from("function foo(\n");
        for i in 0..40
        {
            src.push_str(&format!("  a{i},\n"));
        }
        let st = accumulate(&src, 0);
        assert_eq!(st.lines_read, DEFAULT_MAX_LINES);
        assert!(st.hit_cap);
        assert_eq!(st.balance, 1);
    }

    #[test]
    fn custom_budget()
    {
        let style = LuaStyle::new();
        let st = StatementAccumulator::new(style.opener())
            .max_lines(3)
            .accumulate("f(\na,\nb,\nc)\n", 0);
        assert_eq!(st.lines_read, 3);
        assert!(st.hit_cap);
    }

    #[test]
    fn end_of_input_returns_partial()
    {
        let st = accumulate("function foo(a,\n b", 0);
        assert_eq!(st.text, "function foo(a, b");
        assert_eq!(st.lines_read, 2);
        assert!(!st.hit_cap);
        assert!(!st.is_balanced());
    }

    #[test]
    fn str_line_source()
    {
        let src = "ab\ncd\n";
        assert_eq!(src.line_at(4), Some(LineSpan { start: 3, end: 5, text: "cd".into() }));
        assert_eq!(src.line_at(2), Some(LineSpan { start: 0, end: 2, text: "ab".into() }));
        assert_eq!(src.line_at(6), None);
    }
}
