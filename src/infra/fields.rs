//! Expansion of editable-field markers (`${N:default}`) into plain text.

use std::ops::Range;

use serde::Serialize;

/// A tab stop left behind after expansion.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Field
{
    pub index: usize,
    /// Byte range of the default text within the expanded output.
    pub range: Range<usize>,
    pub default: String,
}

/// Plain text plus the fields it contains, ordered for tabbing.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Expanded
{
    pub text: String,
    pub fields: Vec<Field>,
}

/// Replace every `${N:default}` with `default` and unescape `\$`, `\{`, `\}`.
///
/// Anything that does not form a complete marker is copied as is. Fields
/// are sorted by index, ties by position.
pub fn expand_fields(template: &str) -> Expanded
{
    let chars: Vec<char> = template
        .chars()
        .collect();
    let mut out = Expanded::default();
    let mut i = 0;

    while i < chars.len()
    {
        match chars[i]
        {
            '\\' if matches!(chars.get(i + 1), Some('$' | '{' | '}')) =>
            {
                out.text
                    .push(chars[i + 1]);
                i += 2;
            }
            '$' if chars.get(i + 1) == Some(&'{') =>
            {
                match parse_field(&chars, i + 2)
                {
                    Some((index, default, next)) =>
                    {
                        let start = out
                            .text
                            .len();
                        out.text
                            .push_str(&default);
                        let end = out
                            .text
                            .len();
                        out.fields
                            .push(Field { index, range: start..end, default });
                        i = next;
                    }
                    None =>
                    {
                        out.text
                            .push('$');
                        i += 1;
                    }
                }
            }
            ch =>
            {
                out.text
                    .push(ch);
                i += 1;
            }
        }
    }

    out.fields
        .sort_by_key(|f| (f.index, f.range.start));
    out
}

/// Parse `N:default}` starting at `pos`; returns index, default and the
/// position after the closing brace.
fn parse_field(
    chars: &[char],
    mut pos: usize,
) -> Option<(usize, String, usize)>
{
    let digits_start = pos;
    while chars
        .get(pos)
        .is_some_and(char::is_ascii_digit)
    {
        pos += 1;
    }
    if pos == digits_start || chars.get(pos) != Some(&':')
    {
        return None;
    }
    let index: usize = chars[digits_start..pos]
        .iter()
        .collect::<String>()
        .parse()
        .ok()?;
    pos += 1;

    let mut default = String::new();
    while let Some(&ch) = chars.get(pos)
    {
        match ch
        {
            '}' => return Some((index, default, pos + 1)),
            '\\' if matches!(chars.get(pos + 1), Some('$' | '{' | '}')) =>
            {
                default.push(chars[pos + 1]);
                pos += 2;
            }
            _ =>
            {
                default.push(ch);
                pos += 1;
            }
        }
    }
    None
}
