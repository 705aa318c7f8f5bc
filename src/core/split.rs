//! Comma splitting for raw argument lists.
//!
//! Splits on commas that sit outside any quoted or bracketed section.
//! Sections are tracked by their expected closer only: an opener seen
//! while already inside a section is an ordinary character, so nested
//! brackets of the same kind are not depth-counted.

/// Characters that open a section inside which commas are inert.
const OPENERS: [char; 5] = ['"', '\'', '<', '(', '{'];

/// Closers, positionally matched to `OPENERS`.
const CLOSERS: [char; 5] = ['"', '\'', '>', ')', '}'];

/// Scanner state between two characters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ScanState
{
    /// Outside any section; commas separate tokens.
    Free,
    /// Inside a section that ends at `closer`.
    Section
    {
        closer: char,
    },
    /// Inside a section, previous char was an unconsumed backslash.
    Escaped
    {
        closer: char,
    },
}

/// What to do with the current character.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Action
{
    /// Append to the current token.
    Keep,
    /// Drop the character.
    Skip,
    /// Close out the current token.
    Split,
}

/// Transition table for a single character.
fn step(
    state: ScanState,
    ch: char,
) -> (ScanState, Action)
{
    match state
    {
        ScanState::Escaped { closer } => (ScanState::Section { closer }, Action::Keep),
        ScanState::Section { closer } if ch == '\\' => (ScanState::Escaped { closer }, Action::Skip),
        ScanState::Section { closer } if ch == closer => (ScanState::Free, Action::Keep),
        ScanState::Section { .. } => (state, Action::Keep),
        ScanState::Free if ch == ',' => (state, Action::Split),
        ScanState::Free => match OPENERS
            .iter()
            .position(|&open| open == ch)
        {
            Some(i) => (ScanState::Section { closer: CLOSERS[i] }, Action::Keep),
            None => (state, Action::Keep),
        },
    }
}

/// Split `text` on unenclosed commas, trimming each token.
///
/// Empty input is the only case yielding no tokens; otherwise the final
/// token is always pushed, even when empty (`"a,"` gives `["a", ""]`).
/// An unterminated section swallows the rest of the input.
pub fn split_by_commas(text: &str) -> Vec<String>
{
    let mut out = Vec::new();
    if text.is_empty()
    {
        return out;
    }

    let mut state = ScanState::Free;
    let mut current = String::new();

    for ch in text.chars()
    {
        let (next, action) = step(state, ch);
        state = next;

        match action
        {
            Action::Keep => current.push(ch),
            Action::Skip =>
            {}
            Action::Split =>
            {
                out.push(
                    current
                        .trim()
                        .to_string(),
                );
                current.clear();
            }
        }
    }

    out.push(
        current
            .trim()
            .to_string(),
    );
    out
}
