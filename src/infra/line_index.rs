//! Newline index over LF-normalized text.
//!
//! - Single pass over bytes to record '\n' positions.
//! - 1-based external line numbers.
//! - O(1) line→offset start/end; binary search for offset→line.
//!
//! An empty buffer has 0 lines. A trailing '\n' opens one more (empty) line.

#[derive(Debug, Clone, Default)]
pub struct LineIndex
{
    /// Byte positions of every '\n' in the buffer.
    nl_positions: Vec<usize>,
    /// Total byte length of the buffer.
    len: usize,
}

impl LineIndex
{
    pub fn build(bytes: &[u8]) -> Self
    {
        let nl_positions = memchr::memchr_iter(b'\n', bytes).collect();
        Self { nl_positions, len: bytes.len() }
    }

    pub fn len(&self) -> usize
    {
        self.len
    }

    pub fn is_empty(&self) -> bool
    {
        self.len == 0
    }

    /// Empty buffer => 0 lines; else (#'\n' + 1).
    pub fn line_count(&self) -> usize
    {
        if self.len == 0 { 0 } else { self.nl_positions.len() + 1 }
    }

    /// Start offset of a 1-based line.
    pub fn start_of_line(
        &self,
        line1: usize,
    ) -> Option<usize>
    {
        if line1 == 0 || line1 > self.line_count()
        {
            return None;
        }
        if line1 == 1
        {
            return Some(0);
        }
        self.nl_positions
            .get(line1 - 2)
            .map(|&prev_nl| prev_nl + 1)
    }

    /// End offset (exclusive, newline excluded) of a 1-based line.
    pub fn end_of_line(
        &self,
        line1: usize,
    ) -> Option<usize>
    {
        if line1 == 0 || line1 > self.line_count()
        {
            return None;
        }
        Some(
            self.nl_positions
                .get(line1 - 1)
                .copied()
                .unwrap_or(self.len),
        )
    }

    /// 1-based line covering `offset`. A '\n' belongs to the line it ends.
    /// Returns 0 for empty buffers.
    pub fn line_of_offset(
        &self,
        offset: usize,
    ) -> usize
    {
        if self.len == 0
        {
            return 0;
        }
        // Number of '\n' strictly before `offset`.
        let before = self
            .nl_positions
            .partition_point(|&nl| nl < offset);
        before + 1
    }
}
