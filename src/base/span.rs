//! Source text positions and ranges.

use std::fmt;

// Re-export from text-size: every form and fact carries a TextRange
pub use text_size::TextRange;
pub use text_size::TextSize;

/// A line and column position in source text.
///
/// Both line and column are 0-indexed internally, but displayed as 1-indexed.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Default)]
pub struct LineCol {
    /// 0-indexed line number
    pub line: u32,
    /// 0-indexed column (in UTF-8 bytes, not characters)
    pub col: u32,
}

impl LineCol {
    /// Create a new LineCol position.
    #[inline]
    pub const fn new(line: u32, col: u32) -> Self {
        Self { line, col }
    }

    /// Get 1-indexed line number (for display).
    #[inline]
    pub const fn line_one_indexed(self) -> u32 {
        self.line + 1
    }

    /// Get 1-indexed column number (for display).
    #[inline]
    pub const fn col_one_indexed(self) -> u32 {
        self.col + 1
    }
}

impl fmt::Debug for LineCol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line_one_indexed(), self.col_one_indexed())
    }
}

impl fmt::Display for LineCol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line_one_indexed(), self.col_one_indexed())
    }
}

/// Index for converting between byte offsets and line/column positions.
///
/// Built once per [`SourceFile`](crate::syntax::SourceFile); declaration
/// ranges are byte offsets, and consumers (diagnostics, navigation) want
/// line/column.
#[derive(Clone, Debug)]
pub struct LineIndex {
    /// Byte offset of the start of each line
    line_starts: Vec<TextSize>,
}

impl LineIndex {
    /// Build a line index from source text.
    pub fn new(text: &str) -> Self {
        let mut line_starts = vec![TextSize::from(0)];

        for (offset, c) in text.char_indices() {
            if c == '\n' {
                line_starts.push(TextSize::from((offset + 1) as u32));
            }
        }

        Self { line_starts }
    }

    /// Convert a byte offset to a line/column position.
    pub fn line_col(&self, offset: TextSize) -> LineCol {
        let line = self
            .line_starts
            .partition_point(|&start| start <= offset)
            .saturating_sub(1);

        let line_start = self.line_starts[line];
        let col = offset - line_start;

        LineCol {
            line: line as u32,
            col: col.into(),
        }
    }

    /// Convert a line/column position back to a byte offset.
    ///
    /// Returns `None` if the line does not exist.
    pub fn offset(&self, line_col: LineCol) -> Option<TextSize> {
        let line_start = self.line_starts.get(line_col.line as usize)?;
        Some(*line_start + TextSize::from(line_col.col))
    }

    /// Get the number of lines.
    pub fn line_count(&self) -> usize {
        self.line_starts.len()
    }
}
