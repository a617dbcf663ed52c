//! Source positions.
//!
//! The lexer reports byte offsets; humans want lines and columns. A
//! [`LineIndex`] records where each line starts as the lexer walks past
//! newlines, so turning an offset into a [`Position`] is a binary search
//! plus a character count within one line.

use std::fmt;

/// A location in the input: byte offset plus 1-based line and column.
///
/// Columns count characters, so a multi-byte character advances the column
/// by one.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
pub struct Position {
    pub offset: usize,
    pub line: usize,
    pub column: usize,
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line, self.column)
    }
}

/// A half-open byte range `start..end` of the input.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
pub struct Span {
    pub start: usize,
    pub end: usize,
}

impl Span {
    #[inline]
    pub const fn new(start: usize, end: usize) -> Self {
        Span { start, end }
    }

    #[inline]
    #[must_use]
    pub const fn len(&self) -> usize {
        self.end - self.start
    }

    #[inline]
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.start == self.end
    }
}

/// Offsets of line starts, filled in while the input is scanned.
///
/// # Examples
///
/// ```rust
/// use rod::position::LineIndex;
///
/// let input = "ab\ncd";
/// let mut index = LineIndex::new();
/// index.record_line_start(3);
///
/// let pos = index.locate(input, 4);
/// assert_eq!((pos.line, pos.column), (2, 2));
/// ```
#[derive(Clone, Debug)]
pub struct LineIndex {
    starts: Vec<usize>,
}

impl Default for LineIndex {
    fn default() -> Self {
        Self::new()
    }
}

impl LineIndex {
    /// Creates an index that knows only the first line.
    #[must_use]
    pub fn new() -> Self {
        LineIndex { starts: vec![0] }
    }

    /// Records that a line begins at `offset`, the byte after a newline.
    ///
    /// Offsets must be recorded in increasing order; a repeated or earlier
    /// offset is ignored.
    pub fn record_line_start(&mut self, offset: usize) {
        if self.starts.last().map_or(true, |&last| offset > last) {
            self.starts.push(offset);
        }
    }

    /// Number of lines seen so far.
    #[inline]
    #[must_use]
    pub fn line_count(&self) -> usize {
        self.starts.len()
    }

    /// Converts a byte offset into a [`Position`].
    ///
    /// `offset` must lie on a character boundary of `input` and must not be
    /// past the last recorded newline's line.
    #[must_use]
    pub fn locate(&self, input: &str, offset: usize) -> Position {
        let offset = offset.min(input.len());
        let line = self.starts.partition_point(|&start| start <= offset);
        let line_start = self.starts[line.saturating_sub(1)];
        let column = input
            .get(line_start..offset)
            .map_or(0, |prefix| prefix.chars().count())
            + 1;
        Position {
            offset,
            line: line.max(1),
            column,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn index_for(input: &str) -> LineIndex {
        let mut index = LineIndex::new();
        for (i, ch) in input.char_indices() {
            if ch == '\n' {
                index.record_line_start(i + 1);
            }
        }
        index
    }

    #[test]
    fn test_first_line() {
        let input = "[1, 2]";
        let index = index_for(input);
        assert_eq!(index.locate(input, 0).to_string(), "1:1");
        assert_eq!(index.locate(input, 5).to_string(), "1:6");
    }

    #[test]
    fn test_after_newlines() {
        let input = "[\n\t1,\n\t2,\n]";
        let index = index_for(input);
        assert_eq!(index.line_count(), 4);
        assert_eq!(index.locate(input, 2).to_string(), "2:1");
        assert_eq!(index.locate(input, 3).to_string(), "2:2");
        assert_eq!(index.locate(input, input.len() - 1).to_string(), "4:1");
    }

    #[test]
    fn test_columns_count_chars() {
        let input = "\"héllo\" x";
        let index = index_for(input);
        let x = input.find('x').unwrap();
        assert_eq!(index.locate(input, x).column, 9);
        assert_eq!(index.locate(input, x).offset, 9);
    }

    #[test]
    fn test_record_ignores_stale_offsets() {
        let mut index = LineIndex::new();
        index.record_line_start(4);
        index.record_line_start(4);
        index.record_line_start(2);
        assert_eq!(index.line_count(), 2);
    }

    #[test]
    fn test_span() {
        let span = Span::new(3, 7);
        assert_eq!(span.len(), 4);
        assert!(!span.is_empty());
        assert!(Span::new(2, 2).is_empty());
    }
}
