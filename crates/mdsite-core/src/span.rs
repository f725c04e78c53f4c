//! Byte ranges pointing back into the source document.

use std::ops::Range;

/// Half-open byte range `start..end` in a source string.
///
/// ```rust
/// use mdsite_core::span::Span;
///
/// let doc = "# Title\n\nBody";
/// let span = Span::new(9, 13);
/// assert_eq!(span.slice(doc), "Body");
/// assert_eq!(span.len(), 4);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
pub struct Span {
    pub start: usize,
    pub end: usize,
}

impl Span {
    pub const fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    pub const fn len(&self) -> usize {
        self.end.saturating_sub(self.start)
    }

    pub const fn is_empty(&self) -> bool {
        self.end <= self.start
    }

    pub fn range(&self) -> Range<usize> {
        self.start..self.end
    }

    /// The text under this span. Panics if the span is out of bounds for
    /// `source` or splits a character.
    pub fn slice<'a>(&self, source: &'a str) -> &'a str {
        &source[self.range()]
    }

    /// Smallest span covering both.
    pub fn merge(self, other: Span) -> Span {
        Span::new(self.start.min(other.start), self.end.max(other.end))
    }
}
