//! Source location tracking.
//!
//! A [`Span`] is a byte range into the document a [`Cell`](crate::graph::Cell)
//! was loaded from. Cells built programmatically carry no span.

use std::{fmt, ops::Range};

/// A byte range in the source document.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Span {
    start: usize,
    end: usize,
}

impl Span {
    /// Create a new span from a byte range.
    ///
    /// # Examples
    ///
    /// ```
    /// use erdgen_core::span::Span;
    ///
    /// let span = Span::new(4..10);
    /// assert_eq!(span.len(), 6);
    /// ```
    pub fn new(range: Range<usize>) -> Self {
        Self {
            start: range.start,
            end: range.end.max(range.start),
        }
    }

    /// Get the start offset of the span
    pub fn start(&self) -> usize {
        self.start
    }

    /// Get the end offset of the span
    pub fn end(&self) -> usize {
        self.end
    }

    /// Get the length of the span
    pub fn len(&self) -> usize {
        self.end - self.start
    }

    /// Check if the span is empty
    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }

    /// Create a union of two spans (encompassing both)
    pub fn union(&self, other: Span) -> Span {
        Self {
            start: self.start.min(other.start),
            end: self.end.max(other.end),
        }
    }

    /// Convert the span back into a byte range.
    pub fn range(&self) -> Range<usize> {
        self.start..self.end
    }
}

impl From<Range<usize>> for Span {
    fn from(range: Range<usize>) -> Self {
        Self::new(range)
    }
}

impl fmt::Display for Span {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}..{}", self.start, self.end)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_span_accessors() {
        let span = Span::new(3..9);

        assert_eq!(span.start(), 3);
        assert_eq!(span.end(), 9);
        assert_eq!(span.len(), 6);
        assert!(!span.is_empty());
        assert_eq!(span.range(), 3..9);
    }

    #[test]
    fn test_span_inverted_range_is_empty() {
        #[allow(clippy::reversed_empty_ranges)]
        let span = Span::new(9..3);
        assert!(span.is_empty());
        assert_eq!(span.start(), 9);
    }

    #[test]
    fn test_span_union() {
        let a = Span::new(10..20);
        let b = Span::new(5..12);

        assert_eq!(a.union(b), Span::new(5..20));
        assert_eq!(b.union(a), Span::new(5..20));
    }

    #[test]
    fn test_span_display() {
        assert_eq!(Span::new(1..4).to_string(), "1..4");
    }
}
