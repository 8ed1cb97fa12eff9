//! Selection ranges and host selection requests

use crate::error::{EditorError, Result};

/// A validated selection in char offsets, `from <= to`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SelectionRange {
    pub from: usize,
    pub to: usize,
}

impl SelectionRange {
    /// Create a range, ordering the bounds
    pub fn new(a: usize, b: usize) -> Self {
        Self {
            from: a.min(b),
            to: a.max(b),
        }
    }

    /// An empty range (a cursor) at `pos`
    pub fn caret(pos: usize) -> Self {
        Self { from: pos, to: pos }
    }

    /// Validate raw host bounds against a document of `len` chars.
    ///
    /// Negative, inverted or out-of-bounds requests are rejected.
    pub fn checked(from: i64, to: i64, len: usize) -> Result<Self> {
        let invalid = EditorError::InvalidSelection { from, to, len };
        if from < 0 || to < 0 || from > to {
            return Err(invalid);
        }
        let (from_u, to_u) = match (usize::try_from(from), usize::try_from(to)) {
            (Ok(f), Ok(t)) => (f, t),
            _ => return Err(invalid),
        };
        if to_u > len {
            return Err(invalid);
        }
        Ok(Self { from: from_u, to: to_u })
    }

    /// Number of chars selected
    pub fn len(&self) -> usize {
        self.to - self.from
    }

    /// Check if this is a cursor with nothing selected
    pub fn is_empty(&self) -> bool {
        self.from == self.to
    }

    /// Clamp both bounds to a document of `len` chars
    pub fn clamped(self, len: usize) -> Self {
        Self {
            from: self.from.min(len),
            to: self.to.min(len),
        }
    }
}

/// A selection as requested by the host, not yet validated
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SelectionRequest {
    pub from: i64,
    pub to: i64,
}

impl SelectionRequest {
    pub fn new(from: i64, to: i64) -> Self {
        Self { from, to }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_checked_accepts_valid() {
        assert_eq!(SelectionRange::checked(2, 5, 10).unwrap(), SelectionRange { from: 2, to: 5 });
        assert_eq!(SelectionRange::checked(0, 0, 0).unwrap(), SelectionRange::caret(0));
        assert_eq!(SelectionRange::checked(10, 10, 10).unwrap(), SelectionRange::caret(10));
    }

    #[test]
    fn test_checked_rejects_invalid() {
        for (from, to) in [(5, 2), (-1, 3), (0, 11), (-3, -1), (11, 11)] {
            let err = SelectionRange::checked(from, to, 10).unwrap_err();
            assert!(matches!(err, EditorError::InvalidSelection { len: 10, .. }));
        }
    }

    #[test]
    fn test_new_orders_bounds() {
        let range = SelectionRange::new(7, 3);
        assert_eq!((range.from, range.to), (3, 7));
        assert_eq!(range.len(), 4);
        assert!(!range.is_empty());
        assert!(SelectionRange::caret(4).is_empty());
    }

    #[test]
    fn test_clamped() {
        assert_eq!(SelectionRange::new(3, 9).clamped(5), SelectionRange::new(3, 5));
        assert_eq!(SelectionRange::new(6, 9).clamped(5), SelectionRange::caret(5));
    }
}
