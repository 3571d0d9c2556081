//! Half-open character intervals over a text buffer

use serde::Serialize;

/// A span `[start, end)` in a single buffer's character-offset space.
///
/// Ordering is lexicographic by `(start, end)`, so a `BTreeMap<Position, _>`
/// iterates spans in document order.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct Position {
    /// First character offset (inclusive)
    pub start: usize,
    /// Last character offset (exclusive)
    pub end: usize,
}

impl Position {
    /// Create a new position. Bounds are swapped if given in reverse so that
    /// `start <= end` always holds.
    pub const fn new(start: usize, end: usize) -> Self {
        if start <= end {
            Self { start, end }
        } else {
            Self {
                start: end,
                end: start,
            }
        }
    }

    /// True iff `[p0, p1]` lies entirely inside this span
    pub fn contains(&self, p0: usize, p1: usize) -> bool {
        self.start <= p0 && self.end >= p1
    }

    /// True iff this span lies entirely inside `other`
    pub fn within(&self, other: &Position) -> bool {
        other.contains(self.start, self.end)
    }

    /// True iff the two spans share any interior
    pub fn overlaps(&self, other: &Position) -> bool {
        self.within(other)
            || other.within(self)
            || self.interior_contains(other.start)
            || self.interior_contains(other.end)
    }

    /// Length with both bounds counted, i.e. `end - start + 1`.
    ///
    /// Host widgets rely on this arithmetic; use [`Position::span_len`] for the
    /// number of characters covered.
    pub fn length(&self) -> usize {
        self.end - self.start + 1
    }

    /// Number of characters covered by the half-open span
    pub fn span_len(&self) -> usize {
        self.end - self.start
    }

    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }

    /// Clamp both bounds to `[0, max]`
    pub fn clamp_to(&self, max: usize) -> Self {
        Self::new(self.start.min(max), self.end.min(max))
    }

    fn interior_contains(&self, x: usize) -> bool {
        self.start < x && x < self.end
    }
}

impl std::fmt::Display for Position {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}, {})", self.start, self.end)
    }
}
