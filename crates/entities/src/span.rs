//! Half-open time intervals.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Half-open interval `[start, end)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeSpan {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

impl TimeSpan {
    pub fn new(start: DateTime<Utc>, end: DateTime<Utc>) -> Self {
        Self { start, end }
    }

    /// Returns true if the span has positive length.
    pub fn is_valid(&self) -> bool {
        self.start < self.end
    }

    /// Returns true if the two spans share at least one instant.
    ///
    /// A span ending exactly when the other starts does not overlap it.
    pub fn overlaps(&self, other: &TimeSpan) -> bool {
        self.start < other.end && other.start < self.end
    }

    pub fn duration(&self) -> chrono::Duration {
        self.end - self.start
    }
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;

    use super::*;

    fn at(hour: u32, minute: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 3, 14, hour, minute, 0).unwrap()
    }

    #[test]
    fn test_overlapping_spans() {
        let a = TimeSpan::new(at(10, 0), at(11, 0));
        let b = TimeSpan::new(at(10, 30), at(11, 30));

        assert!(a.overlaps(&b));
        assert!(b.overlaps(&a));
    }

    #[test]
    fn test_touching_spans_do_not_overlap() {
        let a = TimeSpan::new(at(10, 0), at(11, 0));
        let b = TimeSpan::new(at(11, 0), at(12, 0));

        assert!(!a.overlaps(&b));
        assert!(!b.overlaps(&a));
    }

    #[test]
    fn test_contained_span_overlaps() {
        let outer = TimeSpan::new(at(9, 0), at(12, 0));
        let inner = TimeSpan::new(at(10, 0), at(10, 15));

        assert!(outer.overlaps(&inner));
        assert!(inner.overlaps(&outer));
    }

    #[test]
    fn test_validity() {
        assert!(TimeSpan::new(at(9, 0), at(9, 1)).is_valid());
        assert!(!TimeSpan::new(at(9, 0), at(9, 0)).is_valid());
        assert!(!TimeSpan::new(at(9, 1), at(9, 0)).is_valid());
    }
}
