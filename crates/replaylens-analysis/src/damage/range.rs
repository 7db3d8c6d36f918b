use std::ops::RangeInclusive;

use replaylens_model::Tick;
use serde::Serialize;

/// Inclusive tick window `[start, end]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct TickRange {
    pub start: Tick,
    pub end: Tick,
}

impl TickRange {
    #[must_use]
    pub fn new(start: Tick, end: Tick) -> Self {
        Self { start, end }
    }

    #[must_use]
    pub fn contains(&self, tick: Tick) -> bool {
        (self.start..=self.end).contains(&tick)
    }

    /// Ticks of this range that index into a series of length `len`.
    #[must_use]
    pub fn clip(&self, len: usize) -> RangeInclusive<Tick> {
        let end = self.end.min(len.saturating_sub(1));
        if len == 0 || self.start > end {
            // canonical empty inclusive range
            return 1..=0;
        }
        self.start..=end
    }
}

impl From<RangeInclusive<Tick>> for TickRange {
    fn from(range: RangeInclusive<Tick>) -> Self {
        let (start, end) = range.into_inner();
        Self { start, end }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clip_to_series_length() {
        assert_eq!(TickRange::new(0, 10).clip(3), 0..=2);
        assert_eq!(TickRange::new(2, 2).clip(3), 2..=2);
        assert!(TickRange::new(3, 10).clip(3).is_empty());
        assert!(TickRange::new(0, 0).clip(0).is_empty());
        assert!(TickRange::new(5, 1).clip(10).is_empty());
    }

    #[test]
    fn test_contains_is_inclusive() {
        let range = TickRange::from(3..=5);
        assert!(range.contains(3) && range.contains(5));
        assert!(!range.contains(6));
    }
}
