//! Time slot model.
//!
//! # Time Model
//! All times are whole hours on the festival clock. The consumer defines
//! what hour 0 means (e.g., midnight of the festival day).

use serde::Serialize;
use std::fmt;

use crate::error::{EngineError, Result};

/// A booked interval `[start, end)` in hours.
///
/// Half-open: includes start, excludes end, so back-to-back slots such as
/// `[14, 16)` and `[16, 18)` do not overlap. The only way to obtain a
/// `TimeSlot` is [`TimeSlot::new`], which rejects empty or inverted ranges.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct TimeSlot {
    start: i64,
    end: i64,
}

impl TimeSlot {
    /// Creates a slot, failing with [`EngineError::InvalidTimeSlot`]
    /// unless `start < end`.
    pub fn new(start: i64, end: i64) -> Result<Self> {
        if start >= end {
            return Err(EngineError::InvalidTimeSlot { start, end });
        }
        Ok(Self { start, end })
    }

    /// Start hour (inclusive).
    #[inline]
    pub fn start(&self) -> i64 {
        self.start
    }

    /// End hour (exclusive).
    #[inline]
    pub fn end(&self) -> i64 {
        self.end
    }

    /// Length of the slot in hours.
    #[inline]
    pub fn duration(&self) -> u64 {
        self.end.abs_diff(self.start)
    }

    /// Whether an hour falls within this slot.
    #[inline]
    pub fn contains(&self, hour: i64) -> bool {
        hour >= self.start && hour < self.end
    }

    /// Whether two slots overlap.
    pub fn overlaps(&self, other: &Self) -> bool {
        self.start < other.end && self.end > other.start
    }
}

impl fmt::Display for TimeSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{:02}:00 - {:02}:00]", self.start, self.end)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_slot() {
        let slot = TimeSlot::new(14, 16).unwrap();
        assert_eq!(slot.start(), 14);
        assert_eq!(slot.end(), 16);
        assert_eq!(slot.duration(), 2);
        assert_eq!(slot.to_string(), "[14:00 - 16:00]");
    }

    #[test]
    fn test_duration_spans_full_range() {
        let slot = TimeSlot::new(i64::MIN, i64::MAX).unwrap();
        assert_eq!(slot.duration(), u64::MAX);
        assert_eq!(TimeSlot::new(-2, 3).unwrap().duration(), 5);
    }

    #[test]
    fn test_rejects_empty_and_inverted() {
        assert!(matches!(
            TimeSlot::new(16, 16),
            Err(EngineError::InvalidTimeSlot { start: 16, end: 16 })
        ));
        assert!(matches!(
            TimeSlot::new(18, 14),
            Err(EngineError::InvalidTimeSlot { .. })
        ));
    }

    #[test]
    fn test_contains_is_half_open() {
        let slot = TimeSlot::new(14, 16).unwrap();
        assert!(slot.contains(14));
        assert!(slot.contains(15));
        assert!(!slot.contains(16));
        assert!(!slot.contains(13));
    }

    #[test]
    fn test_overlap() {
        let a = TimeSlot::new(14, 16).unwrap();
        let b = TimeSlot::new(16, 18).unwrap();
        let c = TimeSlot::new(15, 17).unwrap();
        let d = TimeSlot::new(10, 20).unwrap();

        assert!(!a.overlaps(&b));
        assert!(!b.overlaps(&a));
        assert!(a.overlaps(&c));
        assert!(c.overlaps(&b));
        // Containment counts as overlap in both directions
        assert!(a.overlaps(&d));
        assert!(d.overlaps(&a));
    }
}
