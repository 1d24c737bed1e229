//! Performance model.
//!
//! A performance binds one shared [`Artist`] to one owned [`TimeSlot`].
//! Both are fixed for the lifetime of the performance; only its position
//! in the timeline can change.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;

use super::{Artist, TimeSlot};

/// Stable identity of a booked performance.
///
/// Assigned by the engine on successful booking and never reused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PerformanceId(u64);

impl PerformanceId {
    /// Wraps a raw id.
    pub fn new(raw: u64) -> Self {
        Self(raw)
    }

    /// The raw id.
    pub fn get(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for PerformanceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "P{}", self.0)
    }
}

/// An artist's booking into one time slot.
#[derive(Debug, Clone)]
pub struct Performance {
    id: PerformanceId,
    artist: Arc<Artist>,
    slot: TimeSlot,
}

impl Performance {
    /// Creates a booking of `artist` for `slot`.
    pub fn new(id: PerformanceId, artist: Arc<Artist>, slot: TimeSlot) -> Self {
        Self { id, artist, slot }
    }

    /// This booking's id.
    pub fn id(&self) -> PerformanceId {
        self.id
    }

    /// The booked artist.
    pub fn artist(&self) -> &Arc<Artist> {
        &self.artist
    }

    /// The booked hour slot.
    pub fn slot(&self) -> TimeSlot {
        self.slot
    }

    /// Whether this performance's slot overlaps another's.
    pub fn conflicts_with(&self, other: &Performance) -> bool {
        self.slot.overlaps(&other.slot)
    }
}

impl fmt::Display for Performance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} performs at {}", self.artist.name(), self.slot)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn perf(id: u64, name: &str, start: i64, end: i64) -> Performance {
        Performance::new(
            PerformanceId::new(id),
            Arc::new(Artist::new(name, "Pop", 50)),
            TimeSlot::new(start, end).unwrap(),
        )
    }

    #[test]
    fn test_performance_accessors() {
        let p = perf(7, "Taylor", 20, 21);
        assert_eq!(p.id(), PerformanceId::new(7));
        assert_eq!(p.artist().name(), "Taylor");
        assert_eq!(p.slot().start(), 20);
        assert_eq!(p.to_string(), "Taylor performs at [20:00 - 21:00]");
    }

    #[test]
    fn test_conflicts_with() {
        let a = perf(1, "A", 14, 16);
        let b = perf(2, "B", 15, 17);
        let c = perf(3, "C", 16, 18);
        assert!(a.conflicts_with(&b));
        assert!(!a.conflicts_with(&c));
    }

    #[test]
    fn test_id_serializes_transparently() {
        let json = serde_json::to_string(&PerformanceId::new(42)).unwrap();
        assert_eq!(json, "42");
    }
}
