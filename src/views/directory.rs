//! Artist name → current booking lookup.

use std::collections::HashMap;

use crate::models::{Performance, PerformanceId};

/// Maps each booked artist name to its most recent performance.
#[derive(Debug, Clone, Default)]
pub struct ArtistDirectory {
    entries: HashMap<String, PerformanceId>,
}

impl ArtistDirectory {
    /// Creates an empty directory.
    pub fn new() -> Self {
        Self::default()
    }

    /// Points the performance's artist name at this performance,
    /// replacing any earlier booking for the same name.
    pub fn register(&mut self, performance: &Performance) {
        self.entries
            .insert(performance.artist().name().to_string(), performance.id());
    }

    /// Booking currently registered for `name`.
    pub fn lookup(&self, name: &str) -> Option<PerformanceId> {
        self.entries.get(name).copied()
    }

    /// Drops the mapping for `name` only if it still points at `id`.
    ///
    /// Returns whether a mapping was removed.
    pub fn unregister_if(&mut self, name: &str, id: PerformanceId) -> bool {
        if self.entries.get(name) == Some(&id) {
            self.entries.remove(name);
            true
        } else {
            false
        }
    }

    /// Number of registered artists.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if no artist is registered.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// All `(name, performance)` pairs, in no particular order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, PerformanceId)> {
        self.entries.iter().map(|(name, id)| (name.as_str(), *id))
    }
}
