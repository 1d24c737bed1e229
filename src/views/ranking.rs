//! Popularity ranking.
//!
//! # Keying
//! One entry is recorded per successful booking, so an artist booked twice
//! appears twice. Each entry freezes the popularity observed at insertion;
//! later changes to the artist's popularity do not re-rank it.
//!
//! # Ordering
//! Descending by recorded popularity. Equal popularity: earlier insertion
//! first.

use std::cmp::Ordering;
use std::collections::BinaryHeap;
use std::sync::Arc;

use crate::models::{Artist, RankedArtist};

#[derive(Debug, Clone)]
struct RankEntry {
    popularity: i64,
    seq: u64,
    artist: Arc<Artist>,
}

impl PartialEq for RankEntry {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for RankEntry {}

impl PartialOrd for RankEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for RankEntry {
    fn cmp(&self, other: &Self) -> Ordering {
        // Max-heap: higher popularity first, then lower sequence first
        self.popularity
            .cmp(&other.popularity)
            .then_with(|| other.seq.cmp(&self.seq))
    }
}

/// Max-priority structure of artists by popularity.
#[derive(Debug, Clone, Default)]
pub struct PopularityRanking {
    heap: BinaryHeap<RankEntry>,
    next_seq: u64,
}

impl PopularityRanking {
    /// Creates an empty ranking.
    pub fn new() -> Self {
        Self::default()
    }

    /// Records an artist at its current popularity.
    pub fn add(&mut self, artist: Arc<Artist>) {
        let entry = RankEntry {
            popularity: artist.popularity(),
            seq: self.next_seq,
            artist,
        };
        self.next_seq += 1;
        self.heap.push(entry);
    }

    /// Returns the top `n` entries without disturbing the ranking.
    ///
    /// Length is `min(n, len)`; `n <= 0` yields an empty list.
    pub fn top_n(&self, n: i64) -> Vec<RankedArtist> {
        if n <= 0 {
            return Vec::new();
        }
        let n = usize::try_from(n).unwrap_or(usize::MAX);

        let mut scratch = self.heap.clone();
        let mut top = Vec::with_capacity(n.min(scratch.len()));
        while top.len() < n {
            match scratch.pop() {
                Some(entry) => top.push(RankedArtist::new(&entry.artist, entry.popularity)),
                None => break,
            }
        }
        top
    }

    /// Number of recorded entries.
    pub fn len(&self) -> usize {
        self.heap.len()
    }

    /// Returns `true` if nothing has been recorded.
    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }
}
