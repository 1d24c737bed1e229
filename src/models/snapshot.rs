//! Read-only views handed to callers and to the broadcaster.
//!
//! These are plain values detached from engine state: holding one never
//! keeps a lock or a timeline node alive.

use serde::{Deserialize, Serialize};

use super::{Artist, Performance, PerformanceId};

/// One timeline row, in booking order.
///
/// Serialized with the keys the live display expects
/// (`artist`, `startTime`, `endTime`, `imageUrl`, `masterpieceUrl`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimelineEntry {
    /// Zero-based position in the timeline.
    pub index: usize,
    pub id: PerformanceId,
    #[serde(rename = "artist")]
    pub artist_name: String,
    pub genre: String,
    #[serde(rename = "startTime")]
    pub start_hour: i64,
    #[serde(rename = "endTime")]
    pub end_hour: i64,
    /// Artist popularity at the time the view was taken.
    pub popularity: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub masterpiece_url: Option<String>,
}

impl TimelineEntry {
    /// Builds a row from a performance at the given position.
    pub fn from_performance(index: usize, performance: &Performance, with_media: bool) -> Self {
        let artist = performance.artist();
        let slot = performance.slot();
        let (image_url, masterpiece_url) = if with_media {
            (
                artist.media().image_url.clone(),
                artist.media().masterpiece_url.clone(),
            )
        } else {
            (None, None)
        };

        Self {
            index,
            id: performance.id(),
            artist_name: artist.name().to_string(),
            genre: artist.genre().to_string(),
            start_hour: slot.start(),
            end_hour: slot.end(),
            popularity: artist.popularity(),
            image_url,
            masterpiece_url,
        }
    }
}

/// One popularity ranking row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RankedArtist {
    pub name: String,
    pub genre: String,
    /// Popularity as recorded when the artist entered the ranking.
    pub popularity: i64,
}

impl RankedArtist {
    /// Ranking view of `artist` with the popularity recorded at booking time.
    pub fn new(artist: &Artist, recorded_popularity: i64) -> Self {
        Self {
            name: artist.name().to_string(),
            genre: artist.genre().to_string(),
            popularity: recorded_popularity,
        }
    }
}
