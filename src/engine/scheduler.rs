//! Scheduling engine.
//!
//! Orchestrates the timeline and its derived views behind one lock.
//!
//! # Booking
//! 1. Build the slot (rejects `start >= end` before anything is locked).
//! 2. Take the write lock; check capacity; scan the timeline for a conflict.
//! 3. On success: timeline, directory and ranking are updated together.
//! 4. Stamp the state with a new version, serialize the snapshot under a
//!    downgraded (read) lock, release it, then hand the snapshot to the
//!    broadcaster.
//!
//! A rejected booking touches nothing and publishes nothing.
//!
//! # Concurrency
//! Mutations hold the write lock for their whole update. Queries take the
//! read lock, so they observe either the state before a mutation or the
//! state after it, never a partial update.
//!
//! Publishes are serialized by a separate lock and gated on the state
//! version: a snapshot older than one already published is dropped, so the
//! last snapshot a broadcaster sees always describes the latest state.
//! The state lock is never held during `publish`, so a broadcaster may
//! call the engine's queries (e.g. `current_state_json`) from inside it.
//! It must not call mutations or `broadcast_current_state`.

use parking_lot::{Mutex, RwLock, RwLockWriteGuard};
use std::fmt;
use std::sync::Arc;
use tracing::{debug, info, warn};

use super::Broadcaster;
use crate::config::EngineConfig;
use crate::error::{EngineError, Result};
use crate::models::{
    Artist, ArtistMedia, Performance, PerformanceId, RankedArtist, ReminderNotice, TimeSlot,
    TimelineEntry,
};
use crate::timeline::Timeline;
use crate::validation::{validate_state, ValidationResult};
use crate::views::{ArtistDirectory, PopularityRanking, ReminderQueue};

#[derive(Debug, Default)]
struct EngineState {
    timeline: Timeline,
    directory: ArtistDirectory,
    ranking: PopularityRanking,
    reminders: ReminderQueue,
    next_id: u64,
    /// Bumped by every mutation that publishes.
    version: u64,
}

impl EngineState {
    fn entries(&self, with_media: bool) -> Vec<TimelineEntry> {
        self.timeline
            .iter()
            .enumerate()
            .map(|(index, p)| TimelineEntry::from_performance(index, p, with_media))
            .collect()
    }

    fn booking_of(&self, artist_name: &str) -> Result<PerformanceId> {
        self.directory
            .lookup(artist_name)
            .ok_or_else(|| EngineError::UnknownArtist {
                name: artist_name.to_string(),
            })
    }

    fn current_performance(&self, artist_name: &str) -> Option<&Performance> {
        self.directory
            .lookup(artist_name)
            .and_then(|id| self.timeline.get(id))
    }
}

/// In-memory festival scheduling engine.
///
/// # Example
/// ```
/// use festival_schedule::engine::SchedulingEngine;
///
/// let engine = SchedulingEngine::default();
/// engine.add_performance("Beyond", "Rock", 98, 14, 16).unwrap();
/// engine.add_fan_reminder("Fan_001", "Beyond", 13).unwrap();
///
/// let due = engine.process_reminders(13);
/// assert_eq!(due[0].artist_name, "Beyond");
/// ```
pub struct SchedulingEngine {
    state: RwLock<EngineState>,
    config: EngineConfig,
    broadcaster: Option<Arc<dyn Broadcaster>>,
    /// Version of the last snapshot handed to the broadcaster.
    published: Mutex<u64>,
}

impl SchedulingEngine {
    /// Creates an engine with no broadcaster attached.
    pub fn new(config: EngineConfig) -> Self {
        Self {
            state: RwLock::new(EngineState::default()),
            config,
            broadcaster: None,
            published: Mutex::new(0),
        }
    }

    /// Attaches the broadcaster that receives timeline snapshots.
    pub fn with_broadcaster(mut self, broadcaster: Arc<dyn Broadcaster>) -> Self {
        self.broadcaster = Some(broadcaster);
        self
    }

    /// Active configuration.
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    // ---- Mutations ----

    /// Books an artist into `[start_hour, end_hour)`.
    ///
    /// # Errors
    /// - [`EngineError::InvalidTimeSlot`] if `start_hour >= end_hour`
    /// - [`EngineError::Conflict`] naming the first overlapping booking
    /// - [`EngineError::TimelineFull`] if the configured capacity is reached
    pub fn add_performance(
        &self,
        artist_name: impl Into<String>,
        genre: impl Into<String>,
        popularity: i64,
        start_hour: i64,
        end_hour: i64,
    ) -> Result<PerformanceId> {
        self.book(
            Artist::new(artist_name, genre, popularity),
            start_hour,
            end_hour,
        )
    }

    /// Same as [`add_performance`](Self::add_performance), carrying media
    /// references through to snapshots.
    pub fn add_performance_with_media(
        &self,
        artist_name: impl Into<String>,
        genre: impl Into<String>,
        popularity: i64,
        media: ArtistMedia,
        start_hour: i64,
        end_hour: i64,
    ) -> Result<PerformanceId> {
        self.book(
            Artist::new(artist_name, genre, popularity).with_media(media),
            start_hour,
            end_hour,
        )
    }

    fn book(&self, artist: Artist, start_hour: i64, end_hour: i64) -> Result<PerformanceId> {
        let slot = TimeSlot::new(start_hour, end_hour)?;
        let mut guard = self.state.write();
        let state = &mut *guard;

        if state.timeline.len() >= self.config.max_performances {
            warn!(
                artist = %artist.name(),
                capacity = self.config.max_performances,
                "booking rejected: timeline full"
            );
            return Err(EngineError::TimelineFull {
                capacity: self.config.max_performances,
            });
        }

        let id = PerformanceId::new(state.next_id);
        let artist = Arc::new(artist);
        let performance = Performance::new(id, artist.clone(), slot);
        let registered = performance.clone();

        if let Err(err) = state.timeline.insert(performance) {
            warn!(artist = %artist.name(), slot = %slot, error = %err, "booking rejected");
            return Err(err);
        }
        state.next_id += 1;
        state.directory.register(&registered);
        state.ranking.add(artist.clone());

        info!(artist = %artist.name(), performance = %id, slot = %slot, "performance booked");
        self.publish_after(guard);
        Ok(id)
    }

    /// Sets a reminder for a fan of a currently booked artist.
    pub fn add_fan_reminder(
        &self,
        fan_id: impl Into<String>,
        artist_name: &str,
        reminder_hour: i64,
    ) -> Result<()> {
        let mut guard = self.state.write();
        let state = &mut *guard;

        let performance = match state.current_performance(artist_name) {
            Some(p) => p,
            None => {
                warn!(artist = %artist_name, "reminder rejected: artist not booked");
                return Err(EngineError::UnknownArtist {
                    name: artist_name.to_string(),
                });
            }
        };
        let id = performance.id();
        let artist = performance.artist().clone();

        let fan_id = fan_id.into();
        debug!(fan = %fan_id, artist = %artist_name, hour = reminder_hour, "reminder set");
        state.reminders.add(fan_id, id, artist, reminder_hour);
        Ok(())
    }

    /// Delivers every pending reminder due at or before `current_hour`,
    /// ascending by reminder hour. Delivered reminders are gone for good.
    pub fn process_reminders(&self, current_hour: i64) -> Vec<ReminderNotice> {
        let due = self.state.write().reminders.process_due(current_hour);
        debug!(hour = current_hour, delivered = due.len(), "reminders processed");
        due
    }

    /// Swaps the timeline positions of two artists' current bookings.
    pub fn exchange_positions(&self, artist_a: &str, artist_b: &str) -> Result<()> {
        let guard = self.state.write();
        let a = guard.booking_of(artist_a)?;
        let b = guard.booking_of(artist_b)?;
        self.exchange_locked(guard, a, b)
    }

    /// Swaps the timeline positions of two performances by id.
    pub fn exchange_performances(&self, a: PerformanceId, b: PerformanceId) -> Result<()> {
        let guard = self.state.write();
        self.exchange_locked(guard, a, b)
    }

    fn exchange_locked(
        &self,
        mut guard: RwLockWriteGuard<'_, EngineState>,
        a: PerformanceId,
        b: PerformanceId,
    ) -> Result<()> {
        guard.timeline.exchange_positions(a, b)?;
        info!(first = %a, second = %b, "performances exchanged");
        self.publish_after(guard);
        Ok(())
    }

    /// Cancels a booking.
    ///
    /// If the artist's directory entry pointed at this booking, it falls
    /// back to the artist's latest remaining booking, if any. Ranking
    /// entries and pending reminders are kept.
    pub fn remove_performance(&self, id: PerformanceId) -> Result<Performance> {
        let mut guard = self.state.write();
        let state = &mut *guard;

        let removed = state.timeline.remove(id)?;
        let name = removed.artist().name();
        if state.directory.unregister_if(name, id) {
            let fallback = state
                .timeline
                .iter()
                .filter(|p| p.artist().name() == name)
                .max_by_key(|p| p.id());
            if let Some(p) = fallback {
                state.directory.register(p);
            }
        }

        info!(artist = %name, performance = %id, "performance removed");
        self.publish_after(guard);
        Ok(removed)
    }

    /// Updates the popularity of an artist's current booking.
    ///
    /// Every booking owns its own `Artist`, so earlier bookings under the
    /// same name keep their popularity. Snapshots reflect the new value; the ranking keeps the value it
    /// recorded at booking time.
    pub fn update_popularity(&self, artist_name: &str, popularity: i64) -> Result<()> {
        let guard = self.state.write();
        let performance =
            guard
                .current_performance(artist_name)
                .ok_or_else(|| EngineError::UnknownArtist {
                    name: artist_name.to_string(),
                })?;
        performance.artist().set_popularity(popularity);

        info!(artist = %artist_name, popularity, "popularity updated");
        self.publish_after(guard);
        Ok(())
    }

    // ---- Queries ----

    /// Genre of the artist's current booking; `None` if never booked.
    pub fn find_artist_genre(&self, artist_name: &str) -> Option<String> {
        let state = self.state.read();
        let genre = state
            .current_performance(artist_name)
            .map(|p| p.artist().genre().to_string());
        debug!(artist = %artist_name, found = genre.is_some(), "genre lookup");
        genre
    }

    /// The artist's current booking as a timeline row.
    pub fn performance_by_artist(&self, artist_name: &str) -> Option<TimelineEntry> {
        let state = self.state.read();
        let id = state.directory.lookup(artist_name)?;
        let index = state.timeline.position_of(id)?;
        let performance = state.timeline.get(id)?;
        Some(TimelineEntry::from_performance(
            index,
            performance,
            self.config.snapshot_media,
        ))
    }

    /// Top `n` artists by popularity recorded at booking time.
    pub fn hot_artists_ranking(&self, n: i64) -> Vec<RankedArtist> {
        self.state.read().ranking.top_n(n)
    }

    /// All bookings in timeline order.
    pub fn timeline_snapshot(&self) -> Vec<TimelineEntry> {
        self.state.read().entries(self.config.snapshot_media)
    }

    /// The JSON document published to the broadcaster.
    ///
    /// Also serves broadcasters that greet newly connected clients with
    /// the current state.
    pub fn current_state_json(&self) -> Result<String> {
        let entries = self.timeline_snapshot();
        Ok(serde_json::to_string(&entries)?)
    }

    /// Publishes the current state on demand.
    ///
    /// Unlike the automatic publish after a mutation, failures are
    /// returned to the caller.
    pub fn broadcast_current_state(&self) -> Result<()> {
        let Some(broadcaster) = &self.broadcaster else {
            return Ok(());
        };
        let state = self.state.read();
        let version = state.version;
        let json = serde_json::to_string(&state.entries(self.config.snapshot_media))?;
        drop(state);

        let mut published = self.published.lock();
        if version < *published {
            debug!(version, latest = *published, "newer snapshot already published");
            return Ok(());
        }
        *published = version;
        broadcaster.publish(&json)?;
        Ok(())
    }

    /// Number of booked performances.
    pub fn performance_count(&self) -> usize {
        self.state.read().timeline.len()
    }

    /// Number of reminders not yet delivered.
    pub fn pending_reminders(&self) -> usize {
        self.state.read().reminders.len()
    }

    /// Hour of the earliest undelivered reminder.
    pub fn next_reminder_due(&self) -> Option<i64> {
        self.state.read().reminders.next_due()
    }

    /// Number of ranking entries (one per successful booking).
    pub fn ranking_len(&self) -> usize {
        self.state.read().ranking.len()
    }

    /// Verifies the no-overlap and directory invariants on live state.
    pub fn audit(&self) -> ValidationResult {
        let state = self.state.read();
        validate_state(&state.timeline, &state.directory)
    }

    // ---- Publishing ----

    /// Versions and serializes the post-mutation state, releases the
    /// lock, then publishes unless a newer snapshot already went out.
    /// Broadcaster failures are logged only.
    fn publish_after(&self, mut guard: RwLockWriteGuard<'_, EngineState>) {
        guard.version += 1;
        let Some(broadcaster) = self.broadcaster.as_ref() else {
            return;
        };
        if !self.config.publish_snapshots {
            return;
        }

        let state = RwLockWriteGuard::downgrade(guard);
        let version = state.version;
        let payload = serde_json::to_string(&state.entries(self.config.snapshot_media));
        drop(state);

        let json = match payload {
            Ok(json) => json,
            Err(err) => {
                warn!(error = %err, "snapshot serialization failed");
                return;
            }
        };

        let mut published = self.published.lock();
        if version <= *published {
            debug!(version, latest = *published, "stale snapshot dropped");
            return;
        }
        *published = version;
        if let Err(err) = broadcaster.publish(&json) {
            warn!(error = %err, version, "snapshot publish failed");
        }
    }
}

impl Default for SchedulingEngine {
    fn default() -> Self {
        Self::new(EngineConfig::default())
    }
}

impl fmt::Debug for SchedulingEngine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SchedulingEngine")
            .field("performances", &self.performance_count())
            .field("config", &self.config)
            .field("broadcaster", &self.broadcaster.is_some())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::BroadcastError;

    #[derive(Default)]
    struct Recorder {
        published: Mutex<Vec<String>>,
    }

    impl Broadcaster for Recorder {
        fn publish(&self, snapshot: &str) -> std::result::Result<(), BroadcastError> {
            self.published.lock().push(snapshot.to_string());
            Ok(())
        }
    }

    fn engine_with_recorder() -> (SchedulingEngine, Arc<Recorder>) {
        let recorder = Arc::new(Recorder::default());
        let engine = SchedulingEngine::default().with_broadcaster(recorder.clone());
        (engine, recorder)
    }

    #[test]
    fn test_booking_assigns_sequential_ids() {
        let engine = SchedulingEngine::default();
        let a = engine.add_performance("A", "Rock", 1, 1, 2).unwrap();
        assert!(engine.add_performance("X", "Rock", 1, 1, 2).is_err());
        let b = engine.add_performance("B", "Rock", 1, 2, 3).unwrap();
        assert_eq!(a, PerformanceId::new(0));
        assert_eq!(b, PerformanceId::new(1));
    }

    #[test]
    fn test_invalid_slot_touches_nothing() {
        let (engine, recorder) = engine_with_recorder();
        let err = engine.add_performance("A", "Rock", 1, 5, 5).unwrap_err();
        assert_eq!(err.code(), "INVALID_TIME_SLOT");
        assert_eq!(engine.performance_count(), 0);
        assert_eq!(engine.ranking_len(), 0);
        assert!(recorder.published.lock().is_empty());
    }

    #[test]
    fn test_capacity_limit() {
        let engine = SchedulingEngine::new(EngineConfig::default().with_max_performances(1));
        engine.add_performance("A", "Rock", 1, 1, 2).unwrap();
        let err = engine.add_performance("B", "Rock", 1, 2, 3).unwrap_err();
        assert!(matches!(err, EngineError::TimelineFull { capacity: 1 }));
        assert_eq!(engine.performance_count(), 1);
        assert_eq!(engine.find_artist_genre("B"), None);
    }

    #[test]
    fn test_publish_disabled() {
        let recorder = Arc::new(Recorder::default());
        let engine = SchedulingEngine::new(EngineConfig::default().with_publish_snapshots(false))
            .with_broadcaster(recorder.clone());
        engine.add_performance("A", "Rock", 1, 1, 2).unwrap();
        assert!(recorder.published.lock().is_empty());

        // Manual broadcast ignores the flag
        engine.broadcast_current_state().unwrap();
        assert_eq!(recorder.published.lock().len(), 1);
    }

    #[test]
    fn test_reminder_operations_do_not_publish() {
        let (engine, recorder) = engine_with_recorder();
        engine.add_performance("A", "Rock", 1, 14, 16).unwrap();
        engine.add_fan_reminder("fan", "A", 13).unwrap();
        engine.process_reminders(20);
        assert_eq!(recorder.published.lock().len(), 1);
    }

    #[test]
    fn test_remove_falls_back_to_previous_booking() {
        let engine = SchedulingEngine::default();
        let first = engine.add_performance("A", "Rock", 1, 10, 11).unwrap();
        let second = engine.add_performance("A", "Jazz", 1, 12, 13).unwrap();
        assert_eq!(engine.find_artist_genre("A").as_deref(), Some("Jazz"));

        engine.remove_performance(second).unwrap();
        assert_eq!(engine.find_artist_genre("A").as_deref(), Some("Rock"));
        assert_eq!(engine.performance_by_artist("A").unwrap().id, first);

        engine.remove_performance(first).unwrap();
        assert_eq!(engine.find_artist_genre("A"), None);
        assert!(engine.audit().is_ok());
        // Ranking is keyed per booking and survives removal
        assert_eq!(engine.ranking_len(), 2);
    }

    #[test]
    fn test_remove_older_booking_keeps_directory() {
        let engine = SchedulingEngine::default();
        let first = engine.add_performance("A", "Rock", 1, 10, 11).unwrap();
        let second = engine.add_performance("A", "Jazz", 1, 12, 13).unwrap();
        engine.remove_performance(first).unwrap();
        assert_eq!(engine.performance_by_artist("A").unwrap().id, second);
        assert!(matches!(
            engine.remove_performance(first),
            Err(EngineError::PerformanceNotFound(_))
        ));
    }

    #[test]
    fn test_update_popularity_staleness() {
        let engine = SchedulingEngine::default();
        engine.add_performance("Low", "Folk", 10, 1, 2).unwrap();
        engine.add_performance("High", "Rock", 90, 2, 3).unwrap();

        engine.update_popularity("Low", 500).unwrap();

        let top = engine.hot_artists_ranking(2);
        assert_eq!(top[0].name, "High");
        assert_eq!(top[1].popularity, 10);

        let snapshot = engine.timeline_snapshot();
        assert_eq!(snapshot[0].popularity, 500);

        assert!(matches!(
            engine.update_popularity("Ghost", 1),
            Err(EngineError::UnknownArtist { .. })
        ));
    }

    #[test]
    fn test_exchange_by_unknown_artist() {
        let engine = SchedulingEngine::default();
        engine.add_performance("A", "Rock", 1, 1, 2).unwrap();
        let err = engine.exchange_positions("A", "Nobody").unwrap_err();
        assert_eq!(err.code(), "UNKNOWN_ARTIST");
    }

    #[test]
    fn test_performance_by_artist_reports_position() {
        let engine = SchedulingEngine::default();
        engine.add_performance("A", "Rock", 1, 1, 2).unwrap();
        engine.add_performance("B", "Pop", 2, 2, 3).unwrap();
        let entry = engine.performance_by_artist("B").unwrap();
        assert_eq!(entry.index, 1);
        assert_eq!(entry.genre, "Pop");
        assert!(engine.performance_by_artist("C").is_none());
    }

    #[test]
    fn test_debug_output() {
        let engine = SchedulingEngine::default();
        let text = format!("{engine:?}");
        assert!(text.contains("SchedulingEngine"));
        assert!(text.contains("performances: 0"));
    }
}
