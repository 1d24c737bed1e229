//! In-memory scheduling engine for festival stages.
//!
//! Books artists into hour slots on a single timeline, rejecting overlaps,
//! and keeps three derived views in step with every booking: a popularity
//! ranking, a name lookup, and a time-ordered fan reminder queue.
//!
//! # Modules
//!
//! - **`models`**: Value types — `TimeSlot`, `Artist`, `Performance`,
//!   `FanReminder`, and the read-only views `TimelineEntry` / `RankedArtist`
//! - **`timeline`**: Booking-order timeline with conflict-checked insertion
//! - **`views`**: `ArtistDirectory`, `PopularityRanking`, `ReminderQueue`
//! - **`engine`**: `SchedulingEngine` and the `Broadcaster` seam
//! - **`validation`**: Invariant audit over live state
//! - **`config`**: `EngineConfig` (TOML + environment)
//!
//! # Time Model
//!
//! All times are integer hours supplied by the caller. Nothing reads the
//! wall clock, so every run is deterministic and replayable.

pub mod config;
pub mod engine;
pub mod error;
pub mod models;
pub mod timeline;
pub mod validation;
pub mod views;

pub use config::EngineConfig;
pub use engine::{BroadcastError, Broadcaster, SchedulingEngine};
pub use error::{EngineError, Result};
