//! Derived views over the booked timeline.
//!
//! - **`ArtistDirectory`**: name → most recent booking
//! - **`PopularityRanking`**: top-N artists by popularity
//! - **`ReminderQueue`**: fan reminders due by a given hour
//!
//! None of these own performances; they refer to them by `PerformanceId`
//! or share the `Arc<Artist>`.

mod directory;
mod ranking;
mod reminders;

pub use directory::ArtistDirectory;
pub use ranking::PopularityRanking;
pub use reminders::ReminderQueue;
