//! Scheduling domain models.
//!
//! Provides the value types the engine stores and returns.
//!
//! # Ownership
//!
//! | Type | Owned by | Shared with |
//! |------|----------|-------------|
//! | `TimeSlot` | its `Performance` | copied into views |
//! | `Artist` | nobody exclusively (`Arc`) | performances, ranking, reminders |
//! | `Performance` | the `Timeline` | referenced elsewhere by `PerformanceId` |

mod artist;
mod performance;
mod reminder;
mod snapshot;
mod time_slot;

pub use artist::{Artist, ArtistMedia};
pub use performance::{Performance, PerformanceId};
pub use reminder::{FanReminder, ReminderNotice};
pub use snapshot::{RankedArtist, TimelineEntry};
pub use time_slot::TimeSlot;
