//! Fan reminder models.

use serde::{Deserialize, Serialize};
use std::sync::Arc;

use super::{Artist, PerformanceId};

/// A fan's request to be notified about a booked performance.
#[derive(Debug, Clone)]
pub struct FanReminder {
    /// Subscribing fan.
    pub fan_id: String,
    /// Performance the reminder refers to.
    pub performance: PerformanceId,
    /// Artist of that performance.
    pub artist: Arc<Artist>,
    /// Hour at which the reminder becomes due.
    pub reminder_time: i64,
}

impl FanReminder {
    /// Creates a reminder for `fan_id` due at `reminder_time`.
    pub fn new(
        fan_id: impl Into<String>,
        performance: PerformanceId,
        artist: Arc<Artist>,
        reminder_time: i64,
    ) -> Self {
        Self {
            fan_id: fan_id.into(),
            performance,
            artist,
            reminder_time,
        }
    }

    /// Converts into the delivered notice.
    pub fn into_notice(self) -> ReminderNotice {
        ReminderNotice {
            fan_id: self.fan_id,
            artist_name: self.artist.name().to_string(),
            reminder_time: self.reminder_time,
        }
    }
}

/// A due reminder emitted by reminder processing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReminderNotice {
    pub fan_id: String,
    pub artist_name: String,
    /// The hour the reminder was originally set for.
    pub reminder_time: i64,
}
