//! Engine error taxonomy.
//!
//! Every variant is a local, recoverable condition. A rejected mutation
//! leaves all engine structures exactly as they were before the call.

use thiserror::Error;

use crate::engine::BroadcastError;
use crate::models::PerformanceId;

#[derive(Debug, Error)]
pub enum EngineError {
    #[error("Invalid time slot: start hour {start} must be before end hour {end}")]
    InvalidTimeSlot { start: i64, end: i64 },

    #[error("Booking conflicts with performance {conflicting}")]
    Conflict { conflicting: PerformanceId },

    #[error("Unknown artist: {name}")]
    UnknownArtist { name: String },

    #[error("Performance not found: {0}")]
    PerformanceNotFound(PerformanceId),

    #[error("Duplicate performance id: {0}")]
    DuplicatePerformance(PerformanceId),

    #[error("Timeline is full ({capacity} performances)")]
    TimelineFull { capacity: usize },

    #[error(transparent)]
    Broadcast(#[from] BroadcastError),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Configuration error: {0}")]
    Config(String),
}

impl EngineError {
    /// Short status code, matching the wire vocabulary of the engine contract.
    pub fn code(&self) -> &'static str {
        match self {
            EngineError::InvalidTimeSlot { .. } => "INVALID_TIME_SLOT",
            EngineError::Conflict { .. } => "CONFLICT",
            EngineError::UnknownArtist { .. } => "UNKNOWN_ARTIST",
            EngineError::PerformanceNotFound(_) => "NOT_FOUND",
            EngineError::DuplicatePerformance(_) => "DUPLICATE_PERFORMANCE",
            EngineError::TimelineFull { .. } => "TIMELINE_FULL",
            EngineError::Broadcast(_) => "BROADCAST_ERROR",
            EngineError::Serialization(_) => "SERIALIZATION_ERROR",
            EngineError::Config(_) => "CONFIG_ERROR",
        }
    }
}

pub type Result<T> = std::result::Result<T, EngineError>;
