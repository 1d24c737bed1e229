//! Snapshot publishing capability.

use thiserror::Error;

/// Failure reported by a [`Broadcaster`].
///
/// Never affects engine state; the engine logs it and moves on.
#[derive(Debug, Clone, Error)]
#[error("Broadcast failed: {0}")]
pub struct BroadcastError(pub String);

impl BroadcastError {
    /// Creates an error with the given reason.
    pub fn new(reason: impl Into<String>) -> Self {
        Self(reason.into())
    }
}

/// Pushes engine state to remote observers.
///
/// The engine calls [`publish`](Broadcaster::publish) synchronously after
/// each successful timeline mutation, outside its state lock, with the
/// JSON timeline snapshot. Implementations own their transport and client
/// set and should return quickly.
///
/// Plain closures work too:
///
/// ```
/// use festival_schedule::engine::{BroadcastError, SchedulingEngine};
/// use std::sync::Arc;
///
/// let engine = SchedulingEngine::default().with_broadcaster(Arc::new(
///     |snapshot: &str| -> Result<(), BroadcastError> {
///         assert!(snapshot.starts_with('['));
///         Ok(())
///     },
/// ));
/// engine.add_performance("Beyond", "Rock", 98, 14, 16).unwrap();
/// ```
pub trait Broadcaster: Send + Sync {
    /// Delivers one JSON timeline snapshot.
    fn publish(&self, snapshot: &str) -> Result<(), BroadcastError>;
}

impl<F> Broadcaster for F
where
    F: Fn(&str) -> Result<(), BroadcastError> + Send + Sync,
{
    fn publish(&self, snapshot: &str) -> Result<(), BroadcastError> {
        self(snapshot)
    }
}
