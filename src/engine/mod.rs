//! The scheduling engine and its broadcaster seam.
//!
//! # Usage
//!
//! ```
//! use festival_schedule::engine::SchedulingEngine;
//!
//! let engine = SchedulingEngine::default();
//! engine.add_performance("Beyond", "Rock", 98, 14, 16).unwrap();
//! engine.add_performance("Jay", "Pop", 100, 18, 20).unwrap();
//!
//! assert_eq!(engine.find_artist_genre("Jay").as_deref(), Some("Pop"));
//! assert_eq!(engine.hot_artists_ranking(1)[0].name, "Jay");
//! assert!(engine.add_performance("Late", "Indie", 40, 15, 17).is_err());
//! ```

mod broadcast;
mod scheduler;

pub use broadcast::{BroadcastError, Broadcaster};
pub use scheduler::SchedulingEngine;
