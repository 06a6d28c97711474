//! # Index News Events
//!
//! This crate defines index inclusion announcements (additions, migrations, deletions)
//! and the `EventSource` seam through which they reach the rest of the system.
//!
//! The demonstration feed stands in for a paid announcements API; `JsonFileFeed` reads
//! the same records from disk.

// Declare the modules that make up this crate.
pub mod error;
pub mod feed;
pub mod news;

// Re-export the core types to provide a clean public API.
pub use error::EventsError;
pub use feed::{EventSource, JsonFileFeed, MockNewsFeed};
pub use news::IndexEvent;
