pub mod enums;
pub mod error;
pub mod structs;

// Re-export the core types to provide a clean public API.
pub use enums::{IndexEventType, PressureIntensity, TradePhase};
pub use error::CoreError;
pub use structs::{IndexProfile, PressureEvent, PressureResult, default_index_position};
