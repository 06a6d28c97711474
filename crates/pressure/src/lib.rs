//! # Mechanical Buying Pressure
//!
//! Estimates how hard passive index funds must buy a stock that is joining, or migrating
//! into, an index, and expresses that buy as days of the stock's average volume.
//!
//! ## Architectural Principles
//!
//! - **Pure logic:** no I/O. Reference data arrives as an `IndexTable` built from
//!   configuration, so tests can substitute synthetic tables.
//! - **Stateless calculation:** `PressureCalculator` only reads its immutable table, so one
//!   instance can be shared freely across callers.
//!
//! ## Public API
//!
//! - `IndexTable`: index profiles plus the explicit default-index fallback policy.
//! - `PressureCalculator`: computes a `PressureResult` for one event.
//! - `assess_squeeze`: relative-volume check for algorithmic front-running.
//! - `PressureError`: the error type for this crate.

pub mod calculator;
pub mod error;
pub mod flow;
pub mod index_table;

pub use calculator::{PressureCalculator, round_2dp};
pub use error::PressureError;
pub use flow::{SqueezeAssessment, assess_squeeze, relative_volume};
pub use index_table::{IndexTable, Resolution};
