//! Storage layer for the czrain services.
//!
//! Provides:
//! - Per-date CSV file store for raw day tables (append-only, atomic writes)
//! - Daily dataset snapshot derived from the store for the dashboard
//! - Station metadata registry

pub mod daily;
pub mod day_file;
pub mod registry;
pub mod store;

pub use daily::DailyDataset;
pub use registry::StationRegistry;
pub use store::{DailyStore, WriteOutcome};
