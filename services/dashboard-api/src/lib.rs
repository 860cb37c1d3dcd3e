//! Dashboard API library.
//!
//! Exposed as a library so integration tests can exercise the handlers
//! directly.

pub mod handlers;
pub mod selection;
pub mod state;
