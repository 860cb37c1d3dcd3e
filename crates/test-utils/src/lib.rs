//! Shared test utilities for the czrain workspace.
//!
//! Provides fixture day tables, seeded temporary stores and a small
//! station registry, so service tests do not re-invent sample data.
//!
//! Add to your crate's `Cargo.toml`:
//!
//! ```toml
//! [dev-dependencies]
//! test-utils = { path = "../test-utils" }
//! ```

pub mod fixtures;

pub use fixtures::*;
