//! In-memory test doubles.
//!
//! Not intended for production use; enabled for this crate's own tests and
//! for downstream crates via the `testing` feature.

pub mod trace;
