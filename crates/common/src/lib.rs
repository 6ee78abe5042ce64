//! Shared value types used across the skirmish crates.
//!
//! # Invariants
//! - Types here carry no simulation rules; they are plain data.

mod types;

pub use types::{Team, Transform, horizontal};
