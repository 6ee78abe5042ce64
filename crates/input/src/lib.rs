//! Input mapped to a per-tick snapshot.
//!
//! The frame loop feeds raw key and pointer events into [`InputState`]; held
//! keys become intents, other keys become [`Action`]s. The simulation reads a
//! snapshot once per tick and never sees raw events.
//!
//! # Invariants
//! - A key press sets its intent and a release clears it.
//! - Pointer and scroll deltas accumulate until [`InputState::end_tick`].

pub mod action;
mod edge;
mod state;

pub use action::{Action, Key, UnknownKey};
pub use edge::{EDGE_MARGIN, edge_pan};
pub use state::InputState;
