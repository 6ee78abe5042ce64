//! Developer tooling: read-only battle inspection for HUDs and reports.
//!
//! # Invariants
//! - Inspection never mutates the battle.

mod inspector;

pub use inspector::{BattleInspector, BattleSummary, UnitInfo};
