//! Battle kernel: characters, combat, turn order and the per-frame tick.
//!
//! # Invariants
//! - `0 <= current_hp <= max_hp` for every unit.
//! - A unit only moves between points of equal ground height.
//! - The active index always names a unit in the roster.
//! - All state mutations flow through [`Battle`] and are logged as
//!   [`BattleEvent`]s.

pub mod battle;
pub mod character;
pub mod combat;
pub mod scenario;
pub mod turn;

pub use battle::{Battle, BattleConfig, BattleError, BattleEvent, TURN_STEP};
pub use character::{Character, Role, RoleStats};
pub use combat::{FACING_CONE, Hit, attack, in_facing_cone};
pub use scenario::deploy;
pub use skirmish_camera::STEP_SPEED;
pub use turn::TurnController;
