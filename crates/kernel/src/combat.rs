use crate::character::Character;
use glam::Vec3;
use serde::{Deserialize, Serialize};

/// Half-angle of the attack cone around a unit's facing, in radians (15°).
pub const FACING_CONE: f32 = 0.2618;

/// Result of a landed attack.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Hit {
    pub target: usize,
    pub damage: f32,
    pub remaining_hp: f32,
}

/// Whether `target` lies within `FACING_CONE` of `facing` as seen from `origin`.
///
/// A target standing exactly on `origin` has no direction and is never in
/// the cone.
pub fn in_facing_cone(origin: Vec3, facing: Vec3, target: Vec3) -> bool {
    let Some(to_target) = (target - origin).try_normalize() else {
        return false;
    };
    facing.dot(to_target).clamp(-1.0, 1.0).acos() <= FACING_CONE
}

/// Resolve an attack by `roster[attacker]`.
///
/// Scans the roster in order, skipping the attacker and its teammates, and
/// hits the first unit within range and inside the facing cone. Ties go to
/// roster order, not to the closest or weakest target. Does nothing when the
/// attacker has no action left or no target qualifies.
pub fn attack(roster: &mut [Character], attacker: usize) -> Option<Hit> {
    let (origin, facing, team, range, damage) = {
        let unit = roster.get(attacker)?;
        if unit.remaining_actions() == 0 {
            return None;
        }
        (
            unit.position(),
            unit.facing(),
            unit.team(),
            unit.stats().range,
            unit.stats().damage,
        )
    };

    let target = roster.iter().enumerate().position(|(i, other)| {
        i != attacker
            && other.team().opposes(team)
            && other.position().distance(origin) <= range
            && in_facing_cone(origin, facing, other.position())
    })?;

    roster[target].take_damage(damage);
    roster[attacker].spend_action();
    Some(Hit {
        target,
        damage,
        remaining_hp: roster[target].current_hp(),
    })
}
