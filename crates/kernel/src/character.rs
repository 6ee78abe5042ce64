use glam::{Quat, Vec3};
use serde::{Deserialize, Serialize};
use skirmish_camera::{AttachedCamera, STEP_SPEED};
use skirmish_common::{Team, horizontal};
use skirmish_terrain::Terrain;

/// Unit class. Fixes the combat stats at creation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Role {
    Spearman,
    Guardian,
    Archer,
}

/// Per-role constants.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RoleStats {
    pub max_hp: f32,
    pub max_movement: f32,
    pub max_actions: u32,
    pub range: f32,
    pub damage: f32,
}

impl Role {
    pub const ALL: [Role; 3] = [Role::Spearman, Role::Guardian, Role::Archer];

    pub fn stats(self) -> RoleStats {
        let (max_hp, max_movement, range, damage) = match self {
            Role::Spearman => (100.0, 2.0, 0.3, 50.0),
            Role::Guardian => (200.0, 1.0, 0.2, 35.0),
            Role::Archer => (70.0, 2.5, 5.0, 50.0),
        };
        RoleStats {
            max_hp,
            max_movement,
            max_actions: 1,
            range,
            damage,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Role::Spearman => "spearman",
            Role::Guardian => "guardian",
            Role::Archer => "archer",
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.pad(self.name())
    }
}

/// One unit on the battlefield, with its own first-person camera.
#[derive(Debug, Clone, PartialEq)]
pub struct Character {
    role: Role,
    team: Team,
    stats: RoleStats,
    current_hp: f32,
    remaining_movement: f32,
    remaining_actions: u32,
    position: Vec3,
    /// Unit length, horizontal.
    facing: Vec3,
    speed: f32,
    camera: AttachedCamera,
}

impl Character {
    /// Place a fresh unit at `position` facing `facing`.
    ///
    /// `facing` is flattened onto the ground plane; a vertical or zero vector
    /// falls back to +Z.
    pub fn spawn(role: Role, team: Team, position: Vec3, facing: Vec3) -> Self {
        let facing = horizontal(facing).try_normalize().unwrap_or(Vec3::Z);
        let stats = role.stats();
        Self {
            role,
            team,
            stats,
            current_hp: stats.max_hp,
            remaining_movement: stats.max_movement,
            remaining_actions: stats.max_actions,
            position,
            facing,
            speed: STEP_SPEED,
            camera: AttachedCamera::attach(position, position + facing),
        }
    }

    pub fn role(&self) -> Role {
        self.role
    }

    pub fn team(&self) -> Team {
        self.team
    }

    pub fn stats(&self) -> &RoleStats {
        &self.stats
    }

    pub fn current_hp(&self) -> f32 {
        self.current_hp
    }

    pub fn remaining_movement(&self) -> f32 {
        self.remaining_movement
    }

    pub fn remaining_actions(&self) -> u32 {
        self.remaining_actions
    }

    pub fn position(&self) -> Vec3 {
        self.position
    }

    pub fn facing(&self) -> Vec3 {
        self.facing
    }

    pub fn camera(&self) -> &AttachedCamera {
        &self.camera
    }

    /// Both budgets spent.
    pub fn is_exhausted(&self) -> bool {
        self.remaining_movement <= 0.0 && self.remaining_actions == 0
    }

    /// Walk one step along the facing direction.
    ///
    /// The step is only taken when the ground height at the destination
    /// equals the height here, so units never climb onto or drop off a
    /// plateau. Returns whether the unit moved.
    pub fn step(&mut self, terrain: &Terrain) -> bool {
        if self.remaining_movement <= 0.0 {
            return false;
        }
        let candidate = self.position + self.speed * self.facing;
        if !same_level(terrain, self.position, candidate) {
            tracing::debug!(role = %self.role, team = %self.team, "step blocked by height change");
            return false;
        }
        self.position = candidate;
        self.spend_step();
        self.camera.follow(self.position);
        true
    }

    /// First-person walk along `direction` (usually the camera's view or
    /// right vector), flattened onto the ground plane.
    ///
    /// Same height gate as [`step`](Self::step), tested against where the
    /// camera would actually end up. The camera moves first and the unit
    /// takes its X/Z from it.
    pub fn step_first_person(&mut self, terrain: &Terrain, direction: Vec3) -> bool {
        if self.remaining_movement <= 0.0 {
            return false;
        }
        let Some(direction) = direction.try_normalize() else {
            return false;
        };
        let flat = horizontal(direction);
        let candidate = self.position + self.speed * flat;
        if !same_level(terrain, self.position, candidate) {
            tracing::debug!(role = %self.role, team = %self.team, "first-person step blocked by height change");
            return false;
        }
        self.camera.translate_horizontal(direction);
        let eye = self.camera.position();
        self.position.x = eye.x;
        self.position.z = eye.z;
        self.spend_step();
        true
    }

    /// Rotate the facing about world up by `angle` radians and point the
    /// attached camera along it.
    pub fn turn(&mut self, angle: f32) {
        let facing = Quat::from_rotation_y(angle) * self.facing;
        self.facing = horizontal(facing).try_normalize().unwrap_or(self.facing);
        self.camera.point_along(self.facing);
    }

    /// First-person look. The facing follows the camera's horizontal view.
    pub fn look(&mut self, dx: f32, dy: f32) {
        self.camera.look(dx, dy);
        if let Some(facing) = horizontal(self.camera.view()).try_normalize() {
            self.facing = facing;
        }
    }

    /// Subtract `delta` (negative heals) and clamp into `[0, max_hp]`.
    pub fn take_damage(&mut self, delta: f32) {
        self.current_hp = (self.current_hp - delta).clamp(0.0, self.stats.max_hp);
    }

    /// Spend one action if any remain.
    pub(crate) fn spend_action(&mut self) -> bool {
        if self.remaining_actions == 0 {
            return false;
        }
        self.remaining_actions -= 1;
        true
    }

    /// Restore the movement and action budgets.
    pub fn end_turn(&mut self) {
        self.remaining_movement = self.stats.max_movement;
        self.remaining_actions = self.stats.max_actions;
    }

    fn spend_step(&mut self) {
        self.remaining_movement = (self.remaining_movement - self.speed).max(0.0);
    }
}

fn same_level(terrain: &Terrain, from: Vec3, to: Vec3) -> bool {
    terrain.height(from) == terrain.height(to)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use skirmish_camera::EYE_HEIGHT;
    use skirmish_terrain::Plateau;

    fn field() -> Terrain {
        Terrain::new(
            Vec3::new(4.0, 2.0, 4.0),
            vec![Plateau::new(Vec3::new(0.0, 0.1, 0.5), Vec3::new(1.0, 0.2, 0.4))],
        )
        .unwrap()
    }

    fn spearman_at(position: Vec3, facing: Vec3) -> Character {
        Character::spawn(Role::Spearman, Team::One, position, facing)
    }

    #[test]
    fn role_table() {
        assert_eq!(Role::Guardian.stats().max_hp, 200.0);
        assert_eq!(Role::Archer.stats().range, 5.0);
        assert_eq!(Role::Spearman.stats().max_movement, 2.0);
        assert!(Role::ALL.iter().all(|r| r.stats().max_actions == 1));
    }

    #[test]
    fn spawn_fills_budgets_and_mounts_camera() {
        let c = spearman_at(Vec3::new(1.0, 0.0, -1.0), Vec3::new(0.0, 0.0, 2.0));
        assert_eq!(c.current_hp(), 100.0);
        assert_eq!(c.remaining_movement(), 2.0);
        assert_eq!(c.remaining_actions(), 1);
        assert_eq!(c.facing(), Vec3::Z);
        assert_eq!(c.camera().position(), Vec3::new(1.0, EYE_HEIGHT, -1.0));
    }

    #[test]
    fn degenerate_facing_falls_back() {
        let c = spearman_at(Vec3::ZERO, Vec3::Y);
        assert_eq!(c.facing(), Vec3::Z);
    }

    #[test]
    fn step_moves_and_spends_budget() {
        let terrain = field();
        let mut c = spearman_at(Vec3::new(-1.0, 0.0, -1.0), Vec3::X);
        assert!(c.step(&terrain));
        assert!((c.position().x - (-1.0 + STEP_SPEED)).abs() < 1e-6);
        assert!((c.remaining_movement() - (2.0 - STEP_SPEED)).abs() < 1e-6);
        assert_eq!(c.camera().position().x, c.position().x);
    }

    #[test]
    fn step_refuses_to_climb_plateau() {
        let terrain = field();
        // Plateau footprint starts at z = 0.3.
        let mut c = spearman_at(Vec3::new(0.0, 0.0, 0.295), Vec3::Z);
        let before = c.position();
        assert!(!c.step(&terrain));
        assert_eq!(c.position(), before);
        assert_eq!(c.remaining_movement(), 2.0);
    }

    #[test]
    fn step_refuses_to_leave_land() {
        let terrain = field();
        let mut c = spearman_at(Vec3::new(1.895, 0.0, 0.0), Vec3::X);
        assert!(!c.step(&terrain));
    }

    #[test]
    fn movement_budget_runs_out() {
        let terrain = Terrain::flat(Vec3::new(40.0, 2.0, 40.0)).unwrap();
        let mut c = Character::spawn(Role::Guardian, Team::Two, Vec3::ZERO, Vec3::X);
        let steps = std::iter::from_fn(|| c.step(&terrain).then_some(())).count();
        // Budget 1.0 at 0.01 per step; rounding may add one step.
        assert!((100..=101).contains(&steps), "took {steps} steps");
        assert_eq!(c.remaining_movement(), 0.0);
        assert!(!c.step(&terrain));
    }

    #[test]
    fn first_person_step_ignores_pitch_and_syncs_position() {
        let terrain = field();
        let mut c = spearman_at(Vec3::new(-1.0, 0.0, -1.0), Vec3::X);
        let start_eye = c.camera().position();
        assert!(c.step_first_person(&terrain, Vec3::new(1.0, -1.0, 0.0)));
        assert_eq!(c.camera().position().y, start_eye.y);
        assert_eq!(c.position().x, c.camera().position().x);
        assert!(c.position().x > -1.0);
        assert!(!c.step_first_person(&terrain, Vec3::ZERO));
    }

    #[test]
    fn first_person_step_is_height_gated() {
        let terrain = field();
        let mut c = spearman_at(Vec3::new(0.0, 0.0, 0.295), Vec3::X);
        assert!(!c.step_first_person(&terrain, Vec3::Z));
        assert!(c.step_first_person(&terrain, Vec3::NEG_Z));
    }

    #[test]
    fn turn_rotates_facing_and_camera() {
        let mut c = spearman_at(Vec3::ZERO, Vec3::Z);
        c.turn(std::f32::consts::FRAC_PI_2);
        assert!((c.facing() - Vec3::X).length() < 1e-6);
        assert!((c.camera().view() - Vec3::X).length() < 1e-6);
        assert!((c.facing().length() - 1.0).abs() < 1e-6);
    }

    #[test]
    fn look_drags_facing_along() {
        let mut c = spearman_at(Vec3::ZERO, Vec3::Z);
        c.look(100.0, 30.0);
        let expected = horizontal(c.camera().view()).normalize();
        assert!((c.facing() - expected).length() < 1e-6);
        assert_eq!(c.facing().y, 0.0);
    }

    #[test]
    fn end_turn_restores_budgets() {
        let terrain = field();
        let mut c = spearman_at(Vec3::new(-1.0, 0.0, -1.0), Vec3::X);
        c.step(&terrain);
        assert!(c.spend_action());
        assert!(!c.spend_action());
        c.end_turn();
        assert_eq!(c.remaining_movement(), c.stats().max_movement);
        assert_eq!(c.remaining_actions(), c.stats().max_actions);
    }

    #[test]
    fn hp_reaches_zero_without_removal() {
        let mut c = spearman_at(Vec3::ZERO, Vec3::Z);
        c.take_damage(250.0);
        assert_eq!(c.current_hp(), 0.0);
        c.take_damage(-30.0);
        assert_eq!(c.current_hp(), 30.0);
        c.take_damage(-1000.0);
        assert_eq!(c.current_hp(), 100.0);
    }

    proptest! {
        #[test]
        fn hp_stays_in_range(hits in prop::collection::vec(-500.0f32..500.0, 0..20)) {
            let mut c = Character::spawn(Role::Archer, Team::Two, Vec3::ZERO, Vec3::Z);
            for hit in hits {
                c.take_damage(hit);
                prop_assert!(c.current_hp() >= 0.0 && c.current_hp() <= c.stats().max_hp);
            }
        }

        #[test]
        fn steps_never_cross_height_changes(
            x in -1.5f32..1.5,
            z in -1.5f32..1.5,
            angle in 0.0f32..std::f32::consts::TAU,
        ) {
            let terrain = field();
            let mut c = spearman_at(Vec3::new(x, 0.0, z), Vec3::Z);
            c.turn(angle);
            let level = terrain.height(c.position());
            for _ in 0..50 {
                c.step(&terrain);
                prop_assert_eq!(terrain.height(c.position()), level);
            }
        }
    }
}
