use crate::character::Character;
use crate::combat::{self, Hit};
use crate::scenario;
use crate::turn::TurnController;
use glam::Vec3;
use serde::{Deserialize, Serialize};
use skirmish_camera::{Camera, CameraMode, FreeCamera, OrbitCamera};
use skirmish_input::{Action, InputState};
use skirmish_terrain::{GenerationParams, Terrain, TerrainError, TerrainGenerator};

/// Facing rotation per tick while a turn key is held, in radians.
pub const TURN_STEP: f32 = 0.1;

/// A record of one change to the battle.
///
/// The log is append-only between drains; front ends read it for reports and
/// status lines.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum BattleEvent {
    /// The active unit ended a tick somewhere new.
    Moved { unit: usize, position: Vec3 },
    Attacked {
        attacker: usize,
        target: usize,
        damage: f32,
        remaining_hp: f32,
    },
    TurnPassed { from: usize, to: usize },
    CameraModeChanged { from: CameraMode, to: CameraMode },
}

impl std::fmt::Display for BattleEvent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Moved { unit, position } => write!(
                f,
                "unit {unit} moved to ({:.2}, {:.2}, {:.2})",
                position.x, position.y, position.z
            ),
            Self::Attacked {
                attacker,
                target,
                damage,
                remaining_hp,
            } => write!(
                f,
                "unit {attacker} hit unit {target} for {damage:.0} ({remaining_hp:.0} hp left)"
            ),
            Self::TurnPassed { from, to } => write!(f, "turn passed from unit {from} to unit {to}"),
            Self::CameraModeChanged { from, to } => write!(f, "camera {from} -> {to}"),
        }
    }
}

#[derive(Debug, thiserror::Error, PartialEq)]
pub enum BattleError {
    #[error("a battle needs at least one unit")]
    EmptyRoster,
    #[error("active unit {active} is out of range for a roster of {len}")]
    ActiveOutOfRange { active: usize, len: usize },
    #[error("terrain generation failed: {0}")]
    Terrain(#[from] TerrainError),
}

/// How to set up a session.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BattleConfig {
    /// Terrain seed; `None` draws one from entropy.
    pub seed: Option<u64>,
    pub camera: CameraMode,
    pub generation: GenerationParams,
}

/// Everything one session mutates: terrain, roster, turn order, cameras and
/// the event log.
///
/// Advanced by [`tick`](Self::tick) once per frame, with discrete commands
/// fed through [`handle_action`](Self::handle_action) between ticks.
#[derive(Debug, Clone)]
pub struct Battle {
    terrain: Terrain,
    seed: Option<u64>,
    roster: Vec<Character>,
    turns: TurnController,
    mode: CameraMode,
    orbit: OrbitCamera,
    free: FreeCamera,
    tick: u64,
    event_log: Vec<BattleEvent>,
}

impl Battle {
    /// Generate terrain from the config and deploy both teams.
    pub fn new(config: &BattleConfig) -> Result<Self, BattleError> {
        let seed = config.seed.unwrap_or_else(TerrainGenerator::entropy_seed);
        let mut generator = TerrainGenerator::with_params(seed, config.generation)?;
        let terrain = generator.generate();
        let roster = scenario::deploy(&terrain);
        let mut battle = Self::with_roster(terrain, roster, 0)?;
        battle.seed = Some(seed);
        battle.mode = config.camera;
        tracing::info!(
            seed,
            units = battle.roster.len(),
            camera = %battle.mode,
            "battle ready"
        );
        Ok(battle)
    }

    /// Battle over a hand-built terrain and roster, in third-person.
    pub fn with_roster(
        terrain: Terrain,
        roster: Vec<Character>,
        active: usize,
    ) -> Result<Self, BattleError> {
        if roster.is_empty() {
            return Err(BattleError::EmptyRoster);
        }
        let turns = TurnController::new(roster.len(), active).ok_or(
            BattleError::ActiveOutOfRange {
                active,
                len: roster.len(),
            },
        )?;
        let orbit = OrbitCamera::new();
        let free = FreeCamera::new(orbit.position(), Vec3::ZERO);
        Ok(Self {
            terrain,
            seed: None,
            roster,
            turns,
            mode: CameraMode::default(),
            orbit,
            free,
            tick: 0,
            event_log: Vec::new(),
        })
    }

    pub fn terrain(&self) -> &Terrain {
        &self.terrain
    }

    /// Seed the terrain came from, if it was generated.
    pub fn seed(&self) -> Option<u64> {
        self.seed
    }

    pub fn roster(&self) -> &[Character] {
        &self.roster
    }

    pub fn active_index(&self) -> usize {
        self.turns.active()
    }

    pub fn active_unit(&self) -> &Character {
        &self.roster[self.turns.active()]
    }

    pub fn turns(&self) -> &TurnController {
        &self.turns
    }

    pub fn camera_mode(&self) -> CameraMode {
        self.mode
    }

    pub fn orbit(&self) -> &OrbitCamera {
        &self.orbit
    }

    pub fn free_camera(&self) -> &FreeCamera {
        &self.free
    }

    /// The camera the current mode renders through.
    pub fn active_camera(&self) -> &dyn Camera {
        match self.mode {
            CameraMode::ThirdPerson => &self.orbit,
            CameraMode::FirstPerson => self.active_unit().camera(),
            CameraMode::FreeFly => &self.free,
        }
    }

    pub fn tick_count(&self) -> u64 {
        self.tick
    }

    pub fn events(&self) -> &[BattleEvent] {
        &self.event_log
    }

    pub fn drain_events(&mut self) -> Vec<BattleEvent> {
        std::mem::take(&mut self.event_log)
    }

    /// Advance one frame: pointer look, zoom, held intents for the current
    /// camera mode, then the end-of-turn check.
    pub fn tick(&mut self, input: &InputState) {
        self.tick += 1;

        if input.look != glam::Vec2::ZERO {
            self.look(input.look.x, input.look.y);
        }
        if input.scroll != 0.0 {
            self.orbit.zoom(input.scroll);
        }

        let active = self.turns.active();
        let before = self.roster[active].position();
        match self.mode {
            CameraMode::ThirdPerson => self.apply_third_person(input),
            CameraMode::FirstPerson => self.apply_first_person(input),
            CameraMode::FreeFly => self.apply_free_fly(input),
        }
        let after = self.roster[active].position();
        if after != before {
            self.event_log.push(BattleEvent::Moved {
                unit: active,
                position: after,
            });
        }

        if self.turns.should_end(&self.roster[active]) {
            self.pass_turn();
        }
    }

    /// Apply a discrete command. Returns `false` for commands that belong to
    /// the front end (projection, HUD, quit).
    pub fn handle_action(&mut self, action: Action) -> bool {
        match action {
            Action::Attack => {
                self.attack();
            }
            Action::PassTurn => {
                self.pass_turn();
            }
            Action::TogglePerson => self.set_camera_mode(self.mode.toggle_person()),
            Action::FreeFly => self.set_camera_mode(CameraMode::FreeFly),
            Action::Perspective | Action::Orthographic | Action::ToggleHud | Action::Quit => {
                return false;
            }
        }
        true
    }

    /// Route a pointer drag to the camera the current mode controls.
    pub fn look(&mut self, dx: f32, dy: f32) {
        match self.mode {
            CameraMode::ThirdPerson => self.orbit.look(dx, dy),
            CameraMode::FirstPerson => {
                let active = self.turns.active();
                self.roster[active].look(dx, dy);
            }
            CameraMode::FreeFly => self.free.look(dx, dy),
        }
    }

    /// The active unit attacks along its facing.
    pub fn attack(&mut self) -> Option<Hit> {
        let attacker = self.turns.active();
        let hit = combat::attack(&mut self.roster, attacker);
        match hit {
            Some(hit) => {
                tracing::info!(
                    attacker,
                    target = hit.target,
                    damage = hit.damage,
                    remaining_hp = hit.remaining_hp,
                    "attack landed"
                );
                self.event_log.push(BattleEvent::Attacked {
                    attacker,
                    target: hit.target,
                    damage: hit.damage,
                    remaining_hp: hit.remaining_hp,
                });
            }
            None => tracing::debug!(attacker, "attack found no target"),
        }
        hit
    }

    /// End the active unit's turn, move to the next unit and center the
    /// orbit camera on it.
    pub fn pass_turn(&mut self) -> usize {
        let from = self.turns.active();
        let to = self.turns.pass(&mut self.roster);
        self.orbit.focus(self.roster[to].position());
        tracing::info!(from, to, round = self.turns.round(), "turn passed");
        self.event_log.push(BattleEvent::TurnPassed { from, to });
        to
    }

    pub fn set_camera_mode(&mut self, mode: CameraMode) {
        if mode == self.mode {
            return;
        }
        let from = self.mode;
        self.mode = mode;
        tracing::debug!(%from, to = %mode, "camera mode changed");
        self.event_log
            .push(BattleEvent::CameraModeChanged { from, to: mode });
    }

    fn apply_third_person(&mut self, input: &InputState) {
        if input.pan != glam::Vec2::ZERO {
            let (forward, right) = self.orbit.pan_axes();
            self.orbit
                .move_target(right * input.pan.x + forward * input.pan.y);
        }

        let unit = &mut self.roster[self.turns.active()];
        if input.left {
            unit.turn(TURN_STEP);
        }
        if input.right {
            unit.turn(-TURN_STEP);
        }
        if input.forward {
            unit.step(&self.terrain);
        }
    }

    fn apply_first_person(&mut self, input: &InputState) {
        let unit = &mut self.roster[self.turns.active()];
        let view = unit.camera().view();
        let right = unit.camera().right();
        if input.forward {
            unit.step_first_person(&self.terrain, view);
        }
        if input.backward {
            unit.step_first_person(&self.terrain, -view);
        }
        if input.left {
            unit.step_first_person(&self.terrain, -right);
        }
        if input.right {
            unit.step_first_person(&self.terrain, right);
        }
    }

    fn apply_free_fly(&mut self, input: &InputState) {
        if input.forward {
            self.free.move_forward();
        }
        if input.backward {
            self.free.move_backward();
        }
        if input.left {
            self.free.move_left();
        }
        if input.right {
            self.free.move_right();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::character::Role;
    use skirmish_common::Team;
    use skirmish_input::Key;

    fn duel() -> Battle {
        let terrain = Terrain::flat(Vec3::new(10.0, 2.0, 10.0)).unwrap();
        let roster = vec![
            Character::spawn(Role::Spearman, Team::One, Vec3::ZERO, Vec3::Z),
            Character::spawn(
                Role::Guardian,
                Team::Two,
                Vec3::new(0.0, 0.0, 0.2),
                Vec3::NEG_Z,
            ),
        ];
        Battle::with_roster(terrain, roster, 0).unwrap()
    }

    fn held(key: Key) -> InputState {
        let mut input = InputState::new();
        input.key(key, true);
        input
    }

    #[test]
    fn rejects_bad_rosters() {
        let terrain = Terrain::flat(Vec3::ONE).unwrap();
        assert_eq!(
            Battle::with_roster(terrain.clone(), Vec::new(), 0).unwrap_err(),
            BattleError::EmptyRoster
        );
        let roster = vec![Character::spawn(Role::Archer, Team::One, Vec3::ZERO, Vec3::Z)];
        assert_eq!(
            Battle::with_roster(terrain, roster, 1).unwrap_err(),
            BattleError::ActiveOutOfRange { active: 1, len: 1 }
        );
    }

    #[test]
    fn seeded_battles_match() {
        let config = BattleConfig {
            seed: Some(7),
            ..BattleConfig::default()
        };
        let a = Battle::new(&config).unwrap();
        let b = Battle::new(&config).unwrap();
        assert_eq!(a.terrain(), b.terrain());
        assert_eq!(a.roster(), b.roster());
        assert_eq!(a.seed(), Some(7));
        assert_eq!(a.roster().len(), 6);
    }

    #[test]
    fn config_camera_is_applied() {
        let config = BattleConfig {
            seed: Some(1),
            camera: CameraMode::FreeFly,
            ..BattleConfig::default()
        };
        let battle = Battle::new(&config).unwrap();
        assert_eq!(battle.camera_mode(), CameraMode::FreeFly);
        assert!(battle.events().is_empty());
    }

    #[test]
    fn events_read_as_sentences() {
        let mut battle = duel();
        battle.attack();
        battle.pass_turn();
        let lines: Vec<String> = battle.events().iter().map(ToString::to_string).collect();
        assert_eq!(lines[0], "unit 0 hit unit 1 for 50 (150 hp left)");
        assert_eq!(lines[1], "turn passed from unit 0 to unit 1");
    }

    #[test]
    fn config_reads_partial_json() {
        let config: BattleConfig = serde_json::from_str(r#"{"seed": 3}"#).unwrap();
        assert_eq!(config.seed, Some(3));
        assert_eq!(config.camera, CameraMode::ThirdPerson);
    }

    #[test]
    fn bad_generation_config_is_an_error() {
        let config: BattleConfig = serde_json::from_str(
            r#"{"seed": 3, "generation": {"min_aspect": 2.0, "max_aspect": 1.0}}"#,
        )
        .unwrap();
        assert_eq!(
            Battle::new(&config).unwrap_err(),
            BattleError::Terrain(TerrainError::InvertedAspect { min: 2.0, max: 1.0 })
        );

        let config: BattleConfig =
            serde_json::from_str(r#"{"seed": 3, "generation": {"extent_unit": 0.0}}"#).unwrap();
        assert!(matches!(
            Battle::new(&config),
            Err(BattleError::Terrain(TerrainError::InvalidParam { name: "extent_unit", .. }))
        ));
    }

    #[test]
    fn attack_then_exhaust_then_turn_passes() {
        let mut battle = duel();
        let hit = battle.attack().unwrap();
        assert_eq!(hit.remaining_hp, 150.0);
        assert!(battle.attack().is_none());

        // Spearman still has movement, so the turn holds.
        battle.tick(&InputState::new());
        assert_eq!(battle.active_index(), 0);

        // Walk away from the guardian until the budget runs dry.
        battle.set_camera_mode(CameraMode::FirstPerson);
        let back = held(Key::S);
        for _ in 0..400 {
            battle.tick(&back);
            if battle.active_index() != 0 {
                break;
            }
        }
        assert_eq!(battle.active_index(), 1);
        assert_eq!(battle.roster()[0].remaining_actions(), 1, "budgets restored");
        assert!(battle.events().iter().any(|e| matches!(
            e,
            BattleEvent::TurnPassed { from: 0, to: 1 }
        )));
    }

    #[test]
    fn pass_turn_refocuses_orbit() {
        let mut battle = duel();
        assert_eq!(battle.pass_turn(), 1);
        assert_eq!(battle.orbit().lookat(), Vec3::new(0.0, 0.0, 0.2));
        assert_eq!(battle.pass_turn(), 0);
    }

    #[test]
    fn third_person_keys_turn_and_walk() {
        let mut battle = duel();
        battle.pass_turn();
        let facing = battle.active_unit().facing();
        battle.tick(&held(Key::A));
        assert!(battle.active_unit().facing().dot(facing) < 1.0);

        let start = battle.active_unit().position();
        battle.tick(&held(Key::W));
        assert_ne!(battle.active_unit().position(), start);
        assert!(matches!(
            battle.events().last(),
            Some(BattleEvent::Moved { unit: 1, .. })
        ));
    }

    #[test]
    fn third_person_ignores_backward() {
        let mut battle = duel();
        let start = battle.active_unit().position();
        battle.tick(&held(Key::S));
        assert_eq!(battle.active_unit().position(), start);
    }

    #[test]
    fn free_fly_moves_only_the_free_camera() {
        let mut battle = duel();
        assert!(battle.handle_action(Action::FreeFly));
        let unit = battle.active_unit().position();
        let cam = battle.free_camera().position();
        battle.tick(&held(Key::W));
        assert_eq!(battle.active_unit().position(), unit);
        assert_ne!(battle.free_camera().position(), cam);
    }

    #[test]
    fn person_toggle_and_front_end_actions() {
        let mut battle = duel();
        assert!(battle.handle_action(Action::TogglePerson));
        assert_eq!(battle.camera_mode(), CameraMode::FirstPerson);
        assert!(battle.handle_action(Action::FreeFly));
        assert!(battle.handle_action(Action::TogglePerson));
        assert_eq!(battle.camera_mode(), CameraMode::ThirdPerson);
        assert!(!battle.handle_action(Action::ToggleHud));
        let changes = battle
            .drain_events()
            .into_iter()
            .filter(|e| matches!(e, BattleEvent::CameraModeChanged { .. }))
            .count();
        assert_eq!(changes, 3);
        assert!(battle.events().is_empty());
    }

    #[test]
    fn drag_routes_to_mode_camera() {
        let mut battle = duel();
        let mut input = InputState::new();
        input.set_dragging(true);
        input.pointer_moved(20.0, 0.0);

        let theta = battle.orbit().theta();
        battle.tick(&input);
        assert!(battle.orbit().theta() < theta);

        battle.set_camera_mode(CameraMode::FirstPerson);
        let facing = battle.active_unit().facing();
        battle.tick(&input);
        assert!(battle.active_unit().facing().dot(facing) < 1.0);
        let clip = battle.active_camera().clip_planes();
        assert_eq!(clip, skirmish_camera::ClipPlanes::CLOSE);
    }

    #[test]
    fn scroll_zooms_orbit() {
        let mut battle = duel();
        let mut input = InputState::new();
        input.scrolled(5.0);
        let distance = battle.orbit().distance();
        battle.tick(&input);
        assert!(battle.orbit().distance() < distance);
    }
}
