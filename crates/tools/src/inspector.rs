use glam::Vec3;
use skirmish_common::Team;
use skirmish_kernel::{Battle, Role};

/// Battle inspector for developer tooling.
///
/// Provides read-only queries against the battle state for the HUD, the CLI
/// reports and debugging.
pub struct BattleInspector;

impl BattleInspector {
    /// Produce a summary of the battle state.
    pub fn summary(battle: &Battle) -> BattleSummary {
        let alive = |team: Team| {
            battle
                .roster()
                .iter()
                .filter(|u| u.team() == team && u.current_hp() > 0.0)
                .count()
        };
        BattleSummary {
            tick: battle.tick_count(),
            seed: battle.seed(),
            round: battle.turns().round(),
            active: battle.active_index(),
            unit_count: battle.roster().len(),
            team_one_standing: alive(Team::One),
            team_two_standing: alive(Team::Two),
            plateau_count: battle.terrain().plateaus().len(),
            pending_events: battle.events().len(),
        }
    }

    /// Details of the unit at `index`, if there is one.
    pub fn inspect_unit(battle: &Battle, index: usize) -> Option<UnitInfo> {
        battle.roster().get(index).map(|unit| UnitInfo {
            index,
            role: unit.role(),
            team: unit.team(),
            active: index == battle.active_index(),
            hp: unit.current_hp(),
            max_hp: unit.stats().max_hp,
            movement: unit.remaining_movement(),
            actions: unit.remaining_actions(),
            position: unit.position(),
            facing: unit.facing(),
        })
    }

    /// Every unit in roster order.
    pub fn list_units(battle: &Battle) -> Vec<UnitInfo> {
        (0..battle.roster().len())
            .filter_map(|i| Self::inspect_unit(battle, i))
            .collect()
    }
}

/// Summary of battle state for the inspector.
#[derive(Debug, Clone, PartialEq)]
pub struct BattleSummary {
    pub tick: u64,
    pub seed: Option<u64>,
    pub round: u64,
    pub active: usize,
    pub unit_count: usize,
    pub team_one_standing: usize,
    pub team_two_standing: usize,
    pub plateau_count: usize,
    pub pending_events: usize,
}

impl std::fmt::Display for BattleSummary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Battle: tick={} seed=", self.tick)?;
        match self.seed {
            Some(seed) => write!(f, "{seed}")?,
            None => write!(f, "none")?,
        }
        write!(
            f,
            " round={} active={} units={} standing={}v{} plateaus={} pending_events={}",
            self.round,
            self.active,
            self.unit_count,
            self.team_one_standing,
            self.team_two_standing,
            self.plateau_count,
            self.pending_events
        )
    }
}

/// Detailed info about a single unit.
#[derive(Debug, Clone, PartialEq)]
pub struct UnitInfo {
    pub index: usize,
    pub role: Role,
    pub team: Team,
    pub active: bool,
    pub hp: f32,
    pub max_hp: f32,
    pub movement: f32,
    pub actions: u32,
    pub position: Vec3,
    pub facing: Vec3,
}

impl std::fmt::Display for UnitInfo {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let marker = if self.active { '>' } else { ' ' };
        write!(
            f,
            "{marker} [{}] {:<8} {} hp={:.0}/{:.0} move={:.2} actions={} pos=({:.2}, {:.2}, {:.2})",
            self.index,
            self.role,
            self.team,
            self.hp,
            self.max_hp,
            self.movement,
            self.actions,
            self.position.x,
            self.position.y,
            self.position.z,
        )
    }
}
