use crate::character::Character;
use serde::{Deserialize, Serialize};

/// Round-robin over the roster. Owns the active index and nothing else.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TurnController {
    active: usize,
    count: usize,
    round: u64,
}

impl TurnController {
    /// `None` for an empty roster or a start index past its end.
    pub fn new(count: usize, active: usize) -> Option<Self> {
        (active < count).then_some(Self {
            active,
            count,
            round: 0,
        })
    }

    pub fn active(&self) -> usize {
        self.active
    }

    pub fn count(&self) -> usize {
        self.count
    }

    /// Completed trips around the roster.
    pub fn round(&self) -> u64 {
        self.round
    }

    /// The turn is over once both budgets are spent.
    pub fn should_end(&self, unit: &Character) -> bool {
        unit.is_exhausted()
    }

    /// End the active unit's turn and hand over to the next one.
    ///
    /// Restores the outgoing unit's budgets. Returns the new active index.
    pub fn pass(&mut self, roster: &mut [Character]) -> usize {
        if let Some(unit) = roster.get_mut(self.active) {
            unit.end_turn();
        }
        self.active = (self.active + 1) % self.count;
        if self.active == 0 {
            self.round += 1;
        }
        self.active
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::character::Role;
    use glam::Vec3;
    use skirmish_common::Team;

    fn roster(n: usize) -> Vec<Character> {
        (0..n)
            .map(|i| {
                let position = Vec3::new(i as f32, 0.0, 0.0);
                Character::spawn(Role::Spearman, Team::One, position, Vec3::Z)
            })
            .collect()
    }

    #[test]
    fn rejects_empty_and_out_of_range() {
        assert!(TurnController::new(0, 0).is_none());
        assert!(TurnController::new(3, 3).is_none());
        assert!(TurnController::new(3, 2).is_some());
    }

    #[test]
    fn n_passes_come_back_around() {
        let mut units = roster(6);
        let mut turns = TurnController::new(6, 2).unwrap();
        for _ in 0..6 {
            turns.pass(&mut units);
        }
        assert_eq!(turns.active(), 2);
        assert_eq!(turns.round(), 1);
    }

    #[test]
    fn pass_restores_outgoing_unit() {
        let terrain = skirmish_terrain::Terrain::flat(Vec3::new(10.0, 1.0, 10.0)).unwrap();
        let mut units = roster(2);
        units[0].step(&terrain);
        let mut turns = TurnController::new(2, 0).unwrap();
        assert_eq!(turns.pass(&mut units), 1);
        assert_eq!(units[0].remaining_movement(), units[0].stats().max_movement);
    }

    #[test]
    fn ends_only_when_both_budgets_spent() {
        let terrain = skirmish_terrain::Terrain::flat(Vec3::new(40.0, 1.0, 40.0)).unwrap();
        let turns = TurnController::new(1, 0).unwrap();
        let mut unit = Character::spawn(Role::Guardian, Team::Two, Vec3::ZERO, Vec3::X);
        while unit.step(&terrain) {}
        assert!(!turns.should_end(&unit), "action still available");
        unit.spend_action();
        assert!(turns.should_end(&unit));
    }
}
