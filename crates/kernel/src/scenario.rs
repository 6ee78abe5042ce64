use crate::character::{Character, Role};
use glam::Vec3;
use skirmish_common::Team;
use skirmish_terrain::Terrain;

/// Line up both teams facing each other across the middle of the land.
///
/// Team one stands at `z = -land.z/4`, team two at `z = +land.z/4`. Within a
/// team the spearman takes `x = land.x/4`, the guardian the center and the
/// archer `x = -land.x/4`. Each unit stands on the ground height under it and
/// faces its mirror point across `z = 0`.
pub fn deploy(terrain: &Terrain) -> Vec<Character> {
    let land = terrain.land_size();
    let mut roster = Vec::with_capacity(6);
    for (team, z) in [(Team::One, -land.z / 4.0), (Team::Two, land.z / 4.0)] {
        for role in Role::ALL {
            let x = match role {
                Role::Spearman => land.x / 4.0,
                Role::Guardian => 0.0,
                Role::Archer => -land.x / 4.0,
            };
            let mut position = Vec3::new(x, 0.0, z);
            position.y = terrain.height(position);
            let mirror = Vec3::new(position.x, position.y, -position.z);
            roster.push(Character::spawn(role, team, position, mirror - position));
        }
    }
    roster
}

#[cfg(test)]
mod tests {
    use super::*;
    use skirmish_terrain::{Plateau, TerrainGenerator};

    #[test]
    fn six_units_mirrored_across_z() {
        let terrain = Terrain::flat(Vec3::new(2.0, 1.0, 3.0)).unwrap();
        let roster = deploy(&terrain);
        assert_eq!(roster.len(), 6);
        for (a, b) in roster[..3].iter().zip(&roster[3..]) {
            assert_eq!(a.role(), b.role());
            assert_eq!(a.team(), Team::One);
            assert_eq!(b.team(), Team::Two);
            assert_eq!(a.position().x, b.position().x);
            assert_eq!(a.position().z, -b.position().z);
            assert!((a.facing() - Vec3::Z).length() < 1e-6);
            assert!((b.facing() - Vec3::NEG_Z).length() < 1e-6);
        }
        assert_eq!(roster[0].position(), Vec3::new(0.5, 0.0, -0.75));
        assert_eq!(roster[2].role(), Role::Archer);
        assert_eq!(roster[2].position().x, -0.5);
    }

    #[test]
    fn units_stand_on_plateaus() {
        let terrain = Terrain::new(
            Vec3::new(2.0, 1.0, 2.0),
            vec![Plateau::new(Vec3::new(0.0, 0.1, -0.5), Vec3::new(0.4, 0.2, 0.4))],
        )
        .unwrap();
        let roster = deploy(&terrain);
        let guardian = &roster[1];
        assert_eq!(guardian.role(), Role::Guardian);
        assert!((guardian.position().y - 0.2).abs() < 1e-6);
        assert!((guardian.facing() - Vec3::Z).length() < 1e-6);
    }

    #[test]
    fn generated_fields_always_seat_everyone() {
        for seed in 0..50 {
            let terrain = TerrainGenerator::from_seed(seed).generate();
            for unit in deploy(&terrain) {
                assert!(unit.position().y >= 0.0, "seed {seed}: {:?}", unit.position());
            }
        }
    }
}
