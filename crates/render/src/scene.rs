use glam::{Mat4, Vec3};
use skirmish_common::{Team, Transform};
use skirmish_kernel::{Battle, Character};
use skirmish_terrain::Terrain;

/// Uniform scale applied to the character model.
pub const CHARACTER_SCALE: f32 = 0.03;

/// What a draw call shows. Backends pick geometry and material from this.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MeshKind {
    /// Unit cube scaled to the land box.
    Land,
    /// Unit cube scaled to the water box under the land.
    Water,
    Plateau,
    /// Flat character quad, tinted by team.
    Character(Team),
}

/// Receiver of `(mesh, model transform)` pairs.
pub trait DrawSink {
    fn draw(&mut self, mesh: MeshKind, model: Mat4);
}

/// Yaw of a facing vector relative to +Z, signed by the X component.
pub fn facing_angle(facing: Vec3) -> f32 {
    let angle = facing.dot(Vec3::Z).clamp(-1.0, 1.0).acos();
    if facing.x < 0.0 { -angle } else { angle }
}

/// Land box with its top face at `y = 0`.
pub fn land_transform(land: Vec3) -> Mat4 {
    Mat4::from_translation(Vec3::new(0.0, -land.y / 2.0, 0.0)) * Mat4::from_scale(land)
}

/// Water box twice the land's size, sunk below it.
pub fn water_transform(land: Vec3) -> Mat4 {
    Mat4::from_translation(Vec3::new(0.0, -1.1 * land.y, 0.0)) * Mat4::from_scale(2.0 * land)
}

pub fn character_transform(unit: &Character) -> Mat4 {
    Mat4::from_translation(unit.position())
        * Mat4::from_scale(Vec3::splat(CHARACTER_SCALE))
        * Mat4::from_rotation_y(facing_angle(unit.facing()))
}

fn submit_terrain<S: DrawSink + ?Sized>(terrain: &Terrain, sink: &mut S) {
    let land = terrain.land_size();
    sink.draw(MeshKind::Land, land_transform(land));
    sink.draw(MeshKind::Water, water_transform(land));
    for plateau in terrain.plateaus() {
        let model = Transform::boxed(plateau.position, plateau.scale).to_matrix();
        sink.draw(MeshKind::Plateau, model);
    }
}

/// Submit one frame: land, water, every plateau, then every unit in roster
/// order.
pub fn submit_scene<S: DrawSink + ?Sized>(battle: &Battle, sink: &mut S) {
    submit_terrain(battle.terrain(), sink);
    for unit in battle.roster() {
        sink.draw(MeshKind::Character(unit.team()), character_transform(unit));
    }
    tracing::trace!(
        tick = battle.tick_count(),
        units = battle.roster().len(),
        "scene submitted"
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use skirmish_kernel::{BattleConfig, Role};
    use skirmish_terrain::Plateau;
    use std::f32::consts::FRAC_PI_2;

    #[derive(Default)]
    struct Recorder {
        meshes: Vec<MeshKind>,
    }

    impl DrawSink for Recorder {
        fn draw(&mut self, mesh: MeshKind, _model: Mat4) {
            self.meshes.push(mesh);
        }
    }

    #[test]
    fn facing_angle_quadrants() {
        assert_eq!(facing_angle(Vec3::Z), 0.0);
        assert!((facing_angle(Vec3::X) - FRAC_PI_2).abs() < 1e-6);
        assert!((facing_angle(Vec3::NEG_X) + FRAC_PI_2).abs() < 1e-6);
        assert!((facing_angle(Vec3::NEG_Z).abs() - std::f32::consts::PI).abs() < 1e-6);
    }

    #[test]
    fn rotated_quad_faces_the_unit_facing() {
        let facing = Vec3::new(1.0, 0.0, 1.0).normalize();
        let rotated = Mat4::from_rotation_y(facing_angle(facing)).transform_vector3(Vec3::Z);
        assert!((rotated - facing).length() < 1e-5);

        let facing = Vec3::new(-1.0, 0.0, 0.2).normalize();
        let rotated = Mat4::from_rotation_y(facing_angle(facing)).transform_vector3(Vec3::Z);
        assert!((rotated - facing).length() < 1e-5);
    }

    #[test]
    fn land_top_sits_at_ground_level() {
        let land = Vec3::new(3.0, 2.0, 4.0);
        let top = land_transform(land).transform_point3(Vec3::new(0.5, 0.5, 0.5));
        assert_eq!(top, Vec3::new(1.5, 0.0, 2.0));
        let water_top = water_transform(land).transform_point3(Vec3::new(0.0, 0.5, 0.0));
        assert!(water_top.y < 0.0, "water surface below the ground: {water_top:?}");
    }

    #[test]
    fn scene_submits_everything_in_order() {
        let terrain = Terrain::new(
            Vec3::new(4.0, 1.0, 4.0),
            vec![
                Plateau::new(Vec3::new(1.0, 0.1, 1.0), Vec3::new(0.5, 0.2, 0.5)),
                Plateau::new(Vec3::new(-1.0, 0.1, 1.0), Vec3::new(0.5, 0.2, 0.5)),
            ],
        )
        .unwrap();
        let roster = skirmish_kernel::deploy(&terrain);
        let battle = Battle::with_roster(terrain, roster, 0).unwrap();

        let mut recorder = Recorder::default();
        submit_scene(&battle, &mut recorder);
        let meshes = recorder.meshes;
        assert_eq!(meshes.len(), 2 + 2 + 6);
        assert_eq!(meshes[0], MeshKind::Land);
        assert_eq!(meshes[1], MeshKind::Water);
        assert_eq!(meshes[2], MeshKind::Plateau);
        assert_eq!(meshes[4], MeshKind::Character(Team::One));
        assert_eq!(meshes[9], MeshKind::Character(Team::Two));
        assert_eq!(meshes[7], MeshKind::Character(Team::Two));
        assert_eq!(meshes[6], MeshKind::Character(Team::One));
    }

    #[test]
    fn character_model_is_small_and_placed() {
        let battle = Battle::new(&BattleConfig {
            seed: Some(5),
            ..BattleConfig::default()
        })
        .unwrap();
        let unit = &battle.roster()[0];
        assert_eq!(unit.role(), Role::Spearman);
        let model = character_transform(unit);
        assert!((model.transform_point3(Vec3::ZERO) - unit.position()).length() < 1e-6);
        let extent = model.transform_vector3(Vec3::X).length();
        assert!((extent - CHARACTER_SCALE).abs() < 1e-6);
    }
}
