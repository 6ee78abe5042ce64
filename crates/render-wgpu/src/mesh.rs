use bytemuck::{Pod, Zeroable};
use skirmish_common::Team;
use skirmish_render::MeshKind;

/// Character quad size in model units, before the character scale.
pub const CHARACTER_WIDTH: f32 = 4.0;
pub const CHARACTER_HEIGHT: f32 = 9.0;

#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, Pod, Zeroable)]
pub(crate) struct Vertex {
    pub position: [f32; 3],
    pub normal: [f32; 3],
}

/// Unit cube centered on the origin.
pub(crate) fn cube_mesh() -> (Vec<Vertex>, Vec<u16>) {
    let p = 0.5_f32;
    #[rustfmt::skip]
    let vertices = vec![
        // +Z face
        Vertex { position: [-p, -p,  p], normal: [0.0, 0.0, 1.0] },
        Vertex { position: [ p, -p,  p], normal: [0.0, 0.0, 1.0] },
        Vertex { position: [ p,  p,  p], normal: [0.0, 0.0, 1.0] },
        Vertex { position: [-p,  p,  p], normal: [0.0, 0.0, 1.0] },
        // -Z face
        Vertex { position: [ p, -p, -p], normal: [0.0, 0.0, -1.0] },
        Vertex { position: [-p, -p, -p], normal: [0.0, 0.0, -1.0] },
        Vertex { position: [-p,  p, -p], normal: [0.0, 0.0, -1.0] },
        Vertex { position: [ p,  p, -p], normal: [0.0, 0.0, -1.0] },
        // +X face
        Vertex { position: [ p, -p,  p], normal: [1.0, 0.0, 0.0] },
        Vertex { position: [ p, -p, -p], normal: [1.0, 0.0, 0.0] },
        Vertex { position: [ p,  p, -p], normal: [1.0, 0.0, 0.0] },
        Vertex { position: [ p,  p,  p], normal: [1.0, 0.0, 0.0] },
        // -X face
        Vertex { position: [-p, -p, -p], normal: [-1.0, 0.0, 0.0] },
        Vertex { position: [-p, -p,  p], normal: [-1.0, 0.0, 0.0] },
        Vertex { position: [-p,  p,  p], normal: [-1.0, 0.0, 0.0] },
        Vertex { position: [-p,  p, -p], normal: [-1.0, 0.0, 0.0] },
        // +Y face
        Vertex { position: [-p,  p,  p], normal: [0.0, 1.0, 0.0] },
        Vertex { position: [ p,  p,  p], normal: [0.0, 1.0, 0.0] },
        Vertex { position: [ p,  p, -p], normal: [0.0, 1.0, 0.0] },
        Vertex { position: [-p,  p, -p], normal: [0.0, 1.0, 0.0] },
        // -Y face
        Vertex { position: [-p, -p, -p], normal: [0.0, -1.0, 0.0] },
        Vertex { position: [ p, -p, -p], normal: [0.0, -1.0, 0.0] },
        Vertex { position: [ p, -p,  p], normal: [0.0, -1.0, 0.0] },
        Vertex { position: [-p, -p,  p], normal: [0.0, -1.0, 0.0] },
    ];
    #[rustfmt::skip]
    let indices: Vec<u16> = vec![
        0,1,2, 2,3,0,       // +Z
        4,5,6, 6,7,4,       // -Z
        8,9,10, 10,11,8,    // +X
        12,13,14, 14,15,12, // -X
        16,17,18, 18,19,16, // +Y
        20,21,22, 22,23,20, // -Y
    ];
    (vertices, indices)
}

/// Upright quad in the XY plane, standing on the origin and facing +Z.
pub(crate) fn character_mesh() -> (Vec<Vertex>, Vec<u16>) {
    let w = CHARACTER_WIDTH / 2.0;
    let h = CHARACTER_HEIGHT;
    let n = [0.0, 0.0, 1.0];
    let vertices = vec![
        Vertex { position: [-w, 0.0, 0.0], normal: n },
        Vertex { position: [w, 0.0, 0.0], normal: n },
        Vertex { position: [w, h, 0.0], normal: n },
        Vertex { position: [-w, h, 0.0], normal: n },
    ];
    (vertices, vec![0, 1, 2, 2, 3, 0])
}

/// Flat color per mesh kind.
pub fn mesh_color(mesh: MeshKind) -> [f32; 4] {
    match mesh {
        MeshKind::Land => [0.36, 0.55, 0.27, 1.0],
        MeshKind::Water => [0.16, 0.36, 0.68, 1.0],
        MeshKind::Plateau => [0.58, 0.47, 0.32, 1.0],
        MeshKind::Character(Team::One) => [0.86, 0.22, 0.2, 1.0],
        MeshKind::Character(Team::Two) => [0.22, 0.38, 0.92, 1.0],
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cube_indices_in_bounds() {
        let (verts, indices) = cube_mesh();
        assert_eq!(verts.len(), 24);
        assert_eq!(indices.len(), 36);
        assert!(indices.iter().all(|&i| (i as usize) < verts.len()));
    }

    #[test]
    fn character_quad_stands_on_origin() {
        let (verts, indices) = character_mesh();
        assert_eq!(indices.len(), 6);
        let min_y = verts.iter().map(|v| v.position[1]).fold(f32::MAX, f32::min);
        assert_eq!(min_y, 0.0);
        assert!(verts.iter().all(|v| v.position[2] == 0.0));
    }

    #[test]
    fn teams_get_distinct_colors() {
        assert_ne!(
            mesh_color(MeshKind::Character(Team::One)),
            mesh_color(MeshKind::Character(Team::Two))
        );
    }
}
