use glam::Vec2;

/// Fraction of the window width/height treated as the panning border.
pub const EDGE_MARGIN: f32 = 0.02;

/// Pan direction for a cursor near the window border.
///
/// Returns `(right, forward)` components in `{-1, 0, 1}`: the left and right
/// borders pan sideways, the top border pans forward, the bottom border back.
/// A zero-sized window never pans.
pub fn edge_pan(cursor: Vec2, window: Vec2) -> Vec2 {
    if window.x <= 0.0 || window.y <= 0.0 {
        return Vec2::ZERO;
    }
    let rel = cursor / window;
    let right = if rel.x < EDGE_MARGIN {
        -1.0
    } else if rel.x > 1.0 - EDGE_MARGIN {
        1.0
    } else {
        0.0
    };
    let forward = if rel.y < EDGE_MARGIN {
        1.0
    } else if rel.y > 1.0 - EDGE_MARGIN {
        -1.0
    } else {
        0.0
    };
    Vec2::new(right, forward)
}
