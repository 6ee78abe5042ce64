use crate::scene::{DrawSink, MeshKind, submit_scene};
use crate::view::ViewParams;
use glam::Mat4;
use skirmish_kernel::Battle;
use std::fmt::Write;

/// Renderer-agnostic interface. All renderers implement this trait.
///
/// The renderer reads battle state and view parameters and produces output.
/// It never mutates the battle.
pub trait Renderer {
    type Output;

    /// Render one frame.
    fn render(&self, battle: &Battle, view: &ViewParams) -> Self::Output;
}

/// Headless renderer producing a text description of the frame.
///
/// Used by the CLI and in tests to exercise scene submission without a GPU.
#[derive(Debug, Default)]
pub struct DebugTextRenderer;

impl DebugTextRenderer {
    pub fn new() -> Self {
        Self
    }
}

struct TextSink<'a> {
    out: &'a mut String,
}

impl DrawSink for TextSink<'_> {
    fn draw(&mut self, mesh: MeshKind, model: Mat4) {
        let (scale, _, translation) = model.to_scale_rotation_translation();
        let name = match mesh {
            MeshKind::Land => "land".to_string(),
            MeshKind::Water => "water".to_string(),
            MeshKind::Plateau => "plateau".to_string(),
            MeshKind::Character(team) => format!("unit ({team})"),
        };
        let _ = writeln!(
            self.out,
            "  {name:<14} at ({:.2}, {:.2}, {:.2}) size ({:.2}, {:.2}, {:.2})",
            translation.x, translation.y, translation.z, scale.x, scale.y, scale.z
        );
    }
}

impl Renderer for DebugTextRenderer {
    type Output = String;

    fn render(&self, battle: &Battle, view: &ViewParams) -> String {
        let mut out = String::new();
        let seed = battle
            .seed()
            .map_or_else(|| "none".to_string(), |s| s.to_string());
        let _ = writeln!(
            out,
            "=== Battle (tick={}, seed={seed}, camera={}) ===",
            battle.tick_count(),
            battle.camera_mode()
        );
        let _ = writeln!(
            out,
            "View: {} eye=({:.2}, {:.2}, {:.2}) forward=({:.2}, {:.2}, {:.2})",
            view.projection.label(),
            view.eye.x,
            view.eye.y,
            view.eye.z,
            view.forward.x,
            view.forward.y,
            view.forward.z
        );
        submit_scene(battle, &mut TextSink { out: &mut out });
        out
    }
}
