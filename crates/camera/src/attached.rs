use crate::frame::LookFrame;
use crate::{Camera, ClipPlanes, ViewBasis};
use glam::Vec3;

/// Height of a unit's eye above its standing position.
pub const EYE_HEIGHT: f32 = 0.28;

/// First-person camera owned by a unit.
///
/// Translation is horizontal only; the owning unit keeps the camera's X/Z in
/// step with its own position.
#[derive(Debug, Clone, PartialEq)]
pub struct AttachedCamera {
    frame: LookFrame,
}

impl AttachedCamera {
    /// Mount at `position` raised by [`EYE_HEIGHT`], looking at `target` at the
    /// same eye height.
    pub fn attach(position: Vec3, target: Vec3) -> Self {
        let eye = Vec3::Y * EYE_HEIGHT;
        Self {
            frame: LookFrame::looking_at(position + eye, target + eye),
        }
    }

    pub fn frame(&self) -> &LookFrame {
        &self.frame
    }

    pub fn position(&self) -> Vec3 {
        self.frame.position
    }

    pub fn view(&self) -> Vec3 {
        self.frame.view
    }

    pub fn right(&self) -> Vec3 {
        self.frame.right
    }

    /// Copy the unit's X/Z; eye height is left alone.
    pub fn follow(&mut self, position: Vec3) {
        self.frame.position.x = position.x;
        self.frame.position.z = position.z;
    }

    /// Point the view along `facing`.
    pub fn point_along(&mut self, facing: Vec3) {
        self.frame.set_view(facing);
    }

    pub fn look(&mut self, dx: f32, dy: f32) {
        self.frame.look(dx, dy);
    }

    pub fn translate_horizontal(&mut self, direction: Vec3) {
        self.frame.translate_horizontal(direction);
    }
}

impl Camera for AttachedCamera {
    fn update_from_pointer(&mut self, dx: f32, dy: f32) {
        self.look(dx, dy);
    }

    fn translate(&mut self, direction: Vec3) {
        self.translate_horizontal(direction);
    }

    fn basis(&self) -> ViewBasis {
        ViewBasis {
            eye: self.frame.position,
            forward: self.frame.view,
            up: self.frame.v,
        }
    }

    fn clip_planes(&self) -> ClipPlanes {
        ClipPlanes::CLOSE
    }
}
