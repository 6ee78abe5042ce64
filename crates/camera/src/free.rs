use crate::frame::LookFrame;
use crate::{Camera, ClipPlanes, ViewBasis};
use glam::Vec3;

/// Free-fly camera. Moves in full 3D along its own view and right vectors.
#[derive(Debug, Clone, PartialEq)]
pub struct FreeCamera {
    frame: LookFrame,
}

impl FreeCamera {
    pub fn new(position: Vec3, target: Vec3) -> Self {
        Self {
            frame: LookFrame::looking_at(position, target),
        }
    }

    pub fn position(&self) -> Vec3 {
        self.frame.position
    }

    pub fn forward(&self) -> Vec3 {
        self.frame.view
    }

    pub fn right(&self) -> Vec3 {
        self.frame.right
    }

    pub fn move_forward(&mut self) {
        self.frame.translate(self.frame.view);
    }

    pub fn move_backward(&mut self) {
        self.frame.translate(-self.frame.view);
    }

    pub fn move_left(&mut self) {
        self.frame.translate(-self.frame.right);
    }

    pub fn move_right(&mut self) {
        self.frame.translate(self.frame.right);
    }

    pub fn look(&mut self, dx: f32, dy: f32) {
        self.frame.look(dx, dy);
    }
}

impl Camera for FreeCamera {
    fn update_from_pointer(&mut self, dx: f32, dy: f32) {
        self.look(dx, dy);
    }

    fn translate(&mut self, direction: Vec3) {
        self.frame.translate(direction);
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
