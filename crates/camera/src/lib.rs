//! Camera rig: three camera variants behind one [`Camera`] capability.
//!
//! - [`OrbitCamera`] circles a target point (third-person).
//! - [`AttachedCamera`] rides on a unit at eye height (first-person).
//! - [`FreeCamera`] flies anywhere (free-fly).
//!
//! # Invariants
//! - Orbit distance never drops below [`orbit::MIN_DISTANCE`].
//! - Orbit and free-look pitch stay inside their clamp ranges.
//! - Free-look bases are re-orthonormalized after every rotation.

mod attached;
mod free;
mod frame;
mod mode;
pub mod orbit;

pub use attached::{AttachedCamera, EYE_HEIGHT};
pub use free::FreeCamera;
pub use frame::{LookFrame, STEP_SPEED, orthonormalize};
pub use mode::CameraMode;
pub use orbit::OrbitCamera;

use glam::{Mat4, Vec3};

/// Eye, forward and up vectors handed to the renderer's look-at transform.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewBasis {
    pub eye: Vec3,
    pub forward: Vec3,
    pub up: Vec3,
}

impl ViewBasis {
    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_to_rh(self.eye, self.forward, self.up)
    }
}

/// Near and far planes as signed camera-space Z (both negative, looking down -Z).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ClipPlanes {
    pub near: f32,
    pub far: f32,
}

impl ClipPlanes {
    /// Tight planes for cameras that get close to walls.
    pub const CLOSE: Self = Self {
        near: -0.1,
        far: -10.0,
    };

    /// Wide planes for the overview camera.
    pub const WIDE: Self = Self {
        near: -0.1,
        far: -25.0,
    };

    /// Positive distances `(near, far)` for projection builders.
    pub fn depth_range(&self) -> (f32, f32) {
        (-self.near, -self.far)
    }
}

/// Shared camera capability.
pub trait Camera {
    /// Reorient from a pointer motion delta in screen units.
    fn update_from_pointer(&mut self, dx: f32, dy: f32);

    /// Move by `speed * direction` in the camera's own translation space.
    fn translate(&mut self, direction: Vec3);

    fn basis(&self) -> ViewBasis;

    fn clip_planes(&self) -> ClipPlanes;
}
