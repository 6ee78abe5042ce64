//! Third-person camera circling a target point on a sphere.

use crate::{Camera, ClipPlanes, ViewBasis};
use glam::Vec3;
use std::f32::consts::{FRAC_PI_2, FRAC_PI_4};

/// Closest the eye may get to the target.
pub const MIN_DISTANCE: f32 = 0.4;
/// Elevation bounds above the ground plane.
pub const PHI_MIN: f32 = 0.35;
pub const PHI_MAX: f32 = FRAC_PI_2;
/// Radians per pointer unit.
pub const LOOK_SENSITIVITY: f32 = 0.01;
/// Distance per scroll unit.
pub const ZOOM_STEP: f32 = 0.1;
pub const DEFAULT_DISTANCE: f32 = 3.5;
pub const DEFAULT_PHI: f32 = FRAC_PI_4;
pub const PAN_SPEED: f32 = 0.01;

/// Spherical look-at camera.
///
/// Only `lookat`, `theta`, `phi` and `distance` are free; `position` and
/// `view` are derived from them on every change.
#[derive(Debug, Clone, PartialEq)]
pub struct OrbitCamera {
    position: Vec3,
    lookat: Vec3,
    view: Vec3,
    up: Vec3,
    theta: f32,
    phi: f32,
    distance: f32,
    speed: f32,
    clip: ClipPlanes,
}

impl Default for OrbitCamera {
    fn default() -> Self {
        Self::new()
    }
}

impl OrbitCamera {
    pub fn new() -> Self {
        let mut cam = Self {
            position: Vec3::ZERO,
            lookat: Vec3::ZERO,
            view: Vec3::NEG_Z,
            up: Vec3::Y,
            theta: 0.0,
            phi: DEFAULT_PHI,
            distance: DEFAULT_DISTANCE,
            speed: PAN_SPEED,
            clip: ClipPlanes::WIDE,
        };
        cam.recompute();
        cam
    }

    pub fn position(&self) -> Vec3 {
        self.position
    }

    pub fn lookat(&self) -> Vec3 {
        self.lookat
    }

    pub fn view(&self) -> Vec3 {
        self.view
    }

    pub fn theta(&self) -> f32 {
        self.theta
    }

    pub fn phi(&self) -> f32 {
        self.phi
    }

    pub fn distance(&self) -> f32 {
        self.distance
    }

    pub fn look(&mut self, dx: f32, dy: f32) {
        self.theta -= LOOK_SENSITIVITY * dx;
        self.phi = (self.phi + LOOK_SENSITIVITY * dy).clamp(PHI_MIN, PHI_MAX);
        self.recompute();
    }

    /// Positive scroll moves toward the target.
    pub fn zoom(&mut self, scroll: f32) {
        self.distance = (self.distance - ZOOM_STEP * scroll).max(MIN_DISTANCE);
        self.recompute();
    }

    /// Slide the target across the ground plane.
    pub fn move_target(&mut self, direction: Vec3) {
        self.lookat.x += self.speed * direction.x;
        self.lookat.z += self.speed * direction.z;
        self.recompute();
    }

    /// Re-center on `point`, keeping angles and distance.
    pub fn focus(&mut self, point: Vec3) {
        self.lookat = point;
        self.recompute();
        tracing::debug!(x = point.x, y = point.y, z = point.z, "orbit camera refocused");
    }

    /// Horizontal `(forward, right)` for screen-edge panning.
    ///
    /// Forward is the view with its height dropped, so panning slows as the
    /// camera tilts toward looking straight down.
    pub fn pan_axes(&self) -> (Vec3, Vec3) {
        let forward = Vec3::new(self.view.x, 0.0, self.view.z);
        let right = Vec3::new(-forward.z, 0.0, forward.x);
        (forward, right)
    }

    /// Unit vector from the target toward the eye.
    fn offset_direction(&self) -> Vec3 {
        let (sin_phi, cos_phi) = self.phi.sin_cos();
        let (sin_theta, cos_theta) = self.theta.sin_cos();
        Vec3::new(cos_phi * sin_theta, sin_phi, cos_phi * cos_theta)
    }

    fn recompute(&mut self) {
        let offset = self.offset_direction();
        self.position = self.lookat + self.distance * offset;
        // From the angles rather than `lookat - position`, which loses the
        // horizontal part to rounding when looking almost straight down.
        self.view = -offset;
    }

    /// Screen up: the tangent of increasing `phi`, orthogonal to `view` even
    /// at `PHI_MAX`.
    fn screen_up(&self) -> Vec3 {
        let (sin_phi, cos_phi) = self.phi.sin_cos();
        let (sin_theta, cos_theta) = self.theta.sin_cos();
        Vec3::new(-sin_phi * sin_theta, cos_phi, -sin_phi * cos_theta)
    }
}

impl Camera for OrbitCamera {
    fn update_from_pointer(&mut self, dx: f32, dy: f32) {
        self.look(dx, dy);
    }

    fn translate(&mut self, direction: Vec3) {
        self.move_target(direction);
    }

    fn basis(&self) -> ViewBasis {
        let up = if self.up.cross(self.view).length_squared() > 1e-6 {
            self.up
        } else {
            self.screen_up()
        };
        ViewBasis {
            eye: self.position,
            forward: self.view,
            up,
        }
    }

    fn clip_planes(&self) -> ClipPlanes {
        self.clip
    }
}
