use glam::{Quat, Vec3};

/// Pitch bounds, measured as the angle between view and world up.
pub const PITCH_MIN: f32 = 0.01;
pub const PITCH_MAX: f32 = 3.141;

/// Radians of rotation per pointer unit.
pub const LOOK_SENSITIVITY: f32 = 0.005;

/// Distance covered by one translation step. Units walk at the same rate.
pub const STEP_SPEED: f32 = 0.01;

/// Derive `(right, v)` from a view direction and world up.
///
/// `right = normalize(view × up)`, `v = normalize(right × view)`. The caller
/// keeps `view` away from `up`; a parallel pair has no defined basis.
pub fn orthonormalize(view: Vec3, up: Vec3) -> (Vec3, Vec3) {
    let right = view.cross(up).normalize();
    let v = right.cross(view).normalize();
    (right, v)
}

/// Direction-driven camera state shared by the attached and free-fly cameras.
#[derive(Debug, Clone, PartialEq)]
pub struct LookFrame {
    pub position: Vec3,
    pub view: Vec3,
    /// World up; fixed.
    pub up: Vec3,
    pub right: Vec3,
    /// Camera-local up, orthogonal to `view` and `right`.
    pub v: Vec3,
    pub phi: f32,
    pub speed: f32,
}

impl LookFrame {
    /// Frame at `position` looking at `target`.
    pub fn looking_at(position: Vec3, target: Vec3) -> Self {
        let mut frame = Self {
            position,
            view: Vec3::NEG_Z,
            up: Vec3::Y,
            right: Vec3::X,
            v: Vec3::Y,
            phi: std::f32::consts::FRAC_PI_2,
            speed: STEP_SPEED,
        };
        frame.set_view(target - position);
        frame
    }

    /// Point the frame along `direction` and rebuild the basis and pitch.
    pub fn set_view(&mut self, direction: Vec3) {
        self.view = direction.normalize();
        (self.right, self.v) = orthonormalize(self.view, self.up);
        self.phi = self.view.dot(self.up).clamp(-1.0, 1.0).acos();
    }

    /// Rotate `view` about `axis` (unit length) and re-derive the basis.
    pub fn rotate(&mut self, axis: Vec3, angle: f32) {
        self.view = (Quat::from_axis_angle(axis, angle) * self.view).normalize();
        (self.right, self.v) = orthonormalize(self.view, self.up);
    }

    /// Pitch about `right` then yaw about world up.
    ///
    /// Pitch stops at `[PITCH_MIN, PITCH_MAX]`; only the part of the motion
    /// that stays inside the range is applied, so `phi` always matches the
    /// angle between `view` and world up.
    pub fn look(&mut self, dx: f32, dy: f32) {
        let target = (self.phi + LOOK_SENSITIVITY * dy).clamp(PITCH_MIN, PITCH_MAX);
        let pitch = target - self.phi;
        self.phi = target;
        if pitch != 0.0 {
            self.rotate(self.right, -pitch);
        }
        self.rotate(self.up, -LOOK_SENSITIVITY * dx);
    }

    pub fn translate(&mut self, direction: Vec3) {
        self.position += self.speed * direction;
    }

    /// Translate on the ground plane only.
    pub fn translate_horizontal(&mut self, direction: Vec3) {
        self.position.x += self.speed * direction.x;
        self.position.z += self.speed * direction.z;
    }
}
