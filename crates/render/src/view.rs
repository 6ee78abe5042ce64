use glam::{Mat4, Vec3};
use skirmish_camera::{Camera, ViewBasis};
use skirmish_kernel::Battle;

/// Vertical field of view for perspective projection (75°).
pub const FIELD_OF_VIEW: f32 = std::f32::consts::PI / 2.4;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Projection {
    #[default]
    Perspective,
    Orthographic,
}

impl Projection {
    pub fn label(self) -> &'static str {
        match self {
            Projection::Perspective => "Perspective",
            Projection::Orthographic => "Orthographic",
        }
    }
}

/// Everything a backend needs to build view and projection matrices.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewParams {
    pub eye: Vec3,
    pub forward: Vec3,
    pub up: Vec3,
    /// Positive distance to the near plane.
    pub near: f32,
    /// Positive distance to the far plane.
    pub far: f32,
    pub projection: Projection,
    /// Half the visible height under orthographic projection.
    pub ortho_half_height: f32,
}

impl ViewParams {
    /// View through `camera`. The orthographic extent defaults to the
    /// overview distance.
    pub fn from_camera(camera: &dyn Camera, projection: Projection) -> Self {
        let ViewBasis { eye, forward, up } = camera.basis();
        let (near, far) = camera.clip_planes().depth_range();
        Self {
            eye,
            forward,
            up,
            near,
            far,
            projection,
            ortho_half_height: ortho_half_height(skirmish_camera::orbit::DEFAULT_DISTANCE),
        }
    }

    /// View through the battle's active camera. The orthographic extent
    /// tracks the orbit zoom.
    pub fn from_battle(battle: &Battle, projection: Projection) -> Self {
        Self {
            ortho_half_height: ortho_half_height(battle.orbit().distance()),
            ..Self::from_camera(battle.active_camera(), projection)
        }
    }

    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_to_rh(self.eye, self.forward, self.up)
    }

    pub fn projection_matrix(&self, aspect: f32) -> Mat4 {
        match self.projection {
            Projection::Perspective => {
                Mat4::perspective_rh(FIELD_OF_VIEW, aspect, self.near, self.far)
            }
            Projection::Orthographic => {
                let top = self.ortho_half_height;
                let right = top * aspect;
                Mat4::orthographic_rh(-right, right, -top, top, self.near, self.far)
            }
        }
    }

    pub fn view_projection(&self, aspect: f32) -> Mat4 {
        self.projection_matrix(aspect) * self.view_matrix()
    }
}

fn ortho_half_height(distance: f32) -> f32 {
    1.5 * distance / 2.5
}
