use glam::Vec3;
use serde::{Deserialize, Serialize};

/// Height reported for points that are not on the playable land.
pub const OFF_LAND: f32 = -1.0;

/// Inset from the land edge inside which a point still counts as land.
pub const LAND_MARGIN: f32 = 0.1;

/// Errors from building terrain by hand or from bad generation tunables.
#[derive(Debug, thiserror::Error, PartialEq)]
pub enum TerrainError {
    #[error("land size must be positive on every axis, got {0:?}")]
    InvalidLandSize(Vec3),
    #[error("generation parameter `{name}` must be finite and positive, got {value}")]
    InvalidParam { name: &'static str, value: f32 },
    #[error("min_aspect {min} exceeds max_aspect {max}")]
    InvertedAspect { min: f32, max: f32 },
}

/// An axis-aligned elevated box standing on the land.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Plateau {
    /// Center of the box.
    pub position: Vec3,
    /// Full extents of the box.
    pub scale: Vec3,
}

impl Plateau {
    pub fn new(position: Vec3, scale: Vec3) -> Self {
        Self { position, scale }
    }

    /// Elevation of the walkable top face.
    pub fn top(&self) -> f32 {
        self.position.y + self.scale.y / 2.0
    }

    /// Strict XZ containment: points on the footprint edge are not on the plateau.
    pub fn covers(&self, point: Vec3) -> bool {
        let half_x = self.scale.x / 2.0;
        let half_z = self.scale.z / 2.0;
        point.x > self.position.x - half_x
            && point.x < self.position.x + half_x
            && point.z > self.position.z - half_z
            && point.z < self.position.z + half_z
    }
}

/// The battlefield: a land box of `land_size` centered at the origin, with
/// plateaus on top.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Terrain {
    land_size: Vec3,
    plateaus: Vec<Plateau>,
}

impl Terrain {
    pub fn new(land_size: Vec3, plateaus: Vec<Plateau>) -> Result<Self, TerrainError> {
        if land_size.cmple(Vec3::ZERO).any() {
            return Err(TerrainError::InvalidLandSize(land_size));
        }
        Ok(Self::from_parts(land_size, plateaus))
    }

    /// Skips validation; callers guarantee positive land extents.
    pub(crate) fn from_parts(land_size: Vec3, plateaus: Vec<Plateau>) -> Self {
        Self {
            land_size,
            plateaus,
        }
    }

    /// Land without plateaus.
    pub fn flat(land_size: Vec3) -> Result<Self, TerrainError> {
        Self::new(land_size, Vec::new())
    }

    pub fn land_size(&self) -> Vec3 {
        self.land_size
    }

    pub fn plateaus(&self) -> &[Plateau] {
        &self.plateaus
    }

    /// Whether the XZ position lies inside the land rectangle minus its margin.
    pub fn is_on_land(&self, point: Vec3) -> bool {
        let x_max = self.land_size.x / 2.0 - LAND_MARGIN;
        let z_max = self.land_size.z / 2.0 - LAND_MARGIN;
        (-x_max..=x_max).contains(&point.x) && (-z_max..=z_max).contains(&point.z)
    }

    /// Ground elevation at the XZ position of `point`.
    ///
    /// Returns [`OFF_LAND`] outside the land margin, `0.0` on open ground and
    /// the top of the covering plateau otherwise. With overlapping plateaus
    /// the last one in the list decides.
    pub fn height(&self, point: Vec3) -> f32 {
        if !self.is_on_land(point) {
            return OFF_LAND;
        }
        self.plateaus
            .iter()
            .rev()
            .find(|p| p.covers(point))
            .map_or(0.0, Plateau::top)
    }
}
