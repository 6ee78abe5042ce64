//! Terrain: one flat land rectangle plus axis-aligned plateaus.
//!
//! # Invariants
//! - Terrain is immutable once built; generation happens once per scenario.
//! - `Terrain::height` is the only gate for where a unit may stand.
//! - Plateaus may overlap; the last one in iteration order wins a height query.

mod generation;
mod terrain;

pub use generation::{GenerationParams, TerrainGenerator};
pub use terrain::{LAND_MARGIN, OFF_LAND, Plateau, Terrain, TerrainError};
