use crate::terrain::{Plateau, Terrain, TerrainError};
use glam::Vec3;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};

/// Tunables for [`TerrainGenerator`]. Missing fields take their defaults.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GenerationParams {
    /// Upper bound (inclusive) on the number of plateaus.
    pub max_plateaus: u32,
    /// Land X/Z are drawn as `steps * extent_unit`, steps in `[25, 100)`.
    pub extent_unit: f32,
    /// Land Z is clamped into `[min_aspect * x, max_aspect * x]`.
    pub min_aspect: f32,
    pub max_aspect: f32,
    /// Cap on the land's vertical scale.
    pub max_depth: f32,
}

impl Default for GenerationParams {
    fn default() -> Self {
        Self {
            max_plateaus: 3,
            extent_unit: 0.04,
            min_aspect: 0.5625,
            max_aspect: 1.77,
            max_depth: 2.0,
        }
    }
}

impl GenerationParams {
    /// Reject tunables that would produce an empty land or an empty aspect range.
    pub fn validate(&self) -> Result<(), TerrainError> {
        for (name, value) in [
            ("extent_unit", self.extent_unit),
            ("min_aspect", self.min_aspect),
            ("max_aspect", self.max_aspect),
            ("max_depth", self.max_depth),
        ] {
            if !value.is_finite() || value <= 0.0 {
                return Err(TerrainError::InvalidParam { name, value });
            }
        }
        if self.min_aspect > self.max_aspect {
            return Err(TerrainError::InvertedAspect {
                min: self.min_aspect,
                max: self.max_aspect,
            });
        }
        Ok(())
    }
}

/// Seeded battlefield layout generator.
///
/// Plateaus go into quadrants by index with a randomized, inward-biased size
/// and offset. Footprints are not checked against the land edge and
/// overlapping plateaus are not retried.
pub struct TerrainGenerator {
    seed: u64,
    rng: ChaCha8Rng,
    params: GenerationParams,
}

impl TerrainGenerator {
    pub fn from_seed(seed: u64) -> Self {
        Self::seeded(seed, GenerationParams::default())
    }

    pub fn with_params(seed: u64, params: GenerationParams) -> Result<Self, TerrainError> {
        params.validate()?;
        Ok(Self::seeded(seed, params))
    }

    fn seeded(seed: u64, params: GenerationParams) -> Self {
        Self {
            seed,
            rng: ChaCha8Rng::seed_from_u64(seed),
            params,
        }
    }

    /// Fresh seed from OS entropy, logged for replay.
    pub fn entropy_seed() -> u64 {
        let seed: u64 = rand::random();
        tracing::info!(seed, "drew terrain seed from entropy");
        seed
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Build one terrain layout.
    pub fn generate(&mut self) -> Terrain {
        let land_size = self.land_size();
        let count = self.rng.gen_range(0..=self.params.max_plateaus);
        let plateaus = (0..count)
            .map(|i| self.plateau(i, land_size))
            .collect::<Vec<_>>();

        tracing::info!(
            seed = self.seed,
            land_x = land_size.x,
            land_y = land_size.y,
            land_z = land_size.z,
            plateaus = plateaus.len(),
            "generated terrain"
        );

        Terrain::from_parts(land_size, plateaus)
    }

    fn land_size(&mut self) -> Vec3 {
        let x = self.rng.gen_range(25..100) as f32 * self.params.extent_unit;
        let z = self.rng.gen_range(25..100) as f32 * self.params.extent_unit;
        let z = z.clamp(self.params.min_aspect * x, self.params.max_aspect * x);
        let y = if x < self.params.max_depth {
            x
        } else if z < self.params.max_depth {
            z
        } else {
            self.params.max_depth
        };
        Vec3::new(x, y, z)
    }

    fn plateau(&mut self, index: u32, land: Vec3) -> Plateau {
        let scale_x = if self.rng.gen_bool(0.5) {
            self.percent(10, 25) * land.x
        } else {
            self.percent(20, 25) * land.x
        };
        let scale_z = self.percent(10, 25) * land.z;
        let scale_y = self.percent(20, 100).min(scale_x).min(scale_z);
        let scale = Vec3::new(scale_x, scale_y, scale_z);

        // Quadrant by index: bit 0 picks +X, bit 1 picks +Z.
        let sign_x = if index % 2 == 1 { 1.0 } else { -1.0 };
        let sign_z = if index % 4 >= 2 { 1.0 } else { -1.0 };
        let offset_x = sign_x * (land.x - scale.x) * 0.5 * self.percent(20, 100);
        let offset_z = sign_z * (land.z - scale.z) * 0.5 * self.percent(20, 100);

        Plateau::new(Vec3::new(offset_x, scale.y * 0.5 * 0.9, offset_z), scale)
    }

    /// Uniform integer percentage in `[lo, hi)` as a fraction.
    fn percent(&mut self, lo: u32, hi: u32) -> f32 {
        self.rng.gen_range(lo..hi) as f32 * 0.01
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn same_seed_same_layout() {
        let a = TerrainGenerator::from_seed(42).generate();
        let b = TerrainGenerator::from_seed(42).generate();
        assert_eq!(a, b);
    }

    #[test]
    fn different_seeds_usually_diverge() {
        let layouts: Vec<Terrain> = (0..8)
            .map(|seed| TerrainGenerator::from_seed(seed).generate())
            .collect();
        assert!(layouts.windows(2).any(|w| w[0] != w[1]));
    }

    #[test]
    fn land_extents_respect_aspect_and_depth() {
        for seed in 0..200 {
            let land = TerrainGenerator::from_seed(seed).generate().land_size();
            assert!((0.99..4.0).contains(&land.x), "seed {seed}: {land:?}");
            assert!(land.z >= 0.5625 * land.x - 1e-5, "seed {seed}: {land:?}");
            assert!(land.z <= 1.77 * land.x + 1e-5, "seed {seed}: {land:?}");
            assert!(land.y <= 2.0 && land.y > 0.0, "seed {seed}: {land:?}");
            assert!(land.y <= land.x.max(land.z));
        }
    }

    #[test]
    fn plateaus_sit_in_their_quadrant_and_on_the_ground() {
        for seed in 0..200 {
            let terrain = TerrainGenerator::from_seed(seed).generate();
            assert!(terrain.plateaus().len() <= 3);
            for (i, p) in terrain.plateaus().iter().enumerate() {
                assert!(p.position.x < 0.0 || i % 2 == 1, "seed {seed} plateau {i}");
                assert!(p.position.x > 0.0 || i % 2 == 0, "seed {seed} plateau {i}");
                assert!(p.position.z < 0.0 || i >= 2, "seed {seed} plateau {i}");
                assert!(p.position.z > 0.0 || i < 2, "seed {seed} plateau {i}");
                assert!(p.scale.y <= p.scale.x && p.scale.y <= p.scale.z);
                assert!((p.position.y - p.scale.y * 0.45).abs() < 1e-6);
            }
        }
    }

    #[test]
    fn zero_plateau_budget_gives_flat_land() {
        let params = GenerationParams {
            max_plateaus: 0,
            ..GenerationParams::default()
        };
        let terrain = TerrainGenerator::with_params(9, params).unwrap().generate();
        assert!(terrain.plateaus().is_empty());
    }

    #[test]
    fn rejects_inverted_aspect_range() {
        let params = GenerationParams {
            min_aspect: 2.0,
            max_aspect: 1.0,
            ..GenerationParams::default()
        };
        assert_eq!(
            TerrainGenerator::with_params(1, params).err(),
            Some(TerrainError::InvertedAspect { min: 2.0, max: 1.0 })
        );
    }

    #[test]
    fn rejects_degenerate_extents() {
        let zero_unit = GenerationParams {
            extent_unit: 0.0,
            ..GenerationParams::default()
        };
        assert_eq!(
            zero_unit.validate(),
            Err(TerrainError::InvalidParam { name: "extent_unit", value: 0.0 })
        );
        let flat = GenerationParams {
            max_depth: -1.0,
            ..GenerationParams::default()
        };
        assert!(matches!(
            flat.validate(),
            Err(TerrainError::InvalidParam { name: "max_depth", .. })
        ));
        let nan = GenerationParams {
            max_aspect: f32::NAN,
            ..GenerationParams::default()
        };
        assert!(nan.validate().is_err());
        assert!(GenerationParams::default().validate().is_ok());
    }

    #[test]
    fn partial_params_fill_from_defaults() {
        let params: GenerationParams = serde_json::from_str(r#"{"max_plateaus": 1}"#).unwrap();
        assert_eq!(params.max_plateaus, 1);
        assert_eq!(params.extent_unit, GenerationParams::default().extent_unit);
    }

    #[test]
    fn seed_is_reported() {
        assert_eq!(TerrainGenerator::from_seed(1234).seed(), 1234);
    }
}
