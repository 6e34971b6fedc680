use std::sync::Arc;

use crate::features::FeatureCache;
use crate::noise::NoiseField;
use crate::worldgen::WorldGenParams;

/// Elevation for any world `(x, z)` in the current generation.
///
/// Holds the generation's noise field and feature cache; `reseed` swaps both
/// out together so queries never mix two generations.
#[derive(Debug)]
pub struct HeightField {
    noise: NoiseField,
    features: FeatureCache,
    params: Arc<WorldGenParams>,
}

impl HeightField {
    pub fn new(seed: f64, params: Arc<WorldGenParams>) -> Self {
        Self {
            noise: NoiseField::new(seed),
            features: FeatureCache::new(),
            params,
        }
    }

    #[inline]
    pub fn seed(&self) -> f64 {
        self.noise.seed()
    }

    #[inline]
    pub fn params(&self) -> &Arc<WorldGenParams> {
        &self.params
    }

    #[inline]
    pub fn noise(&self) -> &NoiseField {
        &self.noise
    }

    #[inline]
    pub fn features(&self) -> &FeatureCache {
        &self.features
    }

    /// Starts a new generation: fresh noise, empty feature cache.
    pub fn reseed(&mut self, seed: f64) {
        self.features.clear();
        self.noise = NoiseField::new(seed);
    }

    /// Replaces the worldgen parameters; features decided under the old ones are dropped.
    pub fn set_params(&mut self, params: Arc<WorldGenParams>) {
        self.features.clear();
        self.params = params;
    }

    /// Decides landscape features for every cell overlapping `center ± radius`.
    pub fn ensure_features(&mut self, center_x: f64, center_z: f64, radius: f64) {
        self.features.ensure_generated(
            &self.noise,
            &self.params.features,
            center_x,
            center_z,
            radius,
        );
    }

    /// Terrain before landscape features are applied.
    pub fn base_elevation(&self, x: f64, z: f64) -> f64 {
        self.params.base_pass.sample(&self.noise, x, z)
            + self.params.detail_pass.sample(&self.noise, x, z)
    }

    pub fn elevation(&mut self, x: f64, z: f64) -> f64 {
        let radius = self.params.coverage_radius();
        self.ensure_features(x, z, radius);
        let base = self.base_elevation(x, z);
        self.features
            .height_modifier(&self.noise, &self.params.features, x, z, base)
    }
}
