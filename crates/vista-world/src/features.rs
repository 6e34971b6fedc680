//! Large-scale landscape features (mountains and valleys) placed on a coarse grid.
//!
//! Each grid cell is decided once per generation from noise sampled at the
//! cell origin, so a cell's feature depends only on the seed and its key,
//! never on which query happened to reach it first.

use std::collections::BTreeMap;

use hashbrown::HashSet;

use crate::noise::{NoiseField, OctavePass};

/// Integer grid cell `(floor(x / cell), floor(z / cell))`.
pub type GridKey = (i64, i64);

/// Cells are marked visited in square blocks of this many cells per side.
const REGION_CELLS: i64 = 8;

/// Keys are clamped to this magnitude so region arithmetic cannot overflow.
const KEY_LIMIT: f64 = (1u64 << 52) as f64;

/// Frequency of the placement tap.
const PLACEMENT_FREQ: f64 = 0.003;
/// Frequency of the center-jitter taps.
const JITTER_FREQ: f64 = 0.01;
/// Fraction of a cell a center can be pushed by jitter.
const JITTER_SPAN: f64 = 0.3;
const INTENSITY_FREQ: f64 = 0.005;
const RADIUS_FREQ: f64 = 0.003;

/// z-layers that decorrelate the individual taps from each other and from the base terrain.
mod layer {
    pub const PLACEMENT: f64 = 1000.0;
    pub const MOUNTAIN_X: f64 = 2000.0;
    pub const MOUNTAIN_Z: f64 = 3000.0;
    pub const MOUNTAIN_INTENSITY: f64 = 4000.0;
    pub const MOUNTAIN_RADIUS: f64 = 5000.0;
    pub const VALLEY_X: f64 = 6000.0;
    pub const VALLEY_Z: f64 = 7000.0;
    pub const VALLEY_INTENSITY: f64 = 8000.0;
    pub const VALLEY_RADIUS: f64 = 9000.0;
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum FeatureKind {
    Mountain,
    Valley,
}

/// Shape constants for one feature kind.
#[derive(Clone, Copy, Debug)]
struct KindShape {
    intensity_base: f64,
    intensity_span: f64,
    radius_base: f64,
    radius_span: f64,
}

impl FeatureKind {
    const fn shape(self) -> KindShape {
        match self {
            FeatureKind::Mountain => KindShape {
                intensity_base: 0.6,
                intensity_span: 0.4,
                radius_base: 1.2,
                radius_span: 0.8,
            },
            FeatureKind::Valley => KindShape {
                intensity_base: 0.5,
                intensity_span: 0.4,
                radius_base: 0.8,
                radius_span: 0.6,
            },
        }
    }

    const fn layers(self) -> [f64; 4] {
        match self {
            FeatureKind::Mountain => [
                layer::MOUNTAIN_X,
                layer::MOUNTAIN_Z,
                layer::MOUNTAIN_INTENSITY,
                layer::MOUNTAIN_RADIUS,
            ],
            FeatureKind::Valley => [
                layer::VALLEY_X,
                layer::VALLEY_Z,
                layer::VALLEY_INTENSITY,
                layer::VALLEY_RADIUS,
            ],
        }
    }

    /// Lower bound of the intensity range; the upper bound is always 1.0.
    pub const fn intensity_floor(self) -> f64 {
        self.shape().intensity_base
    }

    /// Largest radius multiplier this kind can produce.
    pub const fn max_radius_factor(self) -> f64 {
        let s = self.shape();
        s.radius_base + s.radius_span
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LandscapeFeature {
    pub kind: FeatureKind,
    pub center_x: f64,
    pub center_z: f64,
    pub intensity: f64,
    pub radius: f64,
}

impl LandscapeFeature {
    /// Quadratic falloff `(1 - d/r)^2` inside the radius, `None` outside.
    #[inline]
    pub fn falloff_at(&self, x: f64, z: f64) -> Option<f64> {
        let dx = x - self.center_x;
        let dz = z - self.center_z;
        let distance = (dx * dx + dz * dz).sqrt();
        if distance < self.radius {
            let t = 1.0 - distance / self.radius;
            Some(t * t)
        } else {
            None
        }
    }
}

/// Feature placement parameters, flattened from the worldgen config.
#[derive(Clone, Debug, PartialEq)]
pub struct FeatureParams {
    pub cell_size: f64,
    pub mountain_threshold: f64,
    pub valley_threshold: f64,
    pub mountain_height: f64,
    pub valley_depth: f64,
    pub feature_radius: f64,
    pub roughness: OctavePass,
}

impl FeatureParams {
    /// Farthest a feature can reach from the origin of the cell that owns it.
    pub fn max_reach(&self) -> f64 {
        let factor = FeatureKind::Mountain
            .max_radius_factor()
            .max(FeatureKind::Valley.max_radius_factor());
        // Jitter moves a center at most 0.45 of a cell; one full cell covers it.
        self.feature_radius * factor + self.cell_size
    }
}

/// Memoized features keyed by grid cell.
#[derive(Debug, Default)]
pub struct FeatureCache {
    visited_regions: HashSet<GridKey>,
    visited_cells: HashSet<GridKey>,
    // Ordered so the modifier sum is independent of generation order.
    features: BTreeMap<GridKey, LandscapeFeature>,
}

impl FeatureCache {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.features.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.features.is_empty()
    }

    #[inline]
    pub fn visited_cells(&self) -> usize {
        self.visited_cells.len()
    }

    #[inline]
    pub fn is_visited(&self, key: GridKey) -> bool {
        self.visited_cells.contains(&key)
    }

    pub fn get(&self, key: GridKey) -> Option<&LandscapeFeature> {
        self.features.get(&key)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&GridKey, &LandscapeFeature)> {
        self.features.iter()
    }

    pub fn clear(&mut self) {
        log::debug!(
            "clearing {} landscape features over {} cells",
            self.features.len(),
            self.visited_cells.len()
        );
        self.visited_regions.clear();
        self.visited_cells.clear();
        self.features.clear();
    }

    #[inline]
    pub fn cell_of(v: f64, cell_size: f64) -> i64 {
        (v / cell_size).floor().clamp(-KEY_LIMIT, KEY_LIMIT) as i64
    }

    /// Makes sure every cell overlapping `center ± radius` has been decided.
    /// Already-visited cells are never recomputed.
    pub fn ensure_generated(
        &mut self,
        noise: &NoiseField,
        params: &FeatureParams,
        center_x: f64,
        center_z: f64,
        radius: f64,
    ) {
        let g = params.cell_size;
        let (kx0, kx1) = (
            Self::cell_of(center_x - radius, g),
            Self::cell_of(center_x + radius, g),
        );
        let (kz0, kz1) = (
            Self::cell_of(center_z - radius, g),
            Self::cell_of(center_z + radius, g),
        );
        for rz in kz0.div_euclid(REGION_CELLS)..=kz1.div_euclid(REGION_CELLS) {
            for rx in kx0.div_euclid(REGION_CELLS)..=kx1.div_euclid(REGION_CELLS) {
                if !self.visited_regions.insert((rx, rz)) {
                    continue;
                }
                for kz in rz * REGION_CELLS..(rz + 1) * REGION_CELLS {
                    for kx in rx * REGION_CELLS..(rx + 1) * REGION_CELLS {
                        self.visit_cell(noise, params, (kx, kz));
                    }
                }
            }
        }
    }

    fn visit_cell(&mut self, noise: &NoiseField, params: &FeatureParams, key: GridKey) {
        if !self.visited_cells.insert(key) {
            return;
        }
        if let Some(feature) = decide_cell(noise, params, key) {
            log::trace!(
                "{:?} at ({:.1}, {:.1}) r={:.1} cell={:?}",
                feature.kind,
                feature.center_x,
                feature.center_z,
                feature.radius,
                key
            );
            self.features.insert(key, feature);
        }
    }

    /// Applies every feature covering `(x, z)` to `base_height`.
    pub fn height_modifier(
        &self,
        noise: &NoiseField,
        params: &FeatureParams,
        x: f64,
        z: f64,
        base_height: f64,
    ) -> f64 {
        let mut height = base_height;
        for feature in self.features.values() {
            let Some(falloff) = feature.falloff_at(x, z) else {
                continue;
            };
            match feature.kind {
                FeatureKind::Mountain => {
                    let boost = params.mountain_height * feature.intensity * falloff;
                    height += boost + params.roughness.sample(noise, x, z);
                }
                FeatureKind::Valley => {
                    height -= params.valley_depth * feature.intensity * falloff;
                }
            }
        }
        height
    }
}

/// Decides what, if anything, lives in a grid cell.
pub fn decide_cell(
    noise: &NoiseField,
    params: &FeatureParams,
    key: GridKey,
) -> Option<LandscapeFeature> {
    let g = params.cell_size;
    let x = key.0 as f64 * g;
    let z = key.1 as f64 * g;
    let pick = noise.noise3(x * PLACEMENT_FREQ, z * PLACEMENT_FREQ, layer::PLACEMENT);
    let kind = if pick > params.mountain_threshold {
        FeatureKind::Mountain
    } else if pick < params.valley_threshold {
        FeatureKind::Valley
    } else {
        return None;
    };
    let shape = kind.shape();
    let [lx, lz, li, lr] = kind.layers();
    let jitter = |layer: f64| {
        (noise.noise3(x * JITTER_FREQ, z * JITTER_FREQ, layer) - 0.5) * g * JITTER_SPAN
    };
    let intensity = (shape.intensity_base
        + noise
            .noise3(x * INTENSITY_FREQ, z * INTENSITY_FREQ, li)
            .abs()
            * shape.intensity_span)
        .clamp(shape.intensity_base, 1.0);
    let radius_factor = (shape.radius_base
        + noise.noise3(x * RADIUS_FREQ, z * RADIUS_FREQ, lr).abs() * shape.radius_span)
        .clamp(shape.radius_base, kind.max_radius_factor());
    Some(LandscapeFeature {
        kind,
        center_x: x + jitter(lx),
        center_z: z + jitter(lz),
        intensity,
        radius: params.feature_radius * radius_factor,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::worldgen::WorldGenParams;

    fn params() -> FeatureParams {
        WorldGenParams::default().features
    }

    #[test]
    fn falloff_is_quadratic_and_bounded() {
        let f = LandscapeFeature {
            kind: FeatureKind::Mountain,
            center_x: 10.0,
            center_z: -5.0,
            intensity: 1.0,
            radius: 100.0,
        };
        assert_eq!(f.falloff_at(10.0, -5.0), Some(1.0));
        let half = f.falloff_at(60.0, -5.0).unwrap();
        assert!((half - 0.25).abs() < 1e-12);
        assert_eq!(f.falloff_at(110.0, -5.0), None);
        assert_eq!(f.falloff_at(200.0, 200.0), None);
    }

    #[test]
    fn mountain_raises_and_valley_lowers() {
        let noise = NoiseField::new(3.0);
        let p = params();
        let mut cache = FeatureCache::new();
        cache.features.insert(
            (0, 0),
            LandscapeFeature {
                kind: FeatureKind::Valley,
                center_x: 0.0,
                center_z: 0.0,
                intensity: 0.5,
                radius: 100.0,
            },
        );
        let lowered = cache.height_modifier(&noise, &p, 0.0, 0.0, 10.0);
        assert!((lowered - (10.0 - p.valley_depth * 0.5)).abs() < 1e-9);

        cache.features.clear();
        cache.features.insert(
            (0, 0),
            LandscapeFeature {
                kind: FeatureKind::Mountain,
                center_x: 0.0,
                center_z: 0.0,
                intensity: 1.0,
                radius: 100.0,
            },
        );
        let raised = cache.height_modifier(&noise, &p, 0.0, 0.0, 10.0);
        let roughness = p.roughness.sample(&noise, 0.0, 0.0);
        assert!((raised - (10.0 + p.mountain_height + roughness)).abs() < 1e-9);
        // Outside the radius nothing changes.
        assert_eq!(cache.height_modifier(&noise, &p, 500.0, 0.0, 10.0), 10.0);
    }

    #[test]
    fn decided_features_respect_ranges() {
        let noise = NoiseField::new(0.5);
        let p = params();
        let mut found = 0;
        for kz in -60..60 {
            for kx in -60..60 {
                if let Some(f) = decide_cell(&noise, &p, (kx, kz)) {
                    found += 1;
                    assert!(f.intensity >= f.kind.intensity_floor() && f.intensity <= 1.0);
                    assert!(f.radius > 0.0);
                    assert!(f.radius <= p.feature_radius * f.kind.max_radius_factor());
                    let ox = kx as f64 * p.cell_size;
                    let oz = kz as f64 * p.cell_size;
                    assert!((f.center_x - ox).abs() <= 0.5 * p.cell_size);
                    assert!((f.center_z - oz).abs() <= 0.5 * p.cell_size);
                }
            }
        }
        log::debug!("{found} features in sample window");
    }

    #[test]
    fn ensure_is_idempotent_and_covers_square() {
        let noise = NoiseField::new(0.5);
        let p = params();
        let mut cache = FeatureCache::new();
        cache.ensure_generated(&noise, &p, 0.0, 0.0, 100.0);
        let before: Vec<_> = cache.iter().map(|(k, f)| (*k, *f)).collect();
        let cells = cache.visited_cells();
        for k in -4..=3 {
            assert!(cache.is_visited((k, k)));
        }
        cache.ensure_generated(&noise, &p, 0.0, 0.0, 100.0);
        cache.ensure_generated(&noise, &p, 20.0, -15.0, 60.0);
        let after: Vec<_> = cache.iter().map(|(k, f)| (*k, *f)).collect();
        assert_eq!(before, after);
        assert_eq!(cells, cache.visited_cells());
    }

    #[test]
    fn far_away_queries_stay_bounded() {
        let noise = NoiseField::new(0.5);
        let p = params();
        let mut cache = FeatureCache::new();
        cache.ensure_generated(&noise, &p, 7.0e10, 0.0, p.max_reach());
        cache.ensure_generated(&noise, &p, -1.0e300, 1.0e300, p.max_reach());
        assert!(cache.visited_cells() > 0);
        assert_eq!(FeatureCache::cell_of(f64::MAX, p.cell_size), 1i64 << 52);
        assert_eq!(FeatureCache::cell_of(f64::MIN, p.cell_size), -(1i64 << 52));
        let h = cache.height_modifier(&noise, &p, 7.0e10, 0.0, 0.0);
        assert!(h.is_finite());
    }

    #[test]
    fn max_reach_covers_largest_feature() {
        let p = params();
        assert!(p.max_reach() >= p.feature_radius * 2.0 + 0.45 * p.cell_size);
    }
}
