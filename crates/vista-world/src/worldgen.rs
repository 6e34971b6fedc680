use serde::Deserialize;
use std::error::Error;
use std::fs;
use std::path::Path;

use crate::features::FeatureParams;
use crate::noise::OctavePass;

#[derive(Clone, Debug, Default, Deserialize)]
pub struct WorldGenConfig {
    #[serde(default)]
    pub terrain: Terrain,
    #[serde(default)]
    pub features: Features,
}

#[derive(Clone, Debug, Deserialize)]
pub struct Terrain {
    #[serde(default = "default_chunk_size")]
    pub chunk_size: usize,
    #[serde(default = "default_render_distance")]
    pub render_distance: i32,
    #[serde(default = "default_base_pass")]
    pub base: OctavePass,
    #[serde(default = "default_detail_pass")]
    pub detail: OctavePass,
}
fn default_chunk_size() -> usize {
    32
}
fn default_render_distance() -> i32 {
    3
}
fn default_base_pass() -> OctavePass {
    OctavePass {
        octaves: 6,
        persistence: 0.5,
        scale: 0.008,
        amplitude: 32.0,
    }
}
fn default_detail_pass() -> OctavePass {
    OctavePass {
        octaves: 4,
        persistence: 0.3,
        scale: 0.02,
        amplitude: 16.0,
    }
}
impl Default for Terrain {
    fn default() -> Self {
        Self {
            chunk_size: default_chunk_size(),
            render_distance: default_render_distance(),
            base: default_base_pass(),
            detail: default_detail_pass(),
        }
    }
}

#[derive(Clone, Debug, Deserialize)]
pub struct Features {
    #[serde(default = "default_cell_size")]
    pub cell_size: f64,
    /// Placement noise above this becomes a mountain.
    #[serde(default = "default_mountain_threshold")]
    pub mountain_threshold: f64,
    /// Placement noise below this becomes a valley.
    #[serde(default = "default_valley_threshold")]
    pub valley_threshold: f64,
    #[serde(default = "default_mountain_height")]
    pub mountain_height: f64,
    #[serde(default = "default_valley_depth")]
    pub valley_depth: f64,
    #[serde(default = "default_feature_radius")]
    pub feature_radius: f64,
    #[serde(default = "default_roughness")]
    pub roughness: OctavePass,
}
fn default_cell_size() -> f64 {
    30.0
}
fn default_mountain_threshold() -> f64 {
    0.75
}
fn default_valley_threshold() -> f64 {
    -0.65
}
fn default_mountain_height() -> f64 {
    70.0
}
fn default_valley_depth() -> f64 {
    40.0
}
fn default_feature_radius() -> f64 {
    120.0
}
fn default_roughness() -> OctavePass {
    OctavePass {
        octaves: 3,
        persistence: 0.3,
        scale: 0.03,
        amplitude: 5.0,
    }
}
impl Default for Features {
    fn default() -> Self {
        Self {
            cell_size: default_cell_size(),
            mountain_threshold: default_mountain_threshold(),
            valley_threshold: default_valley_threshold(),
            mountain_height: default_mountain_height(),
            valley_depth: default_valley_depth(),
            feature_radius: default_feature_radius(),
            roughness: default_roughness(),
        }
    }
}

/// Flattened, validated worldgen parameters.
#[derive(Clone, Debug, PartialEq)]
pub struct WorldGenParams {
    pub chunk_size: usize,
    pub render_distance: i32,
    pub base_pass: OctavePass,
    pub detail_pass: OctavePass,
    pub features: FeatureParams,
}

impl Default for WorldGenParams {
    fn default() -> Self {
        Self::from_config(&WorldGenConfig::default())
    }
}

impl WorldGenParams {
    pub fn from_config(cfg: &WorldGenConfig) -> Self {
        let f = &cfg.features;
        Self {
            chunk_size: cfg.terrain.chunk_size.max(1),
            render_distance: cfg.terrain.render_distance.max(0),
            base_pass: cfg.terrain.base,
            detail_pass: cfg.terrain.detail,
            features: FeatureParams {
                cell_size: if f.cell_size > 0.0 {
                    f.cell_size
                } else {
                    default_cell_size()
                },
                mountain_threshold: f.mountain_threshold,
                valley_threshold: f.valley_threshold,
                mountain_height: f.mountain_height,
                valley_depth: f.valley_depth,
                feature_radius: f.feature_radius.max(0.0),
                roughness: f.roughness,
            },
        }
    }

    /// Radius around a query that must have feature coverage before it is evaluated.
    #[inline]
    pub fn coverage_radius(&self) -> f64 {
        self.features.max_reach()
    }
}

pub fn load_params_from_path(path: &Path) -> Result<WorldGenParams, Box<dyn Error>> {
    let s = fs::read_to_string(path)?;
    let cfg: WorldGenConfig = toml::from_str(&s)?;
    Ok(WorldGenParams::from_config(&cfg))
}
