use serde::{Deserialize, Serialize};

use crate::axis::Axis;

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(default)]
pub struct SliceConfig {
    pub axis: Axis,
    pub planes: Planes,
    pub clean: CleanConfig,
}

/// Where the slicing planes go, relative to the extent of the mesh along the
/// slicing axis.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(rename_all = "snake_case")]
pub enum Planes {
    /// Relative positions, each in the open interval (0, 1).
    Fractions(Vec<f32>),
    /// Split the mesh into this many slabs of equal width.
    Even(u32),
}

/// Tolerances used when tidying the mesh after it has been split.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(default)]
pub struct CleanConfig {
    /// Vertices closer than this are merged.
    pub weld_tolerance: f32,
    /// Triangles with a smaller area are dropped.
    pub min_area: f32,
}

impl Planes {
    /// Expands the plane description into relative fractions. An even split
    /// into `n` slabs becomes `1/n, 2/n, ..., (n-1)/n`; zero slabs gives
    /// `None` as there is no meaningful set of planes for it.
    pub fn fractions(&self) -> Option<Vec<f32>> {
        match self {
            Planes::Fractions(fractions) => Some(fractions.clone()),
            Planes::Even(0) => None,
            Planes::Even(count) => Some(even_fractions(*count as usize)),
        }
    }
}

/// Fractions `1/count, 2/count, ..., (count-1)/count` that split a range into
/// `count` slabs of equal width. Empty for zero or one slab.
pub fn even_fractions(count: usize) -> Vec<f32> {
    (1..count).map(|i| i as f32 / count as f32).collect()
}

impl Default for SliceConfig {
    fn default() -> Self {
        Self {
            axis: Axis::Y,
            planes: Planes::default(),
            clean: CleanConfig::default(),
        }
    }
}

impl Default for Planes {
    fn default() -> Self {
        Planes::Fractions(Vec::new())
    }
}

impl Default for CleanConfig {
    fn default() -> Self {
        Self {
            weld_tolerance: 1e-4,
            min_area: 1e-8,
        }
    }
}
