use std::fmt::{self, Display};

use common::{axis::Axis, config};
use ordered_float::OrderedFloat;

use crate::{
    error::{SliceError, SliceResult},
    mesh::TriMesh,
};

/// Minimum and maximum coordinate of a mesh along the slicing axis.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ExtentRange {
    pub min: f32,
    pub max: f32,
}

/// Sorted absolute positions of the slicing planes, bracketed by the extent
/// of the mesh so there are always at least two entries.
#[derive(Debug, Clone, PartialEq)]
pub struct PlaneValues {
    values: Vec<f32>,
}

/// Where a coordinate falls relative to the plane values, counted in half
/// steps: `2 * i` is exactly on plane `i` and `2 * i + 1` is strictly
/// between planes `i` and `i + 1`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Bucket(u32);

impl ExtentRange {
    pub fn new(min: f32, max: f32) -> Self {
        Self { min, max }
    }

    pub fn size(&self) -> f32 {
        self.max - self.min
    }

    /// Point `fraction` of the way from `min` to `max`.
    pub fn lerp(&self, fraction: f32) -> f32 {
        self.min + fraction * (self.max - self.min)
    }

    /// Inverse of [`ExtentRange::lerp`].
    pub fn fraction_of(&self, value: f32) -> f32 {
        (value - self.min) / self.size()
    }
}

/// Scans every vertex for the smallest and largest coordinate along `axis`.
pub fn find_extents(mesh: &TriMesh, axis: Axis) -> SliceResult<ExtentRange> {
    if mesh.is_empty() {
        return Err(SliceError::EmptyMesh);
    }

    let dim = axis.index();
    let mut range = ExtentRange::new(f32::MAX, f32::MIN);
    for (index, vertex) in mesh.vertices().iter().enumerate() {
        if !vertex.iter().all(|x| x.is_finite()) {
            return Err(SliceError::NonFiniteVertex { index });
        }

        range.min = range.min.min(vertex[dim]);
        range.max = range.max.max(vertex[dim]);
    }

    if range.min >= range.max {
        return Err(SliceError::DegenerateExtent {
            axis,
            value: range.min,
        });
    }

    if !range.size().is_finite() {
        return Err(SliceError::ExtentOverflow {
            axis,
            min: range.min,
            max: range.max,
        });
    }

    Ok(range)
}

/// Fractions for `count` slabs of equal width.
pub fn even_fractions(count: usize) -> SliceResult<Vec<f32>> {
    if count == 0 {
        return Err(SliceError::ZeroSliceCount);
    }

    Ok(config::even_fractions(count))
}

impl PlaneValues {
    /// Converts relative fractions into absolute coordinates within `range`.
    /// Every fraction must be strictly between 0 and 1; they do not need to
    /// be sorted. `range` must have a finite size, as the ones returned by
    /// [`find_extents`] do.
    pub fn from_fractions(range: ExtentRange, fractions: &[f32]) -> SliceResult<Self> {
        let mut values = Vec::with_capacity(fractions.len() + 2);
        values.push(range.min);
        for &fraction in fractions {
            if !(fraction > 0.0 && fraction < 1.0) {
                return Err(SliceError::FractionOutOfRange(fraction));
            }
            values.push(range.lerp(fraction).clamp(range.min, range.max));
        }

        values[1..].sort_by_key(|&x| OrderedFloat(x));
        values.push(range.max);
        debug_assert!(
            values.windows(2).all(|pair| pair[0] <= pair[1]),
            "plane values out of order: {values:?}"
        );

        Ok(Self { values })
    }

    pub fn values(&self) -> &[f32] {
        &self.values
    }

    /// Plane value with the given index, the extents included.
    pub fn value(&self, index: usize) -> f32 {
        self.values[index]
    }

    /// Number of planes strictly inside the extents.
    pub fn interior_count(&self) -> usize {
        self.values.len() - 2
    }

    /// Finds the bucket in which the given value lies. Values equal to a
    /// plane (compared exactly) land on that plane, anything else is between
    /// its two neighbours. Returns `None` for values outside the extents and
    /// for NaN.
    pub fn bucket(&self, value: f32) -> Option<Bucket> {
        let index = self.values.partition_point(|&x| x < value);
        match self.values.get(index) {
            Some(&x) if x == value => Some(Bucket::on_plane(index)),
            Some(_) if index > 0 => Some(Bucket((2 * index - 1) as u32)),
            _ => None,
        }
    }
}

impl Bucket {
    pub fn on_plane(index: usize) -> Self {
        Self(2 * index as u32)
    }

    pub fn between(lower: usize) -> Self {
        Self(2 * lower as u32 + 1)
    }

    pub fn is_on_plane(&self) -> bool {
        self.0 % 2 == 0
    }

    /// Index of the highest plane at or below the value.
    pub fn floor(&self) -> usize {
        (self.0 / 2) as usize
    }

    /// Index of the lowest plane at or above the value.
    pub fn ceil(&self) -> usize {
        self.0.div_ceil(2) as usize
    }

    /// Index of the slab the value belongs to, where a value exactly on a
    /// plane counts as part of the slab above it. Same as [`Bucket::floor`].
    pub fn truncated(&self) -> usize {
        self.floor()
    }

    /// The bucket as a plane index, with `.5` for values between planes.
    pub fn value(&self) -> f32 {
        self.0 as f32 / 2.0
    }
}

impl Display for Bucket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.value())
    }
}
