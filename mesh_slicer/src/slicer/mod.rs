use std::time::Instant;

use common::{
    axis::Axis,
    config::{Planes, SliceConfig},
};
use tracing::debug;

use crate::{
    cleanup::clean_mesh,
    error::{SliceError, SliceResult},
    mesh::TriMesh,
    Pos,
};

mod classify;
mod observer;
mod planes;
mod split;

pub use classify::{classify, crossing_count, LadderCase, TriangleSplit};
pub use observer::{SliceObserver, TraceObserver};
pub use planes::{even_fractions, find_extents, Bucket, ExtentRange, PlaneValues};
pub use split::split_mesh;

/// Splits meshes along one axis so every triangle of the result lies between
/// two consecutive planes.
#[derive(Debug, Clone, Default)]
pub struct Slicer {
    config: SliceConfig,
}

/// A mesh whose triangles each lie within one slab, along with the axis it
/// was sliced on and the extent of the original mesh along it.
#[derive(Debug, Clone, PartialEq)]
pub struct SlicedMesh {
    mesh: TriMesh,
    axis: Axis,
    range: ExtentRange,
}

impl Slicer {
    pub fn new(config: SliceConfig) -> Self {
        Self { config }
    }

    /// Slices `mesh` with the configured axis and planes.
    pub fn slice(&self, mesh: &TriMesh) -> SliceResult<SlicedMesh> {
        self.slice_observed(mesh, &mut TraceObserver)
    }

    /// Same as [`Slicer::slice`], reporting every intermediate step to
    /// `observer`.
    pub fn slice_observed(
        &self,
        mesh: &TriMesh,
        observer: &mut impl SliceObserver,
    ) -> SliceResult<SlicedMesh> {
        let start = Instant::now();
        let axis = self.config.axis;

        let range = find_extents(mesh, axis)?;
        let fractions = self.fractions()?;
        let planes = PlaneValues::from_fractions(range, &fractions)?;
        observer.planes(axis, &planes);

        let mut sliced = split_mesh(mesh, axis, &planes, observer)?;
        let stats = clean_mesh(&mut sliced, &self.config.clean);
        observer.cleaned(&stats);

        debug!(
            "Sliced {} triangles along {axis} at {} planes into {} triangles in {:?}",
            mesh.face_count(),
            planes.interior_count(),
            sliced.face_count(),
            start.elapsed()
        );

        Ok(SlicedMesh {
            mesh: sliced,
            axis,
            range,
        })
    }

    fn fractions(&self) -> SliceResult<Vec<f32>> {
        self.config
            .planes
            .fractions()
            .ok_or(SliceError::ZeroSliceCount)
    }
}

/// Slices `mesh` at the given relative positions along `axis`, using the
/// default cleanup tolerances. Each fraction must be strictly between 0
/// and 1; an empty list returns a cleaned copy of the mesh.
pub fn slice_mesh(mesh: &TriMesh, axis: Axis, fractions: &[f32]) -> SliceResult<SlicedMesh> {
    let config = SliceConfig {
        axis,
        planes: Planes::Fractions(fractions.to_vec()),
        ..Default::default()
    };
    Slicer::new(config).slice(mesh)
}

/// Slices `mesh` into `count` slabs of equal width along `axis`.
pub fn slice_mesh_even(mesh: &TriMesh, axis: Axis, count: usize) -> SliceResult<SlicedMesh> {
    slice_mesh(mesh, axis, &even_fractions(count)?)
}

impl SlicedMesh {
    pub fn mesh(&self) -> &TriMesh {
        &self.mesh
    }

    pub fn axis(&self) -> Axis {
        self.axis
    }

    pub fn range(&self) -> ExtentRange {
        self.range
    }

    pub fn into_mesh(self) -> TriMesh {
        self.mesh
    }

    /// Relative position of `point` along the slicing axis, 0 at the
    /// minimum of the range and 1 at the maximum.
    pub fn fraction_of(&self, point: &Pos) -> f32 {
        self.range.fraction_of(point[self.axis.index()])
    }
}
