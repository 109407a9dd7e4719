use common::axis::Axis;
use tracing::trace;

use super::{classify::TriangleSplit, planes::PlaneValues};
use crate::cleanup::CleanStats;

/// Hooks into the intermediate steps of a slicing call, for debugging or
/// statistics. Every method does nothing by default.
pub trait SliceObserver {
    /// Called once the plane values are known, before any face is touched.
    fn planes(&mut self, _axis: Axis, _planes: &PlaneValues) {}

    /// Called for every input face with its classification.
    fn triangle(&mut self, _face: usize, _split: &TriangleSplit) {}

    /// Called after an input face was split with the number of triangles it
    /// was replaced by.
    fn emitted(&mut self, _face: usize, _triangles: usize) {}

    /// Called after the split mesh was cleaned.
    fn cleaned(&mut self, _stats: &CleanStats) {}
}

impl SliceObserver for () {}

/// Writes every step out as `trace` level events.
#[derive(Debug, Default, Clone, Copy)]
pub struct TraceObserver;

impl SliceObserver for TraceObserver {
    fn planes(&mut self, axis: Axis, planes: &PlaneValues) {
        trace!("Slicing in {axis} at {:?}", planes.values());
    }

    fn triangle(&mut self, face: usize, split: &TriangleSplit) {
        trace!("Face {face}: {split:?}");
    }

    fn emitted(&mut self, face: usize, triangles: usize) {
        trace!("Face {face} became {triangles} triangles");
    }

    fn cleaned(&mut self, stats: &CleanStats) {
        trace!("Cleaned mesh: {stats:?}");
    }
}
