//! Error types for mesh slicing.

use common::axis::Axis;
use thiserror::Error;

/// Reasons a slicing call can be rejected. All of these are problems with
/// the input; nothing is produced when one is returned.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SliceError {
    /// Mesh has no vertices.
    #[error("Mesh has no vertices")]
    EmptyMesh,

    /// A vertex has a NaN or infinite coordinate.
    #[error("Vertex {index} has a non-finite coordinate")]
    NonFiniteVertex {
        /// Index of the offending vertex.
        index: usize,
    },

    /// A vertex lies outside of the range covered by the plane values.
    #[error("Vertex {index} at {value} is outside of the slicing range")]
    VertexOutsideExtents {
        /// Index of the offending vertex.
        index: usize,
        /// Its coordinate along the slicing axis.
        value: f32,
    },

    /// Every vertex has the same coordinate along the slicing axis.
    #[error("Mesh has zero thickness along {axis} (all vertices at {value})")]
    DegenerateExtent {
        /// The slicing axis.
        axis: Axis,
        /// The shared coordinate.
        value: f32,
    },

    /// The extent along the slicing axis is too wide to be represented.
    #[error("Mesh extent along {axis} from {min} to {max} is too large to slice")]
    ExtentOverflow {
        /// The slicing axis.
        axis: Axis,
        /// Smallest coordinate along it.
        min: f32,
        /// Largest coordinate along it.
        max: f32,
    },

    /// A relative plane position is not strictly between 0 and 1.
    #[error("Slicing fraction {0} is outside of (0, 1)")]
    FractionOutOfRange(f32),

    /// An even split was requested into zero slabs.
    #[error("Slice count must be at least 1")]
    ZeroSliceCount,

    /// A face refers to a vertex that does not exist.
    #[error("Face {face} uses vertex {index}, but the mesh only has {vertex_count} vertices")]
    IndexOutOfBounds {
        /// Index of the offending face.
        face: usize,
        /// The out of range vertex index.
        index: u32,
        /// Number of vertices in the mesh.
        vertex_count: usize,
    },
}

/// Result type for slicing operations.
pub type SliceResult<T> = std::result::Result<T, SliceError>;
