//! Splits triangle meshes along a principal axis so that every triangle of
//! the result lies between two consecutive slicing planes. The entry points
//! are [`slicer::Slicer`] and the [`slicer::slice_mesh`] /
//! [`slicer::slice_mesh_even`] shortcuts.

use nalgebra::Vector3;

pub mod builder;
pub mod cleanup;
pub mod error;
pub mod mesh;
pub mod slicer;
pub mod validate;

pub type Pos = Vector3<f32>;
