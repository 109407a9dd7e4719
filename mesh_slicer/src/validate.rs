use std::collections::HashMap;

use crate::{
    cleanup::{cell, neighbour_cells},
    mesh::TriMesh,
};

/// Result of [`validate_mesh`]. Only the first problem found is reported.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MeshValidity {
    Valid,
    /// A face uses a vertex index past the end of the vertex list.
    IndexOutOfRange { face: usize },
    /// A face repeats a vertex or has (almost) no area.
    DegenerateTriangle { face: usize },
    /// Two distinct vertices are within the tolerance of each other.
    DuplicateVertices { first: u32, second: u32 },
    /// A vertex is not used by any face.
    UnusedVertices { vertex: u32 },
}

impl MeshValidity {
    pub fn is_valid(&self) -> bool {
        matches!(self, MeshValidity::Valid)
    }
}

/// Checks that a mesh is well formed: indices in range, no degenerate faces,
/// no coincident vertices and no unused ones. Faces whose area is below
/// `tolerance²` and vertices closer than `tolerance` are reported.
pub fn validate_mesh(mesh: &TriMesh, tolerance: f32) -> MeshValidity {
    let vertex_count = mesh.vertex_count();
    if let Some(face) = mesh
        .faces()
        .iter()
        .position(|face| face.iter().any(|&i| i as usize >= vertex_count))
    {
        return MeshValidity::IndexOutOfRange { face };
    }

    let min_area = tolerance * tolerance;
    for (face, &[a, b, c]) in mesh.faces().iter().enumerate() {
        if a == b || b == c || c == a || mesh.face_area(face) < min_area {
            return MeshValidity::DegenerateTriangle { face };
        }
    }

    if let Some((first, second)) = find_duplicate(mesh, tolerance) {
        return MeshValidity::DuplicateVertices { first, second };
    }

    let mut used = vec![false; vertex_count];
    for &index in mesh.faces().iter().flatten() {
        used[index as usize] = true;
    }
    if let Some(vertex) = used.iter().position(|&x| !x) {
        return MeshValidity::UnusedVertices {
            vertex: vertex as u32,
        };
    }

    MeshValidity::Valid
}

fn find_duplicate(mesh: &TriMesh, tolerance: f32) -> Option<(u32, u32)> {
    if tolerance <= 0.0 {
        return None;
    }

    let mut cells = HashMap::<_, Vec<u32>>::new();

    for (index, vertex) in mesh.vertices().iter().enumerate() {
        let base = cell(vertex, tolerance);
        for key in neighbour_cells(base) {
            for &other in cells.get(&key).into_iter().flatten() {
                if (mesh.vertex(other) - vertex).norm() < tolerance {
                    return Some((other, index as u32));
                }
            }
        }

        cells.entry(base).or_default().push(index as u32);
    }

    None
}
