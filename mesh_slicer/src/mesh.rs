use std::collections::HashMap;

use crate::Pos;

/// A mesh made of vertices and triangular faces. Faces index into the vertex
/// list; unused or duplicate vertices are allowed.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TriMesh {
    vertices: Vec<Pos>,
    faces: Vec<[u32; 3]>,
}

impl TriMesh {
    /// Creates a new mesh from the given vertices and faces. Face indices are
    /// not checked here, the slicer verifies them before use.
    pub fn new(vertices: Vec<Pos>, faces: Vec<[u32; 3]>) -> Self {
        Self { vertices, faces }
    }

    pub fn vertices(&self) -> &[Pos] {
        &self.vertices
    }

    pub fn faces(&self) -> &[[u32; 3]] {
        &self.faces
    }

    pub fn vertex(&self, index: u32) -> Pos {
        self.vertices[index as usize]
    }

    pub fn face_verts(&self, index: usize) -> [Pos; 3] {
        self.faces[index].map(|i| self.vertex(i))
    }

    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    pub fn face_count(&self) -> usize {
        self.faces.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    pub(crate) fn parts_mut(&mut self) -> (&mut Vec<Pos>, &mut Vec<[u32; 3]>) {
        (&mut self.vertices, &mut self.faces)
    }

    /// Returns true when every edge is shared by exactly two faces. Sliced
    /// meshes can lose this if a split leaves a vertex in the middle of a
    /// neighbouring edge.
    pub fn is_closed(&self) -> bool {
        let mut edges = HashMap::<_, u8>::new();

        for [a, b, c] in &self.faces {
            for (a, b) in [(a, b), (b, c), (c, a)] {
                *edges.entry((a.min(b), a.max(b))).or_default() += 1;
            }
        }

        !edges.is_empty() && edges.values().all(|&count| count == 2)
    }

    /// Area of the indexed face.
    pub fn face_area(&self, index: usize) -> f32 {
        let [v0, v1, v2] = self.face_verts(index);
        (v1 - v0).cross(&(v2 - v0)).norm() * 0.5
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builder::MeshBuilder;

    #[test]
    fn box_is_closed() {
        let mut builder = MeshBuilder::new();
        builder.add_box(Pos::zeros(), Pos::repeat(1.0));
        let mesh = builder.build();
        assert!(mesh.is_closed());
    }

    #[test]
    fn lone_triangle_is_open() {
        let mesh = TriMesh::new(
            vec![Pos::zeros(), Pos::x(), Pos::y()],
            vec![[0, 1, 2]],
        );
        assert!(!mesh.is_closed());
        assert_eq!(mesh.face_area(0), 0.5);
    }
}
