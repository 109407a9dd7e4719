use std::f32::consts::TAU;

use nalgebra::Vector3;

use crate::{mesh::TriMesh, Pos};

/// Append-only vertex and face storage. Every vertex keeps the index it was
/// given by [`MeshBuilder::add_vertex`] for the lifetime of the builder, so
/// faces can refer to points as soon as they are created.
#[derive(Debug, Clone)]
pub struct MeshBuilder {
    vertices: Vec<Pos>,
    faces: Vec<[u32; 3]>,
}

impl MeshBuilder {
    pub fn new() -> Self {
        Self {
            vertices: Vec::new(),
            faces: Vec::new(),
        }
    }

    /// Starts a builder seeded with all vertices of `mesh` (but none of its
    /// faces), reserving room for the mesh to roughly double in size.
    pub fn from_vertices(mesh: &TriMesh) -> Self {
        let mut vertices = Vec::with_capacity(2 * mesh.vertex_count());
        vertices.extend_from_slice(mesh.vertices());

        Self {
            vertices,
            faces: Vec::with_capacity(2 * mesh.face_count()),
        }
    }

    pub fn add_vertex(&mut self, vertex: Pos) -> u32 {
        self.vertices.push(vertex);
        (self.vertices.len() - 1) as u32
    }

    pub fn vertex(&self, index: u32) -> Pos {
        self.vertices[index as usize]
    }

    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    pub fn face_count(&self) -> usize {
        self.faces.len()
    }

    pub fn add_face(&mut self, face: [u32; 3]) {
        self.faces.push(face);
    }

    /// Adds a quad given its corners in winding order, as two triangles
    /// sharing the `quad[0]`-`quad[2]` diagonal.
    pub fn add_quad(&mut self, quad: [u32; 4]) {
        self.add_face([quad[0], quad[1], quad[2]]);
        self.add_face([quad[0], quad[2], quad[3]]);
    }

    pub fn build(self) -> TriMesh {
        TriMesh::new(self.vertices, self.faces)
    }
}

impl MeshBuilder {
    /// Adds an axis aligned box with the given full size, centered on
    /// `center`. Eight corners, two triangles per side.
    pub fn add_box(&mut self, center: Pos, size: Vector3<f32>) {
        let half = size / 2.0;
        let first = self.vertices.len() as u32;

        for x in [-half.x, half.x] {
            for y in [-half.y, half.y] {
                for z in [-half.z, half.z] {
                    self.add_vertex(center + Pos::new(x, y, z));
                }
            }
        }

        const FACES: [[u32; 3]; 12] = [
            [0, 1, 2],
            [1, 3, 2],
            [2, 3, 6],
            [3, 7, 6],
            [4, 6, 5],
            [7, 5, 6],
            [0, 4, 5],
            [1, 0, 5],
            [1, 5, 7],
            [1, 7, 3],
            [0, 2, 6],
            [0, 6, 4],
        ];
        for face in FACES {
            self.add_face(face.map(|i| first + i));
        }
    }

    pub fn add_vertical_cylinder(
        &mut self,
        bottom: Pos,
        height: f32,
        (bottom_radius, top_radius): (f32, f32),
        precision: u32,
    ) {
        let top = bottom + Vector3::new(0.0, 0.0, height);
        let bottom_center = self.add_vertex(bottom);
        let top_center = self.add_vertex(top);

        let mut last = None;
        let mut first = None;
        for i in 0..precision {
            let angle = TAU * (i as f32) / (precision as f32);
            let normal = Vector3::new(angle.sin(), angle.cos(), 0.0);

            let top = self.add_vertex(top + normal * top_radius);
            let bottom = self.add_vertex(bottom + normal * bottom_radius);

            if let Some((last_top, last_bottom)) = last {
                self.add_quad([last_bottom, last_top, top, bottom]);
                self.add_face([top, last_top, top_center]);
                self.add_face([bottom_center, last_bottom, bottom]);
            }

            last = Some((top, bottom));
            first.get_or_insert((top, bottom));
        }

        if let (Some((first_top, first_bottom)), Some((last_top, last_bottom))) = (first, last) {
            self.add_quad([last_bottom, last_top, first_top, first_bottom]);
            self.add_face([first_top, last_top, top_center]);
            self.add_face([bottom_center, last_bottom, first_bottom]);
        }
    }
}

impl MeshBuilder {
    /// Adds a capped cylinder standing on the Y axis, centered on the origin.
    /// Points are laid out as the top center, the top ring, the bottom ring
    /// and the bottom center; each cap is a fan and the side is one row of
    /// quads.
    pub fn add_cylinder(
        &mut self,
        top_radius: f32,
        bottom_radius: f32,
        height: f32,
        sides: u32,
    ) {
        let half = height / 2.0;
        let top_center = self.add_vertex(Pos::new(0.0, half, 0.0));

        let ring = (0..sides)
            .map(|i| {
                let angle = TAU * i as f32 / sides as f32;
                (angle.cos(), angle.sin())
            })
            .collect::<Vec<_>>();
        let mut add_ring = |radius: f32, y: f32| {
            let first = self.vertex_count() as u32;
            for &(cos, sin) in &ring {
                self.add_vertex(Pos::new(radius * cos, y, radius * sin));
            }
            first
        };
        let top = add_ring(top_radius, half);
        let bottom = add_ring(bottom_radius, -half);
        let bottom_center = self.add_vertex(Pos::new(0.0, -half, 0.0));

        for i in 0..sides {
            let next = (i + 1) % sides;
            self.add_face([top_center, top + i, top + next]);
        }
        for i in 0..sides {
            let next = (i + 1) % sides;
            self.add_quad([top + next, top + i, bottom + i, bottom + next]);
        }
        for i in 0..sides {
            let next = (i + 1) % sides;
            self.add_face([bottom_center, bottom + next, bottom + i]);
        }
    }
}

impl Default for MeshBuilder {
    fn default() -> Self {
        Self::new()
    }
}
