use std::collections::HashMap;

use common::config::CleanConfig;

use crate::{mesh::TriMesh, Pos};

/// What [`clean_mesh`] removed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CleanStats {
    pub merged_vertices: usize,
    pub removed_faces: usize,
    pub removed_vertices: usize,
}

/// Tidies a mesh in place: vertices within `weld_tolerance` of each other are
/// merged, faces that are left with a repeated vertex or an area below
/// `min_area` are dropped and vertices no face uses anymore are removed.
/// Running it a second time changes nothing.
pub fn clean_mesh(mesh: &mut TriMesh, config: &CleanConfig) -> CleanStats {
    let merged_vertices = weld_vertices(mesh, config.weld_tolerance);
    let removed_faces = remove_degenerate_faces(mesh, config.min_area);
    let removed_vertices = remove_unused_vertices(mesh);

    CleanStats {
        merged_vertices,
        removed_faces,
        removed_vertices,
    }
}

/// Points every face at the lowest indexed vertex within `tolerance` of the
/// one it used. Returns the number of vertices that are no longer referenced
/// because of it; they are left in place for [`remove_unused_vertices`].
fn weld_vertices(mesh: &mut TriMesh, tolerance: f32) -> usize {
    if tolerance <= 0.0 {
        return 0;
    }

    let cell_size = tolerance * 2.0;
    let (vertices, faces) = mesh.parts_mut();

    let mut cells = HashMap::<_, Vec<u32>>::new();
    for (index, vertex) in vertices.iter().enumerate() {
        cells.entry(cell(vertex, cell_size)).or_default().push(index as u32);
    }

    let mut remap = (0..vertices.len() as u32).collect::<Vec<_>>();
    let mut merged = 0;
    for (index, vertex) in vertices.iter().enumerate() {
        let index = index as u32;
        if remap[index as usize] != index {
            continue;
        }

        for key in neighbour_cells(cell(vertex, cell_size)) {
            let Some(candidates) = cells.get(&key) else {
                continue;
            };

            for &other in candidates {
                if other <= index || remap[other as usize] != other {
                    continue;
                }

                if (vertices[other as usize] - vertex).norm() < tolerance {
                    remap[other as usize] = index;
                    merged += 1;
                }
            }
        }
    }

    if merged > 0 {
        for face in faces.iter_mut() {
            *face = face.map(|i| remap[i as usize]);
        }
    }

    merged
}

fn remove_degenerate_faces(mesh: &mut TriMesh, min_area: f32) -> usize {
    let (vertices, faces) = mesh.parts_mut();
    let original = faces.len();

    faces.retain(|&[a, b, c]| {
        if a == b || b == c || c == a {
            return false;
        }

        let (v0, v1, v2) = (
            vertices[a as usize],
            vertices[b as usize],
            vertices[c as usize],
        );
        (v1 - v0).cross(&(v2 - v0)).norm() * 0.5 >= min_area
    });

    original - faces.len()
}

/// Drops every vertex no face refers to, keeping the order of the rest.
fn remove_unused_vertices(mesh: &mut TriMesh) -> usize {
    let (vertices, faces) = mesh.parts_mut();

    let mut used = vec![false; vertices.len()];
    for &index in faces.iter().flatten() {
        used[index as usize] = true;
    }

    let mut remap = vec![u32::MAX; vertices.len()];
    let mut kept = 0;
    for (index, &is_used) in used.iter().enumerate() {
        if is_used {
            remap[index] = kept as u32;
            vertices[kept] = vertices[index];
            kept += 1;
        }
    }

    let removed = vertices.len() - kept;
    vertices.truncate(kept);
    for face in faces.iter_mut() {
        *face = face.map(|i| remap[i as usize]);
    }

    removed
}

pub(crate) type Cell = (i64, i64, i64);

/// Spatial hash cell of `pos` for cubes of side `cell_size`. Coordinates too
/// large for an `i64` saturate.
pub(crate) fn cell(pos: &Pos, cell_size: f32) -> Cell {
    (
        (pos.x / cell_size).floor() as i64,
        (pos.y / cell_size).floor() as i64,
        (pos.z / cell_size).floor() as i64,
    )
}

/// The 3×3×3 block of cells around the given one, leaving out any that would
/// overflow.
pub(crate) fn neighbour_cells((x, y, z): Cell) -> impl Iterator<Item = Cell> {
    (-1..=1).flat_map(move |dx| {
        (-1..=1).flat_map(move |dy| {
            (-1..=1).filter_map(move |dz| {
                Some((
                    x.checked_add(dx)?,
                    y.checked_add(dy)?,
                    z.checked_add(dz)?,
                ))
            })
        })
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builder::MeshBuilder;

    fn config() -> CleanConfig {
        CleanConfig::default()
    }

    #[test]
    fn welds_nearby_vertices() {
        let mut mesh = TriMesh::new(
            vec![
                Pos::zeros(),
                Pos::x(),
                Pos::y(),
                Pos::new(1.0, 1.0, 0.0),
                Pos::new(1.0 + 1e-6, 0.0, 0.0),
                Pos::new(0.0, 1.0, 1e-6),
            ],
            vec![[0, 1, 2], [4, 3, 5]],
        );

        let stats = clean_mesh(&mut mesh, &config());
        assert_eq!(
            stats,
            CleanStats {
                merged_vertices: 2,
                removed_faces: 0,
                removed_vertices: 2,
            }
        );
        assert_eq!(mesh.vertex_count(), 4);
        assert_eq!(mesh.faces(), &[[0, 1, 2], [1, 3, 2]]);
        assert!(!mesh.is_closed());
    }

    #[test]
    fn drops_degenerate_faces() {
        let mut mesh = TriMesh::new(
            vec![
                Pos::zeros(),
                Pos::x(),
                Pos::y(),
                Pos::new(2.0, 0.0, 0.0),
                Pos::new(0.0, 0.0, 1e-5),
            ],
            vec![[0, 1, 2], [0, 1, 3], [0, 0, 2], [0, 4, 1]],
        );

        let stats = clean_mesh(&mut mesh, &config());
        // Vertex 4 is welded onto 0, which turns the last face degenerate.
        assert_eq!(stats.merged_vertices, 1);
        assert_eq!(stats.removed_faces, 3);
        assert_eq!(stats.removed_vertices, 2);
        assert_eq!(mesh.faces(), &[[0, 1, 2]]);
        assert_eq!(mesh.vertices(), &[Pos::zeros(), Pos::x(), Pos::y()]);
    }

    #[test]
    fn clean_is_idempotent() {
        let mut builder = MeshBuilder::new();
        builder.add_box(Pos::zeros(), Pos::new(1.0, 2.0, 3.0));
        builder.add_vertex(Pos::repeat(10.0));
        let mut mesh = builder.build();

        let first = clean_mesh(&mut mesh, &config());
        assert_eq!(first.removed_vertices, 1);
        let cleaned = mesh.clone();

        let second = clean_mesh(&mut mesh, &config());
        assert_eq!(second, CleanStats::default());
        assert_eq!(mesh, cleaned);
    }

    #[test]
    fn huge_coordinates_do_not_overflow_cells() {
        let far = Pos::new(1e16, 0.0, 0.0);
        let mut mesh = TriMesh::new(
            vec![Pos::zeros(), far, Pos::y(), far + Pos::new(0.0, 1e-5, 0.0)],
            vec![[0, 1, 2], [3, 1, 2]],
        );

        let stats = clean_mesh(&mut mesh, &config());
        assert_eq!(stats.merged_vertices, 1);
        assert_eq!(stats.removed_faces, 1);
        assert_eq!(mesh.faces(), &[[0, 1, 2]]);
    }

    #[test]
    fn neighbour_cells_stop_at_the_edge() {
        assert_eq!(neighbour_cells((0, 0, 0)).count(), 27);
        assert_eq!(neighbour_cells((i64::MAX, 0, i64::MIN)).count(), 2 * 3 * 2);
    }

    #[test]
    fn zero_tolerance_skips_welding() {
        let mut mesh = TriMesh::new(
            vec![Pos::zeros(), Pos::x(), Pos::y(), Pos::zeros()],
            vec![[0, 1, 2], [3, 2, 1]],
        );
        let config = CleanConfig {
            weld_tolerance: 0.0,
            ..config()
        };

        let stats = clean_mesh(&mut mesh, &config);
        assert_eq!(stats, CleanStats::default());
        assert_eq!(mesh.vertex_count(), 4);
    }
}
