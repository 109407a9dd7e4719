use std::ops::Range;

use common::axis::Axis;

use super::{
    classify::{classify, LadderCase, TriangleSplit},
    observer::SliceObserver,
    planes::{Bucket, PlaneValues},
};
use crate::{
    builder::MeshBuilder,
    error::{SliceError, SliceResult},
    mesh::TriMesh,
    Pos,
};

/// Cuts every face of `mesh` that crosses one of the interior `planes` so
/// that each resulting triangle lies within a single slab. The result holds
/// all of the original vertices followed by the new ones; it is not cleaned,
/// so it can contain coincident vertices and zero area triangles.
pub fn split_mesh(
    mesh: &TriMesh,
    axis: Axis,
    planes: &PlaneValues,
    observer: &mut impl SliceObserver,
) -> SliceResult<TriMesh> {
    check_faces(mesh)?;

    let dim = axis.index();
    let buckets = mesh
        .vertices()
        .iter()
        .enumerate()
        .map(|(index, vertex)| {
            let value = vertex[dim];
            planes.bucket(value).ok_or(if value.is_finite() {
                SliceError::VertexOutsideExtents { index, value }
            } else {
                SliceError::NonFiniteVertex { index }
            })
        })
        .collect::<SliceResult<Vec<_>>>()?;

    let mut splitter = Splitter {
        dim,
        planes,
        buckets: &buckets,
        builder: MeshBuilder::from_vertices(mesh),
    };

    for (index, &face) in mesh.faces().iter().enumerate() {
        let split = classify(face, face.map(|i| buckets[i as usize]));
        observer.triangle(index, &split);

        let before = splitter.builder.face_count();
        splitter.split(face, split);
        observer.emitted(index, splitter.builder.face_count() - before);
    }

    Ok(splitter.builder.build())
}

fn check_faces(mesh: &TriMesh) -> SliceResult<()> {
    let vertex_count = mesh.vertex_count();
    for (face, indices) in mesh.faces().iter().enumerate() {
        if let Some(&index) = indices.iter().find(|&&i| i as usize >= vertex_count) {
            return Err(SliceError::IndexOutOfBounds {
                face,
                index,
                vertex_count,
            });
        }
    }

    Ok(())
}

struct Splitter<'a> {
    dim: usize,
    planes: &'a PlaneValues,
    buckets: &'a [Bucket],
    builder: MeshBuilder,
}

impl Splitter<'_> {
    fn split(&mut self, face: [u32; 3], split: TriangleSplit) {
        match split {
            TriangleSplit::NoSplit => self.builder.add_face(face),
            TriangleSplit::SinglePlane {
                apex,
                others,
                plane,
            } => self.split_single(apex, others, self.planes.value(plane)),
            TriangleSplit::MultiPlane {
                isolated,
                others: [next, prev],
                case,
                planes,
            } => match case {
                LadderCase::LowPairNext => self.converging_ladder(isolated, next, prev, planes),
                LadderCase::LowPairPrev => self.converging_ladder(prev, isolated, next, planes),
                LadderCase::LoneLow => self.diverging_ladder(isolated, [next, prev], planes),
            },
        }
    }

    /// One triangle on the apex side of the plane and a trapezoid on the
    /// other.
    fn split_single(&mut self, apex: u32, [a, b]: [u32; 2], y: f32) {
        let new_a = self.interpolate(apex, a, y);
        let new_b = self.interpolate(apex, b, y);

        self.builder.add_face([apex, new_a, new_b]);
        self.builder.add_quad([new_a, a, b, new_b]);
    }

    /// Edge `start`-`end` (in winding order) lies in the lowest slab and both
    /// rails climb from it to `apex`, which caps the ladder with a triangle.
    fn converging_ladder(&mut self, start: u32, end: u32, apex: u32, planes: Range<usize>) {
        let mut first = vec![end];
        let mut second = vec![start];

        for plane in planes {
            let y = self.planes.value(plane);
            first.push(self.interpolate(end, apex, y));
            second.push(self.interpolate(start, apex, y));
        }

        first.push(apex);
        second.push(apex);
        self.walk(&first, &second);
    }

    /// The isolated vertex is alone in the lowest slab and the rails leave it
    /// along both of its edges. If a plane separates the two far vertices,
    /// the rail to the nearer one bends there and follows the far edge, and
    /// the ladder gets an extra rung at the bend.
    fn diverging_ladder(&mut self, isolated: u32, [next, prev]: [u32; 2], planes: Range<usize>) {
        let (near, far) = if self.height(next) <= self.height(prev) {
            (next, prev)
        } else {
            (prev, next)
        };

        let bend = self.height(near);
        let near_bucket = self.buckets[near as usize];
        let mut levels = planes
            .clone()
            .map(|plane| self.planes.value(plane))
            .collect::<Vec<_>>();
        if !near_bucket.is_on_plane() && near_bucket.ceil() < planes.end {
            let at = levels.partition_point(|&y| y < bend);
            levels.insert(at, bend);
        }

        let mut short = vec![isolated];
        let mut long = vec![isolated];
        for &y in &levels {
            let point = if y < bend {
                self.interpolate(isolated, near, y)
            } else if y == bend {
                near
            } else {
                self.interpolate(near, far, y)
            };

            short.push(point);
            long.push(self.interpolate(isolated, far, y));
        }

        let past_bend = levels.last().is_some_and(|&y| y >= bend);
        short.push(if past_bend { far } else { near });
        long.push(far);

        if near == next {
            self.walk(&short, &long);
        } else {
            self.walk(&long, &short);
        }
    }

    /// Joins two rails rung by rung. `first` runs along the side of the
    /// triangle that comes first in winding order; where the rails share a
    /// vertex the trapezoid collapses into a triangle.
    fn walk(&mut self, first: &[u32], second: &[u32]) {
        assert_eq!(first.len(), second.len(), "ladder rails are uneven");

        for i in 1..first.len() {
            let (f0, f1) = (first[i - 1], first[i]);
            let (s0, s1) = (second[i - 1], second[i]);

            if f0 == s0 {
                self.builder.add_face([f0, f1, s1]);
            } else if f1 == s1 {
                self.builder.add_face([f0, f1, s0]);
            } else {
                self.builder.add_quad([f0, f1, s1, s0]);
            }
        }
    }

    /// Adds the point on the edge `from`-`to` whose coordinate along the
    /// slicing axis is `y`, returning its index.
    fn interpolate(&mut self, from: u32, to: u32, y: f32) -> u32 {
        let (p0, p1) = (self.builder.vertex(from), self.builder.vertex(to));
        let diff = p0[self.dim] - p1[self.dim];
        assert!(diff != 0.0, "interpolating along a flat edge {from}-{to}");

        let t = (p0[self.dim] - y) / diff;
        let mut point: Pos = p0.lerp(&p1, t);
        point[self.dim] = y;
        self.builder.add_vertex(point)
    }

    fn height(&self, index: u32) -> f32 {
        self.builder.vertex(index)[self.dim]
    }
}
