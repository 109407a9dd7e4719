use common::axis::Axis;
use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};

use mesh_slicer::{builder::MeshBuilder, slicer::slice_mesh_even, Pos};

pub fn bench(c: &mut Criterion) {
    let mut group = c.benchmark_group("Mesh Slicing");

    for precision in [16, 128, 1024] {
        let mut builder = MeshBuilder::new();
        builder.add_vertical_cylinder(Pos::zeros(), 100.0, (40.0, 20.0), precision);
        let mesh = builder.build();

        for axis in [Axis::X, Axis::Z] {
            group.bench_with_input(
                BenchmarkId::new(format!("Cylinder {axis}"), precision),
                &mesh,
                |b, mesh| b.iter(|| slice_mesh_even(mesh, axis, 16).unwrap()),
            );
        }
    }
}

criterion_group!(benches, bench);
criterion_main!(benches);
