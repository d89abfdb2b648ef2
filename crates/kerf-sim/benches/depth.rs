//! Benchmark for the hot query path: depth sampling over a cut workpiece.

use std::hint::black_box;
use std::sync::Arc;

use criterion::{criterion_group, criterion_main, Criterion};

use kerf_math::{Aabb3, Point3};
use kerf_path::{Move, Tool, ToolPath, ToolTable};
use kerf_sim::{CutWorkpiece, FieldFunction, ToolSweep, Workpiece};

/// A raster pattern over the stock top, like a facing operation.
fn serpentine_path(passes: usize) -> Arc<ToolPath> {
    let mut tools = ToolTable::new();
    tools.set(1, Tool::Ballnose { radius: 2.0, length: 30.0 });

    let mut path = ToolPath::new(tools);
    let mut t = 0.0;
    for pass in 0..passes {
        let y = pass as f64 * 3.0;
        let (x0, x1) = if pass % 2 == 0 { (0.0, 60.0) } else { (60.0, 0.0) };
        path.add(Move::new(
            Some(1),
            Point3::new(x0, y, 8.0),
            Point3::new(x1, y, 8.0),
            t,
            t + 1.0,
        ));
        t += 1.0;
    }
    Arc::new(path)
}

fn bench_depth(c: &mut Criterion) {
    let sweep = Arc::new(ToolSweep::over_full_path(serpentine_path(20)).unwrap());
    let stock = Workpiece::new(Aabb3::new(
        Point3::new(0.0, 0.0, 0.0),
        Point3::new(60.0, 60.0, 10.0),
    ));
    let cut = CutWorkpiece::new(sweep, stock);

    c.bench_function("cut_workpiece_depth_lattice", |b| {
        b.iter(|| {
            let mut sum = 0.0;
            for ix in 0..32 {
                for iy in 0..32 {
                    let p = Point3::new(ix as f64 * 1.875, iy as f64 * 1.875, 9.0);
                    sum += cut.depth(black_box(p));
                }
            }
            black_box(sum)
        })
    });
}

criterion_group!(benches, bench_depth);
criterion_main!(benches);
