use criterion::{
    Criterion,
    criterion_group,
    criterion_main
};
use treemaze::cells::Coordinate;
use treemaze::generators;
use treemaze::grid::Grid;
use treemaze::pathing;
use treemaze::units::{ColumnsCount, RowsCount};

fn large_maze() -> Grid {
    generators::binary_tree_seeded(RowsCount(350), ColumnsCount(350), Some(350)).unwrap()
}

fn bench_distances(c: &mut Criterion) {
    c.bench_function("distances", |b| {
        let g = large_maze();
        let start_coord = Coordinate::new(250, 250);
        b.iter(|| pathing::distances(&g, start_coord))
    });
}

fn bench_furthest_cells(c: &mut Criterion) {
    c.bench_function("furthest_cells", |b| {
        let g = large_maze();
        let start_coord = Coordinate::new(250, 250);
        let distances = pathing::distances(&g, start_coord).unwrap();
        b.iter(|| distances.furthest_cells())
    });
}

fn bench_backtrack(c: &mut Criterion) {
    c.bench_function("backtrack", |b| {
        let g = large_maze();
        let start_coord = Coordinate::new(250, 250);
        let distances = pathing::distances(&g, start_coord).unwrap();
        let end_coord = Coordinate::new(0, 0);
        b.iter(|| pathing::backtrack(&g, &distances, end_coord))
    });
}

fn bench_longest_path(c: &mut Criterion) {
    c.bench_function("longest_path", |b| {
        let g = large_maze();
        b.iter(|| pathing::longest_path_seeded(&g, Some(7)))
    });
}

criterion_group!(benches,
    bench_distances,
    bench_furthest_cells,
    bench_backtrack,
    bench_longest_path
);
criterion_main!(benches);
