use criterion::{criterion_group, criterion_main, Criterion};
use treemaze::{
    generators,
    units::{ColumnsCount, RowsCount},
    utils,
};

fn bench_binary_maze_32(c: &mut Criterion) {
    let mut rng = utils::seeded_rng(32);

    c.bench_function("binary_maze_32", move |b| {
        b.iter(|| generators::binary_tree(RowsCount(32), ColumnsCount(32), &mut rng))
    });
}

fn bench_binary_maze_350(c: &mut Criterion) {
    let mut rng = utils::seeded_rng(350);

    c.bench_function("binary_maze_350", move |b| {
        b.iter(|| generators::binary_tree(RowsCount(350), ColumnsCount(350), &mut rng))
    });
}

criterion_group!(
    benches,
    bench_binary_maze_32,
    bench_binary_maze_350
);
criterion_main!(benches);
