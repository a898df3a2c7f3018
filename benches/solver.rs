//! Benchmarks for the dissection solver.

use criterion::{black_box, criterion_group, criterion_main, Criterion};

use dissection::pieces::{bedlam, diabolical, soma, SOMA_PIECES};
use dissection::posture::orientations;
use dissection::symmetry::SymmetryReducer;
use dissection::{Builtin, SolveConfig};

/// Benchmark the complete diabolical cube search.
fn bench_solve_diabolical(c: &mut Criterion) {
    let puzzle = diabolical().unwrap();
    let config = SolveConfig::default();

    c.bench_function("solve_diabolical", |b| {
        b.iter(|| black_box(&puzzle).solve(&config))
    });
}

/// Benchmark the complete Soma search.
fn bench_solve_soma(c: &mut Criterion) {
    let puzzle = soma().unwrap();
    let config = SolveConfig::default();

    let mut group = c.benchmark_group("soma");
    group.sample_size(10);
    group.bench_function("solve_all", |b| b.iter(|| black_box(&puzzle).solve(&config)));
    group.finish();
}

/// Benchmark finding 5 Bedlam solutions.
fn bench_solve_bedlam_5(c: &mut Criterion) {
    let puzzle = bedlam().unwrap();
    let config = SolveConfig::new().with_max_solutions(Some(5));

    let mut group = c.benchmark_group("bedlam");
    group.sample_size(10);
    group.bench_function("solve_5", |b| b.iter(|| black_box(&puzzle).solve(&config)));
    group.finish();
}

/// Benchmark building the incidence matrix for the Bedlam cube.
fn bench_build_matrix(c: &mut Criterion) {
    let puzzle = Builtin::Bedlam.puzzle().unwrap();

    c.bench_function("build_matrix_bedlam", |b| {
        b.iter(|| black_box(&puzzle).build_matrix())
    });
}

/// Benchmark computing all orientations for a single piece.
fn bench_orientations(c: &mut Criterion) {
    let catalogue = dissection::PieceCatalogue::from_cubes(&SOMA_PIECES[1..2]).unwrap();
    let base = catalogue.get('2').unwrap().clone();

    c.bench_function("orientations", |b| b.iter(|| orientations(black_box(&base))));
}

/// Benchmark the duplicate check of one solution against the full Soma set.
fn bench_duplicate_check(c: &mut Criterion) {
    let puzzle = soma().unwrap();
    let report = puzzle.solve(&SolveConfig::default());
    let mut reducer = SymmetryReducer::new(puzzle.equivalences());
    for solution in &report.solutions {
        reducer.accept(solution.clone());
    }
    let solution = &report.solutions[0];

    c.bench_function("duplicate_check_48_variants", |b| {
        b.iter(|| reducer.is_duplicate(black_box(solution)))
    });
}

criterion_group!(
    benches,
    bench_solve_diabolical,
    bench_solve_soma,
    bench_solve_bedlam_5,
    bench_build_matrix,
    bench_orientations,
    bench_duplicate_check
);
criterion_main!(benches);
