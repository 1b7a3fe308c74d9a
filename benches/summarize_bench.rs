//! Performance benchmarks

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use svtree::{summarize, ElementType, SummarizeRequest, Svt, SvtBuilder};

/// `rows x cols` double matrix with roughly one stored element in `every`
fn sparse_matrix(rows: usize, cols: usize, every: usize) -> Svt {
    let mut builder = SvtBuilder::new(&[rows, cols], ElementType::Double).expect("valid dims");
    let mut state: u64 = 0x9e37_79b9_7f4a_7c15;
    for col in 0..cols {
        for row in 0..rows {
            state = state.wrapping_mul(6364136223846793005).wrapping_add(1442695040888963407);
            if (state >> 33) as usize % every == 0 {
                let value = ((state >> 40) % 17) as f64 - 8.0;
                builder.push_double(&[row, col], value).expect("in bounds");
            }
        }
    }
    builder.build()
}

fn benchmark_summarize(c: &mut Criterion) {
    let dims = [1000, 200];
    let svt = sparse_matrix(dims[0], dims[1], 20);

    let mut group = c.benchmark_group("summarize_1000x200");
    for op in ["sum", "max", "mean", "var1", "var2", "anyNA"] {
        let request = SummarizeRequest::new(op, ElementType::Double).expect("op resolves");
        group.bench_with_input(BenchmarkId::from_parameter(op), &request, |b, request| {
            b.iter(|| summarize(black_box(&svt), &dims, request).expect("summarize succeeds"));
        });
    }
    group.finish();
}

fn benchmark_build(c: &mut Criterion) {
    c.bench_function("build_1000x200", |b| {
        b.iter(|| black_box(sparse_matrix(1000, 200, 20)));
    });
}

criterion_group!(benches, benchmark_summarize, benchmark_build);
criterion_main!(benches);
