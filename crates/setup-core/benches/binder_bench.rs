//! Criterion benchmarks for the section binder.
//!
//! Measures populate and collect on the built-in default document, the
//! largest document the wizard normally handles.
//!
//! Run with:
//! ```bash
//! cargo bench --package setup-core --bench binder_bench
//! ```

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use setup_core::{collect, defaults, populate};

fn bench_populate(c: &mut Criterion) {
    let doc = defaults();
    c.bench_function("populate_defaults", |b| {
        b.iter(|| populate(black_box(&doc)));
    });
}

fn bench_collect(c: &mut Criterion) {
    let fields = populate(&defaults());
    c.bench_function("collect_defaults", |b| {
        b.iter(|| collect(black_box(&fields)).expect("defaults collect cleanly"));
    });
}

criterion_group!(benches, bench_populate, bench_collect);
criterion_main!(benches);
