// Copyright (c) 2025 Felix Kahle.
//
// Permission is hereby granted, free of charge, to any person obtaining
// a copy of this software and associated documentation files (the
// "Software"), to deal in the Software without restriction, including
// without limitation the rights to use, copy, modify, merge, publish,
// distribute, sublicense, and/or sell copies of the Software, and to
// permit persons to whom the Software is furnished to do so, subject to
// the following conditions:
//
// The above copyright notice and this permission notice shall be
// included in all copies or substantial portions of the Software.
//
// THE SOFTWARE IS PROVIDED "AS IS", WITHOUT WARRANTY OF ANY KIND,
// EXPRESS OR IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES OF
// MERCHANTABILITY, FITNESS FOR A PARTICULAR PURPOSE AND
// NONINFRINGEMENT. IN NO EVENT SHALL THE AUTHORS OR COPYRIGHT HOLDERS BE
// LIABLE FOR ANY CLAIM, DAMAGES OR OTHER LIABILITY, WHETHER IN AN ACTION
// OF CONTRACT, TORT OR OTHERWISE, ARISING FROM, OUT OF OR IN CONNECTION
// WITH THE SOFTWARE OR THE USE OR OTHER DEALINGS IN THE SOFTWARE.

use coffer_dp::{DpOptimizer, ExhaustiveOracle, OptimizerConfig};
use coffer_model::catalog::{Catalog, CatalogBuilder};
use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};
use rand::{Rng, SeedableRng, rngs::StdRng};
use std::hint::black_box;

/// Random catalog with costs between 10.00 and 500.00 and a 5-50% return.
fn random_catalog(num_items: usize, seed: u64) -> Catalog<u64> {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut builder = CatalogBuilder::with_capacity(num_items);
    for i in 0..num_items {
        let cost: u64 = rng.random_range(1_000..=50_000);
        let pct: u64 = rng.random_range(5..=50);
        builder
            .add_item(format!("Share-{i:04}"), cost, cost * pct / 100)
            .expect("generated items are admissible");
    }
    builder.build()
}

fn bench_dp(c: &mut Criterion) {
    let mut group = c.benchmark_group("dp_optimizer");

    for &(num_items, budget) in &[(20usize, 50_000u64), (100, 50_000), (1_000, 50_000), (1_000, 500_000)] {
        let catalog = random_catalog(num_items, 42);
        let mut dp = DpOptimizer::preallocated(OptimizerConfig::default(), num_items, budget as usize);

        group.throughput(Throughput::Elements(num_items as u64 * (budget + 1)));
        group.bench_with_input(
            BenchmarkId::new("solve", format!("{num_items}x{budget}")),
            &catalog,
            |b, catalog| {
                b.iter(|| {
                    let outcome = dp.solve(black_box(catalog), black_box(budget)).unwrap();
                    black_box(outcome.selection().total_value())
                })
            },
        );
    }

    group.finish();
}

fn bench_oracle(c: &mut Criterion) {
    let mut group = c.benchmark_group("exhaustive_oracle");
    group.sample_size(10);

    for &num_items in &[12usize, 16, 20] {
        let catalog = random_catalog(num_items, 7);
        let mut oracle = ExhaustiveOracle::new();

        group.throughput(Throughput::Elements(1u64 << num_items));
        group.bench_with_input(
            BenchmarkId::new("solve", num_items),
            &catalog,
            |b, catalog| {
                b.iter(|| {
                    let outcome = oracle.solve(black_box(catalog), black_box(50_000u64)).unwrap();
                    black_box(outcome.selection().total_value())
                })
            },
        );
    }

    group.finish();
}

criterion_group!(benches, bench_dp, bench_oracle);
criterion_main!(benches);
