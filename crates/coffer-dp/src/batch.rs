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

//! Parallel execution of independent optimizer runs.
//!
//! Every call to the optimizer is self-contained, so a batch of
//! `(catalog, budget)` jobs needs no coordination at all. Jobs are striped
//! over scoped worker threads, each worker reuses a single `DpOptimizer` for
//! all of its jobs, and results come back in job order.

use crate::{
    config::OptimizerConfig, dp::DpOptimizer, error::OptimizerError, result::OptimizerOutcome,
};
use coffer_core::num::units::UnitsNumeric;
use coffer_model::catalog::Catalog;
use std::num::NonZeroUsize;

/// One independent optimization request.
#[derive(Debug, Clone, Copy)]
pub struct BatchJob<'a, T> {
    pub catalog: &'a Catalog<T>,
    pub budget: T,
}

impl<'a, T> BatchJob<'a, T> {
    #[inline]
    pub fn new(catalog: &'a Catalog<T>, budget: T) -> Self {
        Self { catalog, budget }
    }
}

/// Runs every job with the dynamic-programming optimizer.
///
/// Uses at most `std::thread::available_parallelism` workers. The result at
/// position `i` belongs to `jobs[i]`.
pub fn optimize_batch<T>(
    jobs: &[BatchJob<'_, T>],
    config: OptimizerConfig,
) -> Vec<Result<OptimizerOutcome<T>, OptimizerError>>
where
    T: UnitsNumeric,
{
    let workers = std::thread::available_parallelism()
        .map(NonZeroUsize::get)
        .unwrap_or(1)
        .min(jobs.len());

    if workers <= 1 {
        let mut dp = DpOptimizer::with_config(config);
        return jobs
            .iter()
            .map(|job| dp.solve(job.catalog, job.budget))
            .collect();
    }

    tracing::debug!(jobs = jobs.len(), workers, "batch started");

    let mut slots: Vec<Option<Result<OptimizerOutcome<T>, OptimizerError>>> =
        (0..jobs.len()).map(|_| None).collect();

    std::thread::scope(|scope| {
        let handles: Vec<_> = (0..workers)
            .map(|worker| {
                scope.spawn(move || {
                    let mut dp = DpOptimizer::with_config(config);
                    jobs.iter()
                        .enumerate()
                        .skip(worker)
                        .step_by(workers)
                        .map(|(i, job)| (i, dp.solve(job.catalog, job.budget)))
                        .collect::<Vec<_>>()
                })
            })
            .collect();

        for handle in handles {
            for (i, result) in handle.join().expect("batch worker thread panicked") {
                slots[i] = Some(result);
            }
        }
    });

    slots.into_iter().flatten().collect()
}
