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

//! Exhaustive search oracle
//!
//! `ExhaustiveOracle` enumerates every subset of a small catalog and keeps the
//! best feasible one. It exists to validate `DpOptimizer`: it shares no code
//! with the table-based solver, so agreement between the two is meaningful.
//!
//! Subsets are encoded as `u64` masks where bit `i` selects item `i`. Masks are
//! visited in ascending order starting from `0` (the empty selection), and a
//! mask only replaces the incumbent when its value is strictly greater, so on
//! ties the first mask encountered wins. Enumeration is `O(n * 2^n)`; catalogs
//! above `OptimizerConfig::max_oracle_items` fail with `CatalogTooLarge` before
//! any work is done.

use crate::{
    config::OptimizerConfig,
    error::OptimizerError,
    monitor::{no_op::NoOpMonitor, optimizer_monitor::OptimizerMonitor},
    result::OptimizerOutcome,
    stats::OptimizerStatistics,
};
use coffer_core::num::units::UnitsNumeric;
use coffer_model::{catalog::Catalog, index::ItemIndex, selection::Selection};
use std::time::Instant;

/// Brute-force reference solver for small catalogs.
#[derive(Clone, Debug, Default)]
pub struct ExhaustiveOracle {
    config: OptimizerConfig,
}

impl ExhaustiveOracle {
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn with_config(config: OptimizerConfig) -> Self {
        Self { config }
    }

    #[inline]
    pub fn config(&self) -> &OptimizerConfig {
        &self.config
    }

    /// Enumerates all subsets of `catalog` and returns the best one within
    /// `budget`.
    ///
    /// # Errors
    ///
    /// - `EmptyCatalog` if the catalog holds no items.
    /// - `CatalogTooLarge` if the catalog exceeds the configured item limit.
    /// - `ValueOverflow` if a feasible subset's value does not fit `T`.
    #[inline]
    pub fn solve<T>(
        &mut self,
        catalog: &Catalog<T>,
        budget: T,
    ) -> Result<OptimizerOutcome<T>, OptimizerError>
    where
        T: UnitsNumeric,
    {
        self.solve_with_monitor(catalog, budget, &mut NoOpMonitor::new())
    }

    /// Like `solve`, reporting every strictly better subset to `monitor`.
    pub fn solve_with_monitor<T, M>(
        &mut self,
        catalog: &Catalog<T>,
        budget: T,
        monitor: &mut M,
    ) -> Result<OptimizerOutcome<T>, OptimizerError>
    where
        T: UnitsNumeric,
        M: OptimizerMonitor<T> + ?Sized,
    {
        let n = catalog.len();
        if n == 0 {
            return Err(OptimizerError::EmptyCatalog);
        }
        let limit = self.config.max_oracle_items();
        if n > limit {
            return Err(OptimizerError::CatalogTooLarge { items: n, limit });
        }

        let start = Instant::now();
        let mut stats = OptimizerStatistics::default();
        tracing::debug!(items = n, %budget, "exhaustive oracle started");
        monitor.on_enter(catalog, budget, &stats);

        let costs = catalog.costs();
        let values = catalog.values();

        let mut best_mask = 0u64;
        let mut best_value = T::zero();

        for mask in 0..(1u64 << n) {
            stats.on_subset_enumerated();

            let Some(cost) = sum_masked(costs, mask) else {
                continue;
            };
            if cost > budget {
                continue;
            }
            stats.on_subset_feasible();

            let value = sum_masked(values, mask).ok_or(OptimizerError::ValueOverflow)?;
            if value > best_value {
                best_value = value;
                best_mask = mask;
                stats.on_incumbent_update();
                monitor.on_subset_improved(mask, value, &stats);
            }
        }

        let chosen: Vec<ItemIndex> = (0..n)
            .filter(|&i| best_mask & (1u64 << i) != 0)
            .map(ItemIndex::new)
            .collect();
        let selection =
            Selection::from_indices(catalog, chosen).ok_or(OptimizerError::ValueOverflow)?;

        stats.set_total_time(start.elapsed());
        monitor.on_exit(&stats);
        tracing::debug!(
            value = %best_value,
            mask = best_mask,
            feasible = stats.subsets_feasible,
            elapsed = ?stats.time_total,
            "exhaustive oracle finished"
        );

        Ok(OptimizerOutcome::new(selection, stats))
    }
}

/// Sum of the entries selected by `mask`, or `None` on overflow.
#[inline]
fn sum_masked<T>(amounts: &[T], mask: u64) -> Option<T>
where
    T: UnitsNumeric,
{
    let mut total = T::zero();
    let mut rest = mask;
    while rest != 0 {
        let i = rest.trailing_zeros() as usize;
        total = total.checked_add_val(amounts[i])?;
        rest &= rest - 1;
    }
    Some(total)
}

/// Solves with a throwaway `ExhaustiveOracle` and the default limits.
#[inline]
pub fn optimize_exhaustive<T>(
    catalog: &Catalog<T>,
    budget: T,
) -> Result<Selection<T>, OptimizerError>
where
    T: UnitsNumeric,
{
    ExhaustiveOracle::new()
        .solve(catalog, budget)
        .map(OptimizerOutcome::into_selection)
}

#[cfg(test)]
mod tests {
    use super::*;
    use coffer_model::catalog::CatalogBuilder;

    fn ii(i: usize) -> ItemIndex {
        ItemIndex::new(i)
    }

    fn catalog(items: &[(u64, u64)]) -> Catalog<u64> {
        let mut b = CatalogBuilder::new();
        for (k, &(c, v)) in items.iter().enumerate() {
            b.add_item(format!("item-{k}"), c, v).unwrap();
        }
        b.build()
    }

    #[test]
    fn test_finds_optimum() {
        let c = catalog(&[(1, 1), (3, 4), (4, 5), (5, 7)]);
        let s = optimize_exhaustive(&c, 7).unwrap();
        assert_eq!(s.total_value(), 9);
        assert_eq!(s.indices(), &[ii(1), ii(2)]);
    }

    #[test]
    fn test_ties_go_to_first_mask() {
        // mask 0b01 and mask 0b10 both reach 50; 0b01 comes first
        let c = catalog(&[(100, 50), (100, 50)]);
        let s = optimize_exhaustive(&c, 100).unwrap();
        assert_eq!(s.indices(), &[ii(0)]);

        // mask 0b011 (cost 6) precedes 0b100 (cost 5) with equal value
        let c = catalog(&[(3, 4), (3, 6), (5, 10)]);
        let s = optimize_exhaustive(&c, 6).unwrap();
        assert_eq!(s.indices(), &[ii(0), ii(1)]);
    }

    #[test]
    fn test_statistics_count_subsets() {
        let c = catalog(&[(2, 1), (2, 1), (2, 1)]);
        let outcome = ExhaustiveOracle::new().solve(&c, 4).unwrap();
        let stats = outcome.statistics();
        assert_eq!(stats.subsets_enumerated, 8);
        // empty, three singletons, three pairs
        assert_eq!(stats.subsets_feasible, 7);
        assert_eq!(outcome.selection().total_value(), 2);
    }

    #[test]
    fn test_nothing_fits() {
        let c = catalog(&[(10, 1), (20, 2)]);
        let s = optimize_exhaustive(&c, 5).unwrap();
        assert!(s.is_empty());
    }

    #[test]
    fn test_catalog_too_large_fails_fast() {
        let items: Vec<(u64, u64)> = (1..=5).map(|i| (i, i)).collect();
        let c = catalog(&items);
        let mut oracle = ExhaustiveOracle::with_config(OptimizerConfig::new().with_max_oracle_items(4));
        assert_eq!(
            oracle.solve(&c, 10).unwrap_err(),
            OptimizerError::CatalogTooLarge { items: 5, limit: 4 }
        );
    }

    #[test]
    fn test_empty_catalog_is_signaled() {
        let c = Catalog::<u64>::empty();
        assert_eq!(
            optimize_exhaustive(&c, 10),
            Err(OptimizerError::EmptyCatalog)
        );
    }

    #[test]
    fn test_cost_overflow_counts_as_infeasible() {
        let mut b = CatalogBuilder::<u8>::new();
        b.add_item("a", 200, 3).unwrap();
        b.add_item("b", 100, 4).unwrap();
        let c = b.build();
        let s = optimize_exhaustive(&c, 255).unwrap();
        assert_eq!(s.indices(), &[ii(1)]);
    }

    #[test]
    fn test_sum_masked() {
        let amounts = [1u32, 10, 100, 1000];
        assert_eq!(sum_masked(&amounts, 0), Some(0));
        assert_eq!(sum_masked(&amounts, 0b1010), Some(1010));
        assert_eq!(sum_masked(&[u8::MAX, 1], 0b11), None);
    }
}
