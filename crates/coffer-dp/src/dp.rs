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

//! Dynamic-programming 0/1 knapsack optimizer
//!
//! `DpOptimizer` computes the maximum total value reachable within a budget
//! and reconstructs one subset that attains it. The solver owns two buffers
//! that survive across calls, so a long-lived optimizer amortizes its
//! allocations:
//!
//! - a one-dimensional value table with one cell per budget unit, where cell
//!   `w` holds the best value of the items processed so far with total cost
//!   at most `w`;
//! - a flat choice bitmap of `items x (budget + 1)` bits, where bit
//!   `(i, w)` records that item `i` improved cell `w`.
//!
//! Core loop
//! - Items are processed in catalog order. For an item `(c, v)` the cells are
//!   scanned from `budget` down to `c`, so every read of `table[w - c]` still
//!   sees the value before this item, which is what keeps each item 0/1.
//! - An item is only recorded when it strictly improves a cell. Equal values
//!   keep the earlier items.
//! - Items costing more than the budget are skipped without touching the
//!   table.
//!
//! Answer extraction
//! - The optimal value is the maximum over the table. Among the cells holding
//!   it, the smallest one is chosen, so the cheapest optimal subset found by
//!   the table wins.
//! - Reconstruction walks the items in reverse from that cell; a set bit at
//!   the current cell selects the item and moves the walk to `w - c`.
//!
//! Both tables are checked against `OptimizerConfig` before anything is
//! allocated; a budget over the limit fails with `BudgetOverflow` and is
//! never truncated.

use crate::{
    config::OptimizerConfig,
    error::{OptimizerError, TableResource},
    monitor::{no_op::NoOpMonitor, optimizer_monitor::OptimizerMonitor},
    result::OptimizerOutcome,
    stats::OptimizerStatistics,
};
use coffer_core::num::units::UnitsNumeric;
use coffer_model::{catalog::Catalog, index::ItemIndex, selection::Selection};
use fixedbitset::FixedBitSet;
use std::time::Instant;

/// The dynamic-programming optimizer.
#[derive(Clone, Debug)]
pub struct DpOptimizer<T>
where
    T: UnitsNumeric,
{
    config: OptimizerConfig,
    table: Vec<T>,
    choices: FixedBitSet,
}

impl<T> Default for DpOptimizer<T>
where
    T: UnitsNumeric,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<T> DpOptimizer<T>
where
    T: UnitsNumeric,
{
    /// Creates an optimizer with the default limits.
    #[inline]
    pub fn new() -> Self {
        Self::with_config(OptimizerConfig::default())
    }

    #[inline]
    pub fn with_config(config: OptimizerConfig) -> Self {
        Self {
            config,
            table: Vec::new(),
            choices: FixedBitSet::new(),
        }
    }

    /// Creates an optimizer with storage for `num_items` items and a budget of
    /// `budget_units`.
    ///
    /// # Note
    ///
    /// The solver grows its buffers on demand anyway; preallocation only moves
    /// the allocation to construction time.
    #[inline]
    pub fn preallocated(config: OptimizerConfig, num_items: usize, budget_units: usize) -> Self {
        let width = budget_units.saturating_add(1);
        Self {
            config,
            table: Vec::with_capacity(width),
            choices: FixedBitSet::with_capacity(num_items.saturating_mul(width)),
        }
    }

    #[inline]
    pub fn config(&self) -> &OptimizerConfig {
        &self.config
    }

    /// Solves the 0/1 knapsack over `catalog` within `budget`.
    ///
    /// # Errors
    ///
    /// - `EmptyCatalog` if the catalog holds no items.
    /// - `BudgetOverflow` if the budget exceeds the configured table size or
    ///   the choice bitmap would exceed the configured number of bits.
    /// - `ValueOverflow` if a reachable total value does not fit `T`.
    #[inline]
    pub fn solve(
        &mut self,
        catalog: &Catalog<T>,
        budget: T,
    ) -> Result<OptimizerOutcome<T>, OptimizerError> {
        self.solve_with_monitor(catalog, budget, &mut NoOpMonitor::new())
    }

    /// Like `solve`, reporting progress to `monitor`.
    pub fn solve_with_monitor<M>(
        &mut self,
        catalog: &Catalog<T>,
        budget: T,
        monitor: &mut M,
    ) -> Result<OptimizerOutcome<T>, OptimizerError>
    where
        M: OptimizerMonitor<T> + ?Sized,
    {
        if catalog.is_empty() {
            return Err(OptimizerError::EmptyCatalog);
        }

        let capacity = self.check_limits(catalog.len(), budget)?;
        let width = capacity + 1;

        let start = Instant::now();
        let mut stats = OptimizerStatistics::default();

        self.table.clear();
        self.table.resize(width, T::zero());
        self.choices.clear();
        self.choices.grow(catalog.len() * width);

        tracing::debug!(
            items = catalog.len(),
            budget = capacity,
            "dp optimizer started"
        );
        monitor.on_enter(catalog, budget, &stats);

        for item in catalog.iter() {
            let index = item.index();
            match item.cost().to_usize() {
                Some(cost) if cost <= capacity => {
                    self.relax(index, cost, item.value(), width, &mut stats)?;
                    stats.on_item_processed();
                }
                _ => stats.on_item_skipped(),
            }
            monitor.on_item_processed(index, &stats);
        }

        let (best_cell, best_value) = self.best_cell();
        let chosen = self.reconstruct(catalog, best_cell, width);
        let selection =
            Selection::from_indices(catalog, chosen).ok_or(OptimizerError::ValueOverflow)?;
        debug_assert_eq!(selection.total_value(), best_value);

        stats.set_total_time(start.elapsed());
        monitor.on_exit(&stats);
        tracing::debug!(
            value = %best_value,
            cost = %selection.total_cost(),
            chosen = selection.len(),
            skipped = stats.items_skipped,
            elapsed = ?stats.time_total,
            "dp optimizer finished"
        );

        Ok(OptimizerOutcome::new(selection, stats))
    }

    /// Validates the budget against both table limits and returns it as the
    /// largest table index.
    fn check_limits(&self, num_items: usize, budget: T) -> Result<usize, OptimizerError> {
        let budget_raw = budget.to_u128().unwrap_or(u128::MAX);
        let limit = self.config.max_budget_units();

        let capacity = match budget.to_usize() {
            Some(c) if c <= limit => c,
            _ => {
                return Err(OptimizerError::BudgetOverflow {
                    budget: budget_raw,
                    resource: TableResource::BudgetUnits,
                    needed: budget_raw,
                    limit,
                });
            }
        };

        let bits = (num_items as u128).saturating_mul(capacity as u128 + 1);
        if bits > self.config.max_choice_bits() as u128 {
            return Err(OptimizerError::BudgetOverflow {
                budget: budget_raw,
                resource: TableResource::ChoiceBits,
                needed: bits,
                limit: self.config.max_choice_bits(),
            });
        }

        Ok(capacity)
    }

    /// Applies one item to the table, scanning cells in descending order.
    #[inline]
    fn relax(
        &mut self,
        index: ItemIndex,
        cost: usize,
        value: T,
        width: usize,
        stats: &mut OptimizerStatistics,
    ) -> Result<(), OptimizerError> {
        let row = index.get() * width;
        for w in (cost..width).rev() {
            let candidate = self.table[w - cost]
                .checked_add_val(value)
                .ok_or(OptimizerError::ValueOverflow)?;
            if candidate > self.table[w] {
                self.table[w] = candidate;
                self.choices.insert(row + w);
                stats.on_cell_improved();
            }
        }
        stats.on_cells_scanned((width - cost) as u64);
        Ok(())
    }

    /// Smallest cell holding the maximum value.
    #[inline]
    fn best_cell(&self) -> (usize, T) {
        let mut best = (0, self.table[0]);
        for (w, &v) in self.table.iter().enumerate().skip(1) {
            if v > best.1 {
                best = (w, v);
            }
        }
        best
    }

    /// Walks the choice bitmap backwards from `cell`.
    fn reconstruct(&self, catalog: &Catalog<T>, cell: usize, width: usize) -> Vec<ItemIndex> {
        let mut w = cell;
        let mut chosen = Vec::new();
        for item in catalog.iter().rev() {
            let i = item.index();
            if self.choices.contains(i.get() * width + w) {
                chosen.push(i);
                // A set bit implies the cost fit into `w` when it was recorded.
                w -= item.cost().to_usize().unwrap_or(w);
            }
        }
        chosen.reverse();
        chosen
    }
}

/// Solves with a throwaway `DpOptimizer` and the default limits.
///
/// ```rust
/// # use coffer_model::catalog::CatalogBuilder;
/// let mut b = CatalogBuilder::<u64>::new();
/// b.add_item("A", 49876, 19661).unwrap();
/// let catalog = b.build();
///
/// let selection = coffer_dp::optimize(&catalog, 50000).unwrap();
/// assert_eq!(selection.total_value(), 19661);
/// ```
#[inline]
pub fn optimize<T>(catalog: &Catalog<T>, budget: T) -> Result<Selection<T>, OptimizerError>
where
    T: UnitsNumeric,
{
    DpOptimizer::new()
        .solve(catalog, budget)
        .map(OptimizerOutcome::into_selection)
}
