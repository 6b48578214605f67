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

//! Optimizer monitoring interface
//!
//! Declares the `OptimizerMonitor` trait. Callbacks track the solver
//! lifecycle; `OptimizerStatistics` is provided to every callback for
//! telemetry.
//!
//! Lifecycle
//! - DP: enter → item processed (once per item, in catalog order) → exit
//! - Oracle: enter → subset improved (each strictly better subset) → exit
//!
//! `on_exit` is only reached by runs that complete; a run that fails its
//! resource checks never calls `on_enter` either.

use crate::stats::OptimizerStatistics;
use coffer_core::num::units::UnitsNumeric;
use coffer_model::{catalog::Catalog, index::ItemIndex};

/// Trait for observing the optimizers.
pub trait OptimizerMonitor<T>
where
    T: UnitsNumeric,
{
    /// Returns the name of the monitor.
    fn name(&self) -> &str;
    /// Called when the run starts, after every limit has been checked.
    fn on_enter(&mut self, catalog: &Catalog<T>, budget: T, statistics: &OptimizerStatistics);
    /// Called after the table has been updated with `item`, or after `item`
    /// was skipped because it does not fit the budget.
    fn on_item_processed(&mut self, _item: ItemIndex, _statistics: &OptimizerStatistics) {}
    /// Called when the oracle finds a subset strictly better than every one
    /// before it.
    fn on_subset_improved(&mut self, _mask: u64, _value: T, _statistics: &OptimizerStatistics) {}
    /// Called when the run ends.
    fn on_exit(&mut self, statistics: &OptimizerStatistics);
}

impl<'a, T> std::fmt::Debug for dyn OptimizerMonitor<T> + 'a
where
    T: UnitsNumeric,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "OptimizerMonitor({})", self.name())
    }
}

impl<'a, T> std::fmt::Display for dyn OptimizerMonitor<T> + 'a
where
    T: UnitsNumeric,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "OptimizerMonitor({})", self.name())
    }
}
