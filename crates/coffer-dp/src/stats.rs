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

use coffer_core::num::ops::SaturatingAddVal;
use std::time::Duration;

/// Statistics collected during one optimizer run.
///
/// The dynamic-programming optimizer fills the item and cell counters, the
/// exhaustive oracle fills the subset counters; the other side stays zero.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct OptimizerStatistics {
    /// Items that went through the table update.
    pub items_processed: u64,
    /// Items skipped because their cost exceeds the budget.
    pub items_skipped: u64,
    /// Table cells examined.
    pub cells_scanned: u64,
    /// Table cells whose value increased.
    pub cells_improved: u64,
    /// Subsets enumerated by the oracle.
    pub subsets_enumerated: u64,
    /// Enumerated subsets whose cost fits the budget.
    pub subsets_feasible: u64,
    /// Times the oracle found a strictly better subset.
    pub incumbent_updates: u64,
    /// Total time spent in the solver.
    pub time_total: Duration,
}

impl OptimizerStatistics {
    #[inline]
    pub fn on_item_processed(&mut self) {
        self.items_processed = self.items_processed.saturating_add_val(1);
    }

    #[inline]
    pub fn on_item_skipped(&mut self) {
        self.items_skipped = self.items_skipped.saturating_add_val(1);
    }

    #[inline]
    pub fn on_cells_scanned(&mut self, count: u64) {
        self.cells_scanned = self.cells_scanned.saturating_add_val(count);
    }

    #[inline]
    pub fn on_cell_improved(&mut self) {
        self.cells_improved = self.cells_improved.saturating_add_val(1);
    }

    #[inline]
    pub fn on_subset_enumerated(&mut self) {
        self.subsets_enumerated = self.subsets_enumerated.saturating_add_val(1);
    }

    #[inline]
    pub fn on_subset_feasible(&mut self) {
        self.subsets_feasible = self.subsets_feasible.saturating_add_val(1);
    }

    #[inline]
    pub fn on_incumbent_update(&mut self) {
        self.incumbent_updates = self.incumbent_updates.saturating_add_val(1);
    }

    #[inline]
    pub fn set_total_time(&mut self, duration: Duration) {
        self.time_total = duration;
    }
}

impl std::fmt::Display for OptimizerStatistics {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Coffer Optimizer Statistics:")?;
        writeln!(f, "  Items processed:      {}", self.items_processed)?;
        writeln!(f, "  Items skipped:        {}", self.items_skipped)?;
        writeln!(f, "  Cells scanned:        {}", self.cells_scanned)?;
        writeln!(f, "  Cells improved:       {}", self.cells_improved)?;
        writeln!(f, "  Subsets enumerated:   {}", self.subsets_enumerated)?;
        writeln!(f, "  Subsets feasible:     {}", self.subsets_feasible)?;
        writeln!(f, "  Incumbent updates:    {}", self.incumbent_updates)?;
        writeln!(f, "  Total time:           {:.2?}", self.time_total)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_counters_saturate() {
        let mut s = OptimizerStatistics {
            cells_scanned: u64::MAX - 1,
            ..Default::default()
        };
        s.on_cells_scanned(10);
        assert_eq!(s.cells_scanned, u64::MAX);

        s.on_item_processed();
        s.on_item_skipped();
        s.on_cell_improved();
        assert_eq!(
            (s.items_processed, s.items_skipped, s.cells_improved),
            (1, 1, 1)
        );
    }

    #[test]
    fn test_display_lists_every_counter() {
        let s = OptimizerStatistics::default();
        let text = s.to_string();
        assert!(text.starts_with("Coffer Optimizer Statistics:\n"));
        assert!(text.contains("  Cells scanned:        0\n"));
        assert!(text.contains("  Subsets feasible:     0\n"));
    }
}
