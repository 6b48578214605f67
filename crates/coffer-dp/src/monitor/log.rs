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

use crate::{monitor::optimizer_monitor::OptimizerMonitor, stats::OptimizerStatistics};
use coffer_core::num::units::UnitsNumeric;
use coffer_model::{catalog::Catalog, index::ItemIndex};
use std::time::{Duration, Instant};

/// Periodic progress reporting through `tracing`.
///
/// Emits one `info` event when a run starts and one when it ends, and at
/// most one progress event per `log_interval` in between. The clock is only
/// read on events whose running count matches `clock_check_mask`.
#[derive(Debug, Clone)]
pub struct LogMonitor<T>
where
    T: UnitsNumeric,
{
    start_time: Instant,
    last_log_time: Instant,
    log_interval: Duration,
    clock_check_mask: u64,
    events: u64,
    num_items: usize,
    best_value: Option<T>,
}

impl<T> LogMonitor<T>
where
    T: UnitsNumeric,
{
    pub fn new(log_interval: Duration, clock_check_mask: u64) -> Self {
        Self {
            start_time: Instant::now(),
            last_log_time: Instant::now(),
            log_interval,
            clock_check_mask,
            events: 0,
            num_items: 0,
            best_value: None,
        }
    }

    /// Best subset value reported so far by the oracle, if any.
    #[inline]
    pub fn best_value(&self) -> Option<T> {
        self.best_value
    }

    #[inline(always)]
    fn tick(&mut self) -> bool {
        self.events = self.events.wrapping_add(1);
        (self.events & self.clock_check_mask) == 0
            && self.last_log_time.elapsed() >= self.log_interval
    }

    fn log_progress(&mut self, stats: &OptimizerStatistics) {
        let now = Instant::now();
        tracing::info!(
            elapsed = ?now.duration_since(self.start_time),
            items_processed = stats.items_processed,
            items_total = self.num_items,
            cells_scanned = stats.cells_scanned,
            subsets = stats.subsets_enumerated,
            best = ?self.best_value,
            "optimizer progress"
        );
        self.last_log_time = now;
    }
}

impl<T> Default for LogMonitor<T>
where
    T: UnitsNumeric,
{
    fn default() -> Self {
        Self::new(Duration::from_secs(1), 0)
    }
}

impl<T> std::fmt::Display for LogMonitor<T>
where
    T: UnitsNumeric,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "LogMonitor(log_interval: {}s, clock_check_mask: {})",
            self.log_interval.as_secs(),
            self.clock_check_mask
        )
    }
}

impl<T> OptimizerMonitor<T> for LogMonitor<T>
where
    T: UnitsNumeric,
{
    fn name(&self) -> &str {
        "LogMonitor"
    }

    fn on_enter(&mut self, catalog: &Catalog<T>, budget: T, _stats: &OptimizerStatistics) {
        self.start_time = Instant::now();
        self.last_log_time = self.start_time;
        self.events = 0;
        self.num_items = catalog.len();
        self.best_value = None;
        tracing::info!(items = catalog.len(), %budget, "optimizer started");
    }

    fn on_item_processed(&mut self, _item: ItemIndex, stats: &OptimizerStatistics) {
        if self.tick() {
            self.log_progress(stats);
        }
    }

    fn on_subset_improved(&mut self, _mask: u64, value: T, stats: &OptimizerStatistics) {
        self.best_value = Some(value);
        if self.tick() {
            self.log_progress(stats);
        }
    }

    fn on_exit(&mut self, stats: &OptimizerStatistics) {
        tracing::info!(
            elapsed = ?self.start_time.elapsed(),
            items_processed = stats.items_processed,
            items_skipped = stats.items_skipped,
            cells_improved = stats.cells_improved,
            subsets_feasible = stats.subsets_feasible,
            "optimizer finished"
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tracks_best_value_and_resets_on_enter() {
        let mut m = LogMonitor::<u64>::new(Duration::from_secs(3600), 0);
        let stats = OptimizerStatistics::default();
        let catalog = Catalog::<u64>::empty();

        m.on_enter(&catalog, 100, &stats);
        assert_eq!(m.best_value(), None);
        m.on_subset_improved(0b101, 42, &stats);
        assert_eq!(m.best_value(), Some(42));

        m.on_enter(&catalog, 100, &stats);
        assert_eq!(m.best_value(), None);
    }

    #[test]
    fn test_tick_respects_mask_and_interval() {
        let mut m = LogMonitor::<u64>::new(Duration::ZERO, 3);
        let fired: Vec<bool> = (0..8).map(|_| m.tick()).collect();
        assert_eq!(
            fired,
            vec![false, false, false, true, false, false, false, true]
        );

        let mut slow = LogMonitor::<u64>::new(Duration::from_secs(3600), 0);
        assert!(!slow.tick());
    }

    #[test]
    fn test_display() {
        let m = LogMonitor::<u32>::new(Duration::from_secs(2), 1023);
        assert_eq!(
            m.to_string(),
            "LogMonitor(log_interval: 2s, clock_check_mask: 1023)"
        );
    }
}
