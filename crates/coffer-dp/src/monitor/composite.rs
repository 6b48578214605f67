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

//! Monitoring combinator
//!
//! Provides `CompositeMonitor`, a fan-out monitor that forwards every event to
//! its children in insertion order. This lets you mix logging, metrics and
//! test recorders without coupling them to the solver.

use crate::{monitor::optimizer_monitor::OptimizerMonitor, stats::OptimizerStatistics};
use coffer_core::num::units::UnitsNumeric;
use coffer_model::{catalog::Catalog, index::ItemIndex};

/// An optimizer monitor that aggregates multiple monitors and forwards events
/// to all of them.
pub struct CompositeMonitor<'a, T>
where
    T: UnitsNumeric,
{
    monitors: Vec<Box<dyn OptimizerMonitor<T> + 'a>>,
}

impl<'a, T> Default for CompositeMonitor<'a, T>
where
    T: UnitsNumeric,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<'a, T> CompositeMonitor<'a, T>
where
    T: UnitsNumeric,
{
    /// Creates a new empty `CompositeMonitor`.
    #[inline(always)]
    pub fn new() -> Self {
        Self {
            monitors: Vec::new(),
        }
    }

    #[inline(always)]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            monitors: Vec::with_capacity(capacity),
        }
    }

    /// Adds a new monitor to the composite monitor.
    #[inline(always)]
    pub fn add_monitor<M>(&mut self, monitor: M)
    where
        M: OptimizerMonitor<T> + 'a,
    {
        self.monitors.push(Box::new(monitor));
    }

    /// Adds a boxed monitor to the composite monitor.
    #[inline(always)]
    pub fn add_monitor_boxed(&mut self, monitor: Box<dyn OptimizerMonitor<T> + 'a>) {
        self.monitors.push(monitor);
    }

    #[inline(always)]
    pub fn monitors(&self) -> &[Box<dyn OptimizerMonitor<T> + 'a>] {
        &self.monitors
    }

    #[inline(always)]
    pub fn len(&self) -> usize {
        self.monitors.len()
    }

    #[inline(always)]
    pub fn is_empty(&self) -> bool {
        self.monitors.is_empty()
    }
}

impl<'a, T> FromIterator<Box<dyn OptimizerMonitor<T> + 'a>> for CompositeMonitor<'a, T>
where
    T: UnitsNumeric,
{
    #[inline(always)]
    fn from_iter<I>(iter: I) -> Self
    where
        I: IntoIterator<Item = Box<dyn OptimizerMonitor<T> + 'a>>,
    {
        Self {
            monitors: iter.into_iter().collect(),
        }
    }
}

impl<'a, T> OptimizerMonitor<T> for CompositeMonitor<'a, T>
where
    T: UnitsNumeric,
{
    #[inline(always)]
    fn name(&self) -> &str {
        "CompositeMonitor"
    }

    #[inline(always)]
    fn on_enter(&mut self, catalog: &Catalog<T>, budget: T, statistics: &OptimizerStatistics) {
        for monitor in &mut self.monitors {
            monitor.on_enter(catalog, budget, statistics);
        }
    }

    #[inline(always)]
    fn on_item_processed(&mut self, item: ItemIndex, statistics: &OptimizerStatistics) {
        for monitor in &mut self.monitors {
            monitor.on_item_processed(item, statistics);
        }
    }

    #[inline(always)]
    fn on_subset_improved(&mut self, mask: u64, value: T, statistics: &OptimizerStatistics) {
        for monitor in &mut self.monitors {
            monitor.on_subset_improved(mask, value, statistics);
        }
    }

    #[inline(always)]
    fn on_exit(&mut self, statistics: &OptimizerStatistics) {
        for monitor in &mut self.monitors {
            monitor.on_exit(statistics);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::monitor::no_op::NoOpMonitor;
    use std::cell::RefCell;

    struct Recorder<'r> {
        tag: &'static str,
        events: &'r RefCell<Vec<String>>,
    }

    impl<'r> OptimizerMonitor<u64> for Recorder<'r> {
        fn name(&self) -> &str {
            self.tag
        }

        fn on_enter(&mut self, _c: &Catalog<u64>, budget: u64, _s: &OptimizerStatistics) {
            self.events
                .borrow_mut()
                .push(format!("{}:enter:{}", self.tag, budget));
        }

        fn on_item_processed(&mut self, item: ItemIndex, _s: &OptimizerStatistics) {
            self.events
                .borrow_mut()
                .push(format!("{}:item:{}", self.tag, item.get()));
        }

        fn on_exit(&mut self, _s: &OptimizerStatistics) {
            self.events.borrow_mut().push(format!("{}:exit", self.tag));
        }
    }

    #[test]
    fn test_fans_out_in_insertion_order() {
        let events = RefCell::new(Vec::new());
        let mut composite = CompositeMonitor::<u64>::new();
        composite.add_monitor(Recorder {
            tag: "a",
            events: &events,
        });
        composite.add_monitor(NoOpMonitor::new());
        composite.add_monitor(Recorder {
            tag: "b",
            events: &events,
        });
        assert_eq!(composite.len(), 3);

        let stats = OptimizerStatistics::default();
        let catalog = Catalog::<u64>::empty();
        composite.on_enter(&catalog, 7, &stats);
        composite.on_item_processed(ItemIndex::new(2), &stats);
        composite.on_subset_improved(1, 5, &stats);
        composite.on_exit(&stats);
        drop(composite);

        assert_eq!(
            events.into_inner(),
            vec![
                "a:enter:7",
                "b:enter:7",
                "a:item:2",
                "b:item:2",
                "a:exit",
                "b:exit"
            ]
        );
    }

    #[test]
    fn test_from_iter_and_names() {
        let boxed: Vec<Box<dyn OptimizerMonitor<u64>>> =
            vec![Box::new(NoOpMonitor::new()), Box::new(NoOpMonitor::new())];
        let composite: CompositeMonitor<'_, u64> = boxed.into_iter().collect();
        assert_eq!(composite.len(), 2);
        assert_eq!(composite.name(), "CompositeMonitor");
        assert_eq!(
            format!("{:?}", composite.monitors()[0]),
            "OptimizerMonitor(NoOpMonitor)"
        );
    }
}
