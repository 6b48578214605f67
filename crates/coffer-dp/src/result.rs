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

use crate::stats::OptimizerStatistics;
use coffer_model::selection::Selection;

/// Result of an optimizer after termination: the optimal selection together
/// with the statistics of the run that produced it.
#[derive(Debug, Clone)]
pub struct OptimizerOutcome<T> {
    selection: Selection<T>,
    statistics: OptimizerStatistics,
}

impl<T> OptimizerOutcome<T> {
    #[inline]
    pub fn new(selection: Selection<T>, statistics: OptimizerStatistics) -> Self {
        Self {
            selection,
            statistics,
        }
    }

    /// Returns the optimal selection.
    #[inline]
    pub fn selection(&self) -> &Selection<T> {
        &self.selection
    }

    /// Returns the solver statistics.
    #[inline]
    pub fn statistics(&self) -> &OptimizerStatistics {
        &self.statistics
    }

    /// Discards the statistics and returns the selection.
    #[inline]
    pub fn into_selection(self) -> Selection<T> {
        self.selection
    }

    #[inline]
    pub fn into_parts(self) -> (Selection<T>, OptimizerStatistics) {
        (self.selection, self.statistics)
    }
}
