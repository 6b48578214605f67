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

//! Resource limits for the optimizers.
//!
//! The dynamic-programming optimizer allocates one table cell per unit of
//! budget and one choice bit per (item, cell) pair; the exhaustive oracle
//! enumerates `2^n` subsets. `OptimizerConfig` bounds all three so that an
//! absurd budget or catalog fails fast with an error instead of exhausting
//! memory or time.

/// The largest catalog the exhaustive oracle will ever enumerate, whatever
/// the configuration says. Masks are held in a `u64`.
pub const ORACLE_HARD_CAP: usize = 63;

/// Limits applied by `DpOptimizer` and `ExhaustiveOracle`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OptimizerConfig {
    max_budget_units: usize,
    max_choice_bits: usize,
    max_oracle_items: usize,
}

impl OptimizerConfig {
    /// 100 000.00 in a two-digit currency.
    pub const DEFAULT_MAX_BUDGET_UNITS: usize = 10_000_000;
    /// 256 MiB of choice bitmap.
    pub const DEFAULT_MAX_CHOICE_BITS: usize = 1 << 31;
    pub const DEFAULT_MAX_ORACLE_ITEMS: usize = 22;

    #[inline]
    pub const fn new() -> Self {
        Self {
            max_budget_units: Self::DEFAULT_MAX_BUDGET_UNITS,
            max_choice_bits: Self::DEFAULT_MAX_CHOICE_BITS,
            max_oracle_items: Self::DEFAULT_MAX_ORACLE_ITEMS,
        }
    }

    /// Largest budget, in units, the optimizer accepts. The table holds one
    /// more cell than this.
    #[inline]
    pub const fn with_max_budget_units(mut self, units: usize) -> Self {
        self.max_budget_units = units;
        self
    }

    /// Largest number of bits the reconstruction bitmap may hold.
    #[inline]
    pub const fn with_max_choice_bits(mut self, bits: usize) -> Self {
        self.max_choice_bits = bits;
        self
    }

    /// Largest catalog the oracle enumerates. Values above
    /// `ORACLE_HARD_CAP` are clamped to it.
    #[inline]
    pub const fn with_max_oracle_items(mut self, items: usize) -> Self {
        self.max_oracle_items = if items > ORACLE_HARD_CAP {
            ORACLE_HARD_CAP
        } else {
            items
        };
        self
    }

    #[inline]
    pub const fn max_budget_units(&self) -> usize {
        self.max_budget_units
    }

    #[inline]
    pub const fn max_choice_bits(&self) -> usize {
        self.max_choice_bits
    }

    #[inline]
    pub const fn max_oracle_items(&self) -> usize {
        self.max_oracle_items
    }
}

impl Default for OptimizerConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for OptimizerConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "OptimizerConfig(max_budget_units: {}, max_choice_bits: {}, max_oracle_items: {})",
            self.max_budget_units, self.max_choice_bits, self.max_oracle_items
        )
    }
}
