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

//! Coffer-DP: 0/1 knapsack optimizers for investment selection
//!
//! Given a `coffer_model::catalog::Catalog` of items with integer costs and
//! values and a budget in the same units, this crate finds the subset with
//! the greatest total value whose total cost fits the budget. Every item is
//! taken at most once.
//!
//! Core flow
//! - Build a `Catalog<T>` (directly, or through the loader in `coffer_model`).
//! - Call `optimize` for the dynamic-programming answer, or keep a
//!   `dp::DpOptimizer` around to reuse its buffers across calls.
//! - Cross-check small catalogs with `optimize_exhaustive`.
//! - Use `best_single` as a floor: the optimum is never worth less.
//!
//! Guarantees
//! - Deterministic: identical inputs give identical selections.
//! - Exact: integer arithmetic only; overflow is an error, never a wrap.
//! - Bounded: table sizes are checked against `OptimizerConfig` before any
//!   allocation.
//!
//! Module map
//! - `dp`: the dynamic-programming optimizer.
//! - `exhaustive`: the brute-force oracle.
//! - `single`: the single-item selector.
//! - `batch`: parallel independent runs.
//! - `monitor`: run observers (log, composite, no-op).
//! - `config`, `error`, `result`, `stats`: limits, failures, outcomes and counters.

pub mod batch;
pub mod config;
pub mod dp;
pub mod error;
pub mod exhaustive;
pub mod monitor;
pub mod result;
pub mod single;
pub mod stats;

pub use batch::{BatchJob, optimize_batch};
pub use config::OptimizerConfig;
pub use dp::{DpOptimizer, optimize};
pub use error::OptimizerError;
pub use exhaustive::{ExhaustiveOracle, optimize_exhaustive};
pub use single::best_single;
