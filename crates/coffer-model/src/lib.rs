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

//! # Coffer Model
//!
//! **The Domain Model for the Coffer Investment Selector.**
//!
//! This crate turns raw, human-entered investment data into the integer-valued
//! catalogs the optimizers in `coffer_dp` work on, and defines the shape of
//! their answers.
//!
//! ## Architecture
//!
//! * **`decimal`**: Exact decimal amounts, parsed without floating point.
//! * **`quantize`**: The `Quantizer`, the single place where decimals are rounded into currency units.
//! * **`index`**: The strongly-typed `ItemIndex`.
//! * **`catalog`**: The immutable `Catalog` (Structure of Arrays) and the `CatalogBuilder` that owns the admission rule.
//! * **`selection`**: The `Selection` returned by every optimizer.
//! * **`loading`**: The `CatalogLoader` for delimited spreadsheet exports.
//!
//! ## Design Philosophy
//!
//! 1.  **Exactness**: Money is never a float. Amounts are decimals until quantized, and integers afterwards.
//! 2.  **Fail-Fast**: Inadmissible items are filtered at construction, so solvers never see a zero cost or value.
//! 3.  **Isolation**: A bad row costs one item, never the whole load.

pub mod catalog;
pub mod decimal;
pub mod index;
pub mod loading;
pub mod quantize;
pub mod selection;
