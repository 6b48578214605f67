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

//! # Coffer Core
//!
//! Foundational building blocks shared by the coffer budget-selection crates.
//! Everything downstream works on exact integer amounts of the smallest
//! currency unit, so this crate concentrates the numeric contracts those
//! amounts must satisfy, together with phantom-typed indices that keep item
//! positions from being confused with budget cells.
//!
//! ## Modules
//!
//! - `num`: By-value checked and saturating arithmetic traits for unsigned
//!   integer primitives, and the `UnitsNumeric` alias that gates every
//!   generic solver in the workspace.
//! - `utils`: Strongly typed indices (`TypedIndex<T>`).

pub mod num;
pub mod utils;
