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

//! # Unit Numeric Trait
//!
//! `UnitsNumeric` collects the integer capabilities required by catalogs and
//! optimizers into a single bound, so generic signatures stay short and
//! overflow handling stays uniform across the workspace.
//!
//! A unit type is an unsigned primitive integer counting the smallest
//! currency unit (cents for a two-digit currency). Signed types are not unit
//! types: costs, values and budgets are non-negative by construction.
//!
//! Conversions to `usize` are needed because the dynamic-programming table is
//! indexed by budget consumption; a budget that does not fit `usize` is
//! rejected before any allocation.

use crate::num::ops::{CheckedAddVal, SaturatingAddVal};
use num_traits::{FromPrimitive, PrimInt, ToPrimitive, Unsigned};
use std::hash::Hash;

/// A trait alias for the integer types that may represent monetary units.
///
/// Implemented automatically for `u8`, `u16`, `u32`, `u64`, `u128` and
/// `usize`.
pub trait UnitsNumeric:
    PrimInt
    + Unsigned
    + ToPrimitive
    + FromPrimitive
    + std::fmt::Debug
    + std::fmt::Display
    + CheckedAddVal
    + SaturatingAddVal
    + Send
    + Sync
    + Hash
{
}

impl<T> UnitsNumeric for T where
    T: PrimInt
        + Unsigned
        + ToPrimitive
        + FromPrimitive
        + std::fmt::Debug
        + std::fmt::Display
        + CheckedAddVal
        + SaturatingAddVal
        + Send
        + Sync
        + Hash
{
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sum_all<T: UnitsNumeric>(values: &[T]) -> Option<T> {
        values
            .iter()
            .try_fold(T::zero(), |acc, &v| acc.checked_add_val(v))
    }

    #[test]
    fn test_alias_covers_unsigned_primitives() {
        assert_eq!(sum_all::<u8>(&[1, 2, 3]), Some(6));
        assert_eq!(sum_all::<u32>(&[10, 20]), Some(30));
        assert_eq!(sum_all::<u64>(&[]), Some(0));
        assert_eq!(sum_all::<usize>(&[usize::MAX, 1]), None);
    }
}
