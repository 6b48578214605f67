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

//! By-value arithmetic traits for unsigned unit types.
//!
//! These mirror the inherent `checked_add` and `saturating_add` methods of the
//! primitive integers but are reachable through trait bounds, which the
//! `num_traits` counterparts only offer by reference. Sums of costs and values
//! go through `CheckedAddVal` so that an overflow surfaces as `None` instead of
//! wrapping silently in release builds.

use core::ops::Add;

/// Checked addition by value.
///
/// # Examples
///
/// ```rust
/// # use coffer_core::num::ops::CheckedAddVal;
/// let a: u8 = 200;
/// assert_eq!(a.checked_add_val(100), None);
/// assert_eq!(a.checked_add_val(50), Some(250));
/// ```
pub trait CheckedAddVal: Sized + Add<Self, Output = Self> {
    /// Returns `None` on overflow.
    fn checked_add_val(self, v: Self) -> Option<Self>;
}

/// Saturating addition by value, clamping at the type's maximum.
///
/// # Examples
///
/// ```rust
/// # use coffer_core::num::ops::SaturatingAddVal;
/// let a: u8 = 250;
/// assert_eq!(a.saturating_add_val(10), 255);
/// ```
pub trait SaturatingAddVal: Sized + Add<Self, Output = Self> {
    /// Adds `v`, clamping instead of overflowing.
    fn saturating_add_val(self, v: Self) -> Self;
}

macro_rules! impl_val_op {
    ($trait_name:ident, $method:ident, $src_method:ident, checked, $($t:ty),+) => {
        $(
            impl $trait_name for $t {
                #[inline(always)]
                fn $method(self, v: $t) -> Option<$t> {
                    <$t>::$src_method(self, v)
                }
            }
        )+
    };
    ($trait_name:ident, $method:ident, $src_method:ident, saturating, $($t:ty),+) => {
        $(
            impl $trait_name for $t {
                #[inline(always)]
                fn $method(self, v: $t) -> $t {
                    <$t>::$src_method(self, v)
                }
            }
        )+
    };
}

impl_val_op!(CheckedAddVal, checked_add_val, checked_add, checked, u8, u16, u32, u64, u128, usize);
impl_val_op!(SaturatingAddVal, saturating_add_val, saturating_add, saturating, u8, u16, u32, u64, u128, usize);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_checked_add_at_bounds() {
        assert_eq!(u64::MAX.checked_add_val(0), Some(u64::MAX));
        assert_eq!(u64::MAX.checked_add_val(1), None);
        assert_eq!(0usize.checked_add_val(7), Some(7));
    }

    #[test]
    fn test_saturating_add_clamps() {
        assert_eq!(u64::MAX.saturating_add_val(5), u64::MAX);
        assert_eq!(1u64.saturating_add_val(5), 6);
    }
}
