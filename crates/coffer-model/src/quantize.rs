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

//! Quantization of decimal amounts into integer currency units.
//!
//! A `Quantizer` turns an exact `Decimal` into a count of the smallest
//! currency unit (cents, with the default two minor digits). All downstream
//! arithmetic happens on those integers, so this is the only place where a
//! rounding decision is ever made.
//!
//! ## Rounding policy
//!
//! The policy is fixed per quantizer:
//!
//! - `RoundingPolicy::HalfAwayFromZero` (the default): a remainder of exactly
//!   one half rounds up. `0.125` becomes `13` cents.
//! - `RoundingPolicy::HalfEven`: a remainder of exactly one half rounds to
//!   the even neighbour. `0.125` becomes `12` cents, `0.135` becomes `14`.
//!
//! Anything strictly below one half rounds down and anything strictly above
//! rounds up under both policies. Negative inputs are rejected outright.
//!
//! ## Value policy
//!
//! The value of an item is the return percentage applied to the *original
//! decimal cost*, quantized once: `quantize(cost * percent / 100)`. It is not
//! derived from the already quantized cost, which can differ by one unit on
//! inputs carrying more minor digits than the currency has.

use crate::decimal::{Decimal, InvalidAmount, InvalidAmountReason, MAX_POW10_U128, pow10};
use coffer_core::num::units::UnitsNumeric;

/// How a remainder of exactly one half is resolved.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RoundingPolicy {
    #[default]
    HalfAwayFromZero,
    HalfEven,
}

impl std::fmt::Display for RoundingPolicy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RoundingPolicy::HalfAwayFromZero => write!(f, "half-away-from-zero"),
            RoundingPolicy::HalfEven => write!(f, "half-even"),
        }
    }
}

/// Converts decimal amounts into integer units with a fixed rounding policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Quantizer {
    minor_digits: u32,
    policy: RoundingPolicy,
}

impl Default for Quantizer {
    fn default() -> Self {
        Self::cents()
    }
}

impl Quantizer {
    /// Creates a quantizer with `minor_digits` fractional digits per major unit.
    ///
    /// # Panics
    ///
    /// Panics if `minor_digits` exceeds 18.
    #[inline]
    pub const fn new(minor_digits: u32, policy: RoundingPolicy) -> Self {
        assert!(
            minor_digits <= 18,
            "called `Quantizer::new` with more than 18 minor digits"
        );
        Self {
            minor_digits,
            policy,
        }
    }

    /// Two minor digits, rounding half away from zero.
    #[inline]
    pub const fn cents() -> Self {
        Self::new(2, RoundingPolicy::HalfAwayFromZero)
    }

    /// Returns a copy of this quantizer using `policy`.
    #[inline]
    pub const fn with_policy(self, policy: RoundingPolicy) -> Self {
        Self::new(self.minor_digits, policy)
    }

    #[inline]
    pub const fn minor_digits(&self) -> u32 {
        self.minor_digits
    }

    #[inline]
    pub const fn policy(&self) -> RoundingPolicy {
        self.policy
    }

    /// Quantizes `amount` into units of `T`.
    ///
    /// # Errors
    ///
    /// `InvalidAmount` with reason `Negative` for amounts below zero, and
    /// `Overflow` if the rounded result does not fit `T`.
    ///
    /// ```rust
    /// # use coffer_model::quantize::Quantizer;
    /// let q = Quantizer::cents();
    /// let units: u64 = q.quantize(&"498.76".parse().unwrap()).unwrap();
    /// assert_eq!(units, 49876);
    /// ```
    pub fn quantize<T>(&self, amount: &Decimal) -> Result<T, InvalidAmount>
    where
        T: UnitsNumeric,
    {
        let fail = |reason| InvalidAmount::new(amount.to_string(), reason);

        if amount.is_negative() {
            return Err(fail(InvalidAmountReason::Negative));
        }

        let units = self
            .round_to_units(amount.mantissa(), amount.scale())
            .ok_or_else(|| fail(InvalidAmountReason::Overflow))?;

        T::from_u128(units).ok_or_else(|| fail(InvalidAmountReason::Overflow))
    }

    /// Parses `text` as a decimal and quantizes it.
    #[inline]
    pub fn quantize_str<T>(&self, text: &str) -> Result<T, InvalidAmount>
    where
        T: UnitsNumeric,
    {
        let amount: Decimal = text.parse()?;
        self.quantize(&amount)
    }

    /// Renders `units` as a decimal string in major units, e.g. `49876` as `498.76`.
    pub fn format_units<T>(&self, units: T) -> String
    where
        T: UnitsNumeric,
    {
        match units.to_u128() {
            Some(raw) => Decimal::new(false, raw, self.minor_digits).to_string(),
            None => units.to_string(),
        }
    }

    fn round_to_units(&self, mantissa: u128, scale: u32) -> Option<u128> {
        if scale <= self.minor_digits {
            return mantissa.checked_mul(pow10(self.minor_digits - scale)?);
        }

        let shift = scale - self.minor_digits;
        if shift > MAX_POW10_U128 {
            // The divisor exceeds every representable mantissa, so the quotient
            // is zero and the remainder is below one half.
            return Some(0);
        }

        let divisor = pow10(shift)?;
        let quotient = mantissa / divisor;
        let remainder = mantissa % divisor;
        let half = divisor / 2;

        let round_up = match remainder.cmp(&half) {
            std::cmp::Ordering::Less => false,
            std::cmp::Ordering::Greater => true,
            std::cmp::Ordering::Equal => match self.policy {
                RoundingPolicy::HalfAwayFromZero => true,
                RoundingPolicy::HalfEven => quotient % 2 == 1,
            },
        };

        if round_up {
            quotient.checked_add(1)
        } else {
            Some(quotient)
        }
    }
}
