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

//! Exact decimal amounts.
//!
//! `Decimal` holds a sign, an unsigned `u128` mantissa and a base-10 scale,
//! so `498.76` is stored as `(false, 49876, 2)`. Parsing never goes through
//! floating point, which keeps every later rounding decision exact: the
//! product of a cost and a return percentage is formed on mantissas and
//! scales alone.
//!
//! The accepted grammar is deliberately small: an optional `+` or `-`, a run
//! of ASCII digits with at most one `.`, and at least one digit overall.
//! Exponents, thousands separators and currency symbols are rejected here;
//! stripping decorations is the loader's job.

use std::str::FromStr;

/// Why a piece of text or a computation did not yield a usable amount.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InvalidAmountReason {
    /// The input was empty after trimming.
    Empty,
    /// The input contained something other than a plain decimal number.
    NotNumeric,
    /// The amount was below zero where only non-negative amounts are allowed.
    Negative,
    /// The amount does not fit the target representation.
    Overflow,
}

impl std::fmt::Display for InvalidAmountReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Empty => write!(f, "empty amount"),
            Self::NotNumeric => write!(f, "not a decimal number"),
            Self::Negative => write!(f, "negative amount"),
            Self::Overflow => write!(f, "amount out of range"),
        }
    }
}

/// The error returned when an amount cannot be parsed or quantized.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvalidAmount {
    /// The offending input, as text.
    pub input: String,
    /// What was wrong with it.
    pub reason: InvalidAmountReason,
}

impl InvalidAmount {
    #[inline]
    pub fn new<S>(input: S, reason: InvalidAmountReason) -> Self
    where
        S: Into<String>,
    {
        Self {
            input: input.into(),
            reason,
        }
    }
}

impl std::fmt::Display for InvalidAmount {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Invalid amount '{}': {}", self.input, self.reason)
    }
}

impl std::error::Error for InvalidAmount {}

/// Largest exponent for which `10^k` fits in a `u128`.
pub(crate) const MAX_POW10_U128: u32 = 38;

/// Returns `10^k`, or `None` if it does not fit in a `u128`.
#[inline]
pub(crate) fn pow10(k: u32) -> Option<u128> {
    10u128.checked_pow(k)
}

/// An exact, signed decimal number.
///
/// Negative zero is normalized to zero, so `is_negative` implies a non-zero
/// mantissa.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Decimal {
    negative: bool,
    mantissa: u128,
    scale: u32,
}

impl Decimal {
    pub const ZERO: Decimal = Decimal {
        negative: false,
        mantissa: 0,
        scale: 0,
    };

    /// Creates a decimal equal to `mantissa * 10^-scale`, negated if `negative`.
    #[inline]
    pub const fn new(negative: bool, mantissa: u128, scale: u32) -> Self {
        Self {
            negative: negative && mantissa != 0,
            mantissa,
            scale,
        }
    }

    #[inline]
    pub const fn is_negative(&self) -> bool {
        self.negative
    }

    #[inline]
    pub const fn is_zero(&self) -> bool {
        self.mantissa == 0
    }

    #[inline]
    pub const fn mantissa(&self) -> u128 {
        self.mantissa
    }

    #[inline]
    pub const fn scale(&self) -> u32 {
        self.scale
    }

    /// Exact product of two decimals, or `None` if the mantissa overflows.
    ///
    /// ```rust
    /// # use coffer_model::decimal::Decimal;
    /// let cost: Decimal = "22.10".parse().unwrap();
    /// let pct: Decimal = "40".parse().unwrap();
    /// let p = cost.checked_mul(&pct).unwrap();
    /// assert_eq!((p.mantissa(), p.scale()), (88400, 2));
    /// ```
    pub fn checked_mul(&self, other: &Decimal) -> Option<Decimal> {
        let mantissa = self.mantissa.checked_mul(other.mantissa)?;
        let scale = self.scale.checked_add(other.scale)?;
        Some(Decimal::new(self.negative != other.negative, mantissa, scale))
    }

    /// Divides by `10^k` exactly by widening the scale.
    #[inline]
    pub fn shift_right(&self, k: u32) -> Option<Decimal> {
        Some(Decimal::new(
            self.negative,
            self.mantissa,
            self.scale.checked_add(k)?,
        ))
    }

    /// Returns `self * percent / 100`, computed exactly.
    #[inline]
    pub fn percent(&self, percent: &Decimal) -> Option<Decimal> {
        self.checked_mul(percent)?.shift_right(2)
    }
}

impl FromStr for Decimal {
    type Err = InvalidAmount;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            return Err(InvalidAmount::new(s, InvalidAmountReason::Empty));
        }

        let (negative, body) = match trimmed.as_bytes()[0] {
            b'-' => (true, &trimmed[1..]),
            b'+' => (false, &trimmed[1..]),
            _ => (false, trimmed),
        };

        let mut mantissa: u128 = 0;
        let mut scale: u32 = 0;
        let mut seen_dot = false;
        let mut digits = 0usize;

        for b in body.bytes() {
            match b {
                b'0'..=b'9' => {
                    mantissa = mantissa
                        .checked_mul(10)
                        .and_then(|m| m.checked_add(u128::from(b - b'0')))
                        .ok_or_else(|| InvalidAmount::new(s, InvalidAmountReason::Overflow))?;
                    if seen_dot {
                        scale += 1;
                    }
                    digits += 1;
                }
                b'.' if !seen_dot => seen_dot = true,
                _ => return Err(InvalidAmount::new(s, InvalidAmountReason::NotNumeric)),
            }
        }

        if digits == 0 {
            return Err(InvalidAmount::new(s, InvalidAmountReason::NotNumeric));
        }

        Ok(Decimal::new(negative, mantissa, scale))
    }
}

impl std::fmt::Display for Decimal {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.negative {
            write!(f, "-")?;
        }
        let digits = self.mantissa.to_string();
        let scale = self.scale as usize;
        if scale == 0 {
            return write!(f, "{}", digits);
        }
        if digits.len() > scale {
            let (int, frac) = digits.split_at(digits.len() - scale);
            write!(f, "{}.{}", int, frac)
        } else {
            write!(f, "0.{}{}", "0".repeat(scale - digits.len()), digits)
        }
    }
}

impl std::fmt::Debug for Decimal {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Decimal({})", self)
    }
}
