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

//! Item catalogs.
//!
//! A `Catalog` is the immutable, ordered set of admissible items handed to the
//! optimizers. Data is stored as a structure of arrays (names, costs and values
//! in parallel vectors) because the solvers scan costs and values in tight
//! loops and never need the names.
//!
//! Catalogs are produced by a `CatalogBuilder`, which owns the admission rule:
//! an item is only accepted when both its cost and its value are strictly
//! positive. Raw entries that still carry decimal amounts go through
//! `CatalogBuilder::add_raw`, which quantizes cost and value independently
//! (see `crate::quantize` for the value policy) and records a `Rejection`
//! instead of failing when a single entry is unusable.

use crate::{
    decimal::{Decimal, InvalidAmount, InvalidAmountReason},
    index::ItemIndex,
    quantize::Quantizer,
};
use coffer_core::num::units::UnitsNumeric;

/// How the return column of a raw entry is to be read.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ReturnKind {
    /// The return is a percentage of the cost; value = cost * return / 100.
    #[default]
    Percent,
    /// The return is already an absolute amount in major units.
    Absolute,
}

impl std::fmt::Display for ReturnKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ReturnKind::Percent => write!(f, "percent"),
            ReturnKind::Absolute => write!(f, "absolute"),
        }
    }
}

/// Why an entry was kept out of the catalog.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RejectReason {
    /// Cost or return could not be parsed or quantized.
    InvalidAmount(InvalidAmount),
    /// The quantized cost is zero.
    NonPositiveCost,
    /// The return is negative or its quantized value is zero.
    NonPositiveValue,
}

impl std::fmt::Display for RejectReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RejectReason::InvalidAmount(e) => write!(f, "{}", e),
            RejectReason::NonPositiveCost => write!(f, "cost is not strictly positive"),
            RejectReason::NonPositiveValue => write!(f, "value is not strictly positive"),
        }
    }
}

impl From<InvalidAmount> for RejectReason {
    fn from(e: InvalidAmount) -> Self {
        RejectReason::InvalidAmount(e)
    }
}

/// A raw entry that did not make it into the catalog.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rejection {
    /// Zero-based position of the entry in the input sequence.
    pub position: usize,
    /// The entry's identifier, as given.
    pub name: String,
    pub reason: RejectReason,
}

impl std::fmt::Display for Rejection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "entry {} ('{}') rejected: {}",
            self.position, self.name, self.reason
        )
    }
}

/// Errors raised when turning raw entries into a catalog.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CatalogError {
    /// No entry survived admission.
    EmptyCatalog {
        /// How many entries were rejected on the way.
        rejected: usize,
    },
}

impl std::fmt::Display for CatalogError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CatalogError::EmptyCatalog { rejected } => write!(
                f,
                "No admissible items ({} entries rejected)",
                rejected
            ),
        }
    }
}

impl std::error::Error for CatalogError {}

/// A borrowed view of one catalog item.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Item<'a, T> {
    index: ItemIndex,
    name: &'a str,
    cost: T,
    value: T,
}

impl<'a, T> Item<'a, T>
where
    T: Copy,
{
    #[inline]
    pub fn index(&self) -> ItemIndex {
        self.index
    }

    #[inline]
    pub fn name(&self) -> &'a str {
        self.name
    }

    /// Cost in currency units.
    #[inline]
    pub fn cost(&self) -> T {
        self.cost
    }

    /// Value (return) in currency units.
    #[inline]
    pub fn value(&self) -> T {
        self.value
    }
}

/// The immutable, ordered set of admissible items for one optimization run.
#[derive(Clone, PartialEq, Eq)]
pub struct Catalog<T> {
    names: Vec<String>,
    costs: Vec<T>,
    values: Vec<T>,
}

impl<T> Catalog<T>
where
    T: UnitsNumeric,
{
    /// A catalog without items.
    #[inline]
    pub fn empty() -> Self {
        Self {
            names: Vec::new(),
            costs: Vec::new(),
            values: Vec::new(),
        }
    }

    /// Builds a catalog from raw `(name, cost, return)` entries.
    ///
    /// Returns the catalog together with every rejected entry, or
    /// `CatalogError::EmptyCatalog` when nothing is admissible.
    pub fn from_raw<I, S>(
        entries: I,
        quantizer: &Quantizer,
        kind: ReturnKind,
    ) -> Result<(Self, Vec<Rejection>), CatalogError>
    where
        I: IntoIterator<Item = (S, Decimal, Decimal)>,
        S: Into<String>,
    {
        let mut builder = CatalogBuilder::new();
        let mut rejections = Vec::new();

        for (position, (name, cost, ret)) in entries.into_iter().enumerate() {
            let name = name.into();
            if let Err(reason) = builder.add_raw(name.clone(), &cost, &ret, quantizer, kind) {
                rejections.push(Rejection {
                    position,
                    name,
                    reason,
                });
            }
        }

        if builder.is_empty() {
            return Err(CatalogError::EmptyCatalog {
                rejected: rejections.len(),
            });
        }

        Ok((builder.build(), rejections))
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.costs.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.costs.is_empty()
    }

    /// Returns the item at `index`.
    ///
    /// # Panics
    ///
    /// Panics if `index` is out of bounds.
    #[inline]
    pub fn item(&self, index: ItemIndex) -> Item<'_, T> {
        let i = index.get();
        assert!(
            i < self.len(),
            "called `Catalog::item` with index out of bounds: the len is {} but the index is {}",
            self.len(),
            i
        );
        Item {
            index,
            name: &self.names[i],
            cost: self.costs[i],
            value: self.values[i],
        }
    }

    /// Returns the item at `index`, or `None` if out of bounds.
    #[inline]
    pub fn get(&self, index: ItemIndex) -> Option<Item<'_, T>> {
        (index.get() < self.len()).then(|| self.item(index))
    }

    #[inline]
    pub fn cost(&self, index: ItemIndex) -> T {
        self.costs[index.get()]
    }

    #[inline]
    pub fn value(&self, index: ItemIndex) -> T {
        self.values[index.get()]
    }

    #[inline]
    pub fn name(&self, index: ItemIndex) -> &str {
        &self.names[index.get()]
    }

    /// All costs, in catalog order.
    #[inline]
    pub fn costs(&self) -> &[T] {
        &self.costs
    }

    /// All values, in catalog order.
    #[inline]
    pub fn values(&self) -> &[T] {
        &self.values
    }

    /// Iterates the items in catalog order.
    pub fn iter(&self) -> impl DoubleEndedIterator<Item = Item<'_, T>> + ExactSizeIterator {
        (0..self.len()).map(|i| self.item(ItemIndex::new(i)))
    }
}

impl<T> std::fmt::Debug for Catalog<T>
where
    T: std::fmt::Debug,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Catalog")
            .field("num_items", &self.costs.len())
            .field("costs", &self.costs)
            .field("values", &self.values)
            .finish()
    }
}

impl<T> std::fmt::Display for Catalog<T>
where
    T: UnitsNumeric,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Catalog(items: {})", self.len())
    }
}

/// Accumulates admissible items in insertion order.
#[derive(Debug, Clone)]
pub struct CatalogBuilder<T> {
    names: Vec<String>,
    costs: Vec<T>,
    values: Vec<T>,
}

impl<T> Default for CatalogBuilder<T>
where
    T: UnitsNumeric,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<T> CatalogBuilder<T>
where
    T: UnitsNumeric,
{
    #[inline]
    pub fn new() -> Self {
        Self::with_capacity(0)
    }

    #[inline]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            names: Vec::with_capacity(capacity),
            costs: Vec::with_capacity(capacity),
            values: Vec::with_capacity(capacity),
        }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.costs.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.costs.is_empty()
    }

    /// Adds an item with already quantized cost and value.
    ///
    /// # Errors
    ///
    /// `NonPositiveCost` or `NonPositiveValue` if either amount is zero; the
    /// builder is left unchanged.
    pub fn add_item<S>(&mut self, name: S, cost: T, value: T) -> Result<ItemIndex, RejectReason>
    where
        S: Into<String>,
    {
        if cost.is_zero() {
            return Err(RejectReason::NonPositiveCost);
        }
        if value.is_zero() {
            return Err(RejectReason::NonPositiveValue);
        }

        let index = ItemIndex::new(self.len());
        self.names.push(name.into());
        self.costs.push(cost);
        self.values.push(value);
        Ok(index)
    }

    /// Adds an item from decimal cost and return, quantizing both.
    ///
    /// For `ReturnKind::Percent` the value is computed from the original
    /// decimal cost and percentage before quantization.
    pub fn add_raw<S>(
        &mut self,
        name: S,
        cost: &Decimal,
        ret: &Decimal,
        quantizer: &Quantizer,
        kind: ReturnKind,
    ) -> Result<ItemIndex, RejectReason>
    where
        S: Into<String>,
    {
        let cost_units: T = quantizer.quantize(cost)?;
        if cost_units.is_zero() {
            return Err(RejectReason::NonPositiveCost);
        }

        let value = match kind {
            ReturnKind::Percent => cost.percent(ret).ok_or_else(|| {
                InvalidAmount::new(ret.to_string(), InvalidAmountReason::Overflow)
            })?,
            ReturnKind::Absolute => *ret,
        };
        if value.is_negative() {
            return Err(RejectReason::NonPositiveValue);
        }
        let value_units: T = quantizer.quantize(&value)?;

        self.add_item(name, cost_units, value_units)
    }

    /// Finalizes the catalog. An empty builder yields an empty catalog.
    #[inline]
    pub fn build(self) -> Catalog<T> {
        Catalog {
            names: self.names,
            costs: self.costs,
            values: self.values,
        }
    }
}

impl<T> FromIterator<(String, T, T)> for Catalog<T>
where
    T: UnitsNumeric,
{
    /// Collects already quantized items, silently skipping inadmissible ones.
    fn from_iter<I: IntoIterator<Item = (String, T, T)>>(iter: I) -> Self {
        let mut builder = CatalogBuilder::new();
        for (name, cost, value) in iter {
            let _ = builder.add_item(name, cost, value);
        }
        builder.build()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(s: &str) -> Decimal {
        s.parse().unwrap()
    }

    fn ii(i: usize) -> ItemIndex {
        ItemIndex::new(i)
    }

    #[test]
    fn test_builder_preserves_insertion_order() {
        let mut b = CatalogBuilder::<u64>::new();
        assert_eq!(b.add_item("A", 100, 40).unwrap(), ii(0));
        assert_eq!(b.add_item("B", 200, 10).unwrap(), ii(1));
        let catalog = b.build();

        assert_eq!(catalog.len(), 2);
        assert_eq!(catalog.costs(), &[100, 200]);
        assert_eq!(catalog.values(), &[40, 10]);
        assert_eq!(catalog.name(ii(1)), "B");

        let names: Vec<&str> = catalog.iter().map(|it| it.name()).collect();
        assert_eq!(names, vec!["A", "B"]);
    }

    #[test]
    fn test_builder_rejects_zero_cost_or_value() {
        let mut b = CatalogBuilder::<u32>::new();
        assert_eq!(b.add_item("free", 0, 5), Err(RejectReason::NonPositiveCost));
        assert_eq!(b.add_item("dud", 5, 0), Err(RejectReason::NonPositiveValue));
        assert!(b.is_empty());
        assert!(b.build().is_empty());
    }

    #[test]
    fn test_from_raw_quantizes_and_filters() {
        let entries = vec![
            ("Share-GRUT", d("498.76"), d("39.42")),
            ("Share-ZERO", d("0.001"), d("10")),
            ("Share-LOSS", d("12.00"), d("-3")),
            ("Share-FLAT", d("15.00"), d("0")),
            ("Share-NEG", d("-5.00"), d("10")),
            ("Share-ECAQ", d("25.50"), d("40")),
        ];
        let (catalog, rejected) =
            Catalog::<u64>::from_raw(entries, &Quantizer::cents(), ReturnKind::Percent).unwrap();

        assert_eq!(catalog.len(), 2);
        assert_eq!(catalog.name(ii(0)), "Share-GRUT");
        assert_eq!(catalog.cost(ii(0)), 49876);
        // 498.76 * 39.42% = 196.6111... -> 196.61
        assert_eq!(catalog.value(ii(0)), 19661);
        assert_eq!(catalog.cost(ii(1)), 2550);
        assert_eq!(catalog.value(ii(1)), 1020);

        let positions: Vec<usize> = rejected.iter().map(|r| r.position).collect();
        assert_eq!(positions, vec![1, 2, 3, 4]);
        assert_eq!(rejected[0].reason, RejectReason::NonPositiveCost);
        assert_eq!(rejected[1].reason, RejectReason::NonPositiveValue);
        assert_eq!(rejected[2].reason, RejectReason::NonPositiveValue);
        assert!(matches!(
            &rejected[3].reason,
            RejectReason::InvalidAmount(e) if e.reason == InvalidAmountReason::Negative
        ));
    }

    #[test]
    fn test_from_raw_absolute_returns() {
        let entries = vec![("Share-TEST", d("100.00"), d("50.00"))];
        let (catalog, rejected) =
            Catalog::<u64>::from_raw(entries, &Quantizer::cents(), ReturnKind::Absolute).unwrap();
        assert!(rejected.is_empty());
        assert_eq!(catalog.value(ii(0)), 5000);
    }

    #[test]
    fn test_from_raw_empty_is_signaled() {
        let entries = vec![("A", d("0"), d("10")), ("B", d("1"), d("0"))];
        let err = Catalog::<u64>::from_raw(entries, &Quantizer::cents(), ReturnKind::Percent)
            .unwrap_err();
        assert_eq!(err, CatalogError::EmptyCatalog { rejected: 2 });

        let none: Vec<(&str, Decimal, Decimal)> = Vec::new();
        let err = Catalog::<u64>::from_raw(none, &Quantizer::cents(), ReturnKind::Percent)
            .unwrap_err();
        assert_eq!(err, CatalogError::EmptyCatalog { rejected: 0 });
    }

    #[test]
    fn test_item_view_and_get() {
        let catalog: Catalog<u64> = vec![("X".to_string(), 3, 4)].into_iter().collect();
        let item = catalog.item(ii(0));
        assert_eq!((item.name(), item.cost(), item.value()), ("X", 3, 4));
        assert_eq!(item.index(), ii(0));
        assert!(catalog.get(ii(1)).is_none());
    }

    #[test]
    fn test_debug_and_display() {
        let catalog: Catalog<u32> = vec![("X".to_string(), 3, 4)].into_iter().collect();
        assert_eq!(
            format!("{:?}", catalog),
            "Catalog { num_items: 1, costs: [3], values: [4] }"
        );
        assert_eq!(catalog.to_string(), "Catalog(items: 1)");
    }

    #[test]
    #[should_panic(expected = "called `Catalog::item` with index out of bounds")]
    fn test_item_out_of_bounds_panics() {
        let catalog = Catalog::<u64>::empty();
        let _ = catalog.item(ii(0));
    }
}
