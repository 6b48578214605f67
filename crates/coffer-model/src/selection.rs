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

use crate::{
    catalog::{Catalog, Item},
    index::ItemIndex,
};
use coffer_core::num::units::UnitsNumeric;

/// The outcome of one optimization call: a subset of a catalog.
///
/// Chosen items are kept as indices in ascending catalog order, so the
/// selection preserves the original relative order of the items and never
/// holds the same item twice.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Selection<T> {
    items: Vec<ItemIndex>,
    total_cost: T,
    total_value: T,
}

impl<T> Selection<T>
where
    T: UnitsNumeric,
{
    /// The empty selection: no items, zero cost, zero value.
    #[inline]
    pub fn empty() -> Self {
        Self {
            items: Vec::new(),
            total_cost: T::zero(),
            total_value: T::zero(),
        }
    }

    /// Builds a selection from indices into `catalog`, computing both totals.
    ///
    /// Returns `None` if a total overflows `T`.
    ///
    /// # Panics
    ///
    /// Panics if the indices are not strictly increasing or any index is out
    /// of bounds.
    pub fn from_indices(catalog: &Catalog<T>, items: Vec<ItemIndex>) -> Option<Self> {
        assert!(
            items.windows(2).all(|w| w[0] < w[1]),
            "called `Selection::from_indices` with indices that are not strictly increasing"
        );

        let mut total_cost = T::zero();
        let mut total_value = T::zero();
        for &index in &items {
            let item = catalog.item(index);
            total_cost = total_cost.checked_add_val(item.cost())?;
            total_value = total_value.checked_add_val(item.value())?;
        }

        Some(Self {
            items,
            total_cost,
            total_value,
        })
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Indices of the chosen items, in catalog order.
    #[inline]
    pub fn indices(&self) -> &[ItemIndex] {
        &self.items
    }

    #[inline]
    pub fn total_cost(&self) -> T {
        self.total_cost
    }

    #[inline]
    pub fn total_value(&self) -> T {
        self.total_value
    }

    /// Resolves the chosen items against the catalog they came from.
    pub fn items<'a>(&'a self, catalog: &'a Catalog<T>) -> impl Iterator<Item = Item<'a, T>> + 'a {
        self.items.iter().map(move |&i| catalog.item(i))
    }

    /// Names of the chosen items, in catalog order.
    pub fn names<'a>(&'a self, catalog: &'a Catalog<T>) -> Vec<&'a str> {
        self.items.iter().map(|&i| catalog.name(i)).collect()
    }
}

impl<T> std::fmt::Display for Selection<T>
where
    T: UnitsNumeric,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Selection Summary")?;
        writeln!(f, "   Items:       {}", self.len())?;
        writeln!(f, "   Total Cost:  {}", self.total_cost)?;
        writeln!(f, "   Total Value: {}", self.total_value)?;

        if self.is_empty() {
            writeln!(f, "   (No items selected)")?;
            return Ok(());
        }

        let indices: Vec<String> = self.items.iter().map(|i| i.get().to_string()).collect();
        writeln!(f, "   Indices:     [{}]", indices.join(", "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::CatalogBuilder;

    fn ii(i: usize) -> ItemIndex {
        ItemIndex::new(i)
    }

    fn catalog() -> Catalog<u64> {
        let mut b = CatalogBuilder::new();
        b.add_item("A", 100, 50).unwrap();
        b.add_item("B", 250, 90).unwrap();
        b.add_item("C", 40, 15).unwrap();
        b.build()
    }

    #[test]
    fn test_empty_selection() {
        let s = Selection::<u64>::empty();
        assert!(s.is_empty());
        assert_eq!(s.total_cost(), 0);
        assert_eq!(s.total_value(), 0);
        assert!(s.indices().is_empty());
    }

    #[test]
    fn test_from_indices_sums_totals() {
        let c = catalog();
        let s = Selection::from_indices(&c, vec![ii(0), ii(2)]).unwrap();
        assert_eq!(s.len(), 2);
        assert_eq!(s.total_cost(), 140);
        assert_eq!(s.total_value(), 65);
        assert_eq!(s.indices(), &[ii(0), ii(2)]);
        assert_eq!(s.names(&c), vec!["A", "C"]);

        let costs: Vec<u64> = s.items(&c).map(|it| it.cost()).collect();
        assert_eq!(costs, vec![100, 40]);
    }

    #[test]
    fn test_from_indices_reports_overflow() {
        let mut b = CatalogBuilder::<u8>::new();
        b.add_item("x", 200, 1).unwrap();
        b.add_item("y", 100, 1).unwrap();
        let c = b.build();
        assert!(Selection::from_indices(&c, vec![ii(0), ii(1)]).is_none());
    }

    #[test]
    #[should_panic(expected = "not strictly increasing")]
    fn test_from_indices_rejects_duplicates() {
        let c = catalog();
        let _ = Selection::from_indices(&c, vec![ii(1), ii(1)]);
    }

    #[test]
    fn test_display_formatting() {
        let c = catalog();
        let s = Selection::from_indices(&c, vec![ii(1)]).unwrap();

        let mut expected = String::new();
        expected.push_str("Selection Summary\n");
        expected.push_str("   Items:       1\n");
        expected.push_str("   Total Cost:  250\n");
        expected.push_str("   Total Value: 90\n");
        expected.push_str("   Indices:     [1]\n");
        assert_eq!(s.to_string(), expected);

        let empty = Selection::<u64>::empty().to_string();
        assert!(empty.ends_with("   (No items selected)\n"));
    }
}
