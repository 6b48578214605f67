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

use coffer_core::num::units::UnitsNumeric;
use coffer_model::{catalog::Catalog, index::ItemIndex};

/// Returns the most valuable single item whose cost fits `budget`.
///
/// The earliest item wins on equal values. Returns `None` for an empty
/// catalog or when no item fits. The optimal subset is never worth less than
/// this item, which makes it a cheap sanity floor for the optimizers.
///
/// ```rust
/// # use coffer_model::{catalog::CatalogBuilder, index::ItemIndex};
/// let mut b = CatalogBuilder::<u64>::new();
/// b.add_item("A", 300, 10).unwrap();
/// b.add_item("B", 100, 40).unwrap();
/// b.add_item("C", 900, 99).unwrap();
/// let catalog = b.build();
///
/// assert_eq!(coffer_dp::best_single(&catalog, 500), Some(ItemIndex::new(1)));
/// assert_eq!(coffer_dp::best_single(&catalog, 50), None);
/// ```
pub fn best_single<T>(catalog: &Catalog<T>, budget: T) -> Option<ItemIndex>
where
    T: UnitsNumeric,
{
    let mut best: Option<(ItemIndex, T)> = None;
    for item in catalog.iter().filter(|it| it.cost() <= budget) {
        match best {
            Some((_, value)) if item.value() <= value => {}
            _ => best = Some((item.index(), item.value())),
        }
    }
    best.map(|(index, _)| index)
}
