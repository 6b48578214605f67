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

use coffer_dp::{
    DpOptimizer, OptimizerError, best_single, optimize, optimize_exhaustive,
    monitor::log::LogMonitor,
};
use coffer_model::{
    catalog::{Catalog, CatalogBuilder, ReturnKind},
    decimal::Decimal,
    index::ItemIndex,
    quantize::Quantizer,
};
use proptest::prelude::*;

fn build(items: &[(u64, u64)]) -> Catalog<u64> {
    let mut b = CatalogBuilder::new();
    for (k, &(c, v)) in items.iter().enumerate() {
        b.add_item(format!("Share-{k:02}"), c, v).unwrap();
    }
    b.build()
}

fn raw(entries: &[(&str, &str, &str)], kind: ReturnKind) -> Catalog<u64> {
    let parsed = entries.iter().map(|&(name, cost, ret)| {
        (
            name,
            cost.parse::<Decimal>().unwrap(),
            ret.parse::<Decimal>().unwrap(),
        )
    });
    let (catalog, rejected) = Catalog::from_raw(parsed, &Quantizer::cents(), kind).unwrap();
    assert!(rejected.is_empty());
    catalog
}

fn items_strategy(max_items: usize) -> impl Strategy<Value = Vec<(u64, u64)>> {
    prop::collection::vec((1u64..=20_000, 1u64..=20_000), 1..=max_items)
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(16))]

    #[test]
    fn dp_value_equals_oracle_value(items in items_strategy(20), budget in 0u64..=100_000) {
        let catalog = build(&items);
        let dp = optimize(&catalog, budget).unwrap();
        let oracle = optimize_exhaustive(&catalog, budget).unwrap();
        prop_assert_eq!(dp.total_value(), oracle.total_value());
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn dp_value_equals_oracle_value_small(items in items_strategy(8), budget in 0u64..=60_000) {
        let catalog = build(&items);
        let dp = optimize(&catalog, budget).unwrap();
        let oracle = optimize_exhaustive(&catalog, budget).unwrap();
        prop_assert_eq!(dp.total_value(), oracle.total_value());
    }

    #[test]
    fn dp_selection_is_consistent(items in items_strategy(16), budget in 0u64..=100_000) {
        let catalog = build(&items);
        let s = optimize(&catalog, budget).unwrap();

        prop_assert!(s.total_cost() <= budget);
        prop_assert!(s.indices().windows(2).all(|w| w[0] < w[1]));
        let cost: u64 = s.items(&catalog).map(|it| it.cost()).sum();
        let value: u64 = s.items(&catalog).map(|it| it.value()).sum();
        prop_assert_eq!(cost, s.total_cost());
        prop_assert_eq!(value, s.total_value());
    }

    #[test]
    fn dp_is_at_least_best_single(items in items_strategy(16), budget in 0u64..=100_000) {
        let catalog = build(&items);
        let s = optimize(&catalog, budget).unwrap();
        if let Some(index) = best_single(&catalog, budget) {
            prop_assert!(s.total_value() >= catalog.value(index));
        } else {
            prop_assert!(s.is_empty());
        }
    }

    #[test]
    fn dp_is_idempotent(items in items_strategy(16), budget in 0u64..=100_000) {
        let catalog = build(&items);
        let mut dp = DpOptimizer::new();
        let first = dp.solve(&catalog, budget).unwrap().into_selection();
        let second = dp.solve(&catalog, budget).unwrap().into_selection();
        let fresh = optimize(&catalog, budget).unwrap();
        prop_assert_eq!(&first, &second);
        prop_assert_eq!(&first, &fresh);
    }

    #[test]
    fn dp_is_monotone_in_budget(
        items in items_strategy(16),
        budget in 0u64..=90_000,
        extra in 0u64..=10_000,
    ) {
        let catalog = build(&items);
        let low = optimize(&catalog, budget).unwrap();
        let high = optimize(&catalog, budget + extra).unwrap();
        prop_assert!(high.total_value() >= low.total_value());
    }
}

#[test]
fn twenty_items_agree_with_oracle() {
    let items: Vec<(u64, u64)> = (0..20u64)
        .map(|i| (1_000 + (i * 7_919) % 9_000, 500 + (i * 104_729) % 7_000))
        .collect();
    let catalog = build(&items);
    for budget in [0, 12_345, 50_000, 100_000] {
        let dp = optimize(&catalog, budget).unwrap();
        let oracle = optimize_exhaustive(&catalog, budget).unwrap();
        assert_eq!(dp.total_value(), oracle.total_value(), "budget {budget}");
    }
}

#[test]
fn single_expensive_item_is_chosen() {
    let catalog = raw(
        &[
            ("Share-GRUT", "498.76", "196.61"),
            ("Share-TEST", "100.00", "50.00"),
            ("Share-DEMO", "200.00", "80.00"),
        ],
        ReturnKind::Absolute,
    );
    let s = optimize(&catalog, 50_000).unwrap();
    assert_eq!(s.names(&catalog), vec!["Share-GRUT"]);
    assert_eq!(s.total_cost(), 49_876);
    assert_eq!(s.total_value(), 19_661);
}

#[test]
fn eighteen_small_shares_fill_the_budget() {
    let catalog = raw(
        &[
            ("Share-ECAQ", "25.50", "40"),
            ("Share-IXCI", "30.75", "40"),
            ("Share-FWBE", "45.20", "40"),
            ("Share-ZOFA", "22.10", "40"),
            ("Share-PLLK", "38.90", "40"),
            ("Share-YFVZ", "41.25", "40"),
            ("Share-ANFX", "28.60", "40"),
            ("Share-PATS", "33.80", "40"),
            ("Share-NDKR", "27.45", "40"),
            ("Share-ALIY", "35.15", "40"),
            ("Share-JWGF", "24.30", "40"),
            ("Share-JGTW", "31.95", "40"),
            ("Share-FAPS", "26.85", "40"),
            ("Share-VCAX", "29.70", "40"),
            ("Share-LFXB", "32.40", "40"),
            ("Share-DWSK", "23.55", "40"),
            ("Share-XQII", "36.20", "40"),
            ("Share-ROOM", "40.15", "40"),
        ],
        ReturnKind::Percent,
    );
    assert_eq!(catalog.len(), 18);
    assert_eq!(catalog.value(ItemIndex::new(3)), 884);

    let budget = 50_000;
    let dp = optimize(&catalog, budget).unwrap();
    let oracle = optimize_exhaustive(&catalog, budget).unwrap();

    assert_eq!(dp.total_value(), 20_000);
    assert_eq!(dp.total_cost(), 50_000);
    assert_eq!(oracle.total_value(), dp.total_value());

    let single = best_single(&catalog, budget).unwrap();
    assert!(dp.total_value() >= catalog.value(single));
}

#[test]
fn identical_items_resolve_to_the_first() {
    let catalog = build(&[(100, 50), (100, 50)]);
    let s = optimize(&catalog, 100).unwrap();
    assert_eq!(s.indices(), &[ItemIndex::new(0)]);
    assert_eq!(optimize(&catalog, 100).unwrap(), s);
}

#[test]
fn zero_budget_and_empty_catalog() {
    let catalog = build(&[(1, 1)]);
    assert!(optimize(&catalog, 0).unwrap().is_empty());
    assert_eq!(
        optimize(&Catalog::<u64>::empty(), 10),
        Err(OptimizerError::EmptyCatalog)
    );
}

#[test]
fn log_monitor_observes_a_full_run() {
    let catalog = build(&[(5, 4), (4, 5), (3, 1)]);
    let mut monitor = LogMonitor::<u64>::default();
    let outcome = DpOptimizer::new()
        .solve_with_monitor(&catalog, 9, &mut monitor)
        .unwrap();
    assert_eq!(outcome.selection().total_value(), 9);
    assert_eq!(outcome.statistics().items_processed, 3);
}
