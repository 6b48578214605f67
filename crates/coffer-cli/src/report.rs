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

//! Human-readable rendering of optimizer results.

use coffer_dp::stats::OptimizerStatistics;
use coffer_model::{
    catalog::{Catalog, Item},
    index::ItemIndex,
    quantize::Quantizer,
    selection::Selection,
};
use std::fmt::Write;
use std::time::Duration;

/// Formats unit counts as money, e.g. `49876` as `498.76 €`.
#[derive(Debug, Clone)]
pub struct Money {
    quantizer: Quantizer,
    currency: String,
}

impl Money {
    pub fn new(quantizer: Quantizer, currency: impl Into<String>) -> Self {
        Self {
            quantizer,
            currency: currency.into(),
        }
    }

    pub fn format(&self, units: u64) -> String {
        let amount = self.quantizer.format_units(units);
        if self.currency.is_empty() {
            amount
        } else {
            format!("{} {}", amount, self.currency)
        }
    }
}

/// `value / cost` as a percentage with two decimals, `n/a` for zero cost.
pub fn yield_percent(value: u64, cost: u64) -> String {
    if cost == 0 {
        return "n/a".to_string();
    }
    // Basis points, rounded half up.
    let bp = (u128::from(value) * 20_000 / u128::from(cost)).div_ceil(2);
    format!("{}.{:02} %", bp / 100, bp % 100)
}

fn item_line(out: &mut String, money: &Money, item: Item<'_, u64>) {
    let _ = writeln!(
        out,
        "- {} | Cost: {} | Profit: {} | {}",
        item.name(),
        money.format(item.cost()),
        money.format(item.value()),
        yield_percent(item.value(), item.cost())
    );
}

/// Full report for an optimal combination.
pub fn render_combination(
    title: &str,
    catalog: &Catalog<u64>,
    selection: &Selection<u64>,
    budget: u64,
    money: &Money,
    elapsed: Duration,
) -> String {
    let cost = selection.total_cost();
    let value = selection.total_value();

    let mut out = String::new();
    let _ = writeln!(out, "--- {} ---", title);
    let _ = writeln!(
        out,
        "Items available: {} | Budget: {} ({} units)",
        catalog.len(),
        money.format(budget),
        budget
    );
    let _ = writeln!(out, "Selected items: {}", selection.len());
    let _ = writeln!(out, "Total cost: {}", money.format(cost));
    let _ = writeln!(out, "Total profit: {}", money.format(value));
    let _ = writeln!(
        out,
        "Final value (cost + profit): {}",
        money.format(cost.saturating_add(value))
    );
    let _ = writeln!(out, "Yield: {}", yield_percent(value, cost));
    let _ = writeln!(out, "Time: {:.4} s", elapsed.as_secs_f64());

    if !selection.is_empty() {
        let _ = writeln!(out, "\nSelection details:");
        for item in selection.items(catalog) {
            item_line(&mut out, money, item);
        }
    }
    out
}

/// Report for the best single item.
pub fn render_single(catalog: &Catalog<u64>, best: Option<ItemIndex>, money: &Money) -> String {
    let mut out = String::new();
    match best {
        None => {
            let _ = writeln!(out, "No single action fits the budget.");
        }
        Some(index) => {
            let item = catalog.item(index);
            let _ = writeln!(out, "--- Best single action ---");
            let _ = writeln!(out, "Name: {}", item.name());
            let _ = writeln!(
                out,
                "Cost: {} | Profit: {} ({})",
                money.format(item.cost()),
                money.format(item.value()),
                yield_percent(item.value(), item.cost())
            );
        }
    }
    out
}

/// Side-by-side summary of the DP optimizer and the exhaustive oracle.
pub fn render_verification(
    dp: &Selection<u64>,
    dp_stats: &OptimizerStatistics,
    oracle: &Selection<u64>,
    oracle_stats: &OptimizerStatistics,
    money: &Money,
) -> String {
    let agree = dp.total_value() == oracle.total_value();
    let mut out = String::new();
    let _ = writeln!(out, "--- Verification (DP vs exhaustive) ---");
    let _ = writeln!(
        out,
        "DP:         value {} | cost {} | {} items | {} cells | {:.4} s",
        money.format(dp.total_value()),
        money.format(dp.total_cost()),
        dp.len(),
        dp_stats.cells_scanned,
        dp_stats.time_total.as_secs_f64()
    );
    let _ = writeln!(
        out,
        "Exhaustive: value {} | cost {} | {} items | {} subsets | {:.4} s",
        money.format(oracle.total_value()),
        money.format(oracle.total_cost()),
        oracle.len(),
        oracle_stats.subsets_enumerated,
        oracle_stats.time_total.as_secs_f64()
    );
    let _ = writeln!(
        out,
        "Result: {}",
        if agree { "AGREE" } else { "MISMATCH" }
    );
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use coffer_model::catalog::CatalogBuilder;

    fn money() -> Money {
        Money::new(Quantizer::cents(), "€")
    }

    fn catalog() -> Catalog<u64> {
        let mut b = CatalogBuilder::new();
        b.add_item("Share-GRUT", 49876, 19661).unwrap();
        b.add_item("Share-TEST", 10000, 5000).unwrap();
        b.build()
    }

    #[test]
    fn test_money_and_yield() {
        assert_eq!(money().format(49876), "498.76 €");
        assert_eq!(Money::new(Quantizer::cents(), "").format(5), "0.05");
        assert_eq!(yield_percent(19661, 49876), "39.42 %");
        assert_eq!(yield_percent(5000, 10000), "50.00 %");
        assert_eq!(yield_percent(1, 3), "33.33 %");
        assert_eq!(yield_percent(2, 3), "66.67 %");
        assert_eq!(yield_percent(1, 0), "n/a");
    }

    #[test]
    fn test_render_combination() {
        let c = catalog();
        let s = Selection::from_indices(&c, vec![ItemIndex::new(0)]).unwrap();
        let text = render_combination(
            "Best combination (DP)",
            &c,
            &s,
            50000,
            &money(),
            Duration::from_millis(12),
        );

        let expected = "\
--- Best combination (DP) ---
Items available: 2 | Budget: 500.00 € (50000 units)
Selected items: 1
Total cost: 498.76 €
Total profit: 196.61 €
Final value (cost + profit): 695.37 €
Yield: 39.42 %
Time: 0.0120 s

Selection details:
- Share-GRUT | Cost: 498.76 € | Profit: 196.61 € | 39.42 %
";
        assert_eq!(text, expected);
    }

    #[test]
    fn test_render_single() {
        let c = catalog();
        let text = render_single(&c, Some(ItemIndex::new(1)), &money());
        assert!(text.contains("Name: Share-TEST\n"));
        assert!(text.contains("Cost: 100.00 € | Profit: 50.00 € (50.00 %)"));
        assert_eq!(
            render_single(&c, None, &money()),
            "No single action fits the budget.\n"
        );
    }

    #[test]
    fn test_render_verification() {
        let c = catalog();
        let s = Selection::from_indices(&c, vec![ItemIndex::new(0)]).unwrap();
        let stats = OptimizerStatistics::default();
        let text = render_verification(&s, &stats, &s, &stats, &money());
        assert!(text.ends_with("Result: AGREE\n"));

        let other = Selection::from_indices(&c, vec![ItemIndex::new(1)]).unwrap();
        let text = render_verification(&s, &stats, &other, &stats, &money());
        assert!(text.ends_with("Result: MISMATCH\n"));
    }
}
