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

//! Errors raised by the optimizers.

/// Which preallocated structure a budget would blow past.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TableResource {
    /// The value table, one cell per unit of budget.
    BudgetUnits,
    /// The reconstruction bitmap, one bit per item and cell.
    ChoiceBits,
}

impl std::fmt::Display for TableResource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TableResource::BudgetUnits => write!(f, "budget units"),
            TableResource::ChoiceBits => write!(f, "choice bits"),
        }
    }
}

/// The error type shared by every optimizer entry point.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OptimizerError {
    /// The catalog holds no items; there is nothing to optimize.
    EmptyCatalog,
    /// The budget needs more table space than the configuration allows.
    /// Raised before any allocation; the budget is never truncated.
    BudgetOverflow {
        budget: u128,
        resource: TableResource,
        needed: u128,
        limit: usize,
    },
    /// The catalog is too large for exhaustive enumeration.
    CatalogTooLarge { items: usize, limit: usize },
    /// A sum of item values does not fit the unit type.
    ValueOverflow,
}

impl std::fmt::Display for OptimizerError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyCatalog => write!(f, "Catalog is empty"),
            Self::BudgetOverflow {
                budget,
                resource,
                needed,
                limit,
            } => write!(
                f,
                "Budget of {} units needs {} {}, limit is {}",
                budget, needed, resource, limit
            ),
            Self::CatalogTooLarge { items, limit } => write!(
                f,
                "Catalog of {} items is too large for exhaustive search (limit {})",
                items, limit
            ),
            Self::ValueOverflow => write!(f, "Total value overflows the unit type"),
        }
    }
}

impl std::error::Error for OptimizerError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_messages() {
        let e = OptimizerError::BudgetOverflow {
            budget: 20_000_000,
            resource: TableResource::BudgetUnits,
            needed: 20_000_000,
            limit: 10_000_000,
        };
        assert_eq!(
            e.to_string(),
            "Budget of 20000000 units needs 20000000 budget units, limit is 10000000"
        );

        let e = OptimizerError::CatalogTooLarge {
            items: 30,
            limit: 22,
        };
        assert_eq!(
            e.to_string(),
            "Catalog of 30 items is too large for exhaustive search (limit 22)"
        );
        assert_eq!(OptimizerError::EmptyCatalog.to_string(), "Catalog is empty");
    }
}
