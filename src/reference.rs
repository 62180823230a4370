use crate::expenses::{Category, ExpenseSet};
use crate::money::format_money;
use serde::Serialize;

/// Average monthly spending per category. Rent and tuition have no
/// benchmark.
pub const REFERENCE_AVERAGES: [(Category, f64); 4] = [
    (Category::Food, 180.0),
    (Category::Leisure, 80.0),
    (Category::Transport, 60.0),
    (Category::Other, 50.0),
];

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Warning {
    pub category: Category,
    pub value: f64,
    pub average: f64,
}

impl Warning {
    pub fn message(&self, currency: &str) -> String {
        format!(
            "{}: spending above average ({} vs {})",
            self.category,
            format_money(self.value, currency),
            format_money(self.average, currency)
        )
    }
}

/// One warning per benchmarked category whose amount is strictly above
/// its average, in reference table order.
pub fn check(expenses: &ExpenseSet) -> Vec<Warning> {
    REFERENCE_AVERAGES
        .iter()
        .filter_map(|&(category, average)| {
            let value = expenses.get(category);
            (value > average).then_some(Warning {
                category,
                value,
                average,
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::expenses::ExpenseInputs;

    fn expenses(inputs: ExpenseInputs, rent: f64) -> ExpenseSet {
        ExpenseSet::build(rent, &inputs)
    }

    #[test]
    fn test_defaults_produce_no_warnings() {
        let set = expenses(ExpenseInputs::default(), 0.0);
        assert!(check(&set).is_empty());
    }

    #[test]
    fn test_warning_only_when_strictly_above() {
        let set = expenses(
            ExpenseInputs {
                food: 200.0,
                ..Default::default()
            },
            0.0,
        );
        assert_eq!(
            check(&set),
            vec![Warning {
                category: Category::Food,
                value: 200.0,
                average: 180.0,
            }]
        );

        let set = expenses(
            ExpenseInputs {
                food: 180.0,
                ..Default::default()
            },
            0.0,
        );
        assert!(check(&set).is_empty());
    }

    #[test]
    fn test_rent_and_tuition_never_warn() {
        let set = expenses(
            ExpenseInputs {
                tuition: 5000.0,
                ..Default::default()
            },
            9000.0,
        );
        assert!(check(&set).is_empty());
        assert!(REFERENCE_AVERAGES
            .iter()
            .all(|(c, _)| !matches!(c, Category::Rent | Category::Tuition)));
    }

    #[test]
    fn test_warnings_follow_reference_order() {
        let set = expenses(
            ExpenseInputs {
                food: 400.0,
                transport: 200.0,
                leisure: 300.0,
                other: 300.0,
                tuition: 70.0,
            },
            0.0,
        );
        let categories: Vec<Category> = check(&set).iter().map(|w| w.category).collect();
        assert_eq!(
            categories,
            vec![
                Category::Food,
                Category::Leisure,
                Category::Transport,
                Category::Other
            ]
        );
    }

    #[test]
    fn test_warning_message() {
        let warning = Warning {
            category: Category::Leisure,
            value: 120.0,
            average: 80.0,
        };
        assert_eq!(
            warning.message("€"),
            "Leisure: spending above average (120€ vs 80€)"
        );
    }
}
