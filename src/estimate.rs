//! Savings and net worth projection.
//!
//! Every figure is derived from a `Conditions` record and an `ExpenseSet`.
//! Nothing here can fail: inputs are clamped before they arrive.

use crate::conditions::Conditions;
use crate::expenses::{ExpenseInputs, ExpenseSet};
use serde::Serialize;

/// Part-time income assumed by the what-if scenario.
pub const HYPOTHETICAL_PART_TIME: f64 = 500.0;

/// An alternative projection with a hypothetical part-time income.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Scenario {
    pub part_time_income: f64,
    pub monthly_savings: f64,
    pub net_worth: f64,
}

impl Scenario {
    pub fn is_saving(&self) -> bool {
        self.monthly_savings > 0.0
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResultSummary {
    pub total_monthly_expenses: f64,
    pub total_monthly_income: f64,
    pub monthly_savings: f64,
    pub total_months: u32,
    pub final_net_worth: f64,
    /// Present only when the user has no part-time income.
    pub alternative: Option<Scenario>,
}

impl ResultSummary {
    pub fn is_saving(&self) -> bool {
        self.monthly_savings > 0.0
    }

    /// Monthly loss when not saving, 0 otherwise.
    pub fn shortfall(&self) -> f64 {
        (-self.monthly_savings).max(0.0)
    }
}

/// First step of the pipeline: rent net of rent aid.
pub fn effective_rent(conditions: &Conditions) -> f64 {
    conditions.effective_rent()
}

/// Both pipeline steps: effective rent, then the expense set built on it.
pub fn expense_set(conditions: &Conditions, inputs: &ExpenseInputs) -> ExpenseSet {
    ExpenseSet::build(effective_rent(conditions), inputs)
}

/// Totals, savings and net worth. The what-if scenario uses
/// `hypothetical_part_time`, normally [`HYPOTHETICAL_PART_TIME`].
pub fn summarize(
    conditions: &Conditions,
    expenses: &ExpenseSet,
    hypothetical_part_time: f64,
) -> ResultSummary {
    let total_monthly_expenses = expenses.total();
    let total_monthly_income = conditions.monthly_income();
    let monthly_savings = total_monthly_income - total_monthly_expenses;
    let total_months = conditions.total_months();
    let months = f64::from(total_months);

    let alternative = (!conditions.has_part_time()).then(|| {
        let savings = (hypothetical_part_time + conditions.daily_aid()) - total_monthly_expenses;
        Scenario {
            part_time_income: hypothetical_part_time,
            monthly_savings: savings,
            net_worth: savings * months,
        }
    });

    ResultSummary {
        total_monthly_expenses,
        total_monthly_income,
        monthly_savings,
        total_months,
        final_net_worth: monthly_savings * months,
        alternative,
    }
}
