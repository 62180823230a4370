//! The in-memory session: everything the user has typed so far.
//!
//! The session is the only mutable state in the program. Every derived
//! figure (expense set, warnings, summary, chart) is recomputed from it on
//! each read, so an edit on an earlier tab shows up everywhere on the next
//! draw.

use crate::chart::{self, ChartData};
use crate::conditions::Conditions;
use crate::error::{parse_amount, ValidationError};
use crate::estimate::{self, ResultSummary};
use crate::expenses::{ExpenseInputs, ExpenseSet};
use crate::reference::{self, Warning};
use serde::Serialize;
use tracing::debug;

/// Upper bound for amounts that have no field-specific maximum.
pub const MAX_AMOUNT: f64 = 1_000_000.0;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FieldKind {
    Toggle,
    Number { min: f64, max: Option<f64>, step: f64 },
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FieldValue {
    Flag(bool),
    Number(f64),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    StudyYears,
    PaysRent,
    Rent,
    ReceivesRentAid,
    RentAid,
    ReceivesDailyAid,
    DailyAid,
    HasPartTime,
    PartTimeIncome,
    Food,
    Transport,
    Leisure,
    Other,
    Tuition,
}

impl Field {
    pub const CONDITIONS: [Field; 9] = [
        Field::StudyYears,
        Field::PaysRent,
        Field::Rent,
        Field::ReceivesRentAid,
        Field::RentAid,
        Field::ReceivesDailyAid,
        Field::DailyAid,
        Field::HasPartTime,
        Field::PartTimeIncome,
    ];

    pub const EXPENSES: [Field; 5] = [
        Field::Food,
        Field::Transport,
        Field::Leisure,
        Field::Other,
        Field::Tuition,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Field::StudyYears => "Study duration (years)",
            Field::PaysRent => "Do you pay rent?",
            Field::Rent => "Monthly rent",
            Field::ReceivesRentAid => "Do you get monthly help with rent?",
            Field::RentAid => "Monthly rent aid",
            Field::ReceivesDailyAid => "Do you get monthly help for daily expenses?",
            Field::DailyAid => "Monthly aid",
            Field::HasPartTime => "Do you have a part-time job?",
            Field::PartTimeIncome => "Monthly part-time income",
            Field::Food => "Food",
            Field::Transport => "Transport",
            Field::Leisure => "Leisure",
            Field::Other => "Other expenses",
            Field::Tuition => "Monthly tuition",
        }
    }

    pub fn kind(self) -> FieldKind {
        let amount = |max: Option<f64>| FieldKind::Number {
            min: 0.0,
            max,
            step: 10.0,
        };
        match self {
            Field::StudyYears => FieldKind::Number {
                min: 1.0,
                max: Some(6.0),
                step: 1.0,
            },
            Field::PaysRent
            | Field::ReceivesRentAid
            | Field::ReceivesDailyAid
            | Field::HasPartTime => FieldKind::Toggle,
            Field::Rent | Field::RentAid | Field::DailyAid | Field::PartTimeIncome => amount(None),
            Field::Food => amount(Some(400.0)),
            Field::Transport => amount(Some(200.0)),
            Field::Leisure | Field::Other => amount(Some(300.0)),
            Field::Tuition => amount(None),
        }
    }

    pub fn is_toggle(self) -> bool {
        self.kind() == FieldKind::Toggle
    }

    /// The toggle that reveals this amount, if any.
    pub fn gate(self) -> Option<Field> {
        match self {
            Field::Rent => Some(Field::PaysRent),
            Field::RentAid => Some(Field::ReceivesRentAid),
            Field::DailyAid => Some(Field::ReceivesDailyAid),
            Field::PartTimeIncome => Some(Field::HasPartTime),
            _ => None,
        }
    }

    /// Clamps `value` into the field's bounds. Fields without their own
    /// maximum are capped at [`MAX_AMOUNT`]. Toggles pass through.
    pub fn clamp(self, value: f64) -> f64 {
        match self.kind() {
            FieldKind::Toggle => value,
            FieldKind::Number { min, max, .. } => value.max(min).min(max.unwrap_or(MAX_AMOUNT)),
        }
    }
}

/// An amount revealed by a yes/no toggle. The typed amount is kept while
/// the toggle is off so switching it back on restores it.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct GatedAmount {
    pub enabled: bool,
    pub amount: f64,
}

impl GatedAmount {
    pub fn off(amount: f64) -> Self {
        GatedAmount {
            enabled: false,
            amount,
        }
    }

    pub fn resolve(&self) -> Option<f64> {
        self.enabled.then_some(self.amount)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Session {
    pub study_years: u8,
    pub rent: GatedAmount,
    pub rent_aid: GatedAmount,
    pub daily_aid: GatedAmount,
    pub part_time: GatedAmount,
    pub expenses: ExpenseInputs,
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}

impl Session {
    pub fn new() -> Session {
        Session {
            study_years: 5,
            rent: GatedAmount::off(400.0),
            rent_aid: GatedAmount::off(200.0),
            daily_aid: GatedAmount::off(200.0),
            part_time: GatedAmount::off(500.0),
            expenses: ExpenseInputs::default(),
        }
    }

    pub fn conditions(&self) -> Conditions {
        Conditions {
            study_years: self.study_years,
            rent: self.rent.resolve(),
            rent_aid: self.rent_aid.resolve(),
            daily_aid: self.daily_aid.resolve(),
            part_time_income: self.part_time.resolve(),
        }
    }

    pub fn expense_set(&self) -> ExpenseSet {
        estimate::expense_set(&self.conditions(), &self.expenses)
    }

    pub fn warnings(&self) -> Vec<Warning> {
        reference::check(&self.expense_set())
    }

    pub fn summary(&self, hypothetical_part_time: f64) -> ResultSummary {
        estimate::summarize(
            &self.conditions(),
            &self.expense_set(),
            hypothetical_part_time,
        )
    }

    pub fn chart(&self) -> ChartData {
        chart::build(self.expense_set().iter())
    }

    /// Conditions fields that are currently shown: amounts behind a
    /// disabled toggle are hidden.
    pub fn visible_conditions_fields(&self) -> Vec<Field> {
        Field::CONDITIONS
            .iter()
            .copied()
            .filter(|field| match field.gate() {
                Some(gate) => self.value(gate) == FieldValue::Flag(true),
                None => true,
            })
            .collect()
    }

    fn gated(&self, field: Field) -> Option<&GatedAmount> {
        match field {
            Field::PaysRent | Field::Rent => Some(&self.rent),
            Field::ReceivesRentAid | Field::RentAid => Some(&self.rent_aid),
            Field::ReceivesDailyAid | Field::DailyAid => Some(&self.daily_aid),
            Field::HasPartTime | Field::PartTimeIncome => Some(&self.part_time),
            _ => None,
        }
    }

    fn gated_mut(&mut self, field: Field) -> Option<&mut GatedAmount> {
        match field {
            Field::PaysRent | Field::Rent => Some(&mut self.rent),
            Field::ReceivesRentAid | Field::RentAid => Some(&mut self.rent_aid),
            Field::ReceivesDailyAid | Field::DailyAid => Some(&mut self.daily_aid),
            Field::HasPartTime | Field::PartTimeIncome => Some(&mut self.part_time),
            _ => None,
        }
    }

    pub fn value(&self, field: Field) -> FieldValue {
        if field.is_toggle() {
            let enabled = self.gated(field).is_some_and(|g| g.enabled);
            return FieldValue::Flag(enabled);
        }

        let number = match field {
            Field::StudyYears => f64::from(self.study_years),
            Field::Food => self.expenses.food,
            Field::Transport => self.expenses.transport,
            Field::Leisure => self.expenses.leisure,
            Field::Other => self.expenses.other,
            Field::Tuition => self.expenses.tuition,
            _ => self.gated(field).map_or(0.0, |g| g.amount),
        };
        FieldValue::Number(number)
    }

    /// Flips a yes/no field. Returns the new state, or `None` when the
    /// field is not a toggle.
    pub fn toggle(&mut self, field: Field) -> Option<bool> {
        if !field.is_toggle() {
            return None;
        }
        let gated = self.gated_mut(field)?;
        gated.enabled = !gated.enabled;
        debug!(field = field.label(), enabled = gated.enabled, "toggled");
        Some(gated.enabled)
    }

    pub fn set_enabled(&mut self, field: Field, enabled: bool) {
        if let Some(gated) = self.gated_mut(field) {
            gated.enabled = enabled;
        }
    }

    /// Stores an amount, clamped into the field bounds. Returns the value
    /// actually stored.
    pub fn set_amount(&mut self, field: Field, value: f64) -> Result<f64, ValidationError> {
        if field.is_toggle() {
            return Err(ValidationError::NotAnAmount(field.label()));
        }
        if !value.is_finite() {
            return Err(ValidationError::InvalidAmount(value.to_string()));
        }
        if value < 0.0 {
            return Err(ValidationError::NegativeAmount(value));
        }
        if value.fract() != 0.0 {
            return Err(ValidationError::FractionalAmount(value.to_string()));
        }

        let clamped = field.clamp(value);
        if clamped != value {
            debug!(field = field.label(), requested = value, clamped, "clamped input");
        }

        match field {
            Field::StudyYears => self.study_years = clamped as u8,
            Field::Food => self.expenses.food = clamped,
            Field::Transport => self.expenses.transport = clamped,
            Field::Leisure => self.expenses.leisure = clamped,
            Field::Other => self.expenses.other = clamped,
            Field::Tuition => self.expenses.tuition = clamped,
            _ => {
                if let Some(gated) = self.gated_mut(field) {
                    gated.amount = clamped;
                }
            }
        }
        Ok(clamped)
    }

    /// Moves a numeric field one step up (`up = true`) or down, staying in
    /// bounds. Toggles are flipped.
    pub fn step(&mut self, field: Field, up: bool) {
        match (field.kind(), self.value(field)) {
            (FieldKind::Number { step, .. }, FieldValue::Number(current)) => {
                let next = if up { current + step } else { current - step };
                // Stepping below the minimum lands on it instead of failing.
                let _ = self.set_amount(field, next.max(0.0));
            }
            _ => {
                self.toggle(field);
            }
        }
    }

    /// Parses text typed in the edit dialog and stores it.
    pub fn parse_and_set(&mut self, field: Field, input: &str) -> Result<f64, ValidationError> {
        if field.is_toggle() {
            return Err(ValidationError::NotAnAmount(field.label()));
        }
        let value = parse_amount(input)?;
        self.set_amount(field, value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chart::ChartData;
    use crate::expenses::Category;

    #[test]
    fn test_defaults() {
        let session = Session::new();
        let conditions = session.conditions();
        assert_eq!(conditions.study_years, 5);
        assert_eq!(conditions.rent, None);
        assert_eq!(session.value(Field::Rent), FieldValue::Number(400.0));
        assert_eq!(session.value(Field::Food), FieldValue::Number(180.0));
        assert_eq!(session.expense_set().total(), 440.0);
    }

    #[test]
    fn test_gated_fields_hidden_until_enabled() {
        let mut session = Session::new();
        let visible = session.visible_conditions_fields();
        assert_eq!(
            visible,
            vec![
                Field::StudyYears,
                Field::PaysRent,
                Field::ReceivesRentAid,
                Field::ReceivesDailyAid,
                Field::HasPartTime,
            ]
        );

        assert_eq!(session.toggle(Field::PaysRent), Some(true));
        assert!(session.visible_conditions_fields().contains(&Field::Rent));
        assert_eq!(session.conditions().rent, Some(400.0));
    }

    #[test]
    fn test_toggle_off_keeps_typed_amount() {
        let mut session = Session::new();
        session.toggle(Field::HasPartTime);
        session.set_amount(Field::PartTimeIncome, 650.0).unwrap();
        session.toggle(Field::HasPartTime);
        assert_eq!(session.conditions().part_time_income, None);
        session.toggle(Field::HasPartTime);
        assert_eq!(session.conditions().part_time_income, Some(650.0));
    }

    #[test]
    fn test_toggle_rejects_amount_fields() {
        let mut session = Session::new();
        assert_eq!(session.toggle(Field::Food), None);
        assert_eq!(
            session.set_amount(Field::PaysRent, 1.0),
            Err(ValidationError::NotAnAmount("Do you pay rent?"))
        );
    }

    #[test]
    fn test_set_amount_clamps_to_bounds() {
        let mut session = Session::new();
        assert_eq!(session.set_amount(Field::Food, 999.0), Ok(400.0));
        assert_eq!(session.set_amount(Field::Transport, 250.0), Ok(200.0));
        assert_eq!(session.set_amount(Field::StudyYears, 9.0), Ok(6.0));
        assert_eq!(session.set_amount(Field::StudyYears, 0.0), Ok(1.0));
        assert_eq!(session.set_amount(Field::Tuition, 12_000.0), Ok(12_000.0));
        assert_eq!(session.study_years, 1);
    }

    #[test]
    fn test_unbounded_amounts_are_capped() {
        let mut session = Session::new();
        assert_eq!(session.set_amount(Field::Tuition, 1e308), Ok(MAX_AMOUNT));
        session.toggle(Field::PaysRent);
        assert_eq!(session.set_amount(Field::Rent, 1e308), Ok(MAX_AMOUNT));

        let summary = session.summary(500.0);
        assert!(summary.total_monthly_expenses.is_finite());
        assert!(summary.final_net_worth.is_finite());
        assert_eq!(summary.total_monthly_expenses, 2.0 * MAX_AMOUNT + 370.0);
    }

    #[test]
    fn test_amounts_must_be_whole_numbers() {
        let mut session = Session::new();
        assert_eq!(
            session.parse_and_set(Field::Rent, "400.5"),
            Err(ValidationError::FractionalAmount("400.5".to_string()))
        );
        assert_eq!(
            session.parse_and_set(Field::StudyYears, "3.5"),
            Err(ValidationError::FractionalAmount("3.5".to_string()))
        );
        assert_eq!(
            session.set_amount(Field::Food, 180.25),
            Err(ValidationError::FractionalAmount("180.25".to_string()))
        );
        assert_eq!(session.value(Field::Rent), FieldValue::Number(400.0));
        assert_eq!(session.study_years, 5);
        assert_eq!(session.value(Field::Food), FieldValue::Number(180.0));
    }

    #[test]
    fn test_set_amount_rejects_negative() {
        let mut session = Session::new();
        assert_eq!(
            session.set_amount(Field::Rent, -1.0),
            Err(ValidationError::NegativeAmount(-1.0))
        );
        assert_eq!(session.value(Field::Rent), FieldValue::Number(400.0));
    }

    #[test]
    fn test_step_stays_in_bounds() {
        let mut session = Session::new();
        session.step(Field::StudyYears, true);
        session.step(Field::StudyYears, true);
        assert_eq!(session.study_years, 6);

        session.set_amount(Field::Other, 5.0).unwrap();
        session.step(Field::Other, false);
        assert_eq!(session.value(Field::Other), FieldValue::Number(0.0));

        session.step(Field::ReceivesDailyAid, true);
        assert_eq!(session.conditions().daily_aid, Some(200.0));
    }

    #[test]
    fn test_parse_and_set() {
        let mut session = Session::new();
        assert_eq!(session.parse_and_set(Field::Leisure, "120"), Ok(120.0));
        assert_eq!(
            session.parse_and_set(Field::Leisure, "lots"),
            Err(ValidationError::InvalidAmount("lots".to_string()))
        );
        assert_eq!(session.value(Field::Leisure), FieldValue::Number(120.0));
        assert_eq!(
            session.parse_and_set(Field::HasPartTime, "1"),
            Err(ValidationError::NotAnAmount("Do you have a part-time job?"))
        );
    }

    #[test]
    fn test_changes_flow_downstream_on_read() {
        let mut session = Session::new();
        session.toggle(Field::PaysRent);
        session.toggle(Field::ReceivesRentAid);
        assert_eq!(session.expense_set().get(Category::Rent), 200.0);

        let before = session.summary(500.0);
        session.set_amount(Field::Rent, 600.0).unwrap();
        let after = session.summary(500.0);
        assert_eq!(after.total_monthly_expenses, before.total_monthly_expenses + 200.0);
        assert_eq!(session.chart().slices()[0].amount, 400.0);
    }

    #[test]
    fn test_warnings_and_chart_from_session() {
        let mut session = Session::new();
        session.set_amount(Field::Food, 200.0).unwrap();
        let warnings = session.warnings();
        assert_eq!(warnings.len(), 1);
        assert_eq!(warnings[0].category, Category::Food);

        for field in Field::EXPENSES {
            session.set_amount(field, 0.0).unwrap();
        }
        assert_eq!(session.chart(), ChartData::NoData);
    }
}
