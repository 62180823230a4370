use serde::Serialize;

/// Personal circumstances entered on the Conditions tab.
///
/// Each flag-gated amount is `None` while its flag is off. The value only
/// collapses to 0 when it is aggregated, so "never enabled" stays distinct
/// from "entered zero".
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Conditions {
    pub study_years: u8,
    pub rent: Option<f64>,
    pub rent_aid: Option<f64>,
    pub daily_aid: Option<f64>,
    pub part_time_income: Option<f64>,
}

impl Default for Conditions {
    fn default() -> Self {
        Self {
            study_years: 5,
            rent: None,
            rent_aid: None,
            daily_aid: None,
            part_time_income: None,
        }
    }
}

impl Conditions {
    pub fn pays_rent(&self) -> bool {
        self.rent.is_some()
    }

    pub fn receives_rent_aid(&self) -> bool {
        self.rent_aid.is_some()
    }

    pub fn has_part_time(&self) -> bool {
        self.part_time_income.is_some()
    }

    pub fn rent(&self) -> f64 {
        resolve(self.rent)
    }

    pub fn rent_aid(&self) -> f64 {
        resolve(self.rent_aid)
    }

    pub fn daily_aid(&self) -> f64 {
        resolve(self.daily_aid)
    }

    pub fn part_time_income(&self) -> f64 {
        resolve(self.part_time_income)
    }

    /// Rent net of rent aid, never below zero.
    pub fn effective_rent(&self) -> f64 {
        (self.rent() - self.rent_aid()).max(0.0)
    }

    /// Part-time income plus daily aid. Rent aid is already folded into
    /// the effective rent and is not counted here.
    pub fn monthly_income(&self) -> f64 {
        self.part_time_income() + self.daily_aid()
    }

    pub fn total_months(&self) -> u32 {
        u32::from(self.study_years) * 12
    }
}

// Gated amounts are non-negative once they reach aggregation.
fn resolve(amount: Option<f64>) -> f64 {
    amount.filter(|v| v.is_finite()).unwrap_or(0.0).max(0.0)
}
