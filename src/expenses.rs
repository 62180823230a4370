use serde::Serialize;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Category {
    Rent,
    Food,
    Transport,
    Leisure,
    Other,
    Tuition,
}

impl Category {
    /// All categories in display order.
    pub const ALL: [Category; 6] = [
        Category::Rent,
        Category::Food,
        Category::Transport,
        Category::Leisure,
        Category::Other,
        Category::Tuition,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Category::Rent => "Rent",
            Category::Food => "Food",
            Category::Transport => "Transport",
            Category::Leisure => "Leisure",
            Category::Other => "Other",
            Category::Tuition => "Tuition",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Monthly amounts typed on the Expenses tab. Rent is not here: it comes
/// from the Conditions tab, net of rent aid.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExpenseInputs {
    pub food: f64,
    pub transport: f64,
    pub leisure: f64,
    pub other: f64,
    pub tuition: f64,
}

impl Default for ExpenseInputs {
    fn default() -> Self {
        Self {
            food: 180.0,
            transport: 60.0,
            leisure: 80.0,
            other: 50.0,
            tuition: 70.0,
        }
    }
}

/// Monthly spending per category, in `Category::ALL` order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExpenseSet {
    entries: Vec<(Category, f64)>,
}

impl ExpenseSet {
    /// Builds the set from the already-computed effective rent and the
    /// raw expense inputs.
    pub fn build(effective_rent: f64, inputs: &ExpenseInputs) -> ExpenseSet {
        let entries = Category::ALL
            .iter()
            .map(|&category| {
                let amount = match category {
                    Category::Rent => effective_rent,
                    Category::Food => inputs.food,
                    Category::Transport => inputs.transport,
                    Category::Leisure => inputs.leisure,
                    Category::Other => inputs.other,
                    Category::Tuition => inputs.tuition,
                };
                (category, amount)
            })
            .collect();

        ExpenseSet { entries }
    }

    pub fn get(&self, category: Category) -> f64 {
        self.entries
            .iter()
            .find(|(c, _)| *c == category)
            .map(|(_, amount)| *amount)
            .unwrap_or(0.0)
    }

    pub fn iter(&self) -> impl Iterator<Item = (Category, f64)> + '_ {
        self.entries.iter().copied()
    }

    pub fn total(&self) -> f64 {
        self.entries.iter().map(|(_, amount)| amount).sum()
    }
}
