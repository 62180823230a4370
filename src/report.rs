use crate::chart::ChartData;
use crate::estimate::{ResultSummary, Scenario};
use crate::money::format_money;
use crate::reference::Warning;
use crate::session::Session;
use colored::Colorize;
use piechart::{Chart, Color};
use serde::Serialize;

pub const CONDITIONS_HINT: &str = "Move on to the Expenses tab once you have filled in this one.";
pub const EXPENSES_HINT: &str = "Move on to the Result tab once you have filled in this one.";
pub const CHART_CAPTION: &str = "This chart shows where your money goes every month. \
Small deviations here have a huge impact over several years.";
pub const NO_CHART_DATA: &str = "Not enough data to show the chart.";
pub const DISCLAIMER: &str =
    "This simulation is educational. It does not replace personalised financial planning.";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Level {
    Success,
    Info,
    Warning,
    Error,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Message {
    pub level: Level,
    pub text: String,
}

impl Message {
    fn new(level: Level, text: String) -> Self {
        Message { level, text }
    }
}

/// Monthly savings and projected net worth, or the monthly shortfall.
pub fn outcome_messages(summary: &ResultSummary, currency: &str) -> Vec<Message> {
    if summary.is_saving() {
        vec![
            Message::new(
                Level::Success,
                format!(
                    "Estimated monthly savings: {}",
                    format_money(summary.monthly_savings, currency)
                ),
            ),
            Message::new(
                Level::Success,
                format!(
                    "Estimated net worth at the end of your studies: {}",
                    format_money(summary.final_net_worth, currency)
                ),
            ),
        ]
    } else {
        vec![Message::new(
            Level::Error,
            format!(
                "With these conditions you are not saving every month. You lose {} per month. \
                 Small adjustments make a big difference.",
                format_money(summary.shortfall(), currency)
            ),
        )]
    }
}

/// Shown in place of the chart when no category has a positive amount.
pub fn chart_fallback() -> Message {
    Message::new(Level::Info, NO_CHART_DATA.to_string())
}

pub fn what_if_title(scenario: &Scenario, currency: &str) -> String {
    format!(
        "What if you had a part-time job paying {}?",
        format_money(scenario.part_time_income, currency)
    )
}

pub fn what_if_message(scenario: &Scenario, currency: &str) -> Message {
    let income = format_money(scenario.part_time_income, currency);
    if scenario.is_saving() {
        Message::new(
            Level::Success,
            format!(
                "With a part-time job paying {income}, you would finish with {}",
                format_money(scenario.net_worth, currency)
            ),
        )
    } else {
        Message::new(
            Level::Warning,
            format!("Even with a part-time job paying {income}, your expenses remain too high."),
        )
    }
}

fn paint(message: &Message) -> String {
    match message.level {
        Level::Success => message.text.green().to_string(),
        Level::Info => message.text.cyan().to_string(),
        Level::Warning => message.text.yellow().to_string(),
        Level::Error => message.text.red().bold().to_string(),
    }
}

pub fn print_warnings(warnings: &[Warning], currency: &str) {
    println!("{}", "Warnings".bold());
    if warnings.is_empty() {
        println!("{}", "No category is above its average.".green());
    }
    for warning in warnings {
        println!("{}", format!("⚠ {}", warning.message(currency)).yellow());
    }
}

pub fn print_summary(summary: &ResultSummary, currency: &str) {
    use comfy_table::{
        presets::UTF8_FULL, Attribute, Cell, CellAlignment, Color as TColor, ContentArrangement,
        Table,
    };

    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(64)
        .set_header(vec![
            Cell::new("Figure").add_attribute(Attribute::Bold),
            Cell::new("Value").add_attribute(Attribute::Bold),
        ]);

    let money_cell = |v: f64| {
        Cell::new(format_money(v, currency)).set_alignment(CellAlignment::Right)
    };
    let colorize_money = |v: f64| {
        let c = if v > 0.0 { TColor::Green } else { TColor::Red };
        money_cell(v).fg(c)
    };

    table.add_row(vec![
        Cell::new("Monthly expenses"),
        money_cell(summary.total_monthly_expenses),
    ]);
    table.add_row(vec![
        Cell::new("Monthly income"),
        money_cell(summary.total_monthly_income),
    ]);
    table.add_row(vec![Cell::new("Monthly savings"), colorize_money(summary.monthly_savings)]);
    table.add_row(vec![
        Cell::new("Months of study"),
        Cell::new(summary.total_months).set_alignment(CellAlignment::Right),
    ]);
    table.add_row(vec![
        Cell::new("Projected net worth").add_attribute(Attribute::Bold),
        colorize_money(summary.final_net_worth).add_attribute(Attribute::Bold),
    ]);

    println!("{table}");
    for message in outcome_messages(summary, currency) {
        println!("{}", paint(&message));
    }
}

// The terminal pie cannot label slices, so the CLI keeps piechart's legend.
pub fn draw_pie_chart(chart: &ChartData) {
    let colors = [
        Color::Red,
        Color::Green,
        Color::Blue,
        Color::Yellow,
        Color::Cyan,
        Color::Purple,
    ];

    let data: Vec<piechart::Data> = chart
        .slices()
        .iter()
        .enumerate()
        .map(|(i, slice)| piechart::Data {
            label: slice.category.to_string(),
            value: slice.amount as f32,
            color: Some(colors[i % colors.len()].into()),
            fill: '•',
        })
        .collect();

    Chart::new()
        .legend(true)
        .radius(9)
        .aspect_ratio(3)
        .draw(&data);
}

pub fn print_chart(chart: &ChartData) {
    println!("{}", "Expense distribution".bold());
    println!("{}", CHART_CAPTION.dimmed());
    if chart.is_empty() {
        println!("{}", paint(&chart_fallback()));
    } else {
        draw_pie_chart(chart);
    }
}

pub fn print_what_if(summary: &ResultSummary, currency: &str) {
    if let Some(scenario) = &summary.alternative {
        println!("{}", what_if_title(scenario, currency).bold());
        println!("{}", paint(&what_if_message(scenario, currency)));
    }
}

/// Prints the whole estimate the way the Result tab shows it.
pub fn print_estimate(session: &Session, currency: &str, hypothetical_part_time: f64) {
    let summary = session.summary(hypothetical_part_time);

    print_warnings(&session.warnings(), currency);
    println!();
    print_summary(&summary, currency);
    println!();
    print_chart(&session.chart());
    println!();
    print_what_if(&summary, currency);
    println!("{}", DISCLAIMER.dimmed());
}

#[derive(Serialize)]
pub struct EstimateReport {
    pub session: Session,
    pub expenses: crate::expenses::ExpenseSet,
    pub warnings: Vec<Warning>,
    pub summary: ResultSummary,
    pub chart: ChartData,
}

impl EstimateReport {
    pub fn new(session: &Session, hypothetical_part_time: f64) -> Self {
        EstimateReport {
            session: session.clone(),
            expenses: session.expense_set(),
            warnings: session.warnings(),
            summary: session.summary(hypothetical_part_time),
            chart: session.chart(),
        }
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::Field;

    fn summary_for(session: &Session) -> ResultSummary {
        session.summary(500.0)
    }

    #[test]
    fn test_outcome_when_saving() {
        let mut session = Session::new();
        session.toggle(Field::HasPartTime);
        session.toggle(Field::ReceivesDailyAid);
        session.toggle(Field::PaysRent);
        session.toggle(Field::ReceivesRentAid);

        let messages = outcome_messages(&summary_for(&session), "€");
        assert_eq!(messages.len(), 2);
        assert_eq!(messages[0].level, Level::Success);
        assert_eq!(messages[0].text, "Estimated monthly savings: 60€");
        assert_eq!(
            messages[1].text,
            "Estimated net worth at the end of your studies: 3,600€"
        );
    }

    #[test]
    fn test_outcome_when_losing_money() {
        let session = Session::new();
        let messages = outcome_messages(&summary_for(&session), "€");
        assert_eq!(messages.len(), 1);
        assert_eq!(messages[0].level, Level::Error);
        assert!(messages[0].text.contains("You lose 440€ per month"));
    }

    #[test]
    fn test_what_if_messages() {
        let session = Session::new();
        let summary = summary_for(&session);
        let scenario = summary.alternative.expect("no part-time by default");
        assert_eq!(
            what_if_title(&scenario, "€"),
            "What if you had a part-time job paying 500€?"
        );
        let message = what_if_message(&scenario, "€");
        assert_eq!(message.level, Level::Success);
        assert_eq!(
            message.text,
            "With a part-time job paying 500€, you would finish with 3,600€"
        );

        let losing = Scenario {
            part_time_income: 500.0,
            monthly_savings: -10.0,
            net_worth: -600.0,
        };
        assert_eq!(what_if_message(&losing, "€").level, Level::Warning);
    }

    #[test]
    fn test_chart_fallback_is_info() {
        let message = chart_fallback();
        assert_eq!(message.level, Level::Info);
        assert_eq!(message.text, NO_CHART_DATA);
    }

    #[test]
    fn test_json_report() {
        let report = EstimateReport::new(&Session::new(), 500.0);
        let json = report.to_json().unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["summary"]["total_monthly_expenses"], 440.0);
        assert_eq!(value["summary"]["alternative"]["net_worth"], 3600.0);
        assert_eq!(value["chart"]["Slices"].as_array().unwrap().len(), 5);
        assert!(value["warnings"].as_array().unwrap().is_empty());
    }
}
