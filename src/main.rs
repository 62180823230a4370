use crate::error::parse_amount;
use crate::report::EstimateReport;
use crate::session::{Field, Session};
use crate::tui::{run_tui, App, Component, DisabledComponents, Tab};

use clap::{arg, value_parser, Arg, ArgMatches, Command};
use serde::Deserialize;
use serde::Serialize;
use tracing::{debug, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

mod chart;
mod conditions;
mod error;
mod estimate;
mod expenses;
mod money;
mod reference;
mod report;
mod session;
mod tui;

#[derive(Debug, Serialize, Deserialize)]
struct Config {
    currency: String,
    hypothetical_part_time: f64,
    start_tab: String,
    disabled_components: Vec<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            currency: "€".to_string(),
            hypothetical_part_time: estimate::HYPOTHETICAL_PART_TIME,
            start_tab: "conditions".to_string(),
            disabled_components: Vec::new(),
        }
    }
}

// Amount flags and the field each one fills in. Giving a flag for a
// toggle-gated amount also switches its toggle on.
const AMOUNT_ARGS: [(&str, Field); 9] = [
    ("rent", Field::Rent),
    ("rent-aid", Field::RentAid),
    ("daily-aid", Field::DailyAid),
    ("part-time", Field::PartTimeIncome),
    ("food", Field::Food),
    ("transport", Field::Transport),
    ("leisure", Field::Leisure),
    ("other", Field::Other),
    ("tuition", Field::Tuition),
];

fn input_args() -> Vec<Arg> {
    let mut args = vec![Arg::new("years")
        .long("years")
        .value_name("YEARS")
        .help("Study duration in years (1-6)")
        .value_parser(value_parser!(u8).range(1..=6))];

    for (name, field) in AMOUNT_ARGS {
        args.push(
            Arg::new(name)
                .long(name)
                .value_name("AMOUNT")
                .help(field.label())
                .value_parser(parse_amount),
        );
    }
    args
}

fn cli() -> Command {
    Command::new("grad_savings")
        .about("Estimate how much money you can have when you finish your studies")
        .subcommand(Command::new("config").about("Print the path to the config file"))
        .subcommand(
            Command::new("tui")
                .about("Fill in your conditions and expenses interactively")
                .args(input_args())
                .arg(
                    arg!(--tab <TAB> "Tab to start on")
                        .value_parser(["conditions", "expenses", "result"]),
                ),
        )
        .subcommand(
            Command::new("estimate")
                .about("Print the estimate for the given conditions and expenses")
                .args(input_args())
                .arg(arg!(--json "Print the estimate as JSON")),
        )
}

// Builds the session from the defaults plus any input flags.
fn session_from_matches(matches: &ArgMatches) -> eyre::Result<Session> {
    let mut session = Session::new();

    if let Some(years) = matches.get_one::<u8>("years") {
        session.set_amount(Field::StudyYears, f64::from(*years))?;
    }

    for (name, field) in AMOUNT_ARGS {
        if let Some(amount) = matches.get_one::<f64>(name) {
            if let Some(gate) = field.gate() {
                session.set_enabled(gate, true);
            }
            session.set_amount(field, *amount)?;
        }
    }
    Ok(session)
}

fn launch(session: Session, cfg: &Config, tab: Option<Tab>) -> eyre::Result<()> {
    info!(tab = ?tab, "starting interactive session");
    let disabled = DisabledComponents::new(&cfg.disabled_components);
    let app = App::new(
        session,
        cfg.currency.clone(),
        cfg.hypothetical_part_time.max(0.0),
        disabled,
    );
    run_tui(app, tab)
}

fn main() -> eyre::Result<()> {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| "warn".into()))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cfg: Config = confy::load("grad_savings", "config")?;
    debug!(?cfg, "loaded config");

    let matches = cli().get_matches();
    let start_tab = Tab::from_str(&cfg.start_tab);

    match matches.subcommand() {
        Some(("config", _)) => {
            let path = confy::get_configuration_file_path("grad_savings", "config")?;
            println!("Your config file is located here: \n{}", path.display());
            println!("\nComponents you can list under disabled_components:");
            for component in Component::all() {
                println!("  {: <14} {}", component.as_str(), component.description());
            }
        }
        Some(("estimate", sub)) => {
            let session = session_from_matches(sub)?;
            let hypothetical = cfg.hypothetical_part_time.max(0.0);
            if sub.get_flag("json") {
                println!("{}", EstimateReport::new(&session, hypothetical).to_json()?);
            } else {
                report::print_estimate(&session, &cfg.currency, hypothetical);
            }
        }
        Some(("tui", sub)) => {
            let session = session_from_matches(sub)?;
            let tab = sub
                .get_one::<String>("tab")
                .and_then(|t| Tab::from_str(t))
                .or(start_tab);
            launch(session, &cfg, tab)?;
        }
        _ => launch(Session::new(), &cfg, start_tab)?,
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::{FieldValue, MAX_AMOUNT};

    fn estimate_matches(args: &[&str]) -> ArgMatches {
        let mut argv = vec!["grad_savings", "estimate"];
        argv.extend_from_slice(args);
        let matches = cli().get_matches_from(argv);
        matches.subcommand_matches("estimate").unwrap().clone()
    }

    #[test]
    fn test_cli() {
        let matches = cli().get_matches_from(vec!["grad_savings", "tui", "--tab", "result"]);
        assert_eq!(matches.subcommand_name(), Some("tui"));
        let sub = matches.subcommand_matches("tui").unwrap();
        assert_eq!(sub.get_one::<String>("tab").map(String::as_str), Some("result"));
    }

    #[test]
    fn test_session_from_flags() {
        let matches = estimate_matches(&[
            "--years", "3", "--rent", "400", "--rent-aid", "200", "--part-time", "500",
        ]);
        let session = session_from_matches(&matches).unwrap();
        let conditions = session.conditions();
        assert_eq!(conditions.study_years, 3);
        assert_eq!(conditions.rent, Some(400.0));
        assert_eq!(conditions.rent_aid, Some(200.0));
        assert_eq!(conditions.part_time_income, Some(500.0));
        assert_eq!(conditions.daily_aid, None);
        assert_eq!(session.expense_set().total(), 640.0);
    }

    #[test]
    fn test_expense_flags_are_clamped() {
        let matches = estimate_matches(&["--food", "999", "--json"]);
        assert!(matches.get_flag("json"));
        let session = session_from_matches(&matches).unwrap();
        assert_eq!(session.value(Field::Food), FieldValue::Number(400.0));
    }

    #[test]
    fn test_huge_amount_flags_stay_finite() {
        let matches = estimate_matches(&["--tuition", "1e308", "--rent", "1e308"]);
        let session = session_from_matches(&matches).unwrap();
        assert_eq!(session.value(Field::Tuition), FieldValue::Number(MAX_AMOUNT));
        let summary = session.summary(500.0);
        assert!(summary.total_monthly_expenses.is_finite());
        assert!(summary.final_net_worth.is_finite());
    }

    #[test]
    fn test_invalid_flags_are_rejected() {
        assert!(cli()
            .try_get_matches_from(["grad_savings", "estimate", "--food", "lots"])
            .is_err());
        assert!(cli()
            .try_get_matches_from(["grad_savings", "estimate", "--years", "9"])
            .is_err());
        assert!(cli()
            .try_get_matches_from(["grad_savings", "estimate", "--rent", "400.5"])
            .is_err());
        assert!(cli()
            .try_get_matches_from(["grad_savings", "tui", "--tab", "summary"])
            .is_err());
    }

    #[test]
    fn test_default_config() {
        let cfg = Config::default();
        assert_eq!(cfg.hypothetical_part_time, 500.0);
        assert_eq!(Tab::from_str(&cfg.start_tab), Some(Tab::Conditions));
    }
}
