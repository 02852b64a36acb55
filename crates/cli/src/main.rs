use anyhow::Context;
use clap::{Parser, ValueEnum};
use std::collections::BTreeMap;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use finance_coach_core::domain::profile::{Goal, ProfileRequest};
use finance_coach_core::FinanceCoach;

mod render;

#[derive(Debug, Parser)]
#[command(name = "finance_coach", about = "Expense, savings, investment and goal advice")]
struct Args {
    /// Profile JSON: {income, expenses, age?, risk?, goals?}.
    #[arg(long, required_unless_present = "demo", conflicts_with = "demo")]
    profile: Option<PathBuf>,

    /// Use the built-in sample profile.
    #[arg(long)]
    demo: bool,

    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    format: OutputFormat,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    Json,
    Text,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let settings = finance_coach_core::config::Settings::from_env()?;
    let _sentry_guard = init_sentry(&settings);

    tracing_subscriber::registry()
        .with(EnvFilter::from_default_env())
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(sentry_tracing::layer())
        .init();

    let args = Args::parse();

    let coach = FinanceCoach::from_settings(&settings)?;

    let request = match &args.profile {
        Some(path) => load_profile(path)?,
        None => demo_profile(),
    };
    tracing::debug!(
        income = request.income,
        categories = request.expenses.len(),
        risk = %request.risk,
        "profile loaded"
    );

    let report = match coach.run_request(request).await {
        Ok(report) => report,
        Err(err) => {
            let err = anyhow::Error::new(err).context("invalid profile");
            sentry_anyhow::capture_anyhow(&err);
            return Err(err);
        }
    };

    match args.format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&report)?),
        OutputFormat::Text => print!("{}", render::render_text(&report)),
    }

    Ok(())
}

fn load_profile(path: &std::path::Path) -> anyhow::Result<ProfileRequest> {
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read profile {}", path.display()))?;
    serde_json::from_str(&raw)
        .with_context(|| format!("malformed profile JSON in {}", path.display()))
}

/// Defaults of the original input form.
fn demo_profile() -> ProfileRequest {
    let expenses: BTreeMap<String, f64> = [
        ("rent", 15_000.0),
        ("food", 6_000.0),
        ("transport", 2_000.0),
        ("subscriptions", 800.0),
        ("shopping", 3_000.0),
        ("others", 2_000.0),
    ]
    .into_iter()
    .map(|(k, v)| (k.to_string(), v))
    .collect();

    ProfileRequest {
        income: 50_000.0,
        expenses,
        age: 28,
        risk: "medium".to_string(),
        goals: Some(vec![Goal {
            name: "Car".to_string(),
            target_amount: 500_000.0,
            timeline_years: 3.0,
        }]),
    }
}

fn init_sentry(settings: &finance_coach_core::config::Settings) -> Option<sentry::ClientInitGuard> {
    let dsn = settings.sentry_dsn.as_deref()?;
    Some(sentry::init((
        dsn,
        sentry::ClientOptions {
            release: sentry::release_name!(),
            ..Default::default()
        },
    )))
}
