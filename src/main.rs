use std::path::Path;
use std::process::ExitCode;

use clap::Parser;
use tracing::warn;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

use climb_rating::cli::Cli;
use climb_rating::data_loader::*;
use climb_rating::rating_context::RatingContext;
use climb_rating::report::*;
use climb_rating::tier_table::{BoundaryConvention, TierTable};
use climb_rating::{LoadError, RatingEngine};

fn table_or_default(
    path: Option<&Path>,
    convention: BoundaryConvention,
    fallback: fn() -> Result<TierTable, climb_rating::RatingError>,
) -> Result<TierTable, LoadError> {
    match path {
        Some(p) => load_tier_table(p, convention),
        None => Ok(fallback()?),
    }
}

fn run() -> Result<(), LoadError> {
    let args = Cli::parse();

    let context = match &args.context {
        Some(p) => load_context(p)?,
        None => RatingContext::default(),
    };
    let user_tiers = table_or_default(
        args.user_tiers.as_deref(),
        BoundaryConvention::HalfOpen,
        TierTable::user_tiers,
    )?;
    let problem_grades = table_or_default(
        args.problem_grades.as_deref(),
        BoundaryConvention::Closed,
        TierTable::problem_grades,
    )?;

    // Tables are validated here, before any input is rated.
    let engine = RatingEngine::new(user_tiers, problem_grades, context)?;

    let input = load_input(&args.input)?;

    let mut problems = Vec::new();
    for p in &input.problems {
        match engine.rate_problem(p) {
            Ok(r) => problems.push(r),
            Err(err) => warn!(problem = %p.id, %err, "problem rejected"),
        }
    }

    let mut users = Vec::new();
    for u in &input.users {
        match engine.rate_user(u) {
            Ok(r) => users.push(r),
            Err(err) => warn!(user = %u.handle, %err, "user rejected"),
        }
    }

    if args.json {
        output_json(&problems, &users)?;
    } else {
        output_report(&problems, &users);
    }

    Ok(())
}

fn main() -> ExitCode {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_target(false))
        .init();

    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("{err}");
            ExitCode::from(err.exit_code())
        }
    }
}
