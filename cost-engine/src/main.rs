use anyhow::{Context, Result};
use clap::Parser;
use cost_engine::display::comparison_rows;
use cost_engine::estimate::{file::FileEstimator, request_estimate};
use cost_engine::input::parse_limit;
use cost_engine::io::{load_json, save_json, Cli, Command, PlanReport};
use cost_engine::limit_guard::LimitGuard;
use cost_engine::models::{BudgetConfig, Catalog, CenterId, OptionId, ResourceRequest};
use cost_engine::seed::default_catalog;
use cost_engine::{set_option_limit, SessionState, Thresholds};
use log::info;
use serde::Serialize;
use std::path::Path;
use std::time::Duration;

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn load_session(catalog: Catalog, requests: Option<&Path>, budget: BudgetConfig) -> Result<SessionState> {
    let requests: Vec<ResourceRequest> = match requests {
        Some(path) => load_json(path)?,
        None => Vec::new(),
    };
    Ok(SessionState::with_requests(catalog, requests, budget))
}

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();

    let budget = BudgetConfig::load(cli.budget.as_deref()).context("Failed to load budget")?;
    let catalog = match &cli.catalog {
        Some(path) => load_json(path)?,
        None => default_catalog(),
    };
    info!(
        "Catalog: {} centers, budget {:?}",
        catalog.len(),
        budget
    );

    match cli.command {
        Command::Report { requests } => {
            let mut session = load_session(catalog, requests.as_deref(), budget)?;
            let report = PlanReport::build(&mut session, &LimitGuard::standard());
            print_json(&report)?;
        }
        Command::Search { min_cpu, min_gpu } => {
            let thresholds = Thresholds::parse(&min_cpu, &min_gpu);
            let matches = cost_engine::match_capability(&catalog, &thresholds);
            info!("{} centers match {:?}", matches.len(), thresholds);
            print_json(&matches)?;
        }
        Command::SetLimit {
            center,
            category,
            option,
            limit,
            out,
        } => {
            let limit = parse_limit(&limit)?;
            let edited = set_option_limit(
                &catalog,
                &CenterId::new(center),
                category,
                &OptionId::new(option),
                limit,
            )?;
            match out {
                Some(path) => save_json(&path, &edited)?,
                None => print_json(&edited)?,
            }
        }
        Command::Compare { category } => {
            print_json(&comparison_rows(&catalog, category))?;
        }
        Command::Estimate {
            center,
            description,
            response,
            requests,
            timeout_secs,
        } => {
            let center_id = CenterId::new(center);
            let spec = catalog
                .get(&center_id)
                .with_context(|| format!("Unknown center {}", center_id))?
                .clone();

            let estimator = FileEstimator::new(response);
            let estimate = request_estimate(
                &estimator,
                &description,
                &spec,
                Duration::from_secs(timeout_secs),
            )
            .await?;

            let mut session = load_session(catalog, requests.as_deref(), budget)?;
            session.apply_estimate(&center_id, &estimate)?;
            print_json(&PlanReport::build(&mut session, &LimitGuard::standard()))?;
        }
    }

    Ok(())
}
