use crate::models::ResourceCategory;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Plan compute requests across HPCI and mdx centers.
#[derive(Parser, Debug)]
#[command(name = "cost-engine", author, version, about, long_about = None)]
pub struct Cli {
    /// Catalog JSON file. Defaults to the built-in reference table.
    #[arg(long, global = true)]
    pub catalog: Option<PathBuf>,

    /// Budget file (TOML/JSON). PLANNER_* environment variables override it.
    #[arg(long, global = true)]
    pub budget: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Cost breakdown, class totals and every limit violation, as JSON.
    Report {
        /// Requests JSON file. Omit for an empty plan.
        #[arg(long)]
        requests: Option<PathBuf>,
    },
    /// Centers that can satisfy a minimum CPU and/or GPU capacity.
    Search {
        #[arg(long, default_value = "")]
        min_cpu: String,
        #[arg(long, default_value = "")]
        min_gpu: String,
    },
    /// Change one option's limit and write the edited catalog.
    SetLimit {
        #[arg(long)]
        center: String,
        #[arg(long)]
        category: ResourceCategory,
        #[arg(long)]
        option: String,
        #[arg(long, allow_hyphen_values = true)]
        limit: String,
        /// Where to write the catalog. Printed to stdout when omitted.
        #[arg(long)]
        out: Option<PathBuf>,
    },
    /// Every metered option of one category side by side.
    Compare {
        #[arg(long, default_value = "cpu")]
        category: ResourceCategory,
    },
    /// Validate a saved estimator response and apply it to a center.
    Estimate {
        #[arg(long)]
        center: String,
        #[arg(long)]
        description: String,
        /// Saved estimator response body.
        #[arg(long)]
        response: PathBuf,
        #[arg(long)]
        requests: Option<PathBuf>,
        #[arg(long, default_value_t = 30)]
        timeout_secs: u64,
    },
}
