pub mod args;
pub mod files;
pub mod report;

pub use args::{Cli, Command};
pub use files::{load_json, save_json};
pub use report::PlanReport;
