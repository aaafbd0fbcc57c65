pub mod catalog_edit;
pub mod display;
pub mod engine;
pub mod estimate;
pub mod input;
pub mod io;
pub mod limit_guard;
pub mod models;
pub mod search;
pub mod seed;
pub mod session;

pub use catalog_edit::set_option_limit;
pub use engine::{compute_costs, CostReport};
pub use search::{match_capability, Thresholds};
pub use session::SessionState;
