use thiserror::Error;

/// Errors raised while loading budget configuration.
#[derive(Error, Debug)]
pub enum BudgetError {
    #[error("Config error: {0}")]
    Load(#[from] config::ConfigError),

    #[error("Budget {field} must be a non-negative number, got {value}")]
    InvalidLimit { field: &'static str, value: f64 },
}

/// Reasons an estimate could not be accepted. All of them mean "no estimate
/// available" to the caller.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum EstimateError {
    #[error("Project description is empty")]
    EmptyDescription,

    #[error("Estimator timed out after {0:?}")]
    Timeout(std::time::Duration),

    #[error("Estimator failed: {0}")]
    Collaborator(String),

    #[error("Malformed estimate response: {0}")]
    Malformed(String),

    #[error("Estimate response is missing '{0}'")]
    MissingField(&'static str),

    #[error("Estimate field '{field}' must be a non-negative number, got {value}")]
    InvalidValue { field: &'static str, value: f64 },
}
