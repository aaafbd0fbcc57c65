use super::error::BudgetError;
use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};
use std::path::Path;

pub const DEFAULT_METERED_SINGLE_CENTER_LIMIT: f64 = 3_000_000.0;
pub const DEFAULT_METERED_CLASS_TOTAL_LIMIT: f64 = 3_600_000.0;
/// Shared between every flat-fee center.
pub const DEFAULT_FLATFEE_CLASS_TOTAL_LIMIT: f64 = 1_000_000.0;

const ENV_PREFIX: &str = "PLANNER";

fn default_currency() -> String {
    "JPY".to_string()
}

/// Budget ceilings, in the billing currency.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BudgetConfig {
    /// Ceiling on one metered center's total.
    metered_single_center_limit: f64,
    /// Ceiling on the sum of all metered centers.
    metered_class_total_limit: f64,
    /// Shared flat-fee pool. Activating any flat-fee center draws all of it.
    flatfee_class_total_limit: f64,
    #[serde(default = "default_currency")]
    currency: String,
}

impl Default for BudgetConfig {
    fn default() -> Self {
        Self {
            metered_single_center_limit: DEFAULT_METERED_SINGLE_CENTER_LIMIT,
            metered_class_total_limit: DEFAULT_METERED_CLASS_TOTAL_LIMIT,
            flatfee_class_total_limit: DEFAULT_FLATFEE_CLASS_TOTAL_LIMIT,
            currency: default_currency(),
        }
    }
}

impl BudgetConfig {
    pub fn new(
        metered_single_center_limit: f64,
        metered_class_total_limit: f64,
        flatfee_class_total_limit: f64,
    ) -> Result<Self, BudgetError> {
        let config = Self {
            metered_single_center_limit,
            metered_class_total_limit,
            flatfee_class_total_limit,
            currency: default_currency(),
        };
        config.validate()?;
        Ok(config)
    }

    /// Loads defaults, then the optional file, then `PLANNER_*` environment
    /// variables, later sources overriding earlier ones.
    pub fn load(path: Option<&Path>) -> Result<Self, BudgetError> {
        let defaults = Self::default();
        let mut builder = Config::builder()
            .set_default(
                "metered_single_center_limit",
                defaults.metered_single_center_limit,
            )?
            .set_default("metered_class_total_limit", defaults.metered_class_total_limit)?
            .set_default("flatfee_class_total_limit", defaults.flatfee_class_total_limit)?
            .set_default("currency", defaults.currency)?;

        if let Some(path) = path {
            builder = builder.add_source(File::from(path).required(true));
        }

        let config: Self = builder
            .add_source(Environment::with_prefix(ENV_PREFIX).try_parsing(true))
            .build()?
            .try_deserialize()?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<(), BudgetError> {
        for (field, value) in [
            ("metered_single_center_limit", self.metered_single_center_limit),
            ("metered_class_total_limit", self.metered_class_total_limit),
            ("flatfee_class_total_limit", self.flatfee_class_total_limit),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(BudgetError::InvalidLimit { field, value });
            }
        }
        Ok(())
    }

    pub fn metered_single_center_limit(&self) -> f64 {
        self.metered_single_center_limit
    }

    pub fn metered_class_total_limit(&self) -> f64 {
        self.metered_class_total_limit
    }

    pub fn flatfee_class_total_limit(&self) -> f64 {
        self.flatfee_class_total_limit
    }

    pub fn currency(&self) -> &str {
        &self.currency
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use std::path::PathBuf;
    use std::sync::Mutex;

    // Environment variables are process-wide; every test that calls `load`
    // holds this lock.
    static ENV_LOCK: Mutex<()> = Mutex::new(());

    fn temp_budget_file(contents: &str) -> PathBuf {
        let mut path = std::env::temp_dir();
        path.push(format!(
            "budget_test_{}.toml",
            std::time::SystemTime::now()
                .duration_since(std::time::UNIX_EPOCH)
                .unwrap()
                .as_nanos()
        ));
        let mut file = std::fs::File::create(&path).unwrap();
        writeln!(file, "{}", contents).unwrap();
        path
    }

    #[test]
    fn test_defaults() {
        let config = BudgetConfig::default();
        assert_eq!(config.metered_single_center_limit(), 3_000_000.0);
        assert_eq!(config.metered_class_total_limit(), 3_600_000.0);
        assert_eq!(config.flatfee_class_total_limit(), 1_000_000.0);
        assert_eq!(config.currency(), "JPY");
    }

    #[test]
    fn test_negative_limit_rejected() {
        let err = BudgetConfig::new(-1.0, 10.0, 10.0).unwrap_err();
        assert!(matches!(
            err,
            BudgetError::InvalidLimit {
                field: "metered_single_center_limit",
                ..
            }
        ));
    }

    #[test]
    fn test_load_from_file_overrides_defaults() {
        let _guard = ENV_LOCK.lock().unwrap_or_else(|e| e.into_inner());
        let path = temp_budget_file("metered_class_total_limit = 5000000.0");

        let config = BudgetConfig::load(Some(&path)).unwrap();
        let _ = std::fs::remove_file(&path);

        assert_eq!(config.metered_class_total_limit(), 5_000_000.0);
        assert_eq!(config.metered_single_center_limit(), 3_000_000.0);
    }

    #[test]
    fn test_env_overrides_file() {
        let _guard = ENV_LOCK.lock().unwrap_or_else(|e| e.into_inner());
        let path = temp_budget_file("flatfee_class_total_limit = 2000000.0");

        std::env::set_var("PLANNER_FLATFEE_CLASS_TOTAL_LIMIT", "2500000.0");
        let result = BudgetConfig::load(Some(&path));
        std::env::remove_var("PLANNER_FLATFEE_CLASS_TOTAL_LIMIT");
        let _ = std::fs::remove_file(&path);

        let config = result.unwrap();
        assert_eq!(config.flatfee_class_total_limit(), 2_500_000.0);
        assert_eq!(config.metered_class_total_limit(), 3_600_000.0);
    }

    #[test]
    fn test_negative_env_limit_rejected() {
        let _guard = ENV_LOCK.lock().unwrap_or_else(|e| e.into_inner());

        std::env::set_var("PLANNER_METERED_CLASS_TOTAL_LIMIT", "-5.0");
        let result = BudgetConfig::load(None);
        std::env::remove_var("PLANNER_METERED_CLASS_TOTAL_LIMIT");

        assert!(matches!(
            result,
            Err(BudgetError::InvalidLimit {
                field: "metered_class_total_limit",
                value,
            }) if value == -5.0
        ));
    }
}
