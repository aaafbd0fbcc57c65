//! Derived figures consumed by display collaborators. None of these feed
//! back into the cost engine.

use crate::models::{CenterSpec, ResourceOption};

pub mod calculator;
pub mod comparison;
pub mod hardware;

pub use calculator::UsageCalculator;
pub use comparison::{comparison_rows, ComparisonRow};
pub use hardware::HardwareStats;

/// Share of an option's limit that a quantity uses, capped at 100. Flat-fee
/// limits are informational so their usage is always reported as 0.
pub fn usage_percent(center: &CenterSpec, option: &ResourceOption, quantity: f64) -> f64 {
    if !center.is_metered() || option.limit() <= 0.0 {
        return 0.0;
    }
    (quantity / option.limit() * 100.0).min(100.0)
}

/// Share of a class budget consumed, capped at 100.
pub fn utilization_percent(total: f64, limit: f64) -> f64 {
    if limit <= 0.0 {
        return 0.0;
    }
    (total / limit * 100.0).min(100.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_usage_percent() {
        let hpci = CenterSpec::metered("c", "c", "");
        let mdx = CenterSpec::flat_fee("m", "m", "");
        let option = ResourceOption::new("o", "o", 200.0, 1.0);

        assert_eq!(usage_percent(&hpci, &option, 50.0), 25.0);
        assert_eq!(usage_percent(&hpci, &option, 1000.0), 100.0);
        assert_eq!(usage_percent(&mdx, &option, 50.0), 0.0);

        let unlimited = ResourceOption::new("z", "z", 0.0, 1.0);
        assert_eq!(usage_percent(&hpci, &unlimited, 50.0), 0.0);
    }

    #[test]
    fn test_utilization_percent() {
        assert_eq!(utilization_percent(1_800_000.0, 3_600_000.0), 50.0);
        assert_eq!(utilization_percent(4_000_000.0, 3_600_000.0), 100.0);
        assert_eq!(utilization_percent(10.0, 0.0), 0.0);
    }
}
