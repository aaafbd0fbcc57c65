use crate::input::parse_or_zero;

/// Helpers that turn job shapes into a quantity. Inputs are raw text fields;
/// anything unparsable counts as 0.
#[derive(Debug, Clone, PartialEq)]
pub enum UsageCalculator {
    /// Hours per job times number of jobs.
    Batch { hours_per_job: String, jobs: String },
    /// Hours per run, runs per day, days.
    Daily {
        hours_per_run: String,
        runs_per_day: String,
        days: String,
    },
}

impl UsageCalculator {
    pub fn total(&self) -> f64 {
        match self {
            Self::Batch { hours_per_job, jobs } => parse_or_zero(hours_per_job) * parse_or_zero(jobs),
            Self::Daily {
                hours_per_run,
                runs_per_day,
                days,
            } => parse_or_zero(hours_per_run) * parse_or_zero(runs_per_day) * parse_or_zero(days),
        }
    }
}

/// Wall-clock days a quantity lasts on `nodes` nodes running `hours_per_day`.
/// Zero unless all three are positive.
pub fn runtime_days(quantity: f64, nodes: &str, hours_per_day: &str) -> f64 {
    let nodes = parse_or_zero(nodes);
    let hours = parse_or_zero(hours_per_day);
    if quantity > 0.0 && nodes > 0.0 && hours > 0.0 {
        quantity / (nodes * hours)
    } else {
        0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_batch_and_daily() {
        let batch = UsageCalculator::Batch {
            hours_per_job: "2.5".into(),
            jobs: "40".into(),
        };
        assert_eq!(batch.total(), 100.0);

        let daily = UsageCalculator::Daily {
            hours_per_run: "3".into(),
            runs_per_day: "4".into(),
            days: "30".into(),
        };
        assert_eq!(daily.total(), 360.0);

        let blank = UsageCalculator::Batch {
            hours_per_job: "".into(),
            jobs: "10".into(),
        };
        assert_eq!(blank.total(), 0.0);
    }

    #[test]
    fn test_runtime_days() {
        assert_eq!(runtime_days(480.0, "1", "24"), 20.0);
        assert_eq!(runtime_days(480.0, "2", "12"), 20.0);
        assert_eq!(runtime_days(480.0, "0", "24"), 0.0);
        assert_eq!(runtime_days(0.0, "1", "24"), 0.0);
    }
}
