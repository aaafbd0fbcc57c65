use crate::models::{Catalog, CenterId, CenterSpec, ResourceCategory};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Minimum capability a user is looking for. A threshold is either set to a
/// positive number or absent.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(from = "RawThresholds")]
pub struct Thresholds {
    min_cpu: Option<f64>,
    min_gpu: Option<f64>,
}

#[derive(Deserialize)]
struct RawThresholds {
    #[serde(default)]
    min_cpu: Option<f64>,
    #[serde(default)]
    min_gpu: Option<f64>,
}

impl From<RawThresholds> for Thresholds {
    fn from(raw: RawThresholds) -> Self {
        Self::new(raw.min_cpu, raw.min_gpu)
    }
}

impl Thresholds {
    /// Zero, negative and non-finite values mean "no constraint".
    pub fn new(min_cpu: Option<f64>, min_gpu: Option<f64>) -> Self {
        Self {
            min_cpu: min_cpu.filter(|v| is_constraint(*v)),
            min_gpu: min_gpu.filter(|v| is_constraint(*v)),
        }
    }

    /// Builds thresholds from raw text fields. Empty or unparsable text is
    /// treated as unset.
    pub fn parse(min_cpu: &str, min_gpu: &str) -> Self {
        Self::new(
            crate::input::parse_threshold(min_cpu),
            crate::input::parse_threshold(min_gpu),
        )
    }

    pub fn min_cpu(&self) -> Option<f64> {
        self.min_cpu
    }

    pub fn min_gpu(&self) -> Option<f64> {
        self.min_gpu
    }

    pub fn is_empty(&self) -> bool {
        self.min_cpu.is_none() && self.min_gpu.is_none()
    }

    /// True if the center satisfies every threshold that is set.
    pub fn matches(&self, center: &CenterSpec) -> bool {
        satisfies(center, ResourceCategory::Cpu, self.min_cpu)
            && satisfies(center, ResourceCategory::Gpu, self.min_gpu)
    }
}

fn is_constraint(v: f64) -> bool {
    v.is_finite() && v > 0.0
}

/// Some single option must reach the threshold on its own; capacity is not
/// summed across options.
fn satisfies(center: &CenterSpec, category: ResourceCategory, threshold: Option<f64>) -> bool {
    match threshold {
        None => true,
        Some(min) => center.options(category).iter().any(|o| o.limit() >= min),
    }
}

/// Ids of the centers able to meet both thresholds. With no threshold set the
/// result is empty: search is opt-in.
pub fn match_capability(catalog: &Catalog, thresholds: &Thresholds) -> BTreeSet<CenterId> {
    if thresholds.is_empty() {
        return BTreeSet::new();
    }
    catalog
        .centers()
        .filter(|c| thresholds.matches(c))
        .map(|c| c.id().clone())
        .collect()
}
