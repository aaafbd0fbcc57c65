use super::identity::CenterId;
use serde::{Deserialize, Serialize};

/// Cost of one center's current request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CostBreakdown {
    pub center_id: CenterId,
    pub cpu_cost: f64,
    pub gpu_cost: f64,
    pub storage_cost: f64,
    /// Sum of the three category costs.
    pub total: f64,
    /// Metered: total above the single-center limit.
    /// Flat-fee: the shared pool is over its limit.
    pub is_over_limit: bool,
}

impl CostBreakdown {
    pub fn new(center_id: CenterId, cpu_cost: f64, gpu_cost: f64, storage_cost: f64) -> Self {
        Self {
            center_id,
            cpu_cost,
            gpu_cost,
            storage_cost,
            total: cpu_cost + gpu_cost + storage_cost,
            is_over_limit: false,
        }
    }

    pub fn with_over_limit(mut self, is_over_limit: bool) -> Self {
        self.is_over_limit = is_over_limit;
        self
    }
}
