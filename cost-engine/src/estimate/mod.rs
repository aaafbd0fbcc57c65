use crate::models::{CenterSpec, EstimateError, ResourceCategory};
use async_trait::async_trait;
use log::{info, warn};
use serde::{Deserialize, Serialize};
use std::time::Duration;

pub mod file;
pub mod mock;

pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// What the estimator is told about the target center.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EstimateContext {
    pub center_name: String,
    pub description: String,
    /// (queue name, limit) pairs.
    pub cpu_queues: Vec<(String, f64)>,
    pub gpu_queues: Vec<(String, f64)>,
}

impl EstimateContext {
    pub fn from_center(center: &CenterSpec) -> Self {
        let queues = |category: ResourceCategory| -> Vec<(String, f64)> {
            center
                .options(category)
                .iter()
                .map(|o| (o.name().to_string(), o.limit()))
                .collect()
        };
        Self {
            center_name: center.name().to_string(),
            description: center.description().to_string(),
            cpu_queues: queues(ResourceCategory::Cpu),
            gpu_queues: queues(ResourceCategory::Gpu),
        }
    }

    /// "General: Max 42000, Vector: Max 3000", or "None".
    pub fn summarize(queues: &[(String, f64)]) -> String {
        if queues.is_empty() {
            return "None".to_string();
        }
        queues
            .iter()
            .map(|(name, limit)| format!("{}: Max {}", name, limit))
            .collect::<Vec<_>>()
            .join(", ")
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Confidence {
    High,
    Medium,
    Low,
}

/// A validated estimate, ready to be applied like typed-in quantities.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Estimate {
    pub node_hours: f64,
    pub gpu_hours: f64,
    pub reasoning: String,
    pub confidence: Option<Confidence>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawEstimate {
    node_hours: Option<serde_json::Value>,
    gpu_hours: Option<serde_json::Value>,
    #[serde(default)]
    reasoning: Option<String>,
    #[serde(default)]
    confidence: Option<Confidence>,
}

fn number_field(field: &'static str, value: Option<serde_json::Value>) -> Result<f64, EstimateError> {
    let value = value
        .filter(|v| !v.is_null())
        .ok_or(EstimateError::MissingField(field))?;
    let number = value
        .as_f64()
        .ok_or_else(|| EstimateError::Malformed(format!("'{}' is not a number: {}", field, value)))?;
    if !number.is_finite() || number < 0.0 {
        return Err(EstimateError::InvalidValue {
            field,
            value: number,
        });
    }
    Ok(number)
}

impl Estimate {
    /// Validates the collaborator's raw JSON text. Both hour fields must be
    /// present, numeric and non-negative.
    pub fn from_response(text: &str) -> Result<Self, EstimateError> {
        let raw: RawEstimate =
            serde_json::from_str(text).map_err(|e| EstimateError::Malformed(e.to_string()))?;

        Ok(Self {
            node_hours: number_field("nodeHours", raw.node_hours)?,
            gpu_hours: number_field("gpuHours", raw.gpu_hours)?,
            reasoning: raw.reasoning.unwrap_or_default(),
            confidence: raw.confidence,
        })
    }
}

/// External service that guesses resource needs from a free-text project
/// description. Returns the raw response body.
#[async_trait]
pub trait Estimator: Send + Sync {
    async fn estimate(
        &self,
        description: &str,
        context: &EstimateContext,
    ) -> Result<String, EstimateError>;
}

/// Asks the estimator about `center`, bounded by `timeout`, and validates the
/// answer. Every failure collapses to an [`EstimateError`].
pub async fn request_estimate(
    estimator: &dyn Estimator,
    description: &str,
    center: &CenterSpec,
    timeout: Duration,
) -> Result<Estimate, EstimateError> {
    if description.trim().is_empty() {
        return Err(EstimateError::EmptyDescription);
    }
    let context = EstimateContext::from_center(center);

    let outcome = tokio::time::timeout(timeout, estimator.estimate(description, &context)).await;
    let result = match outcome {
        Err(_) => Err(EstimateError::Timeout(timeout)),
        Ok(Err(e)) => Err(e),
        Ok(Ok(text)) => Estimate::from_response(&text),
    };

    match &result {
        Ok(estimate) => info!(
            "Estimate for {}: {} node-hours, {} GPU-hours",
            center.id(),
            estimate.node_hours,
            estimate.gpu_hours
        ),
        Err(e) => warn!("No estimate available for {}: {}", center.id(), e),
    }
    result
}
