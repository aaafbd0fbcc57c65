use super::{EstimateContext, Estimator};
use crate::models::EstimateError;
use async_trait::async_trait;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

/// Canned estimator for tests and offline runs.
pub struct MockEstimator {
    response: Result<String, String>,
    delay: Duration,
    calls: AtomicUsize,
}

impl MockEstimator {
    pub fn responding(body: impl Into<String>) -> Self {
        Self {
            response: Ok(body.into()),
            delay: Duration::ZERO,
            calls: AtomicUsize::new(0),
        }
    }

    pub fn failing(reason: impl Into<String>) -> Self {
        Self {
            response: Err(reason.into()),
            delay: Duration::ZERO,
            calls: AtomicUsize::new(0),
        }
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl Estimator for MockEstimator {
    async fn estimate(
        &self,
        _description: &str,
        _context: &EstimateContext,
    ) -> Result<String, EstimateError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }
        self.response.clone().map_err(EstimateError::Collaborator)
    }
}
