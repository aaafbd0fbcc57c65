use super::{EstimateContext, Estimator};
use crate::models::EstimateError;
use async_trait::async_trait;
use std::path::PathBuf;

/// Replays a saved estimator response from disk. Lets the command line run
/// the estimate boundary without a live service.
pub struct FileEstimator {
    path: PathBuf,
}

impl FileEstimator {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

#[async_trait]
impl Estimator for FileEstimator {
    async fn estimate(
        &self,
        _description: &str,
        _context: &EstimateContext,
    ) -> Result<String, EstimateError> {
        tokio::fs::read_to_string(&self.path)
            .await
            .map_err(|e| EstimateError::Collaborator(format!("{}: {}", self.path.display(), e)))
    }
}
