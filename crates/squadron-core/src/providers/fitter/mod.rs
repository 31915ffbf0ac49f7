//! Seam to the external model-fitting service. Tokenization, span
//! alignment and logit postprocessing all happen behind this boundary;
//! the pipeline only sees final per-id answer strings.

pub mod fake;
pub mod http;

use crate::config::FinetuneConfig;
use crate::model::{DatasetDict, Example, ModelArtifact, PredictionSet};
use async_trait::async_trait;
use std::path::Path;

pub use fake::FakeFitter;
pub use http::HttpFitter;

#[async_trait]
pub trait Fitter: Send + Sync {
    /// Fine-tune `config.model_id` on the dataset and return a handle to
    /// the fitted model. Errors are surfaced immediately, never retried.
    async fn fit(
        &self,
        dataset: &DatasetDict,
        config: &FinetuneConfig,
    ) -> anyhow::Result<Box<dyn FittedModel>>;

    fn provider_name(&self) -> &'static str;
}

#[async_trait]
pub trait FittedModel: Send + Sync {
    /// Best answer string (plus no-answer probability) per example id.
    async fn predict(&self, examples: &[Example]) -> anyhow::Result<PredictionSet>;

    /// Materialize the model weights under `dir` and return their
    /// location and checksum.
    async fn export(&self, dir: &Path) -> anyhow::Result<ModelArtifact>;
}
