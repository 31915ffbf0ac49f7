//! Scripted fitter for tests: returns a fixed prediction set and can be
//! told to fail at any stage.

use super::{FittedModel, Fitter};
use crate::config::FinetuneConfig;
use crate::model::{DatasetDict, Example, ModelArtifact, PredictionSet, SpanPrediction};
use async_trait::async_trait;
use sha2::{Digest, Sha256};
use std::path::Path;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailAt {
    Fit,
    Predict,
    Export,
}

#[derive(Default)]
pub struct FakeFitter {
    predictions: PredictionSet,
    fail_at: Option<FailAt>,
}

impl FakeFitter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_prediction(mut self, id: impl Into<String>, text: impl Into<String>) -> Self {
        self.predictions
            .insert(id.into(), SpanPrediction::new(text.into()));
        self
    }

    pub fn with_predictions(mut self, predictions: PredictionSet) -> Self {
        self.predictions = predictions;
        self
    }

    pub fn failing_at(mut self, stage: FailAt) -> Self {
        self.fail_at = Some(stage);
        self
    }
}

#[async_trait]
impl Fitter for FakeFitter {
    async fn fit(
        &self,
        _dataset: &DatasetDict,
        _config: &FinetuneConfig,
    ) -> anyhow::Result<Box<dyn FittedModel>> {
        if self.fail_at == Some(FailAt::Fit) {
            anyhow::bail!("scripted fit failure");
        }
        Ok(Box::new(FakeFittedModel {
            predictions: self.predictions.clone(),
            fail_at: self.fail_at,
        }))
    }

    fn provider_name(&self) -> &'static str {
        "fake"
    }
}

pub struct FakeFittedModel {
    predictions: PredictionSet,
    fail_at: Option<FailAt>,
}

#[async_trait]
impl FittedModel for FakeFittedModel {
    async fn predict(&self, _examples: &[Example]) -> anyhow::Result<PredictionSet> {
        if self.fail_at == Some(FailAt::Predict) {
            anyhow::bail!("scripted predict failure");
        }
        Ok(self.predictions.clone())
    }

    async fn export(&self, dir: &Path) -> anyhow::Result<ModelArtifact> {
        if self.fail_at == Some(FailAt::Export) {
            anyhow::bail!("scripted export failure");
        }
        std::fs::create_dir_all(dir)?;
        let path = dir.join("fake-model.bin");
        let bytes = b"fake model weights";
        std::fs::write(&path, bytes)?;
        let sha256 = hex::encode(Sha256::digest(bytes));
        Ok(ModelArtifact { path, sha256 })
    }
}
