//! JSON-over-HTTP client for a remote fitting service.
//!
//! `POST /v1/finetune` submits the splits and hyperparameters and returns a
//! model reference; `POST /v1/models/<ref>/predictions` scores a split;
//! `GET /v1/models/<ref>/artifact` downloads the fitted weights.

use super::{FittedModel, Fitter};
use crate::config::FinetuneConfig;
use crate::model::{DatasetDict, Example, ModelArtifact, PredictionSet};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::path::Path;

pub struct HttpFitter {
    base_url: String,
    client: reqwest::Client,
}

impl HttpFitter {
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self {
            base_url,
            client: reqwest::Client::new(),
        }
    }
}

#[derive(Serialize)]
struct Hyperparameters {
    learning_rate: f64,
    batch_size: u32,
    epochs: u32,
    weight_decay: f64,
    gradient_accumulation_steps: u32,
    adam_beta1: f64,
    adam_beta2: f64,
    eval_steps: u32,
    logging_steps: u32,
}

impl From<&FinetuneConfig> for Hyperparameters {
    fn from(config: &FinetuneConfig) -> Self {
        Self {
            learning_rate: config.learning_rate,
            batch_size: config.batch_size,
            epochs: config.epochs,
            weight_decay: config.weight_decay,
            gradient_accumulation_steps: config.gradient_accumulation_steps,
            adam_beta1: config.adam_beta1,
            adam_beta2: config.adam_beta2,
            eval_steps: config.eval_steps,
            logging_steps: config.logging_steps,
        }
    }
}

#[derive(Serialize)]
struct FitRequest<'a> {
    model_id: &'a str,
    hyperparameters: Hyperparameters,
    train: &'a [Example],
    validation: &'a [Example],
}

#[derive(Deserialize)]
struct FitResponse {
    model_ref: String,
}

#[derive(Serialize)]
struct PredictRequest<'a> {
    examples: &'a [Example],
}

#[derive(Deserialize)]
struct PredictResponse {
    predictions: PredictionSet,
}

#[async_trait]
impl Fitter for HttpFitter {
    async fn fit(
        &self,
        dataset: &DatasetDict,
        config: &FinetuneConfig,
    ) -> anyhow::Result<Box<dyn FittedModel>> {
        let url = format!("{}/v1/finetune", self.base_url);
        let body = FitRequest {
            model_id: &config.model_id,
            hyperparameters: Hyperparameters::from(config),
            train: &dataset.train,
            validation: &dataset.validation,
        };
        let resp = self.client.post(&url).json(&body).send().await?;
        if !resp.status().is_success() {
            let status = resp.status();
            let body = resp.text().await.unwrap_or_default();
            anyhow::bail!("fit request failed (status {status}): {body}");
        }
        let parsed: FitResponse = resp.json().await?;
        tracing::debug!(model_ref = %parsed.model_ref, "fitting service accepted the job");
        Ok(Box::new(HttpFittedModel {
            base_url: self.base_url.clone(),
            client: self.client.clone(),
            model_ref: parsed.model_ref,
        }))
    }

    fn provider_name(&self) -> &'static str {
        "http"
    }
}

pub struct HttpFittedModel {
    base_url: String,
    client: reqwest::Client,
    model_ref: String,
}

#[async_trait]
impl FittedModel for HttpFittedModel {
    async fn predict(&self, examples: &[Example]) -> anyhow::Result<PredictionSet> {
        let url = format!("{}/v1/models/{}/predictions", self.base_url, self.model_ref);
        let resp = self
            .client
            .post(&url)
            .json(&PredictRequest { examples })
            .send()
            .await?;
        if !resp.status().is_success() {
            let status = resp.status();
            let body = resp.text().await.unwrap_or_default();
            anyhow::bail!("predict request failed (status {status}): {body}");
        }
        let parsed: PredictResponse = resp.json().await?;
        Ok(parsed.predictions)
    }

    async fn export(&self, dir: &Path) -> anyhow::Result<ModelArtifact> {
        let url = format!("{}/v1/models/{}/artifact", self.base_url, self.model_ref);
        let resp = self.client.get(&url).send().await?;
        if !resp.status().is_success() {
            let status = resp.status();
            anyhow::bail!("artifact download failed (status {status})");
        }
        let bytes = resp.bytes().await?;

        std::fs::create_dir_all(dir)?;
        let path = dir.join(format!("{}.bin", self.model_ref));
        std::fs::write(&path, &bytes)?;
        let sha256 = hex::encode(Sha256::digest(&bytes));
        Ok(ModelArtifact { path, sha256 })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn base_url_is_stripped_of_trailing_slashes() {
        let fitter = HttpFitter::new("http://localhost:8080/");
        assert_eq!(fitter.base_url, "http://localhost:8080");
        assert_eq!(fitter.provider_name(), "http");
    }

    #[test]
    fn hyperparameters_mirror_the_config() {
        let config = FinetuneConfig::default();
        let hp = Hyperparameters::from(&config);
        assert_eq!(hp.learning_rate, config.learning_rate);
        assert_eq!(hp.batch_size, config.batch_size);
        assert_eq!(hp.epochs, config.epochs);
        assert_eq!(hp.eval_steps, config.eval_steps);
    }
}
