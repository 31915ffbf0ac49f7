//! Run configuration: named, typed fields with documented defaults,
//! optionally overlaid from a YAML file. Unknown keys are rejected so a
//! typo never silently falls back to a default.

use crate::errors::{PipelineError, PipelineResult};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FinetuneConfig {
    /// Pretrained checkpoint handed to the fitting service.
    pub model_id: String,
    pub learning_rate: f64,
    pub batch_size: u32,
    pub epochs: u32,
    pub weight_decay: f64,
    pub gradient_accumulation_steps: u32,
    pub adam_beta1: f64,
    pub adam_beta2: f64,
    /// Evaluate on the validation split every this many optimizer steps.
    pub eval_steps: u32,
    pub logging_steps: u32,
    /// Predictions with a no-answer probability above this are treated as
    /// empty ("no answer") during scoring.
    pub no_answer_threshold: f64,
    /// Publish the fitted model to the registry after a successful run.
    pub publish: bool,
    /// Namespace prefix for published model ids.
    pub namespace: String,
    pub tracking_project: String,
    pub tracking_entity: Option<String>,
    pub data_dir: PathBuf,
    pub output_dir: PathBuf,
    pub tracking_dir: PathBuf,
    pub registry_dir: PathBuf,
}

impl Default for FinetuneConfig {
    fn default() -> Self {
        Self {
            model_id: "xlm-roberta-base".to_string(),
            learning_rate: 2e-5,
            batch_size: 8,
            epochs: 3,
            weight_decay: 0.01,
            gradient_accumulation_steps: 4,
            adam_beta1: 0.9,
            adam_beta2: 0.999,
            eval_steps: 1000,
            logging_steps: 100,
            no_answer_threshold: 0.0,
            publish: false,
            namespace: "squadron".to_string(),
            tracking_project: "squadron".to_string(),
            tracking_entity: None,
            data_dir: PathBuf::from("datasets"),
            output_dir: PathBuf::from("."),
            tracking_dir: PathBuf::from(".squadron/runs"),
            registry_dir: PathBuf::from(".squadron/registry"),
        }
    }
}

impl FinetuneConfig {
    /// Defaults when `path` is `None`, otherwise the YAML overlay at `path`.
    pub fn load(path: Option<&Path>) -> PipelineResult<Self> {
        let Some(path) = path else {
            return Ok(Self::default());
        };
        let raw = std::fs::read_to_string(path).map_err(|e| {
            PipelineError::configuration(format!(
                "failed to read config '{}': {e}",
                path.display()
            ))
        })?;
        let config: Self = serde_yaml::from_str(&raw).map_err(|e| {
            PipelineError::configuration(format!(
                "failed to parse config '{}': {e}",
                path.display()
            ))
        })?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> PipelineResult<()> {
        if self.model_id.is_empty() {
            return Err(PipelineError::configuration("model_id must not be empty"));
        }
        if !self.learning_rate.is_finite() || self.learning_rate <= 0.0 {
            return Err(PipelineError::configuration(format!(
                "learning_rate must be positive, got {}",
                self.learning_rate
            )));
        }
        if self.batch_size == 0 {
            return Err(PipelineError::configuration("batch_size must be positive"));
        }
        if self.epochs == 0 {
            return Err(PipelineError::configuration("epochs must be positive"));
        }
        if self.gradient_accumulation_steps == 0 {
            return Err(PipelineError::configuration(
                "gradient_accumulation_steps must be positive",
            ));
        }
        if !(0.0..=1.0).contains(&self.no_answer_threshold) {
            return Err(PipelineError::configuration(format!(
                "no_answer_threshold must be within [0, 1], got {}",
                self.no_answer_threshold
            )));
        }
        Ok(())
    }

    /// Output model name for a language, e.g. `xlm-roberta-base-squad-da`.
    pub fn model_name(&self, language: &str) -> String {
        let stem = self
            .model_id
            .rsplit('/')
            .next()
            .unwrap_or(self.model_id.as_str());
        format!("{stem}-squad-{language}")
    }

    /// Fully-qualified id the model is published under.
    pub fn derived_model_id(&self, language: &str) -> String {
        format!("{}/{}", self.namespace, self.model_name(language))
    }
}
