//! The training orchestrator. Owns no algorithmic logic: it sequences
//! tracking session → fit → predict → evaluate → persist → optional
//! publish, strictly in that order, and aborts on the first failure.

use crate::config::FinetuneConfig;
use crate::errors::{PipelineError, PipelineResult};
use crate::eval::Evaluator;
use crate::model::{DatasetDict, ScoreReport};
use crate::providers::fitter::Fitter;
use crate::registry::Registry;
use crate::report;
use crate::tracking::{RunMeta, RunOutcome, Tracker, TrackingSession};
use serde_json::json;
use std::sync::Arc;

pub struct Orchestrator {
    fitter: Arc<dyn Fitter>,
    tracker: Arc<dyn Tracker>,
    registry: Arc<dyn Registry>,
}

impl Orchestrator {
    pub fn new(
        fitter: Arc<dyn Fitter>,
        tracker: Arc<dyn Tracker>,
        registry: Arc<dyn Registry>,
    ) -> Self {
        Self {
            fitter,
            tracker,
            registry,
        }
    }

    /// Run the full pipeline for one language. The tracking session is
    /// finished exactly once whether the run completes or aborts; the
    /// score file is written only after successful scoring.
    pub async fn run(
        &self,
        dataset: &DatasetDict,
        language: &str,
        config: &FinetuneConfig,
    ) -> PipelineResult<ScoreReport> {
        config.validate()?;

        let meta = RunMeta::new(
            config.tracking_project.clone(),
            config.tracking_entity.clone(),
            config.model_name(language),
        );
        let mut session = self
            .tracker
            .start_run(&meta, config)
            .map_err(|e| PipelineError::external_service("tracking", e))?;
        tracing::info!(
            run_id = %meta.run_id,
            provider = self.fitter.provider_name(),
            "run started"
        );

        let result = self
            .run_stages(dataset, language, config, session.as_mut())
            .await;
        match result {
            Ok(scores) => {
                session
                    .finish(RunOutcome::Completed)
                    .map_err(|e| PipelineError::external_service("tracking", e))?;
                tracing::info!(em = scores.em, f1 = scores.f1, "run completed");
                Ok(scores)
            }
            Err(err) => {
                if let Err(finish_err) = session.finish(RunOutcome::Aborted) {
                    tracing::warn!("failed to close tracking session: {finish_err}");
                }
                Err(err)
            }
        }
    }

    async fn run_stages(
        &self,
        dataset: &DatasetDict,
        language: &str,
        config: &FinetuneConfig,
        session: &mut dyn TrackingSession,
    ) -> PipelineResult<ScoreReport> {
        session
            .log_event(
                "fit_started",
                json!({
                    "model_id": config.model_id,
                    "train_examples": dataset.train.len(),
                    "validation_examples": dataset.validation.len(),
                }),
            )
            .map_err(|e| PipelineError::external_service("tracking", e))?;

        let fitted = self
            .fitter
            .fit(dataset, config)
            .await
            .map_err(|e| PipelineError::external_service("fitter", e))?;

        let predictions = fitted
            .predict(&dataset.validation)
            .await
            .map_err(|e| PipelineError::external_service("fitter", e))?;

        let evaluator = Evaluator::new(config.no_answer_threshold);
        let scores = evaluator.evaluate(&predictions, &dataset.validation)?;
        session
            .log_event("scored", json!({"em": scores.em, "f1": scores.f1}))
            .map_err(|e| PipelineError::external_service("tracking", e))?;

        let out = config
            .output_dir
            .join(report::score_file_name(&config.model_name(language)));
        report::write_scores(&scores, &out).map_err(|e| {
            PipelineError::configuration(format!(
                "failed to write score report '{}': {e}",
                out.display()
            ))
        })?;

        if config.publish {
            let artifact = fitted
                .export(&config.output_dir)
                .await
                .map_err(|e| PipelineError::external_service("fitter", e))?;
            self.registry
                .publish(&artifact, &config.derived_model_id(language))
                .map_err(|e| PipelineError::external_service("registry", e))?;
        }

        Ok(scores)
    }
}
