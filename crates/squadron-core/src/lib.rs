//! Core pipeline for fine-tuning and evaluating extractive QA models.
//!
//! The optimization loop, tokenization and span postprocessing live behind
//! the [`providers::fitter::Fitter`] seam; this crate owns configuration,
//! dataset loading, prediction/reference reconciliation, EM/F1 scoring,
//! score-report persistence and experiment tracking.

pub mod config;
pub mod dataset;
pub mod engine;
pub mod errors;
pub mod eval;
pub mod model;
pub mod providers;
pub mod registry;
pub mod report;
pub mod tracking;

pub use config::FinetuneConfig;
pub use errors::{PipelineError, PipelineResult};
pub use model::ScoreReport;
