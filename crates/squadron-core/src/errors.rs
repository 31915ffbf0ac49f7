//! Error taxonomy for the pipeline. No variant is retried; every failure
//! aborts the run and is surfaced to the caller.

use std::fmt::Display;
use std::path::{Path, PathBuf};
use thiserror::Error;

pub type PipelineResult<T> = Result<T, PipelineError>;

#[derive(Debug, Error)]
pub enum PipelineError {
    /// Missing or invalid CLI/config input.
    #[error("config error: {detail}")]
    Configuration { detail: String },

    /// Malformed example record in a dataset file.
    #[error("{}:{line}: malformed example: {detail}", .path.display())]
    DataFormat {
        path: PathBuf,
        line: usize,
        detail: String,
    },

    /// Prediction/reference id sets disagree.
    #[error("id mismatch for '{id}': {detail}")]
    MismatchedId { id: String, detail: String },

    /// A collaborator (fitter, tracker, registry) failed.
    #[error("{service} service error: {detail}")]
    ExternalService { service: String, detail: String },
}

impl PipelineError {
    pub fn configuration(detail: impl Into<String>) -> Self {
        Self::Configuration {
            detail: detail.into(),
        }
    }

    pub fn data_format(path: &Path, line: usize, detail: impl Into<String>) -> Self {
        Self::DataFormat {
            path: path.to_path_buf(),
            line,
            detail: detail.into(),
        }
    }

    pub fn mismatched_id(id: impl Into<String>, detail: impl Into<String>) -> Self {
        Self::MismatchedId {
            id: id.into(),
            detail: detail.into(),
        }
    }

    pub fn external_service(service: impl Into<String>, err: impl Display) -> Self {
        Self::ExternalService {
            service: service.into(),
            detail: err.to_string(),
        }
    }

    pub fn is_mismatched_id(&self) -> bool {
        matches!(self, Self::MismatchedId { .. })
    }

    /// Suggested exit code for the CLI.
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::MismatchedId { .. } => 1,
            Self::Configuration { .. } | Self::DataFormat { .. } => 2,
            Self::ExternalService { .. } => 3,
        }
    }
}
