//! Experiment tracking. The session handle is passed explicitly through
//! the orchestrator (no global singleton) and is finished exactly once on
//! every exit path.

pub mod fake;
pub mod jsonl;

use crate::config::FinetuneConfig;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

pub use fake::MemoryTracker;
pub use jsonl::JsonlTracker;

/// Identity of one tracked run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunMeta {
    pub project: String,
    pub entity: Option<String>,
    pub run_id: String,
    pub run_name: String,
    pub started_at: DateTime<Utc>,
}

impl RunMeta {
    pub fn new(project: impl Into<String>, entity: Option<String>, run_name: impl Into<String>) -> Self {
        Self {
            project: project.into(),
            entity,
            run_id: Uuid::new_v4().to_string(),
            run_name: run_name.into(),
            started_at: Utc::now(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RunOutcome {
    Completed,
    Aborted,
}

pub trait Tracker: Send + Sync {
    /// Open a session for one run, recording the full config record.
    fn start_run(
        &self,
        meta: &RunMeta,
        config: &FinetuneConfig,
    ) -> anyhow::Result<Box<dyn TrackingSession>>;
}

pub trait TrackingSession: Send {
    fn log_event(&mut self, name: &str, fields: serde_json::Value) -> anyhow::Result<()>;

    /// Consumes the session; it cannot be finished twice.
    fn finish(self: Box<Self>, outcome: RunOutcome) -> anyhow::Result<()>;
}
