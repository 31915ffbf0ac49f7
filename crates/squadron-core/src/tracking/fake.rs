//! In-memory tracker for orchestrator tests: captures events and the
//! finish outcome so tests can assert the session lifecycle.

use super::{RunMeta, RunOutcome, Tracker, TrackingSession};
use crate::config::FinetuneConfig;
use std::sync::{Arc, Mutex};

#[derive(Debug, Default)]
pub struct Recorded {
    pub events: Vec<(String, serde_json::Value)>,
    pub finished: Option<RunOutcome>,
}

#[derive(Default, Clone)]
pub struct MemoryTracker {
    recorded: Arc<Mutex<Recorded>>,
}

impl MemoryTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn recorded(&self) -> std::sync::MutexGuard<'_, Recorded> {
        self.recorded.lock().expect("tracker mutex")
    }
}

impl Tracker for MemoryTracker {
    fn start_run(
        &self,
        _meta: &RunMeta,
        _config: &FinetuneConfig,
    ) -> anyhow::Result<Box<dyn TrackingSession>> {
        Ok(Box::new(MemorySession {
            recorded: self.recorded.clone(),
        }))
    }
}

struct MemorySession {
    recorded: Arc<Mutex<Recorded>>,
}

impl TrackingSession for MemorySession {
    fn log_event(&mut self, name: &str, fields: serde_json::Value) -> anyhow::Result<()> {
        self.recorded
            .lock()
            .expect("tracker mutex")
            .events
            .push((name.to_string(), fields));
        Ok(())
    }

    fn finish(self: Box<Self>, outcome: RunOutcome) -> anyhow::Result<()> {
        self.recorded.lock().expect("tracker mutex").finished = Some(outcome);
        Ok(())
    }
}
