//! File-backed tracker: one JSONL event log per run under a tracking
//! directory, opened at run start and closed with a terminal
//! `run_finished` event.

use super::{RunMeta, RunOutcome, Tracker, TrackingSession};
use crate::config::FinetuneConfig;
use chrono::Utc;
use serde_json::json;
use std::fs::{File, OpenOptions};
use std::io::{BufWriter, Write};
use std::path::PathBuf;

pub struct JsonlTracker {
    dir: PathBuf,
}

impl JsonlTracker {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }
}

impl Tracker for JsonlTracker {
    fn start_run(
        &self,
        meta: &RunMeta,
        config: &FinetuneConfig,
    ) -> anyhow::Result<Box<dyn TrackingSession>> {
        std::fs::create_dir_all(&self.dir)?;
        let path = self.dir.join(format!("{}.jsonl", meta.run_id));
        let file = OpenOptions::new().create_new(true).write(true).open(&path)?;
        let mut session = JsonlSession {
            writer: BufWriter::new(file),
        };
        session.write_line(json!({
            "ts": Utc::now().to_rfc3339(),
            "event": "run_started",
            "project": meta.project,
            "entity": meta.entity,
            "run_id": meta.run_id,
            "run_name": meta.run_name,
            "config": serde_json::to_value(config)?,
        }))?;
        tracing::debug!(path = %path.display(), "tracking session opened");
        Ok(Box::new(session))
    }
}

struct JsonlSession {
    writer: BufWriter<File>,
}

impl JsonlSession {
    fn write_line(&mut self, value: serde_json::Value) -> anyhow::Result<()> {
        writeln!(self.writer, "{value}")?;
        Ok(())
    }
}

impl TrackingSession for JsonlSession {
    fn log_event(&mut self, name: &str, fields: serde_json::Value) -> anyhow::Result<()> {
        self.write_line(json!({
            "ts": Utc::now().to_rfc3339(),
            "event": name,
            "fields": fields,
        }))
    }

    fn finish(mut self: Box<Self>, outcome: RunOutcome) -> anyhow::Result<()> {
        self.write_line(json!({
            "ts": Utc::now().to_rfc3339(),
            "event": "run_finished",
            "outcome": outcome,
        }))?;
        self.writer.flush()?;
        Ok(())
    }
}
