//! Model registry seam: publish a fitted model artifact under a derived
//! model id. The shipped implementation is a local content-addressed
//! directory; remote registries implement the same trait.

use crate::model::ModelArtifact;
use chrono::Utc;
use serde_json::json;
use std::path::PathBuf;

pub trait Registry: Send + Sync {
    fn publish(&self, artifact: &ModelArtifact, model_id: &str) -> anyhow::Result<()>;
}

pub struct LocalRegistry {
    root: PathBuf,
}

impl LocalRegistry {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn model_dir(&self, model_id: &str) -> PathBuf {
        self.root.join(model_id)
    }
}

impl Registry for LocalRegistry {
    fn publish(&self, artifact: &ModelArtifact, model_id: &str) -> anyhow::Result<()> {
        let dest_dir = self.model_dir(model_id);
        std::fs::create_dir_all(&dest_dir)?;

        let file_name = artifact
            .path
            .file_name()
            .ok_or_else(|| anyhow::anyhow!("artifact path has no file name: {}", artifact.path.display()))?;
        std::fs::copy(&artifact.path, dest_dir.join(file_name))?;

        let manifest = json!({
            "model_id": model_id,
            "sha256": artifact.sha256,
            "file": file_name.to_string_lossy(),
            "published_at": Utc::now().to_rfc3339(),
        });
        std::fs::write(
            dest_dir.join("manifest.json"),
            serde_json::to_string_pretty(&manifest)?,
        )?;
        tracing::info!(model_id, "model published");
        Ok(())
    }
}
