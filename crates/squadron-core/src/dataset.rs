//! Line-delimited JSON dataset loading. One `Example` object per line,
//! grouped into named splits on disk as
//! `<data_dir>/squad_v2-<split>-<language>.jsonl`.
//!
//! Loading is strict: a malformed record, a shape violation, or a duplicate
//! id aborts the run instead of being skipped, so data-pipeline bugs are
//! never masked.

use crate::errors::{PipelineError, PipelineResult};
use crate::model::{DatasetDict, Example};
use std::collections::HashSet;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};

pub const DATASET_PREFIX: &str = "squad_v2";

pub fn split_path(data_dir: &Path, split: &str, language: &str) -> PathBuf {
    data_dir.join(format!("{DATASET_PREFIX}-{split}-{language}.jsonl"))
}

pub fn load_dataset_dict(data_dir: &Path, language: &str) -> PipelineResult<DatasetDict> {
    let train = load_split(&split_path(data_dir, "train", language))?;
    let validation = load_split(&split_path(data_dir, "validation", language))?;
    tracing::info!(
        train = train.len(),
        validation = validation.len(),
        language,
        "datasets loaded"
    );
    Ok(DatasetDict { train, validation })
}

pub fn load_split(path: &Path) -> PipelineResult<Vec<Example>> {
    let file = File::open(path).map_err(|e| {
        PipelineError::configuration(format!("failed to open dataset '{}': {e}", path.display()))
    })?;
    let reader = BufReader::new(file);

    let mut seen_ids: HashSet<String> = HashSet::new();
    let mut examples = Vec::new();
    for (idx, line) in reader.lines().enumerate() {
        let line_no = idx + 1;
        let line = line
            .map_err(|e| PipelineError::data_format(path, line_no, format!("read error: {e}")))?;
        if line.trim().is_empty() {
            continue;
        }
        let example: Example = serde_json::from_str(&line).map_err(|e| {
            PipelineError::data_format(
                path,
                line_no,
                format!(
                    "{e}; content: {}",
                    line.chars().take(50).collect::<String>()
                ),
            )
        })?;
        validate_example(&example, path, line_no)?;
        if !seen_ids.insert(example.id.clone()) {
            return Err(PipelineError::data_format(
                path,
                line_no,
                format!("duplicate example id '{}'", example.id),
            ));
        }
        examples.push(example);
    }
    Ok(examples)
}

fn validate_example(example: &Example, path: &Path, line_no: usize) -> PipelineResult<()> {
    if example.id.is_empty() {
        return Err(PipelineError::data_format(
            path,
            line_no,
            "example id must not be empty",
        ));
    }
    if example.answers.text.len() != example.answers.answer_start.len() {
        return Err(PipelineError::data_format(
            path,
            line_no,
            format!(
                "answers text/answer_start length mismatch ({} vs {})",
                example.answers.text.len(),
                example.answers.answer_start.len()
            ),
        ));
    }
    Ok(())
}
