//! Score-report persistence. The file is written atomically (temp file in
//! the target directory, then persist), so a failed run never leaves a
//! partial report behind.

use crate::model::ScoreReport;
use std::io::Write;
use std::path::Path;

pub fn score_file_name(model_name: &str) -> String {
    format!("{model_name}-scores.json")
}

pub fn write_scores(report: &ScoreReport, out: &Path) -> anyhow::Result<()> {
    let dir = match out.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    std::fs::create_dir_all(dir)?;
    let mut tmp = tempfile::NamedTempFile::new_in(dir)?;
    tmp.write_all(serde_json::to_string_pretty(report)?.as_bytes())?;
    tmp.persist(out)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn written_report_parses_back() {
        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("xlm-roberta-base-squad-da-scores.json");
        let report = ScoreReport { em: 62.5, f1: 71.25 };

        write_scores(&report, &out).unwrap();

        let parsed: ScoreReport =
            serde_json::from_str(&std::fs::read_to_string(&out).unwrap()).unwrap();
        assert_eq!(parsed, report);
        // Only the report itself is left in the directory.
        assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 1);
    }

    #[test]
    fn missing_parent_directories_are_created() {
        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("nested/out/scores.json");
        write_scores(&ScoreReport { em: 0.0, f1: 0.0 }, &out).unwrap();
        assert!(out.exists());
    }

    #[test]
    fn file_name_derives_from_the_model_name() {
        assert_eq!(
            score_file_name("xlm-roberta-base-squad-da"),
            "xlm-roberta-base-squad-da-scores.json"
        );
    }
}
