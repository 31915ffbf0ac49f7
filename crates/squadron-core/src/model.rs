use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::PathBuf;

/// Reference answers for one example. Empty `text` marks the example as
/// unanswerable. `text` and `answer_start` are index-aligned.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Answers {
    pub text: Vec<String>,
    pub answer_start: Vec<u32>,
}

/// One SQuAD-style record: a question over a context plus its reference
/// answers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Example {
    pub id: String,
    pub question: String,
    pub context: String,
    pub answers: Answers,
}

impl Example {
    pub fn is_unanswerable(&self) -> bool {
        self.answers.text.is_empty()
    }
}

/// A model's answer for one example. An empty `text` denotes "no answer".
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SpanPrediction {
    pub text: String,
    /// Model-estimated likelihood that the question is unanswerable.
    #[serde(default)]
    pub no_answer_probability: f64,
}

impl SpanPrediction {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            no_answer_probability: 0.0,
        }
    }
}

/// Predictions keyed by example id. BTreeMap keeps iteration deterministic
/// for artifacts and tests.
pub type PredictionSet = BTreeMap<String, SpanPrediction>;

/// Terminal artifact of a run. Both scores are percentages in [0, 100].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScoreReport {
    pub em: f64,
    pub f1: f64,
}

/// Train/validation splits, loaded once per run and immutable afterwards.
#[derive(Debug, Clone, Default)]
pub struct DatasetDict {
    pub train: Vec<Example>,
    pub validation: Vec<Example>,
}

/// Exported model weights plus their checksum, as produced by a fitted
/// model and consumed by a registry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModelArtifact {
    pub path: PathBuf,
    pub sha256: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn example_roundtrips_through_json() {
        let line = r#"{"id":"q1","question":"Where?","context":"In Paris.","answers":{"text":["Paris"],"answer_start":[3]}}"#;
        let ex: Example = serde_json::from_str(line).unwrap();
        assert_eq!(ex.id, "q1");
        assert_eq!(ex.answers.text, vec!["Paris"]);
        assert!(!ex.is_unanswerable());

        let back = serde_json::to_string(&ex).unwrap();
        let again: Example = serde_json::from_str(&back).unwrap();
        assert_eq!(ex, again);
    }

    #[test]
    fn missing_answers_field_is_rejected() {
        let line = r#"{"id":"q1","question":"Where?","context":"In Paris."}"#;
        assert!(serde_json::from_str::<Example>(line).is_err());
    }

    #[test]
    fn prediction_defaults_no_answer_probability_to_zero() {
        let p: SpanPrediction = serde_json::from_str(r#"{"text":"Paris"}"#).unwrap();
        assert_eq!(p.no_answer_probability, 0.0);
    }
}
