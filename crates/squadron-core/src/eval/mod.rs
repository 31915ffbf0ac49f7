//! The evaluator: reconcile predictions with reference examples by id,
//! then aggregate per-example exact-match and F1 into a [`ScoreReport`].

pub mod normalize;
pub mod score;

use crate::errors::{PipelineError, PipelineResult};
use crate::model::{Example, PredictionSet, ScoreReport, SpanPrediction};
use std::collections::HashMap;

pub use normalize::normalize_answer;

#[derive(Debug, Clone, Copy)]
pub struct Evaluator {
    /// Predictions whose no-answer probability exceeds this are scored as
    /// empty ("no answer").
    pub no_answer_threshold: f64,
}

impl Evaluator {
    pub fn new(no_answer_threshold: f64) -> Self {
        Self {
            no_answer_threshold,
        }
    }

    /// Match predictions to references by id. Strict in both directions:
    /// a prediction without a reference, a reference without a prediction,
    /// or a duplicated reference id is a [`PipelineError::MismatchedId`].
    /// On success the pairs cover every reference exactly once, in
    /// reference order.
    pub fn reconcile<'a>(
        &self,
        predictions: &'a PredictionSet,
        references: &'a [Example],
    ) -> PipelineResult<Vec<(&'a SpanPrediction, &'a Example)>> {
        let mut by_id: HashMap<&str, &Example> = HashMap::with_capacity(references.len());
        for example in references {
            if by_id.insert(example.id.as_str(), example).is_some() {
                return Err(PipelineError::mismatched_id(
                    &example.id,
                    "duplicate reference id",
                ));
            }
        }
        for id in predictions.keys() {
            if !by_id.contains_key(id.as_str()) {
                return Err(PipelineError::mismatched_id(
                    id,
                    "prediction does not match any reference example",
                ));
            }
        }

        let mut pairs = Vec::with_capacity(references.len());
        for example in references {
            let prediction = predictions.get(&example.id).ok_or_else(|| {
                PipelineError::mismatched_id(&example.id, "reference example has no prediction")
            })?;
            pairs.push((prediction, example));
        }
        Ok(pairs)
    }

    /// Mean per-example EM and F1 over the pairs, scaled to [0, 100].
    /// Order-independent. An empty pair set scores 0/0.
    pub fn score(&self, pairs: &[(&SpanPrediction, &Example)]) -> ScoreReport {
        if pairs.is_empty() {
            return ScoreReport { em: 0.0, f1: 0.0 };
        }
        let mut em_total = 0.0;
        let mut f1_total = 0.0;
        for (prediction, example) in pairs {
            let effective = if prediction.no_answer_probability > self.no_answer_threshold {
                ""
            } else {
                prediction.text.as_str()
            };
            let (em, f1) = score::per_example_scores(effective, &example.answers.text);
            em_total += em;
            f1_total += f1;
        }
        let n = pairs.len() as f64;
        ScoreReport {
            em: 100.0 * em_total / n,
            f1: 100.0 * f1_total / n,
        }
    }

    /// `reconcile` + `score` in one call.
    pub fn evaluate(
        &self,
        predictions: &PredictionSet,
        references: &[Example],
    ) -> PipelineResult<ScoreReport> {
        let pairs = self.reconcile(predictions, references)?;
        Ok(self.score(&pairs))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Answers;

    fn example(id: &str, answer_texts: &[&str]) -> Example {
        Example {
            id: id.to_string(),
            question: format!("question for {id}"),
            context: "some context".to_string(),
            answers: Answers {
                text: answer_texts.iter().map(|s| s.to_string()).collect(),
                answer_start: answer_texts.iter().map(|_| 0).collect(),
            },
        }
    }

    fn predictions(entries: &[(&str, &str)]) -> PredictionSet {
        entries
            .iter()
            .map(|(id, text)| (id.to_string(), SpanPrediction::new(*text)))
            .collect()
    }

    #[test]
    fn reconcile_pairs_every_reference_exactly_once() {
        let refs = vec![example("q1", &["Paris"]), example("q2", &["Oslo"])];
        let preds = predictions(&[("q2", "Oslo"), ("q1", "Paris")]);
        let evaluator = Evaluator::new(0.0);

        let pairs = evaluator.reconcile(&preds, &refs).unwrap();
        assert_eq!(pairs.len(), refs.len());
        let ids: Vec<&str> = pairs.iter().map(|(_, e)| e.id.as_str()).collect();
        assert_eq!(ids, vec!["q1", "q2"]);
    }

    #[test]
    fn reconcile_rejects_unknown_prediction_id() {
        let refs = vec![example("q1", &["Paris"])];
        let preds = predictions(&[("q1", "Paris"), ("q99", "Oslo")]);
        let err = Evaluator::new(0.0).reconcile(&preds, &refs).unwrap_err();
        assert!(err.is_mismatched_id());
        assert!(err.to_string().contains("q99"));
    }

    #[test]
    fn reconcile_rejects_missing_prediction() {
        let refs = vec![example("q1", &["Paris"]), example("q2", &["Oslo"])];
        let preds = predictions(&[("q1", "Paris")]);
        let err = Evaluator::new(0.0).reconcile(&preds, &refs).unwrap_err();
        assert!(err.is_mismatched_id());
        assert!(err.to_string().contains("q2"));
    }

    #[test]
    fn reconcile_rejects_duplicate_reference_ids() {
        let refs = vec![example("q1", &["Paris"]), example("q1", &["Oslo"])];
        let preds = predictions(&[("q1", "Paris")]);
        let err = Evaluator::new(0.0).reconcile(&preds, &refs).unwrap_err();
        assert!(err.is_mismatched_id());
    }

    #[test]
    fn perfect_prediction_scores_one_hundred() {
        let refs = vec![example("q1", &["Paris"])];
        let preds = predictions(&[("q1", "Paris")]);
        let report = Evaluator::new(0.0).evaluate(&preds, &refs).unwrap();
        assert_eq!(report.em, 100.0);
        assert_eq!(report.f1, 100.0);
    }

    #[test]
    fn normalization_applies_to_both_sides() {
        let refs = vec![example("q2", &["Paris", "paris, France"])];
        let preds = predictions(&[("q2", "paris")]);
        let report = Evaluator::new(0.0).evaluate(&preds, &refs).unwrap();
        assert_eq!(report.em, 100.0);
        assert_eq!(report.f1, 100.0);
    }

    #[test]
    fn unanswerable_with_empty_prediction_scores_one_hundred() {
        let refs = vec![example("q3", &[])];
        let preds = predictions(&[("q3", "")]);
        let report = Evaluator::new(0.0).evaluate(&preds, &refs).unwrap();
        assert_eq!(report.em, 100.0);
        assert_eq!(report.f1, 100.0);
    }

    #[test]
    fn one_right_one_wrong_averages_to_fifty() {
        let refs = vec![example("q1", &["Paris"]), example("q2", &["Oslo"])];
        let preds = predictions(&[("q1", "Paris"), ("q2", "Bergen")]);
        let report = Evaluator::new(0.0).evaluate(&preds, &refs).unwrap();
        assert_eq!(report.em, 50.0);
        assert_eq!(report.f1, 50.0);
    }

    #[test]
    fn score_is_order_independent() {
        let refs_a = vec![
            example("q1", &["Paris"]),
            example("q2", &["Oslo"]),
            example("q3", &[]),
        ];
        let mut refs_b = refs_a.clone();
        refs_b.reverse();
        let preds = predictions(&[("q1", "Paris"), ("q2", "Bergen"), ("q3", "")]);

        let evaluator = Evaluator::new(0.0);
        let a = evaluator.evaluate(&preds, &refs_a).unwrap();
        let b = evaluator.evaluate(&preds, &refs_b).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn no_answer_threshold_blanks_confident_no_answer_predictions() {
        let refs = vec![example("q1", &[])];
        let mut preds = PredictionSet::new();
        preds.insert(
            "q1".to_string(),
            SpanPrediction {
                text: "spurious span".to_string(),
                no_answer_probability: 0.9,
            },
        );

        // Threshold above the probability: the span is kept and misses.
        let report = Evaluator::new(0.95).evaluate(&preds, &refs).unwrap();
        assert_eq!(report.em, 0.0);

        // Threshold below the probability: the prediction becomes empty.
        let report = Evaluator::new(0.5).evaluate(&preds, &refs).unwrap();
        assert_eq!(report.em, 100.0);
        assert_eq!(report.f1, 100.0);
    }

    #[test]
    fn empty_reference_set_scores_zero() {
        let report = Evaluator::new(0.0)
            .evaluate(&PredictionSet::new(), &[])
            .unwrap();
        assert_eq!(report.em, 0.0);
        assert_eq!(report.f1, 0.0);
    }
}
