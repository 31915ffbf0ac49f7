//! Per-example exact-match and token-overlap F1.

use super::normalize::normalize_answer;
use std::collections::HashMap;

/// EM and F1 for one example, each in [0, 1]. Both take the maximum over
/// all reference answers. Reference answers that normalize to the empty
/// string do not count as answers; an example whose references all
/// normalize empty is scored as unanswerable (1 when the prediction is
/// empty too, else 0).
pub fn per_example_scores(prediction: &str, reference_answers: &[String]) -> (f64, f64) {
    let pred = normalize_answer(prediction);
    let golds: Vec<String> = reference_answers
        .iter()
        .map(|a| normalize_answer(a))
        .filter(|a| !a.is_empty())
        .collect();

    if golds.is_empty() {
        let hit = if pred.is_empty() { 1.0 } else { 0.0 };
        return (hit, hit);
    }

    let mut em = 0.0;
    let mut f1: f64 = 0.0;
    for gold in &golds {
        if *gold == pred {
            em = 1.0;
        }
        f1 = f1.max(token_f1(&pred, gold));
    }
    (em, f1)
}

/// Harmonic mean of token precision and recall, with multiset overlap.
/// Inputs are already normalized.
fn token_f1(pred: &str, gold: &str) -> f64 {
    let pred_tokens: Vec<&str> = pred.split_whitespace().collect();
    let gold_tokens: Vec<&str> = gold.split_whitespace().collect();
    if pred_tokens.is_empty() || gold_tokens.is_empty() {
        return if pred_tokens == gold_tokens { 1.0 } else { 0.0 };
    }

    let mut remaining: HashMap<&str, usize> = HashMap::new();
    for token in &gold_tokens {
        *remaining.entry(token).or_default() += 1;
    }
    let mut overlap = 0usize;
    for token in &pred_tokens {
        if let Some(count) = remaining.get_mut(token) {
            if *count > 0 {
                *count -= 1;
                overlap += 1;
            }
        }
    }
    if overlap == 0 {
        return 0.0;
    }
    let precision = overlap as f64 / pred_tokens.len() as f64;
    let recall = overlap as f64 / gold_tokens.len() as f64;
    2.0 * precision * recall / (precision + recall)
}
