//! Ranking and set metrics for recommendations.
//!
//! Items are compared by [`ItemKey`] (the issue URL). The set metrics
//! (precision, recall, F1, coverage) stand in `#<position>` for an item
//! without a key; Hit-Rate and NDCG compare raw keys. Every value is
//! rounded to four decimals.

use std::collections::HashSet;

use indexmap::IndexMap;

use scout_core::features::round_to;
use scout_core::ItemKey;

/// Metric name to value, in reporting order.
pub type MetricResult = IndexMap<String, f64>;

const PLACES: i32 = 4;

fn ratio(numerator: usize, denominator: usize) -> f64 {
    if denominator == 0 {
        0.0
    } else {
        numerator as f64 / denominator as f64
    }
}

/// Keys with the positional fallback used by the set metrics.
fn keyed_set<T: ItemKey>(items: &[T]) -> HashSet<String> {
    items
        .iter()
        .enumerate()
        .map(|(i, item)| match item.item_key() {
            "" => format!("#{i}"),
            key => key.to_string(),
        })
        .collect()
}

fn raw_key_set<T: ItemKey>(items: &[T]) -> HashSet<&str> {
    items.iter().map(ItemKey::item_key).collect()
}

/// Precision, recall and F1 of the predicted set against the truth set.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SetScores {
    pub precision: f64,
    pub recall: f64,
    pub f1: f64,
}

pub fn precision_recall_f1<P: ItemKey, T: ItemKey>(predictions: &[P], truth: &[T]) -> SetScores {
    let predicted = keyed_set(predictions);
    let relevant = keyed_set(truth);

    let true_positives = predicted.intersection(&relevant).count();
    let precision = ratio(true_positives, predicted.len());
    let recall = ratio(true_positives, relevant.len());
    let f1 = if precision + recall > 0.0 {
        2.0 * precision * recall / (precision + recall)
    } else {
        0.0
    };

    SetScores {
        precision: round_to(precision, PLACES),
        recall: round_to(recall, PLACES),
        f1: round_to(f1, PLACES),
    }
}

/// `|top_k ∩ truth| / min(k, |truth|)`; 0 when the truth set is empty.
pub fn hit_rate_at_k<P: ItemKey, T: ItemKey>(predictions: &[P], truth: &[T], k: usize) -> f64 {
    let relevant = raw_key_set(truth);
    let top_k = raw_key_set(&predictions[..k.min(predictions.len())]);
    let hits = top_k.intersection(&relevant).count();
    round_to(ratio(hits, k.min(relevant.len())), PLACES)
}

/// `|top_k ∩ truth| / k`; 0 when `k` is 0.
pub fn precision_at_k<P: ItemKey, T: ItemKey>(predictions: &[P], truth: &[T], k: usize) -> f64 {
    let relevant = raw_key_set(truth);
    let top_k = raw_key_set(&predictions[..k.min(predictions.len())]);
    let hits = top_k.intersection(&relevant).count();
    round_to(ratio(hits, k), PLACES)
}

/// Binary-relevance NDCG over the first `k` predictions.
///
/// A hit at 0-indexed rank `i` adds `1 / log2(i + 2)`. Each relevant key
/// counts once, so repeated predictions cannot push the score above 1.
pub fn ndcg_at_k<P: ItemKey, T: ItemKey>(predictions: &[P], truth: &[T], k: usize) -> f64 {
    let relevant = raw_key_set(truth);
    let mut seen: HashSet<&str> = HashSet::new();

    let mut dcg = 0.0;
    for (i, prediction) in predictions.iter().take(k).enumerate() {
        let key = prediction.item_key();
        if relevant.contains(key) && seen.insert(key) {
            dcg += discount(i);
        }
    }
    let ideal: f64 = (0..k.min(relevant.len())).map(discount).sum();

    if ideal > 0.0 {
        round_to(dcg / ideal, PLACES)
    } else {
        0.0
    }
}

fn discount(rank: usize) -> f64 {
    1.0 / (rank as f64 + 2.0).log2()
}

/// `|predicted| / |truth|` over keyed sets; 0 when the truth set is empty.
pub fn coverage<P: ItemKey, T: ItemKey>(predictions: &[P], truth: &[T]) -> f64 {
    round_to(
        ratio(keyed_set(predictions).len(), keyed_set(truth).len()),
        PLACES,
    )
}

/// The full metric set for one prediction list.
///
/// Keys: `precision`, `recall`, `f1_score`, `hit_rate_{k}` per cutoff,
/// `ndcg_{k}` per cutoff, `coverage`.
pub fn calculate_metrics<P: ItemKey, T: ItemKey>(
    predictions: &[P],
    truth: &[T],
    k_values: &[usize],
) -> MetricResult {
    let scores = precision_recall_f1(predictions, truth);
    let mut metrics = MetricResult::new();
    metrics.insert("precision".to_string(), scores.precision);
    metrics.insert("recall".to_string(), scores.recall);
    metrics.insert("f1_score".to_string(), scores.f1);
    for &k in k_values {
        metrics.insert(format!("hit_rate_{k}"), hit_rate_at_k(predictions, truth, k));
    }
    for &k in k_values {
        metrics.insert(format!("ndcg_{k}"), ndcg_at_k(predictions, truth, k));
    }
    metrics.insert("coverage".to_string(), coverage(predictions, truth));
    metrics
}
