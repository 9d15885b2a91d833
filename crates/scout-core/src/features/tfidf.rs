//! TF-IDF term weighting over one batch of documents.

use std::collections::{BTreeSet, HashMap};

use indexmap::IndexMap;

use super::text::tokenize;

/// Term weights of one document, in first-occurrence order.
pub type TermWeights = IndexMap<String, f64>;

/// Vocabulary and IDF table fitted on a single batch.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TfIdfModel {
    vocabulary: BTreeSet<String>,
    idf: HashMap<String, f64>,
    n_docs: usize,
}

impl TfIdfModel {
    /// Fit on `documents` and return the weights of every document.
    ///
    /// `idf = ln(n_docs / (df + 1)) + 1`; weight = raw term frequency × idf.
    /// Empty documents yield empty weight maps but still count toward
    /// `n_docs`.
    pub fn fit_transform<S: AsRef<str>>(documents: &[S]) -> (Self, Vec<TermWeights>) {
        let mut doc_frequency: HashMap<String, usize> = HashMap::new();
        let mut term_frequencies: Vec<IndexMap<String, usize>> = Vec::with_capacity(documents.len());

        for doc in documents {
            let mut tf: IndexMap<String, usize> = IndexMap::new();
            for word in tokenize(doc.as_ref()) {
                *tf.entry(word).or_insert(0) += 1;
            }
            for word in tf.keys() {
                *doc_frequency.entry(word.clone()).or_insert(0) += 1;
            }
            term_frequencies.push(tf);
        }

        let n_docs = documents.len();
        let idf: HashMap<String, f64> = doc_frequency
            .iter()
            .map(|(word, df)| {
                let weight = (n_docs as f64 / (*df as f64 + 1.0)).ln() + 1.0;
                (word.clone(), weight)
            })
            .collect();

        let model = Self {
            vocabulary: doc_frequency.into_keys().collect(),
            idf,
            n_docs,
        };
        let weights = term_frequencies
            .into_iter()
            .map(|tf| {
                tf.into_iter()
                    .map(|(word, freq)| {
                        let w = freq as f64 * model.idf(&word);
                        (word, w)
                    })
                    .collect()
            })
            .collect();
        (model, weights)
    }

    pub fn vocabulary(&self) -> &BTreeSet<String> {
        &self.vocabulary
    }

    /// IDF of `term`; `1.0` for terms outside the vocabulary.
    pub fn idf(&self, term: &str) -> f64 {
        self.idf.get(term).copied().unwrap_or(1.0)
    }

    pub fn n_docs(&self) -> usize {
        self.n_docs
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_idf_formula() {
        let docs = ["fix parser", "fix lexer", "docs"];
        let (model, _) = TfIdfModel::fit_transform(&docs);
        // "fix" appears in 2 of 3 documents
        let expected = (3.0f64 / 3.0).ln() + 1.0;
        assert!((model.idf("fix") - expected).abs() < 1e-12);
        let rare = (3.0f64 / 2.0).ln() + 1.0;
        assert!((model.idf("parser") - rare).abs() < 1e-12);
    }

    #[test]
    fn test_weight_is_term_frequency_times_idf() {
        let docs = ["bug bug report", "feature"];
        let (model, weights) = TfIdfModel::fit_transform(&docs);
        let bug = weights[0]["bug"];
        assert!((bug - 2.0 * model.idf("bug")).abs() < 1e-12);
        let keys: Vec<&str> = weights[0].keys().map(String::as_str).collect();
        assert_eq!(keys, vec!["bug", "report"]);
    }

    #[test]
    fn test_empty_documents() {
        let docs = ["", "word"];
        let (model, weights) = TfIdfModel::fit_transform(&docs);
        assert!(weights[0].is_empty());
        assert_eq!(model.n_docs(), 2);
        assert_eq!(model.vocabulary().len(), 1);
    }

    #[test]
    fn test_empty_batch() {
        let docs: [&str; 0] = [];
        let (model, weights) = TfIdfModel::fit_transform(&docs);
        assert!(weights.is_empty());
        assert!(model.vocabulary().is_empty());
        assert_eq!(model.idf("anything"), 1.0);
    }
}
