// LexRank: sentence centrality over a thresholded TF-IDF cosine similarity graph.
use rayon::prelude::*;
use std::collections::{HashMap, HashSet};
use tracing::debug;

use super::{sentence_terms, top_in_order, SummarizeError};
use crate::nlp::sentences::sentence_texts;

/// Number of sentences kept in the summary.
pub const SENTENCES_COUNT: usize = 3;

const THRESHOLD: f64 = 0.1;
const EPSILON: f64 = 0.1;
const MAX_ITERATIONS: usize = 100;

struct TermStats {
    /// Per sentence: term -> frequency divided by the sentence's highest frequency.
    tf: Vec<HashMap<String, f64>>,
    idf: HashMap<String, f64>,
}

impl TermStats {
    fn new(corpus: &[Vec<String>]) -> Self {
        let tf: Vec<HashMap<String, f64>> = corpus
            .iter()
            .map(|terms| {
                let mut counts: HashMap<String, f64> = HashMap::new();
                for t in terms {
                    *counts.entry(t.clone()).or_insert(0.0) += 1.0;
                }
                let max = counts.values().copied().fold(0.0, f64::max);
                for v in counts.values_mut() {
                    *v /= max;
                }
                counts
            })
            .collect();

        let n = corpus.len() as f64;
        let mut df: HashMap<&str, usize> = HashMap::new();
        for counts in &tf {
            for t in counts.keys() {
                *df.entry(t.as_str()).or_insert(0) += 1;
            }
        }
        let idf = df
            .into_iter()
            .map(|(t, d)| (t.to_string(), (n / (1.0 + d as f64)).ln()))
            .collect();

        TermStats { tf, idf }
    }

    fn norm(&self, i: usize) -> f64 {
        self.tf[i]
            .iter()
            .map(|(t, tf)| (tf * self.idf[t]).powi(2))
            .sum::<f64>()
            .sqrt()
    }

    /// Cosine similarity of TF-IDF vectors, with idf squared on shared terms.
    fn cosine(&self, i: usize, j: usize, norms: &[f64]) -> f64 {
        if norms[i] == 0.0 || norms[j] == 0.0 {
            return 0.0;
        }
        let a: HashSet<&String> = self.tf[i].keys().collect();
        let numerator: f64 = self.tf[j]
            .iter()
            .filter(|(t, _)| a.contains(t))
            .map(|(t, tf_j)| self.tf[i][t] * tf_j * self.idf[t].powi(2))
            .sum();
        numerator / (norms[i] * norms[j])
    }
}

/// Row-stochastic adjacency: 1 where similarity passes the threshold, divided by the row degree.
fn transition_matrix(corpus: &[Vec<String>]) -> Vec<Vec<f64>> {
    let stats = TermStats::new(corpus);
    let n = corpus.len();
    let norms: Vec<f64> = (0..n).map(|i| stats.norm(i)).collect();

    (0..n)
        .into_par_iter()
        .map(|i| {
            let mut row: Vec<f64> = (0..n)
                .map(|j| if stats.cosine(i, j, &norms) > THRESHOLD { 1.0 } else { 0.0 })
                .collect();
            let degree: f64 = row.iter().sum();
            if degree == 0.0 {
                // no usable terms: the sentence only links to itself
                row[i] = 1.0;
            } else {
                for v in row.iter_mut() {
                    *v /= degree;
                }
            }
            row
        })
        .collect()
}

/// Stationary distribution of the transition matrix by power iteration.
fn power_method(matrix: &[Vec<f64>]) -> Vec<f64> {
    let n = matrix.len();
    let mut p = vec![1.0 / n as f64; n];
    for iteration in 0..MAX_ITERATIONS {
        let next: Vec<f64> = (0..n).map(|j| (0..n).map(|i| matrix[i][j] * p[i]).sum()).collect();
        let lambda = next
            .iter()
            .zip(p.iter())
            .map(|(a, b)| (a - b).powi(2))
            .sum::<f64>()
            .sqrt();
        p = next;
        if lambda < EPSILON {
            debug!(iterations = iteration + 1, "power method converged");
            break;
        }
    }
    p
}

pub fn summarize(text: &str) -> Result<String, SummarizeError> {
    summarize_sentences(text, SENTENCES_COUNT)
}

/// Keep the `count` most central sentences, joined by single spaces in document order.
pub fn summarize_sentences(text: &str, count: usize) -> Result<String, SummarizeError> {
    let sentences = sentence_texts(text);
    if sentences.is_empty() {
        return Err(SummarizeError::EmptyDocument);
    }

    let corpus: Vec<Vec<String>> = sentences.iter().map(|s| sentence_terms(s)).collect();
    let matrix = transition_matrix(&corpus);
    let scores: Vec<(usize, f64)> = power_method(&matrix).into_iter().enumerate().collect();

    let selected = top_in_order(&scores, count);
    Ok(selected.iter().map(|&i| sentences[i]).collect::<Vec<_>>().join(" "))
}
