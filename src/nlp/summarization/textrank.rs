// TextRank: sentences are graph nodes weighted by BM25 similarity and ranked with PageRank.
use rayon::prelude::*;
use std::collections::{HashMap, HashSet};
use tracing::{debug, warn};

use super::{sentence_terms, top_in_order, SummarizeError};
use crate::nlp::sentences::sentence_texts;

/// Fraction of the sentences kept in the summary.
pub const DEFAULT_RATIO: f64 = 0.2;

/// Below this many sentences the ranking is not very meaningful.
const MIN_USEFUL_SENTENCES: usize = 10;

const BM25_K1: f64 = 1.5;
const BM25_B: f64 = 0.75;
const BM25_EPSILON: f64 = 0.25;

const DAMPING: f64 = 0.85;
const CONVERGENCE: f64 = 1e-4;
const MAX_ITERATIONS: usize = 100;

struct Bm25<'a> {
    corpus: &'a [Vec<String>],
    freqs: Vec<HashMap<&'a str, usize>>,
    idf: HashMap<&'a str, f64>,
    avgdl: f64,
}

impl<'a> Bm25<'a> {
    fn new(corpus: &'a [Vec<String>]) -> Self {
        let n = corpus.len() as f64;
        let avgdl = corpus.iter().map(|d| d.len()).sum::<usize>() as f64 / n;

        let freqs: Vec<HashMap<&str, usize>> = corpus
            .iter()
            .map(|doc| {
                let mut tf = HashMap::new();
                for t in doc {
                    *tf.entry(t.as_str()).or_insert(0) += 1;
                }
                tf
            })
            .collect();

        let mut df: HashMap<&str, usize> = HashMap::new();
        for tf in &freqs {
            for t in tf.keys() {
                *df.entry(t).or_insert(0) += 1;
            }
        }

        let mut idf: HashMap<&str, f64> = df
            .iter()
            .map(|(t, &d)| (*t, (n - d as f64 + 0.5).ln() - (d as f64 + 0.5).ln()))
            .collect();
        let average_idf = if idf.is_empty() { 0.0 } else { idf.values().sum::<f64>() / idf.len() as f64 };
        for v in idf.values_mut() {
            if *v < 0.0 {
                *v = BM25_EPSILON * average_idf;
            }
        }

        Bm25 { corpus, freqs, idf, avgdl }
    }

    /// BM25 score of sentence `query` against sentence `doc`.
    fn score(&self, query: usize, doc: usize) -> f64 {
        let tf = &self.freqs[doc];
        let len_ratio = self.corpus[doc].len() as f64 / self.avgdl;
        self.corpus[query]
            .iter()
            .filter_map(|t| {
                let f = *tf.get(t.as_str())? as f64;
                let idf = self.idf.get(t.as_str()).copied().unwrap_or(0.0);
                Some(idf * f * (BM25_K1 + 1.0) / (f + BM25_K1 * (1.0 - BM25_B + BM25_B * len_ratio)))
            })
            .sum()
    }
}

/// Symmetric edge weights between sentences. The diagonal is zero.
fn similarity_graph(corpus: &[Vec<String>]) -> Vec<Vec<f64>> {
    let bm25 = Bm25::new(corpus);
    let n = corpus.len();
    (0..n)
        .into_par_iter()
        .map(|i| {
            (0..n)
                .map(|j| {
                    if i == j {
                        0.0
                    } else {
                        let w = (bm25.score(i, j) + bm25.score(j, i)) / 2.0;
                        w.max(0.0)
                    }
                })
                .collect()
        })
        .collect()
}

/// Weighted PageRank by power iteration.
fn pagerank(graph: &[Vec<f64>]) -> Vec<f64> {
    let n = graph.len();
    let out_weight: Vec<f64> = graph.iter().map(|row| row.iter().sum()).collect();
    let mut scores = vec![1.0; n];

    for iteration in 0..MAX_ITERATIONS {
        let next: Vec<f64> = (0..n)
            .map(|i| {
                let incoming: f64 = (0..n)
                    .filter(|&j| out_weight[j] > 0.0 && graph[j][i] > 0.0)
                    .map(|j| graph[j][i] / out_weight[j] * scores[j])
                    .sum();
                (1.0 - DAMPING) + DAMPING * incoming
            })
            .collect();
        let delta = next
            .iter()
            .zip(scores.iter())
            .map(|(a, b)| (a - b).abs())
            .fold(0.0, f64::max);
        scores = next;
        if delta < CONVERGENCE {
            debug!(iterations = iteration + 1, "pagerank converged");
            break;
        }
    }
    scores
}

pub fn summarize(text: &str) -> Result<String, SummarizeError> {
    summarize_with_ratio(text, DEFAULT_RATIO)
}

/// Keep `ratio` of the sentences (at least one), joined by newlines in document order.
pub fn summarize_with_ratio(text: &str, ratio: f64) -> Result<String, SummarizeError> {
    let sentences = sentence_texts(text);
    if sentences.len() < 2 {
        return Err(SummarizeError::TooFewSentences(sentences.len()));
    }
    if sentences.len() < MIN_USEFUL_SENTENCES {
        warn!(
            sentences = sentences.len(),
            "input has fewer than {} sentences, the summary may be poor", MIN_USEFUL_SENTENCES
        );
    }

    let corpus: Vec<Vec<String>> = sentences.iter().map(|s| sentence_terms(s)).collect();
    let graph = similarity_graph(&corpus);

    // sentences sharing nothing with the rest are left out of the ranking
    let connected: HashSet<usize> = (0..graph.len())
        .filter(|&i| graph[i].iter().any(|&w| w > 0.0))
        .collect();
    if connected.is_empty() {
        return Err(SummarizeError::NoSharedTerms);
    }

    let scores = pagerank(&graph);
    let ranked: Vec<(usize, f64)> = scores
        .into_iter()
        .enumerate()
        .filter(|(i, _)| connected.contains(i))
        .collect();

    let count = ((sentences.len() as f64 * ratio) as usize).max(1);
    let selected = top_in_order(&ranked, count);

    Ok(selected.iter().map(|&i| sentences[i]).collect::<Vec<_>>().join("\n"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::nlp::summarization::ARTICLE;

    #[test]
    fn test_summarize_article() {
        let summary = summarize(ARTICLE).unwrap();
        let lines: Vec<&str> = summary.lines().collect();
        assert_eq!(lines.len(), 2);
        for line in &lines {
            assert!(ARTICLE.contains(line));
        }
        assert!(!summary.contains("weather"));
    }

    #[test]
    fn test_summary_keeps_document_order() {
        let summary = summarize_with_ratio(ARTICLE, 0.5).unwrap();
        let positions: Vec<usize> = summary.lines().map(|l| ARTICLE.find(l).unwrap()).collect();
        let mut sorted = positions.clone();
        sorted.sort();
        assert_eq!(positions, sorted);
    }

    #[test]
    fn test_single_sentence_is_an_error() {
        assert_eq!(summarize("This is a short text."), Err(SummarizeError::TooFewSentences(1)));
        assert_eq!(summarize(""), Err(SummarizeError::TooFewSentences(0)));
    }

    #[test]
    fn test_unrelated_sentences_are_an_error() {
        let text = "Cats purr loudly. Rivers flow downhill. Volcanoes erupt rarely.";
        assert_eq!(summarize(text), Err(SummarizeError::NoSharedTerms));
    }

    #[test]
    fn test_short_input_keeps_one_sentence() {
        let text = "Rust programs compile quickly. Rust programs run quickly. Bread tastes good.";
        let summary = summarize(text).unwrap();
        assert_eq!(summary.lines().count(), 1);
        assert!(summary.starts_with("Rust programs"));
    }

    #[test]
    fn test_pagerank_favours_hub() {
        // node 0 is linked to everyone, the others only to node 0
        let graph = vec![
            vec![0.0, 1.0, 1.0, 1.0],
            vec![1.0, 0.0, 0.0, 0.0],
            vec![1.0, 0.0, 0.0, 0.0],
            vec![1.0, 0.0, 0.0, 0.0],
        ];
        let scores = pagerank(&graph);
        assert!(scores[0] > scores[1]);
        assert!((scores[1] - scores[2]).abs() < 1e-9);
    }

    #[test]
    fn test_similarity_graph_is_symmetric() {
        let corpus: Vec<Vec<String>> = ["apple banana", "banana cherry", "cherry apple apple"]
            .iter()
            .map(|s| s.split(' ').map(String::from).collect())
            .collect();
        let graph = similarity_graph(&corpus);
        for i in 0..3 {
            assert_eq!(graph[i][i], 0.0);
            for j in 0..3 {
                assert_eq!(graph[i][j], graph[j][i]);
            }
        }
    }
}
