// Extractive summarization with two interchangeable graph-ranking backends.
// Neither backend falls back to the other: a failure is returned to the caller.
pub mod lexrank;
pub mod textrank;

use clap::ValueEnum;
use once_cell::sync::Lazy;
use std::collections::HashSet;
use thiserror::Error;

use super::tokenize::tokenize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum SummarizerKind {
    /// TextRank over BM25 sentence similarity, keeps a fifth of the sentences
    #[value(name = "gensim", alias = "textrank")]
    TextRank,
    /// LexRank over TF-IDF cosine similarity, keeps three sentences
    #[value(name = "lexrank", alias = "sumy")]
    LexRank,
}

impl SummarizerKind {
    pub const ALL: [SummarizerKind; 2] = [SummarizerKind::TextRank, SummarizerKind::LexRank];

    pub fn display_name(&self) -> &'static str {
        match self {
            SummarizerKind::TextRank => "Gensim",
            SummarizerKind::LexRank => "Sumy Lex Rank",
        }
    }
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum SummarizeError {
    #[error("input must have more than one sentence (found {0})")]
    TooFewSentences(usize),

    #[error("sentences share no content words, nothing to rank")]
    NoSharedTerms,

    #[error("nothing to summarize: the document has no sentences")]
    EmptyDocument,
}

// Common stop words to filter out when scoring sentences
static STOP_WORDS: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    [
        "a", "an", "and", "are", "as", "at", "be", "by", "for", "from",
        "has", "he", "in", "is", "it", "its", "of", "on", "that", "the",
        "to", "was", "will", "with", "this", "but", "they", "have",
        "had", "what", "when", "where", "who", "which", "why", "how",
        "not", "she", "her", "his", "him", "their", "them", "there", "were",
        "been", "being", "would", "could", "should", "can", "also", "than",
        "then", "these", "those", "into", "about", "over", "such", "some",
        "our", "you", "your", "all", "any", "more", "most", "other", "only",
    ]
    .iter()
    .copied()
    .collect()
});

/// Content terms of a sentence: lemmas of words, minus stop words and very short words.
pub(crate) fn sentence_terms(sentence: &str) -> Vec<String> {
    tokenize(sentence)
        .into_iter()
        .filter(|t| !t.is_punct && !STOP_WORDS.contains(t.text.to_lowercase().as_str()))
        .map(|t| t.lemma)
        .filter(|lemma| lemma.chars().count() > 2 && !STOP_WORDS.contains(lemma.as_str()))
        .collect()
}

/// Indices of the `count` best-scored sentences, in document order.
/// Ties go to the earlier sentence.
pub(crate) fn top_in_order(scores: &[(usize, f64)], count: usize) -> Vec<usize> {
    let mut ranked = scores.to_vec();
    ranked.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(std::cmp::Ordering::Equal));
    let mut selected: Vec<usize> = ranked.iter().take(count).map(|(i, _)| *i).collect();
    selected.sort();
    selected
}

/// Summarize `text` with the chosen backend.
pub fn summarize(kind: SummarizerKind, text: &str) -> Result<String, SummarizeError> {
    match kind {
        SummarizerKind::TextRank => textrank::summarize(text),
        SummarizerKind::LexRank => lexrank::summarize(text),
    }
}

#[cfg(test)]
pub(crate) const ARTICLE: &str = "Natural language processing is a field of artificial intelligence \
    that focuses on the interaction between computers and humans through natural language. \
    The ultimate objective of natural language processing is to read, decipher, and understand human languages. \
    Natural language processing combines computational linguistics with statistical models and machine learning. \
    Machine learning models learn statistical patterns of language from large collections of text. \
    Applications include translation, sentiment analysis, and chatbots. \
    Chatbots answer customer questions using language models trained on text. \
    Translation systems convert text from one human language into another language. \
    Sentiment analysis detects opinions expressed in customer reviews and social media text. \
    Researchers evaluate language processing systems on shared benchmark datasets. \
    The weather in the mountains was cold last winter.";
