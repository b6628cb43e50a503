// Sentence boundary detection.
use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;
use std::collections::HashSet;

// Terminal punctuation, optional closing quotes/brackets, then whitespace.
static BOUNDARY_PATTERN: Lazy<Regex> = Lazy::new(|| Regex::new(r#"[.!?…]+["'”’)\]]*\s+"#).unwrap());

static LAST_WORD_PATTERN: Lazy<Regex> = Lazy::new(|| Regex::new(r"([A-Za-z.]+)[.!?]*$").unwrap());

static ABBREVIATIONS: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    [
        "mr", "mrs", "ms", "dr", "prof", "sr", "jr", "st", "vs", "etc", "inc", "ltd", "co", "corp",
        "jan", "feb", "mar", "apr", "jun", "jul", "aug", "sep", "sept", "oct", "nov", "dec",
        "e.g", "i.e", "u.s", "u.k", "a.m", "p.m", "fig", "approx", "dept", "est",
    ]
    .iter()
    .copied()
    .collect()
});

/// Half-open byte range into some text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Span {
    pub start: usize,
    pub end: usize,
}

impl Span {
    pub fn text<'a>(&self, source: &'a str) -> &'a str {
        &source[self.start..self.end]
    }
}

/// The boundary just before `end` is an abbreviation or an initial, not a sentence end.
fn ends_with_abbreviation(candidate: &str) -> bool {
    let Some(cap) = LAST_WORD_PATTERN.captures(candidate) else {
        return false;
    };
    let word = cap[1].trim_end_matches('.');
    if word.chars().count() == 1 && word.chars().all(|c| c.is_ascii_uppercase()) {
        return true;
    }
    ABBREVIATIONS.contains(word.to_lowercase().as_str())
}

fn trimmed(text: &str, start: usize, end: usize) -> Option<Span> {
    let slice = &text[start..end];
    let lead = slice.len() - slice.trim_start().len();
    let body = slice.trim();
    if body.is_empty() {
        return None;
    }
    Some(Span {
        start: start + lead,
        end: start + lead + body.len(),
    })
}

/// Split `text` into sentence spans, trimmed of surrounding whitespace.
/// Text without terminal punctuation forms a single trailing sentence.
pub fn split_sentences(text: &str) -> Vec<Span> {
    let mut spans = Vec::new();
    let mut start = 0;
    for m in BOUNDARY_PATTERN.find_iter(text) {
        let punct_end = m.start() + m.as_str().trim_end().len();
        if m.as_str().starts_with('.') && ends_with_abbreviation(&text[start..punct_end]) {
            continue;
        }
        if let Some(span) = trimmed(text, start, punct_end) {
            spans.push(span);
        }
        start = m.end();
    }
    if let Some(span) = trimmed(text, start, text.len()) {
        spans.push(span);
    }
    spans
}

/// Sentence texts, for callers that do not need offsets.
pub fn sentence_texts(text: &str) -> Vec<&str> {
    split_sentences(text).iter().map(|s| s.text(text)).collect()
}
