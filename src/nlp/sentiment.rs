// Sentiment Analysis module using lexicon-based approach
// Each lexicon word carries a polarity in [-1, 1] and a subjectivity in [0, 1].
// The text scores are the means over the sentiment words found, adjusted for
// intensifiers and negation.
use once_cell::sync::Lazy;
use serde::Serialize;
use std::collections::{HashMap, HashSet};

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Sentiment {
    pub polarity: f64,
    pub subjectivity: f64,
}

pub const SENTIMENT_NOTE: &str = "Polarity is between -1 (negative) and 1 (positive) indicating the type of sentiment\n\
Subjectivity is between 0 (objective) and 1 (subjective) indicating the bias of the sentiment";

// word -> (polarity, subjectivity)
static LEXICON: Lazy<HashMap<&'static str, (f64, f64)>> = Lazy::new(|| {
    [
        ("good", (0.7, 0.6)), ("great", (0.8, 0.75)), ("excellent", (1.0, 1.0)), ("wonderful", (1.0, 1.0)),
        ("fantastic", (0.4, 0.9)), ("amazing", (0.6, 0.9)), ("awesome", (1.0, 1.0)), ("love", (0.5, 0.6)),
        ("loved", (0.7, 0.8)), ("lovely", (0.5, 0.75)), ("happy", (0.8, 1.0)), ("joy", (0.8, 0.9)),
        ("pleased", (0.5, 1.0)), ("delighted", (0.7, 0.8)), ("satisfied", (0.5, 1.0)), ("perfect", (1.0, 1.0)),
        ("beautiful", (0.85, 1.0)), ("brilliant", (0.9, 1.0)), ("outstanding", (0.5, 0.6)), ("superb", (1.0, 1.0)),
        ("terrific", (1.0, 1.0)), ("fabulous", (0.4, 0.9)), ("exceptional", (0.67, 1.0)), ("impressive", (1.0, 1.0)),
        ("remarkable", (0.75, 0.75)), ("best", (1.0, 0.3)), ("better", (0.5, 0.5)), ("positive", (0.23, 0.55)),
        ("success", (0.3, 0.4)), ("successful", (0.75, 0.95)), ("win", (0.8, 0.4)), ("enjoy", (0.4, 0.5)),
        ("pleasant", (0.73, 0.97)), ("comfortable", (0.4, 0.7)), ("excited", (0.38, 0.75)), ("exciting", (0.3, 0.8)),
        ("like", (0.2, 0.3)), ("favorite", (0.5, 1.0)), ("nice", (0.6, 1.0)), ("fun", (0.3, 0.2)),
        ("interesting", (0.5, 0.5)), ("easy", (0.43, 0.83)), ("fine", (0.42, 0.5)), ("glad", (0.5, 1.0)),
        ("bad", (-0.7, 0.67)), ("terrible", (-1.0, 1.0)), ("awful", (-1.0, 1.0)), ("horrible", (-1.0, 1.0)),
        ("poor", (-0.4, 0.6)), ("worst", (-1.0, 1.0)), ("worse", (-0.4, 0.6)), ("hate", (-0.8, 0.9)),
        ("angry", (-0.5, 1.0)), ("sad", (-0.5, 1.0)), ("upset", (-0.5, 0.8)), ("disappointed", (-0.75, 0.75)),
        ("unhappy", (-0.6, 0.9)), ("wrong", (-0.5, 0.9)), ("difficult", (-0.5, 1.0)), ("hard", (-0.29, 0.54)),
        ("broken", (-0.4, 0.4)), ("painful", (-0.7, 0.9)), ("disaster", (-0.8, 0.8)), ("negative", (-0.3, 0.4)),
        ("failure", (-0.32, 0.3)), ("failed", (-0.5, 0.3)), ("stupid", (-0.8, 1.0)), ("ugly", (-0.7, 1.0)),
        ("boring", (-1.0, 1.0)), ("unpleasant", (-0.6, 0.87)), ("disappointing", (-0.6, 0.7)), ("frustrating", (-0.4, 0.7)),
        ("annoying", (-0.8, 0.9)), ("nasty", (-1.0, 1.0)), ("dull", (-0.31, 0.65)), ("useless", (-0.5, 0.2)),
    ]
    .iter()
    .copied()
    .collect()
});

// word -> multiplier applied to the next sentiment word
static INTENSIFIERS: Lazy<HashMap<&'static str, f64>> = Lazy::new(|| {
    [
        ("very", 1.3), ("extremely", 1.5), ("absolutely", 1.4), ("really", 1.2), ("incredibly", 1.5),
        ("highly", 1.3), ("totally", 1.3), ("so", 1.2), ("quite", 1.1), ("slightly", 0.5), ("somewhat", 0.7),
    ]
    .iter()
    .copied()
    .collect()
});

static NEGATIONS: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    ["not", "n't", "no", "never", "nothing", "nobody", "nowhere", "neither", "nor", "none", "cannot"]
        .iter()
        .copied()
        .collect()
});

const NEGATION_FACTOR: f64 = -0.5;

pub fn round3(x: f64) -> f64 {
    (x * 1000.0).round() / 1000.0
}

fn words(text: &str) -> Vec<String> {
    super::tokenize::tokenize(text)
        .into_iter()
        .filter(|t| !t.is_punct)
        .map(|t| t.text.to_lowercase())
        .collect()
}

/// Score `text`. Both values are clamped to their ranges and rounded to 3 decimals.
/// Text without any sentiment words scores (0, 0).
pub fn analyze_sentiment_text(text: &str) -> Sentiment {
    let words = words(text);
    let mut scores: Vec<(f64, f64)> = Vec::new();

    for (i, word) in words.iter().enumerate() {
        let Some(&(mut polarity, mut subjectivity)) = LEXICON.get(word.as_str()) else {
            continue;
        };

        if i > 0 {
            if let Some(&m) = INTENSIFIERS.get(words[i - 1].as_str()) {
                polarity *= m;
                subjectivity *= m;
            }
        }

        let is_negated = (i > 0 && NEGATIONS.contains(words[i - 1].as_str()))
            || (i > 1 && NEGATIONS.contains(words[i - 2].as_str()));
        if is_negated {
            polarity *= NEGATION_FACTOR;
        }

        scores.push((polarity.clamp(-1.0, 1.0), subjectivity.clamp(0.0, 1.0)));
    }

    if scores.is_empty() {
        return Sentiment { polarity: 0.0, subjectivity: 0.0 };
    }

    let n = scores.len() as f64;
    let polarity = scores.iter().map(|s| s.0).sum::<f64>() / n;
    let subjectivity = scores.iter().map(|s| s.1).sum::<f64>() / n;

    Sentiment {
        polarity: round3(polarity.clamp(-1.0, 1.0)),
        subjectivity: round3(subjectivity.clamp(0.0, 1.0)),
    }
}
