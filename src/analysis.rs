// The operations a user can pick and the results they produce.
use rand::Rng;
use std::sync::Arc;
use tracing::info;

use crate::error::AppResult;
use crate::nlp::{analyze_sentiment_text, summarize, Sentiment, SummarizerKind};
use crate::pipeline::{analyze, Doc, Pipeline};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    Tokens,
    Entities,
    Sentiment,
    Summarize(SummarizerKind),
}

impl Operation {
    /// Menu entries, in menu order. Summarize uses the default backend here.
    pub const MENU: [Operation; 4] = [
        Operation::Tokens,
        Operation::Entities,
        Operation::Sentiment,
        Operation::Summarize(SummarizerKind::TextRank),
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Operation::Tokens => "Show tokens & lemmas",
            Operation::Entities => "Extract Entities",
            Operation::Sentiment => "Show sentiment",
            Operation::Summarize(_) => "Summarize text",
        }
    }

    /// Text of the button that confirms the operation.
    pub fn action(&self) -> String {
        match self {
            Operation::Tokens => "Tokenize".to_string(),
            Operation::Entities => "Extract".to_string(),
            Operation::Sentiment => "Analyze".to_string(),
            Operation::Summarize(kind) => format!("Summarize using {}", kind.display_name()),
        }
    }

    /// Banner naming the engine behind the operation.
    pub fn info(&self) -> &'static str {
        match self {
            Operation::Tokens => "Using the rule-based pipeline for tokenization and lemmatization",
            Operation::Entities => "Using the rule-based pipeline for NER",
            Operation::Sentiment => "Using the sentiment lexicon for sentiment analysis",
            Operation::Summarize(SummarizerKind::TextRank) => "Using TextRank for extractive summarization",
            Operation::Summarize(SummarizerKind::LexRank) => "Using LexRank for extractive summarization",
        }
    }

    /// Pick an operation at random; for summarize, a backend too.
    pub fn surprise<R: Rng + ?Sized>(rng: &mut R) -> Operation {
        match rng.gen_range(0..4) {
            0 => Operation::Tokens,
            1 => Operation::Entities,
            2 => Operation::Sentiment,
            _ => {
                let kind = SummarizerKind::ALL[rng.gen_range(0..SummarizerKind::ALL.len())];
                Operation::Summarize(kind)
            }
        }
    }
}

/// Result of one operation.
#[derive(Debug, Clone)]
pub enum Analysis {
    Tokens(Vec<(String, String)>),
    Entities(Arc<Doc>),
    Sentiment(Sentiment),
    Summary { summarizer: SummarizerKind, text: String },
}

/// Run `op` over `text`. Only summarization can fail.
pub fn run(op: Operation, text: &str, pipeline: &Pipeline) -> AppResult<Analysis> {
    info!(operation = op.label(), chars = text.len(), "running analysis");
    let analysis = match op {
        Operation::Tokens => Analysis::Tokens(analyze(pipeline, text).token_lemmas()),
        Operation::Entities => Analysis::Entities(analyze(pipeline, text)),
        Operation::Sentiment => Analysis::Sentiment(analyze_sentiment_text(text)),
        Operation::Summarize(kind) => Analysis::Summary {
            summarizer: kind,
            text: summarize(kind, text)?,
        },
    };
    Ok(analysis)
}
