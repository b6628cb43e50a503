// NLP building blocks used by the pipeline and the analysis operations
pub mod lemma;
pub mod ner;
pub mod sentences;
pub mod sentiment;
pub mod summarization;
pub mod tokenize;

pub use ner::{entity_map, Entity, EntityLabel, EntityRecognizer};
pub use sentences::{split_sentences, Span};
pub use sentiment::{analyze_sentiment_text, Sentiment};
pub use summarization::{summarize, SummarizeError, SummarizerKind};
pub use tokenize::{tokenize, Token};
