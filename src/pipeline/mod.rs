//! Named language-processing pipelines.
//!
//! A pipeline runs tokenization with lemmas, sentence splitting and entity
//! recognition over a text and returns a [`Doc`]. Building one compiles its
//! gazetteer, so callers get shared instances through [`cache::load_pipeline`].

pub mod cache;

use serde::Serialize;
use std::collections::BTreeMap;
use tracing::info;

use crate::error::{AppError, AppResult};
use crate::nlp::ner::{BASE_PLACES, EXTENDED_PLACES};
use crate::nlp::{entity_map, split_sentences, tokenize, Entity, EntityLabel, EntityRecognizer, Span, Token};

pub use cache::{analyze, load_pipeline};

pub const DEFAULT_MODEL: &str = "en_core_web_sm";
pub const AVAILABLE_MODELS: &[&str] = &["en_core_web_sm", "en_core_web_md"];

#[derive(Debug)]
pub struct Pipeline {
    name: String,
    recognizer: EntityRecognizer,
}

impl Pipeline {
    /// Build the pipeline called `name`. Unknown names are an error.
    pub fn load(name: &str) -> AppResult<Self> {
        let places: Vec<&str> = match name {
            "en_core_web_sm" => BASE_PLACES.to_vec(),
            "en_core_web_md" => BASE_PLACES.iter().chain(EXTENDED_PLACES).copied().collect(),
            _ => return Err(AppError::PipelineUnavailable(name.to_string())),
        };
        let recognizer =
            EntityRecognizer::new(&places).map_err(|_| AppError::PipelineUnavailable(name.to_string()))?;
        info!(model = name, places = places.len(), "loaded pipeline");
        Ok(Pipeline {
            name: name.to_string(),
            recognizer,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn process(&self, text: &str) -> Doc {
        Doc {
            text: text.to_string(),
            tokens: tokenize(text),
            sentences: split_sentences(text),
            entities: self.recognizer.recognize(text),
        }
    }
}

/// The analysis of one text. Never modified after [`Pipeline::process`] returns it.
#[derive(Debug, Clone, Serialize)]
pub struct Doc {
    pub text: String,
    pub tokens: Vec<Token>,
    pub sentences: Vec<Span>,
    pub entities: Vec<Entity>,
}

impl Doc {
    /// `(token, lemma)` pairs in document order.
    pub fn token_lemmas(&self) -> Vec<(String, String)> {
        self.tokens.iter().map(|t| (t.text.clone(), t.lemma.clone())).collect()
    }

    pub fn entity_map(&self) -> BTreeMap<String, EntityLabel> {
        entity_map(&self.entities)
    }
}
