// Settings resolved once at startup from the command line and the environment.
use crate::pipeline::DEFAULT_MODEL;
use crate::render::OutputFormat;

/// Environment variable naming the pipeline to load when `--model` is absent.
pub const MODEL_ENV: &str = "TEXTLENS_MODEL";

#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    pub model: String,
    pub format: OutputFormat,
}

impl Settings {
    pub fn resolve(model: Option<String>, format: OutputFormat) -> Self {
        Settings {
            model: pick_model(model, std::env::var(MODEL_ENV).ok()),
            format,
        }
    }
}

/// `--model` wins over the environment, which wins over the default.
fn pick_model(flag: Option<String>, env: Option<String>) -> String {
    flag.into_iter()
        .chain(env)
        .map(|m| m.trim().to_string())
        .find(|m| !m.is_empty())
        .unwrap_or_else(|| DEFAULT_MODEL.to_string())
}
