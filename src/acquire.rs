// Text acquisition: literal text, a URL whose paragraphs get scraped, or a local file.
use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};
use std::time::Duration;

use indicatif::{ProgressBar, ProgressStyle};
use once_cell::sync::Lazy;
use scraper::{Html, Selector};
use tracing::{debug, info};
use url::Url;

use crate::error::{AppError, AppResult};

/// Shown in place of empty input, same as the default value of the input box.
pub const PLACEHOLDER_TEXT: &str = "Type Here";

static PARAGRAPH_SELECTOR: Lazy<Selector> = Lazy::new(|| Selector::parse("p").unwrap());

/// Where the text to analyze comes from.
#[derive(Debug, Clone)]
pub enum Source {
    /// Raw text, or a URL to fetch.
    Input(String),
    File(PathBuf),
}

/// Resolve a source into the text to analyze. Never returns an empty string.
pub fn acquire(source: &Source) -> AppResult<String> {
    let text = match source {
        Source::Input(s) => fetch_text(s)?,
        Source::File(p) => read_file(p)?,
    };
    Ok(or_placeholder(text))
}

pub fn or_placeholder(text: String) -> String {
    if text.trim().is_empty() {
        PLACEHOLDER_TEXT.to_string()
    } else {
        text
    }
}

/// Parse `input` as an http(s) URL. Anything else is literal text.
fn as_web_url(input: &str) -> Option<Url> {
    match Url::parse(input.trim()) {
        Ok(url) if matches!(url.scheme(), "http" | "https") && url.has_host() => Some(url),
        Ok(url) => {
            debug!(scheme = url.scheme(), "not a web URL, using input as text");
            None
        }
        Err(e) => {
            debug!(error = %e, "input is not a URL, using it as text");
            None
        }
    }
}

/// If `input` is a web URL, fetch it and return its paragraph text joined by spaces.
/// Otherwise return `input` unchanged.
pub fn fetch_text(input: &str) -> AppResult<String> {
    let Some(url) = as_web_url(input) else {
        return Ok(input.to_string());
    };

    let pb = ProgressBar::new_spinner();
    pb.set_style(ProgressStyle::with_template("{spinner:.green} {msg}").unwrap_or_else(|_| ProgressStyle::default_spinner()));
    pb.set_message(format!("fetching {}", url));
    pb.enable_steady_tick(Duration::from_millis(100));

    info!(%url, "fetching page");
    let body = reqwest::blocking::get(url.as_str()).and_then(|r| r.text());
    pb.finish_and_clear();

    Ok(paragraph_text(&body?))
}

/// Space-joined text content of every `<p>` element, in document order.
pub fn paragraph_text(html: &str) -> String {
    let document = Html::parse_document(html);
    let paragraphs: Vec<String> = document
        .select(&PARAGRAPH_SELECTOR)
        .map(|p| p.text().collect::<String>())
        .collect();
    debug!(count = paragraphs.len(), "extracted paragraphs");
    paragraphs.join(" ")
}

pub fn read_file(path: &Path) -> AppResult<String> {
    let ext = path.extension().and_then(|s| s.to_str()).unwrap_or("");

    match ext {
        "txt" | "md" | "csv" | "json" => {
            let mut file = File::open(path)?;
            let mut content = String::new();
            file.read_to_string(&mut content)?;
            Ok(content)
        }
        "pdf" => pdf_extract::extract_text(path).map_err(|e| AppError::Pdf(e.to_string())),
        _ => Err(AppError::UnsupportedFile(ext.to_string())),
    }
}
