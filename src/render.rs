// Output of analysis results as text, JSON or HTML.
use clap::ValueEnum;
use serde_json::{json, Value};
use std::io::Write;
use termcolor::{Color, ColorSpec, WriteColor};

use crate::analysis::Analysis;
use crate::error::AppResult;
use crate::nlp::sentiment::SENTIMENT_NOTE;
use crate::nlp::EntityLabel;
use crate::pipeline::Doc;

const HTML_WRAPPER_OPEN: &str =
    r#"<div style="overflow-x: auto; border: 1px solid #e6e9ef; border-radius: 0.25rem; padding: 1rem">"#;
const HTML_WRAPPER_CLOSE: &str = "</div>";

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Human readable, entities highlighted with colours
    Text,
    Json,
    /// Entities as inline marked-up HTML; other results as JSON
    Html,
}

fn label_color(label: EntityLabel) -> Color {
    match label {
        EntityLabel::Person => Color::Cyan,
        EntityLabel::Org => Color::Blue,
        EntityLabel::Gpe => Color::Yellow,
        EntityLabel::Date => Color::Magenta,
        EntityLabel::Money => Color::Green,
        EntityLabel::Percent => Color::Green,
        EntityLabel::Email => Color::Red,
    }
}

fn label_background(label: EntityLabel) -> &'static str {
    match label {
        EntityLabel::Person => "#aa9cfc",
        EntityLabel::Org => "#7aecec",
        EntityLabel::Gpe => "#feca74",
        EntityLabel::Date => "#bfe1d9",
        EntityLabel::Money => "#e4e7d2",
        EntityLabel::Percent => "#e4e7d2",
        EntityLabel::Email => "#ddd",
    }
}

fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

/// JSON form of an analysis.
pub fn to_json(analysis: &Analysis) -> Value {
    match analysis {
        Analysis::Tokens(pairs) => Value::Array(
            pairs
                .iter()
                .map(|(token, lemma)| Value::String(format!("Token: {}, Lemma: {}", token, lemma)))
                .collect(),
        ),
        Analysis::Entities(doc) => json!(doc.entity_map()),
        Analysis::Sentiment(s) => json!({
            "polarity": s.polarity,
            "subjectivity": s.subjectivity,
        }),
        Analysis::Summary { summarizer, text } => json!({
            "summarizer": summarizer.display_name(),
            "summary": text,
        }),
    }
}

/// The document text with every entity wrapped in a `<mark>` carrying its label.
pub fn entities_html(doc: &Doc) -> String {
    let mut body = String::new();
    let mut offset = 0;
    for e in &doc.entities {
        body.push_str(&html_escape(&doc.text[offset..e.start]).replace('\n', "<br>\n"));
        body.push_str(&format!(
            "\n<mark class=\"entity\" style=\"background: {}; padding: 0.45em 0.6em; margin: 0 0.25em; line-height: 1; border-radius: 0.35em;\">\n    {}\n    <span style=\"font-size: 0.8em; font-weight: bold; line-height: 1; border-radius: 0.35em; text-transform: uppercase; vertical-align: middle; margin-left: 0.5rem\">{}</span>\n</mark>\n",
            label_background(e.label),
            html_escape(&e.text),
            e.label
        ));
        offset = e.end;
    }
    body.push_str(&html_escape(&doc.text[offset..]).replace('\n', "<br>\n"));

    let html = format!(
        "<div class=\"entities\" style=\"line-height: 2.5; direction: ltr\">{}</div>",
        body
    );
    format!("{}{}{}", HTML_WRAPPER_OPEN, html.replace("\n\n", "\n"), HTML_WRAPPER_CLOSE)
}

/// Write the document text with entities highlighted as `[text LABEL]`.
fn write_highlighted<W: WriteColor + ?Sized>(doc: &Doc, out: &mut W) -> AppResult<()> {
    let mut offset = 0;
    for e in &doc.entities {
        write!(out, "{}", &doc.text[offset..e.start])?;
        let mut spec = ColorSpec::new();
        spec.set_fg(Some(label_color(e.label)));
        out.set_color(&spec)?;
        write!(out, "[{} ", e.text)?;
        spec.set_bold(true);
        out.set_color(&spec)?;
        write!(out, "{}", e.label)?;
        spec.set_bold(false);
        out.set_color(&spec)?;
        write!(out, "]")?;
        out.reset()?;
        offset = e.end;
    }
    writeln!(out, "{}", &doc.text[offset..])?;
    Ok(())
}

/// Write `analysis` to `out` in the requested format.
pub fn render<W: WriteColor + ?Sized>(analysis: &Analysis, format: OutputFormat, out: &mut W) -> AppResult<()> {
    match (format, analysis) {
        (OutputFormat::Html, Analysis::Entities(doc)) => writeln!(out, "{}", entities_html(doc))?,
        (OutputFormat::Json, _) | (OutputFormat::Html, _) => {
            writeln!(out, "{}", serde_json::to_string_pretty(&to_json(analysis))?)?
        }
        (OutputFormat::Text, Analysis::Entities(doc)) => write_highlighted(doc, out)?,
        (OutputFormat::Text, Analysis::Summary { text, .. }) => writeln!(out, "{}", text)?,
        (OutputFormat::Text, Analysis::Sentiment(_)) => {
            writeln!(out, "{}", serde_json::to_string_pretty(&to_json(analysis))?)?;
            writeln!(out, "{}", SENTIMENT_NOTE)?;
        }
        (OutputFormat::Text, Analysis::Tokens(_)) => {
            writeln!(out, "{}", serde_json::to_string_pretty(&to_json(analysis))?)?
        }
    }
    Ok(())
}

/// Write an info banner (text format only), dimmed when colours are on.
pub fn banner<W: WriteColor + ?Sized>(message: &str, format: OutputFormat, out: &mut W) -> AppResult<()> {
    if format != OutputFormat::Text {
        return Ok(());
    }
    let mut spec = ColorSpec::new();
    spec.set_fg(Some(Color::Blue)).set_italic(true);
    out.set_color(&spec)?;
    write!(out, "{}", message)?;
    out.reset()?;
    writeln!(out)?;
    Ok(())
}
