// textlens: tokens, entities, sentiment and summaries for pasted text or web pages.
mod acquire;
mod analysis;
mod config;
mod error;
mod interactive;
mod logging;
mod nlp;
mod pipeline;
mod preview;
mod render;

use std::io::{self, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{ArgAction, Args, Parser, Subcommand};
use termcolor::{ColorChoice, StandardStream, WriteColor};

use crate::acquire::{acquire, Source};
use crate::analysis::Operation;
use crate::config::Settings;
use crate::nlp::SummarizerKind;
use crate::pipeline::load_pipeline;
use crate::render::{banner, render, OutputFormat};

#[derive(Parser)]
#[command(name = "textlens", about = "Tokens, entities, sentiment and summaries for text or web pages")]
struct Cli {
    /// Pipeline to load, e.g. en_core_web_sm or en_core_web_md. Falls back to $TEXTLENS_MODEL.
    #[arg(short, long, global = true)]
    model: Option<String>,
    #[arg(short, long, global = true, value_enum, default_value_t = OutputFormat::Text)]
    format: OutputFormat,
    /// More log output (-v info, -vv debug, -vvv trace). RUST_LOG overrides.
    #[arg(short, long, global = true, action = ArgAction::Count)]
    verbose: u8,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Args, Debug, Clone)]
struct InputArgs {
    /// Text to analyze, or a URL whose paragraphs are fetched
    text: Option<String>,
    /// Read the text from a file (txt, md, csv, json or pdf)
    #[arg(long, conflicts_with = "text")]
    file: Option<PathBuf>,
    /// Show the first N percent of the text before the result
    #[arg(short, long, default_value_t = 0, value_parser = clap::value_parser!(u32).range(0..=100))]
    preview: u32,
}

impl InputArgs {
    fn source(&self) -> Source {
        match &self.file {
            Some(path) => Source::File(path.clone()),
            None => Source::Input(self.text.clone().unwrap_or_default()),
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Show tokens & lemmas
    Tokens(InputArgs),
    /// Extract named entities
    Entities(InputArgs),
    /// Show polarity and subjectivity
    Sentiment(InputArgs),
    /// Summarize text
    Summarize {
        #[command(flatten)]
        input: InputArgs,
        #[arg(short, long, value_enum, default_value_t = SummarizerKind::TextRank)]
        summarizer: SummarizerKind,
    },
    /// Run a randomly picked operation
    Surprise(InputArgs),
    /// Print only the first N percent of the text
    Preview {
        #[arg(long, value_parser = clap::value_parser!(u32).range(0..=100))]
        percent: u32,
        text: Option<String>,
        #[arg(long, conflicts_with = "text")]
        file: Option<PathBuf>,
    },
    /// Fill in the form on the terminal, one action at a time
    Interactive,
}

fn run_operation<W: WriteColor>(op: Operation, input: &InputArgs, settings: &Settings, out: &mut W) -> Result<()> {
    let pipeline = load_pipeline(&settings.model)
        .with_context(|| format!("cannot start without pipeline '{}'", settings.model))?;
    let text = acquire(&input.source()).context("failed to read the input text")?;

    if input.preview > 0 {
        let shown = preview::preview(&text, input.preview)?;
        if settings.format == OutputFormat::Text {
            writeln!(out, "Preview: {}", shown)?;
        } else {
            eprintln!("Preview: {}", shown);
        }
    }

    banner(op.info(), settings.format, out)?;
    let result = analysis::run(op, &text, &pipeline).with_context(|| format!("{} failed", op.action()))?;
    render(&result, settings.format, out)?;
    Ok(())
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    logging::init_logging(cli.verbose);
    let settings = Settings::resolve(cli.model, cli.format);
    let mut stdout = StandardStream::stdout(ColorChoice::Auto);

    match cli.command {
        Commands::Tokens(input) => run_operation(Operation::Tokens, &input, &settings, &mut stdout)?,
        Commands::Entities(input) => run_operation(Operation::Entities, &input, &settings, &mut stdout)?,
        Commands::Sentiment(input) => run_operation(Operation::Sentiment, &input, &settings, &mut stdout)?,
        Commands::Summarize { input, summarizer } => {
            run_operation(Operation::Summarize(summarizer), &input, &settings, &mut stdout)?
        }
        Commands::Surprise(input) => {
            let op = Operation::surprise(&mut rand::thread_rng());
            banner(&format!("Surprise! Running: {}", op.label()), settings.format, &mut stdout)?;
            run_operation(op, &input, &settings, &mut stdout)?
        }
        Commands::Preview { percent, text, file } => {
            let source = match file {
                Some(path) => Source::File(path),
                None => Source::Input(text.unwrap_or_default()),
            };
            let text = acquire(&source).context("failed to read the input text")?;
            writeln!(stdout, "{}", preview::preview(&text, percent)?)?;
        }
        Commands::Interactive => {
            let pipeline = load_pipeline(&settings.model)
                .with_context(|| format!("cannot start without pipeline '{}'", settings.model))?;
            let stdin = io::stdin();
            interactive::run_form(&mut stdin.lock(), &mut stdout, &pipeline, settings.format)?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;
    use std::fs::File;
    use tempfile::TempDir;
    use termcolor::Buffer;

    fn settings(format: OutputFormat) -> Settings {
        Settings {
            model: "en_core_web_sm".to_string(),
            format,
        }
    }

    fn input(text: &str) -> InputArgs {
        InputArgs {
            text: Some(text.to_string()),
            file: None,
            preview: 0,
        }
    }

    fn run_to_string(op: Operation, input: &InputArgs, settings: &Settings) -> Result<String> {
        let mut buf = Buffer::no_color();
        run_operation(op, input, settings, &mut buf)?;
        Ok(String::from_utf8(buf.into_inner())?)
    }

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_summarize() {
        let cli = Cli::try_parse_from(["textlens", "summarize", "-s", "sumy", "Some text."]).unwrap();
        match cli.command {
            Commands::Summarize { input, summarizer } => {
                assert_eq!(summarizer, SummarizerKind::LexRank);
                assert_eq!(input.text.as_deref(), Some("Some text."));
            }
            _ => panic!("expected summarize"),
        }
    }

    #[test]
    fn test_parse_global_flags() {
        let cli = Cli::try_parse_from(["textlens", "tokens", "hi", "-f", "json", "-vv", "-m", "en_core_web_md"]).unwrap();
        assert_eq!(cli.format, OutputFormat::Json);
        assert_eq!(cli.verbose, 2);
        assert_eq!(cli.model.as_deref(), Some("en_core_web_md"));
    }

    #[test]
    fn test_preview_out_of_range_rejected() {
        assert!(Cli::try_parse_from(["textlens", "tokens", "hi", "--preview", "101"]).is_err());
        assert!(Cli::try_parse_from(["textlens", "preview", "--percent", "150", "hi"]).is_err());
    }

    #[test]
    fn test_text_and_file_conflict() {
        assert!(Cli::try_parse_from(["textlens", "tokens", "hi", "--file", "a.txt"]).is_err());
    }

    #[test]
    fn test_missing_text_is_placeholder() -> Result<()> {
        let args = InputArgs { text: None, file: None, preview: 0 };
        let out = run_to_string(Operation::Tokens, &args, &settings(OutputFormat::Json))?;
        assert!(out.contains("Token: Type, Lemma: type"));
        assert!(out.contains("Token: Here, Lemma: here"));
        Ok(())
    }

    #[test]
    fn test_run_sentiment_json() -> Result<()> {
        let out = run_to_string(Operation::Sentiment, &input("I love this."), &settings(OutputFormat::Json))?;
        let value: serde_json::Value = serde_json::from_str(&out)?;
        assert_eq!(value["polarity"], 0.5);
        Ok(())
    }

    #[test]
    fn test_run_with_preview_and_banner() -> Result<()> {
        let args = InputArgs {
            text: Some("I love this.".to_string()),
            file: None,
            preview: 50,
        };
        let out = run_to_string(Operation::Sentiment, &args, &settings(OutputFormat::Text))?;
        assert!(out.starts_with("Preview: I love\n"));
        assert!(out.contains("Using the sentiment lexicon"));
        Ok(())
    }

    #[test]
    fn test_run_unknown_model_fails() {
        let settings = Settings {
            model: "xx_unknown".to_string(),
            format: OutputFormat::Text,
        };
        let err = run_to_string(Operation::Tokens, &input("hi"), &settings).unwrap_err();
        assert!(err.to_string().contains("cannot start without pipeline 'xx_unknown'"));
    }

    #[test]
    fn test_run_summarize_failure_surfaces() {
        let err = run_to_string(
            Operation::Summarize(SummarizerKind::TextRank),
            &input("One sentence only."),
            &settings(OutputFormat::Text),
        )
        .unwrap_err();
        assert!(err.to_string().contains("Summarize using Gensim failed"));
    }

    #[test]
    fn test_run_from_file() -> Result<()> {
        let temp_dir = TempDir::new()?;
        let file_path = temp_dir.path().join("note.txt");
        let mut file = File::create(&file_path)?;
        write!(file, "Ada Lovelace visited London.")?;

        let args = InputArgs {
            text: None,
            file: Some(file_path),
            preview: 0,
        };
        let out = run_to_string(Operation::Entities, &args, &settings(OutputFormat::Json))?;
        let value: serde_json::Value = serde_json::from_str(&out)?;
        assert_eq!(value["Ada Lovelace"], "PERSON");
        assert_eq!(value["London"], "GPE");
        Ok(())
    }
}
