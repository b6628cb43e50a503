// Terminal form: text or URL, preview percentage, operation, backend, then confirm.
use std::io::{BufRead, Write};

use termcolor::{Color, ColorSpec, WriteColor};
use tracing::debug;

use crate::acquire::{acquire, Source, PLACEHOLDER_TEXT};
use crate::analysis::{self, Operation};
use crate::error::AppResult;
use crate::nlp::SummarizerKind;
use crate::pipeline::Pipeline;
use crate::preview::preview;
use crate::render::{banner, render, OutputFormat};

const SURPRISE_LABEL: &str = "Surprise me";

/// Print `message` and read one line. `None` at end of input.
fn prompt<R: BufRead, W: WriteColor>(input: &mut R, out: &mut W, message: &str) -> AppResult<Option<String>> {
    write!(out, "{}", message)?;
    out.flush()?;
    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        return Ok(None);
    }
    Ok(Some(line.trim_end_matches(['\r', '\n']).to_string()))
}

/// Parse a 1-based menu choice. Empty input picks the first entry.
fn parse_choice(answer: &str, entries: usize) -> Option<usize> {
    let answer = answer.trim();
    if answer.is_empty() {
        return Some(0);
    }
    match answer.parse::<usize>() {
        Ok(n) if (1..=entries).contains(&n) => Some(n - 1),
        _ => None,
    }
}

fn write_error<W: WriteColor>(out: &mut W, message: &str) -> AppResult<()> {
    out.set_color(ColorSpec::new().set_fg(Some(Color::Red)))?;
    write!(out, "Error: {}", message)?;
    out.reset()?;
    writeln!(out)?;
    Ok(())
}

/// Ask for a menu choice until a valid one is given.
fn choose<R: BufRead, W: WriteColor>(
    input: &mut R,
    out: &mut W,
    title: &str,
    entries: &[&str],
) -> AppResult<Option<usize>> {
    loop {
        writeln!(out, "{}", title)?;
        for (i, entry) in entries.iter().enumerate() {
            writeln!(out, "  {}) {}", i + 1, entry)?;
        }
        let Some(answer) = prompt(input, out, "Choice [1]: ")? else {
            return Ok(None);
        };
        match parse_choice(&answer, entries.len()) {
            Some(i) => return Ok(Some(i)),
            None => write_error(out, &format!("pick a number from 1 to {}", entries.len()))?,
        }
    }
}

fn ask_percentage<R: BufRead, W: WriteColor>(input: &mut R, out: &mut W) -> AppResult<Option<u32>> {
    loop {
        let Some(answer) = prompt(input, out, "Preview percentage (0-100) [0]: ")? else {
            return Ok(None);
        };
        let answer = answer.trim();
        if answer.is_empty() {
            return Ok(Some(0));
        }
        match answer.parse::<u32>() {
            Ok(pct) if pct <= 100 => return Ok(Some(pct)),
            _ => write_error(out, "the percentage must be a whole number from 0 to 100")?,
        }
    }
}

/// Run the form until the input ends or the user declines another round.
pub fn run_form<R: BufRead, W: WriteColor>(
    input: &mut R,
    out: &mut W,
    pipeline: &Pipeline,
    format: OutputFormat,
) -> AppResult<()> {
    loop {
        let message = format!("Enter Text (or URL) [{}]: ", PLACEHOLDER_TEXT);
        let Some(raw) = prompt(input, out, &message)? else {
            return Ok(());
        };
        let text = match acquire(&Source::Input(raw)) {
            Ok(text) => text,
            Err(e) => {
                write_error(out, &e.to_string())?;
                continue;
            }
        };

        let Some(pct) = ask_percentage(input, out)? else {
            return Ok(());
        };
        if pct > 0 {
            writeln!(out, "Preview: {}", preview(&text, pct)?)?;
        }

        let mut menu: Vec<&str> = Operation::MENU.iter().map(|op| op.label()).collect();
        menu.push(SURPRISE_LABEL);
        let Some(choice) = choose(input, out, "Select Application", &menu)? else {
            return Ok(());
        };

        let op = if choice == Operation::MENU.len() {
            let op = Operation::surprise(&mut rand::thread_rng());
            writeln!(out, "Surprise! Running: {}", op.label())?;
            op
        } else if let Operation::Summarize(_) = Operation::MENU[choice] {
            let names: Vec<&str> = SummarizerKind::ALL.iter().map(|k| k.display_name()).collect();
            let Some(k) = choose(input, out, "Select Summarizer", &names)? else {
                return Ok(());
            };
            Operation::Summarize(SummarizerKind::ALL[k])
        } else {
            Operation::MENU[choice]
        };

        let confirm = format!("Press Enter to {}, or 'n' to skip: ", op.action());
        let Some(answer) = prompt(input, out, &confirm)? else {
            return Ok(());
        };
        if answer.trim().eq_ignore_ascii_case("n") {
            debug!("action skipped");
        } else {
            banner(op.info(), format, out)?;
            match analysis::run(op, &text, pipeline) {
                Ok(result) => render(&result, format, out)?,
                Err(e) => write_error(out, &e.to_string())?,
            }
        }

        let Some(again) = prompt(input, out, "Analyze another text? [Y/n]: ")? else {
            return Ok(());
        };
        if again.trim().eq_ignore_ascii_case("n") {
            return Ok(());
        }
    }
}
