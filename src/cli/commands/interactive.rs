//! Interactive Command
//!
//! Line-oriented session over a single controller.
//!
//! Usage:
//!   blogwriter interactive [--output-dir <DIR>]

use std::io::{BufRead, Write};
use std::path::PathBuf;
use std::str::FromStr;

use tokio::runtime::Runtime;
use tracing::debug;

use crate::ai::{OpenRouterClient, Tone};
use crate::cli::ui::Output;
use crate::cli::util::{CommandContext, output_for, render_session};
use crate::export::Osc52Clipboard;
use crate::session::SessionController;
use crate::types::{BlogError, ErrorKind, Result};

/// One parsed input line
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReplCommand {
    Topic(String),
    Tone(Tone),
    Generate,
    Copy,
    Download,
    Theme,
    Show,
    Stats,
    Help,
    Quit,
    Empty,
}

impl FromStr for ReplCommand {
    type Err = BlogError;

    fn from_str(line: &str) -> Result<Self> {
        let line = line.trim();
        let (word, rest) = line
            .split_once(char::is_whitespace)
            .map(|(w, r)| (w, r.trim()))
            .unwrap_or((line, ""));

        match word.to_lowercase().as_str() {
            "" => Ok(Self::Empty),
            "topic" => Ok(Self::Topic(rest.to_string())),
            "tone" if rest.is_empty() => Err(BlogError::Validation(format!(
                "Usage: tone <{}>",
                tone_choices()
            ))),
            "tone" => rest.parse().map(Self::Tone),
            "generate" | "gen" | "g" => Ok(Self::Generate),
            "copy" => Ok(Self::Copy),
            "download" | "save" => Ok(Self::Download),
            "theme" => Ok(Self::Theme),
            "show" => Ok(Self::Show),
            "stats" => Ok(Self::Stats),
            "help" | "?" => Ok(Self::Help),
            "quit" | "exit" | "q" => Ok(Self::Quit),
            other => Err(BlogError::Validation(format!(
                "Unknown command '{}'. Type 'help' for commands.",
                other
            ))),
        }
    }
}

fn tone_choices() -> String {
    Tone::ALL
        .iter()
        .map(|t| t.as_str())
        .collect::<Vec<_>>()
        .join("|")
}

/// Run the session until `quit` or end of input
pub fn run(output_dir: Option<PathBuf>) -> Result<()> {
    let ctx = CommandContext::load()?;
    let mut session = ctx.session()?;
    let mut output = output_for(&session);
    let downloader = ctx.downloader(output_dir);
    let clipboard = Osc52Clipboard::new();
    let rt = Runtime::new()?;

    // A missing key fails each attempt rather than the whole session
    let generator = ctx.generator();
    if let Err(e) = &generator {
        output.warning(&e.user_message());
    }

    let stdin = std::io::stdin();
    output.header("BlogWriter AI");
    print_help(&session);

    loop {
        print!("\n{}> ", session.tone());
        std::io::stdout().flush()?;

        let mut line = String::new();
        if stdin.lock().read_line(&mut line)? == 0 {
            break;
        }

        let command = match line.parse::<ReplCommand>() {
            Ok(command) => command,
            Err(e) => {
                output.error(&e.user_message());
                continue;
            }
        };
        debug!("Interactive command: {:?}", command);

        match command {
            ReplCommand::Empty => {}
            ReplCommand::Quit => break,
            ReplCommand::Help => print_help(&session),
            ReplCommand::Topic(topic) => {
                session.set_topic(topic);
                output.info(&format!("Topic: {}", session.topic()));
            }
            ReplCommand::Tone(tone) => {
                session.set_tone(tone);
                output.info(&format!("Tone: {} ({})", tone.label(), tone.description()));
            }
            ReplCommand::Generate => {
                generate(&rt, &mut session, &generator, &output);
                render_session(&output, &session);
            }
            ReplCommand::Show => render_session(&output, &session),
            ReplCommand::Stats => {
                let stats = session.stats();
                output.info(&format!(
                    "{} words, {} min read",
                    stats.word_count, stats.reading_time
                ));
            }
            ReplCommand::Copy => {
                if session.copy(&clipboard) {
                    output.success("Copied to clipboard");
                } else if let Some(error) = session.error() {
                    output.ui_error(error);
                }
            }
            ReplCommand::Download => match session.download(&downloader) {
                Some(path) => output.success(&format!("Saved to {}", path.display())),
                None => {
                    if let Some(error) = session.error() {
                        output.ui_error(error);
                    }
                }
            },
            ReplCommand::Theme => {
                let dark = session.toggle_theme();
                output = Output::new(dark);
                match session.error() {
                    Some(error) if error.kind == ErrorKind::Preferences => output.ui_error(error),
                    _ => output.success(&format!(
                        "Switched to {} mode",
                        if dark { "dark" } else { "light" }
                    )),
                }
            }
        }
    }

    Ok(())
}

fn generate(
    rt: &Runtime,
    session: &mut SessionController,
    generator: &Result<OpenRouterClient>,
    output: &Output,
) {
    match generator {
        Ok(generator) => {
            if !session.topic().trim().is_empty() {
                output.info("Generating...");
            }
            rt.block_on(session.generate(generator));
        }
        Err(e) => session.report_error(e),
    }
}

fn print_help(session: &SessionController) {
    println!("Commands:");
    println!("  topic <text>     Set the blog topic");
    println!("  tone <{}>  Set the writing tone", tone_choices());
    println!("  generate         Write a post for the current topic and tone");
    println!("  show             Show the current content");
    println!("  stats            Word count and reading time");
    println!("  copy             Copy content to the clipboard");
    println!("  download         Save content as blog-<topic>.txt");
    println!("  theme            Toggle dark/light mode");
    println!("  quit             Leave");
    if !session.topic().is_empty() {
        println!("\nCurrent topic: {}", session.topic());
    }
}
