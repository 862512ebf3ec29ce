//! Generate Command
//!
//! One-shot generation from flags.
//!
//! Usage:
//!   blogwriter generate --topic <TOPIC> [--tone formal|casual|seo]
//!                       [--copy] [--download] [--output-dir <DIR>] [-f json]

use std::path::PathBuf;

use serde_json::json;
use tokio::runtime::Runtime;

use crate::ai::{ContentGenerator, Tone};
use crate::cli::util::{CommandContext, output_for, render_session};
use crate::export::Osc52Clipboard;
use crate::session::{GenerationPhase, SessionController};
use crate::types::Result;

/// Flags for a single generation
#[derive(Debug, Clone)]
pub struct GenerateOptions {
    pub topic: String,
    pub tone: Tone,
    pub copy: bool,
    pub download: bool,
    pub output_dir: Option<PathBuf>,
    pub format: String,
}

/// Run one attempt; returns whether content was produced
pub fn run(options: GenerateOptions) -> Result<bool> {
    let ctx = CommandContext::load()?;
    let mut session = ctx.session()?;
    let output = output_for(&session);
    let as_json = options.format == "json";

    session.set_topic(options.topic);
    session.set_tone(options.tone);

    let phase = match ctx.generator() {
        Ok(generator) => {
            if !as_json {
                output.info(&format!(
                    "Generating a {} post with {}...",
                    session.tone().label(),
                    generator.model()
                ));
            }
            let rt = Runtime::new()?;
            rt.block_on(session.generate(&generator))
        }
        Err(e) => {
            session.report_error(&e);
            session.phase()
        }
    };

    let mut saved = None;
    if phase == GenerationPhase::Succeeded {
        if options.copy && session.copy(&Osc52Clipboard::new()) && !as_json {
            output.success("Copied to clipboard");
        }
        if options.download {
            saved = session.download(&ctx.downloader(options.output_dir));
        }
    }

    if as_json {
        println!("{}", serde_json::to_string_pretty(&session_json(&session, saved.as_ref()))?);
    } else {
        render_session(&output, &session);
        if let Some(path) = &saved {
            output.success(&format!("Saved to {}", path.display()));
        }
    }

    Ok(phase == GenerationPhase::Succeeded)
}

fn session_json(session: &SessionController, saved: Option<&PathBuf>) -> serde_json::Value {
    json!({
        "topic": session.topic().trim(),
        "tone": session.tone(),
        "content": session.content(),
        "stats": session.stats(),
        "error": session.error().map(|e| json!({
            "kind": e.kind.to_string(),
            "message": e.message,
        })),
        "saved_to": saved.map(|p| p.display().to_string()),
    })
}
