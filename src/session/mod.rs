//! Writing Session
//!
//! The view-model behind every front end: state, generation sequencing and
//! derived statistics.

mod controller;
mod stats;

pub use controller::{GenerationPhase, GenerationTicket, SessionController, SessionTheme, UiError};
pub use stats::ContentStats;
