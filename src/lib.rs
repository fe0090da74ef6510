//! Scripted terminal for the Dallas Buyers Club community.
//!
//! Invariant: the transcript is append-only. Every accepted submission appends
//! one `input` echo line, then the resolved script's lines in authored order.
//!
//! # Overview
//! - [`App`] is the session state machine (`Booting`, `Locked`, `Unlocked`,
//!   `Playing`, `Exiting`). It is synchronous and owns the transcript.
//! - [`commands`] normalizes input and classifies it against the keyword table.
//! - [`sequencer`] turns a script into timed cues; the caller owns the clock.
//! - [`runtime::run_session`] drives an [`App`] from a line channel on a tokio
//!   timer and renders through [`Renderer`].
//!
//! Scripts come from the `script_book` crate. Configuration is read from
//! `DBC_TERMINAL_*` environment variables, see [`config::EnvConfig`].

pub mod app;
pub mod commands;
pub mod config;
pub mod error;
pub mod logging;
pub mod render;
pub mod runtime;
pub mod sequencer;
pub mod threat;
pub mod transcript;

pub use crate::app::{Access, App, Mode, SessionOptions, SubmitOutcome};
pub use crate::commands::{hint_request, normalize, parse_command, suggest, Command};
pub use crate::config::EnvConfig;
pub use crate::error::SessionError;
pub use crate::render::{format_line, RenderOptions, Renderer};
pub use crate::runtime::{run_session, SessionEnd};
pub use crate::sequencer::{Cue, Pacing, Playback};
pub use crate::threat::{DangerLevel, ThreatGauge, ThreatSource};
pub use crate::transcript::Transcript;

pub use script_book::{LineKind, Script, ScriptBook, ScriptLine};
