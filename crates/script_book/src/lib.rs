//! Scripted dialogue data for the DBC terminal.
//!
//! A [`ScriptBook`] is the static command→script table the terminal dispatches
//! into. It is authored as JSON, embedded at build time, and may be replaced at
//! startup by an override file with the same shape. Books are immutable once
//! loaded.
//!
//! Script lines may carry `{name}` placeholders that are filled at play time
//! through [`Script::render`].

mod book;
mod error;
mod schema;
mod template;

pub use book::{ScriptBook, BUILTIN_SCRIPT_BOOK};
pub use error::ScriptBookError;
pub use schema::{LineKind, Script, ScriptLine};
pub use template::{interpolate, Placeholders};
