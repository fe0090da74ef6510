use serde::{Deserialize, Serialize};

use crate::error::ScriptBookError;
use crate::template::{interpolate, Placeholders};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LineKind {
    Input,
    Output,
    Agent,
    System,
    Error,
    Success,
    Warning,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ScriptLine {
    pub text: String,
    pub kind: LineKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub delay_ms: Option<u64>,
}

impl ScriptLine {
    #[must_use]
    pub fn new(kind: LineKind, text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            kind,
            delay_ms: None,
        }
    }

    /// Echo line appended for every accepted submission.
    #[must_use]
    pub fn input(text: impl Into<String>) -> Self {
        Self::new(LineKind::Input, text)
    }

    #[must_use]
    pub fn with_delay_ms(mut self, delay_ms: u64) -> Self {
        self.delay_ms = Some(delay_ms);
        self
    }
}

/// An ordered, author-defined sequence of lines played for one command.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Script {
    lines: Vec<ScriptLine>,
}

impl Script {
    #[must_use]
    pub fn new(lines: Vec<ScriptLine>) -> Self {
        Self { lines }
    }

    pub fn lines(&self) -> &[ScriptLine] {
        &self.lines
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Returns a copy of the script with every placeholder filled in.
    ///
    /// Fails on the first line that names a placeholder `values` does not carry;
    /// no partial script is returned.
    pub fn render(&self, values: &Placeholders) -> Result<Script, ScriptBookError> {
        let lines = self
            .lines
            .iter()
            .map(|line| {
                Ok(ScriptLine {
                    text: interpolate(&line.text, values)?,
                    kind: line.kind,
                    delay_ms: line.delay_ms,
                })
            })
            .collect::<Result<Vec<_>, ScriptBookError>>()?;

        Ok(Script { lines })
    }
}

impl IntoIterator for Script {
    type Item = ScriptLine;
    type IntoIter = std::vec::IntoIter<ScriptLine>;

    fn into_iter(self) -> Self::IntoIter {
        self.lines.into_iter()
    }
}
