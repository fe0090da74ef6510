use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::ScriptBookError;
use crate::schema::Script;

/// Script book compiled into the binary.
pub const BUILTIN_SCRIPT_BOOK: &str = include_str!("builtin.json");

const BUILTIN_ORIGIN: &str = "<builtin>";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ScriptBook {
    /// Played once when a session starts.
    pub boot: Script,
    pub auth: Script,
    pub bypass: Script,
    pub help_locked: Script,
    pub help_unlocked: Script,
    pub denied: Script,
    /// Fallback for unrecognized commands once unlocked.
    pub unknown: Script,
    /// Played when resolving any other script fails.
    pub failure: Script,
    #[serde(default)]
    pub commands: BTreeMap<String, Script>,
    #[serde(default)]
    pub suggestions: Vec<String>,
}

impl ScriptBook {
    pub fn builtin() -> Result<Self, ScriptBookError> {
        Self::from_json_str(BUILTIN_ORIGIN, BUILTIN_SCRIPT_BOOK)
    }

    pub fn from_json_str(origin: &str, json: &str) -> Result<Self, ScriptBookError> {
        let book: ScriptBook =
            serde_json::from_str(json).map_err(|source| ScriptBookError::parse(origin, source))?;
        book.validate(origin)?;
        Ok(book)
    }

    pub fn from_path(path: &Path) -> Result<Self, ScriptBookError> {
        let json = fs::read_to_string(path)
            .map_err(|source| ScriptBookError::io("reading script book", path, source))?;
        Self::from_json_str(&path.display().to_string(), &json)
    }

    /// Loads `path` when given, the embedded book otherwise.
    pub fn load(path: Option<&Path>) -> Result<Self, ScriptBookError> {
        match path {
            Some(path) => Self::from_path(path),
            None => Self::builtin(),
        }
    }

    fn validate(&self, origin: &str) -> Result<(), ScriptBookError> {
        if let Some((command, _)) = self.commands.iter().find(|(_, script)| script.is_empty()) {
            return Err(ScriptBookError::EmptyCommandScript {
                origin: origin.to_string(),
                command: command.clone(),
            });
        }

        Ok(())
    }

    pub fn command(&self, keyword: &str) -> Result<&Script, ScriptBookError> {
        self.commands
            .get(keyword)
            .ok_or_else(|| ScriptBookError::MissingCommand {
                command: keyword.to_string(),
            })
    }

    pub fn has_command(&self, keyword: &str) -> bool {
        self.commands.contains_key(keyword)
    }
}
