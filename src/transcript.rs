use script_book::{LineKind, ScriptLine};

/// Append-only record of every line shown in a session.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Transcript {
    lines: Vec<ScriptLine>,
}

impl Transcript {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, line: ScriptLine) {
        self.lines.push(line);
    }

    pub fn lines(&self) -> &[ScriptLine] {
        &self.lines
    }

    pub fn last(&self) -> Option<&ScriptLine> {
        self.lines.last()
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    pub fn texts(&self) -> impl Iterator<Item = &str> {
        self.lines.iter().map(|line| line.text.as_str())
    }

    pub fn count_kind(&self, kind: LineKind) -> usize {
        self.lines.iter().filter(|line| line.kind == kind).count()
    }
}
