//! ANSI styling for transcript lines.

use std::io::{self, Write};

use script_book::{LineKind, ScriptLine};

pub const INPUT_PROMPT: &str = "> ";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RenderOptions {
    pub color: bool,
    /// Print `input` lines. Off when the terminal already echoed what was typed.
    pub echo_input: bool,
    /// Print [`INPUT_PROMPT`] whenever the session is ready for input.
    pub prompt: bool,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            color: true,
            echo_input: true,
            prompt: false,
        }
    }
}

fn ansi_wrap(text: &str, prefix: &str, suffix: &str) -> String {
    format!("{prefix}{text}{suffix}")
}

fn style_codes(kind: LineKind) -> Option<(&'static str, &'static str)> {
    match kind {
        LineKind::Input => Some(("\x1b[1;32m", "\x1b[0m")),
        LineKind::Output => None,
        LineKind::Agent => Some(("\x1b[36m", "\x1b[39m")),
        LineKind::System => Some(("\x1b[2m", "\x1b[22m")),
        LineKind::Error => Some(("\x1b[31m", "\x1b[39m")),
        LineKind::Success => Some(("\x1b[32m", "\x1b[39m")),
        LineKind::Warning => Some(("\x1b[33m", "\x1b[39m")),
    }
}

/// Formats one line without a trailing newline.
pub fn format_line(line: &ScriptLine, color: bool) -> String {
    let text = match line.kind {
        LineKind::Input => format!("{INPUT_PROMPT}{}", line.text),
        _ => line.text.clone(),
    };

    match style_codes(line.kind) {
        Some((prefix, suffix)) if color => ansi_wrap(&text, prefix, suffix),
        _ => text,
    }
}

pub struct Renderer<W: Write> {
    out: W,
    options: RenderOptions,
}

impl<W: Write> Renderer<W> {
    pub fn new(out: W, options: RenderOptions) -> Self {
        Self { out, options }
    }

    pub fn render_line(&mut self, line: &ScriptLine) -> io::Result<()> {
        if line.kind == LineKind::Input && !self.options.echo_input {
            return Ok(());
        }

        writeln!(self.out, "{}", format_line(line, self.options.color))?;
        self.out.flush()
    }

    /// Completions for a hint request, on one dimmed line. Nothing is printed
    /// when there are none.
    pub fn render_hint(&mut self, suggestions: &[String]) -> io::Result<()> {
        if suggestions.is_empty() {
            return Ok(());
        }

        let line = ScriptLine::new(LineKind::System, suggestions.join("  "));
        writeln!(self.out, "{}", format_line(&line, self.options.color))?;
        self.out.flush()
    }

    /// Writes the prompt without a newline so typed input follows it.
    pub fn render_prompt(&mut self) -> io::Result<()> {
        if !self.options.prompt {
            return Ok(());
        }

        write!(self.out, "{INPUT_PROMPT}")?;
        self.out.flush()
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}
