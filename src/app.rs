use std::time::Duration;

use club_rewards::AchievementBoard;
use script_book::{Placeholders, Script, ScriptBook, ScriptBookError, ScriptLine};
use tracing::{debug, info, warn};

use crate::commands::{
    fallback_suggestions, hint_request, normalize, parse_command, suggest, Command,
    MAX_SUGGESTIONS,
};
use crate::config::DEFAULT_LINE_DELAY_MS;
use crate::sequencer::{Cue, Pacing, Playback};
use crate::threat::ThreatSource;
use crate::transcript::Transcript;

const FIRST_GM_ACHIEVEMENT: &str = "first-gm";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Access {
    Locked,
    Unlocked,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    /// Boot script is playing; input is not accepted yet.
    Booting,
    Locked,
    Unlocked,
    /// A script is playing; the session returns to `access` once it drains.
    Playing { access: Access },
    Exiting,
}

impl Mode {
    fn settled(access: Access) -> Self {
        match access {
            Access::Locked => Mode::Locked,
            Access::Unlocked => Mode::Unlocked,
        }
    }

    pub fn is_busy(self) -> bool {
        matches!(self, Mode::Booting | Mode::Playing { .. })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionOptions {
    pub play_boot: bool,
    pub bypass_enabled: bool,
    pub pacing: Pacing,
}

impl Default for SessionOptions {
    fn default() -> Self {
        Self {
            play_boot: true,
            bypass_enabled: false,
            pacing: Pacing::new(Duration::from_millis(DEFAULT_LINE_DELAY_MS)),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// Echo appended and the resolved script queued.
    Accepted { command: Command, script_len: usize },
    /// `?`-suffixed input: completions for the partial command. The
    /// transcript is untouched.
    Hint { suggestions: Vec<String> },
    /// Arrived while a script was playing.
    Dropped,
    /// Blank input.
    Ignored,
    /// The session is exiting.
    Closed,
}

pub struct App {
    mode: Mode,
    transcript: Transcript,
    playback: Playback,
    book: ScriptBook,
    options: SessionOptions,
    achievements: AchievementBoard,
}

impl App {
    pub fn new(book: ScriptBook, options: SessionOptions) -> Self {
        let mut app = Self {
            mode: Mode::Locked,
            transcript: Transcript::new(),
            playback: Playback::default(),
            book,
            options,
            achievements: AchievementBoard::new(),
        };

        if options.play_boot && !app.book.boot.is_empty() {
            app.playback = Playback::new(app.book.boot.clone(), &options.pacing);
            app.mode = Mode::Booting;
        }

        app
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn is_authenticated(&self) -> bool {
        matches!(
            self.mode,
            Mode::Unlocked
                | Mode::Playing {
                    access: Access::Unlocked
                }
        )
    }

    pub fn transcript(&self) -> &Transcript {
        &self.transcript
    }

    pub fn book(&self) -> &ScriptBook {
        &self.book
    }

    pub fn options(&self) -> &SessionOptions {
        &self.options
    }

    pub fn achievements(&self) -> &AchievementBoard {
        &self.achievements
    }

    /// Completions for a partial command, at most [`MAX_SUGGESTIONS`].
    pub fn hint(&self, partial: &str) -> Vec<&str> {
        suggest(partial, &self.book.suggestions, MAX_SUGGESTIONS)
    }

    /// Delay before the next queued line, `None` when nothing is playing.
    pub fn next_delay(&self) -> Option<Duration> {
        self.playback.next_delay()
    }

    /// Appends the next queued line and returns it.
    pub fn advance(&mut self) -> Option<&ScriptLine> {
        let Cue { line, .. } = self.playback.next()?;
        self.transcript.push(line);
        self.settle_if_drained();
        self.transcript.last()
    }

    /// Applies every queued line without waiting. Returns how many were applied.
    pub fn drain(&mut self) -> usize {
        let mut applied = 0usize;
        while self.advance().is_some() {
            applied += 1;
        }
        applied
    }

    pub fn on_submit(&mut self, input: &str, threat: &dyn ThreatSource) -> SubmitOutcome {
        let normalized = normalize(input);
        if normalized.is_empty() {
            return SubmitOutcome::Ignored;
        }

        let access = match self.mode {
            Mode::Locked => Access::Locked,
            Mode::Unlocked => Access::Unlocked,
            Mode::Booting | Mode::Playing { .. } => {
                debug!(input = %normalized, "submission dropped during playback");
                return SubmitOutcome::Dropped;
            }
            Mode::Exiting => return SubmitOutcome::Closed,
        };

        if let Some(partial) = hint_request(&normalized) {
            let suggestions = self.hint(partial).into_iter().map(str::to_string).collect();
            return SubmitOutcome::Hint { suggestions };
        }

        let command = parse_command(&normalized, self.options.bypass_enabled);
        self.transcript.push(ScriptLine::input(input));

        let (script, next_access) = match self.resolve(&command, access, &normalized, threat) {
            Ok(resolved) => {
                self.record_achievements(&command);
                resolved
            }
            Err(error) => {
                warn!(input = %normalized, %error, "script resolution failed");
                (self.book.failure.clone(), access)
            }
        };

        debug!(
            command = ?command,
            from = ?access,
            to = ?next_access,
            lines = script.len(),
            "dispatched"
        );

        let script_len = script.len();
        self.playback = Playback::new(script, &self.options.pacing);
        self.mode = Mode::Playing {
            access: next_access,
        };
        self.settle_if_drained();

        SubmitOutcome::Accepted {
            command,
            script_len,
        }
    }

    /// Ends the session, discarding anything still queued. Returns the number
    /// of discarded lines.
    pub fn on_quit(&mut self) -> usize {
        let discarded = self.playback.remaining();
        self.playback = Playback::default();
        self.mode = Mode::Exiting;
        discarded
    }

    fn resolve(
        &self,
        command: &Command,
        access: Access,
        normalized: &str,
        threat: &dyn ThreatSource,
    ) -> Result<(Script, Access), ScriptBookError> {
        let danger = threat.danger_level();
        let suggestions = match command {
            Command::Unknown(typed) => {
                fallback_suggestions(typed, &self.book.suggestions).join(", ")
            }
            _ => String::new(),
        };
        let values = Placeholders::new()
            .with("danger_level", danger.to_string())
            .with("network_security", danger.network_security().to_string())
            .with("input", normalized)
            .with("suggestions", suggestions);

        let (template, next_access) = match command {
            Command::Authenticate => (&self.book.auth, Access::Unlocked),
            Command::Help => match access {
                Access::Locked => (&self.book.help_locked, access),
                Access::Unlocked => (&self.book.help_unlocked, access),
            },
            Command::Bypass => (&self.book.bypass, Access::Unlocked),
            _ if access == Access::Locked => (&self.book.denied, access),
            Command::Keyword(keyword) => (self.book.command(keyword)?, access),
            Command::Unknown(_) => (&self.book.unknown, access),
        };

        Ok((template.render(&values)?, next_access))
    }

    fn record_achievements(&mut self, command: &Command) {
        if *command != Command::Authenticate {
            return;
        }

        match self.achievements.record_progress(FIRST_GM_ACHIEVEMENT, 1) {
            Ok(Some(achievement)) => {
                info!(id = achievement.id, title = achievement.title, "achievement unlocked")
            }
            Ok(None) => {}
            Err(error) => warn!(%error, "achievement progress not recorded"),
        }
    }

    fn settle_if_drained(&mut self) {
        if !self.playback.is_finished() {
            return;
        }

        match self.mode {
            Mode::Booting => self.mode = Mode::Locked,
            Mode::Playing { access } => self.mode = Mode::settled(access),
            Mode::Locked | Mode::Unlocked | Mode::Exiting => {}
        }
    }
}
