//! Line-by-line playback of a script.
//!
//! A [`Playback`] is an iterator of [`Cue`]s. The caller owns the clock: it
//! waits out each cue's delay and then applies the line, so ordering is exactly
//! the authored order and nothing overlaps.

use std::collections::VecDeque;
use std::time::Duration;

use script_book::{Script, ScriptLine};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pacing {
    default_delay: Duration,
    instant: bool,
}

impl Pacing {
    pub fn new(default_delay: Duration) -> Self {
        Self {
            default_delay,
            instant: false,
        }
    }

    /// Every cue fires immediately, ignoring authored delays.
    pub fn instant() -> Self {
        Self {
            default_delay: Duration::ZERO,
            instant: true,
        }
    }

    pub fn delay_for(&self, line: &ScriptLine) -> Duration {
        if self.instant {
            return Duration::ZERO;
        }

        line.delay_ms
            .map(Duration::from_millis)
            .unwrap_or(self.default_delay)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cue {
    pub delay: Duration,
    pub line: ScriptLine,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Playback {
    cues: VecDeque<Cue>,
}

impl Playback {
    pub fn new(script: Script, pacing: &Pacing) -> Self {
        let cues = script
            .into_iter()
            .map(|line| Cue {
                delay: pacing.delay_for(&line),
                line,
            })
            .collect();

        Self { cues }
    }

    /// Delay before the next cue, `None` once drained.
    pub fn next_delay(&self) -> Option<Duration> {
        self.cues.front().map(|cue| cue.delay)
    }

    pub fn remaining(&self) -> usize {
        self.cues.len()
    }

    pub fn is_finished(&self) -> bool {
        self.cues.is_empty()
    }
}

impl Iterator for Playback {
    type Item = Cue;

    fn next(&mut self) -> Option<Cue> {
        self.cues.pop_front()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.cues.len(), Some(self.cues.len()))
    }
}
