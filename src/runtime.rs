//! Async session loop.
//!
//! One task owns the [`App`]. It waits on whichever comes first: the next
//! submitted line or the timer for the next queued script line. Input is
//! polled first so a line that arrives while a script is playing is seen (and
//! dropped) before the playback timer fires. Lines with a zero delay are
//! applied as soon as they are queued.

use std::future::Future;
use std::io::{BufRead, Write};
use std::thread;
use std::time::Duration;

use rand::rngs::StdRng;
use rand::SeedableRng;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio::time::{sleep_until, Instant};
use tracing::{debug, info, warn};

use crate::app::{App, SubmitOutcome};
use crate::error::SessionError;
use crate::render::Renderer;
use crate::threat::{ThreatGauge, ThreatSource};

const INPUT_CHANNEL_CAPACITY: usize = 64;

/// How a session loop ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionEnd {
    /// Input closed and the last script finished playing.
    InputClosed,
    /// The shutdown future resolved; queued lines were discarded.
    Shutdown { discarded: usize },
}

/// Runs the session until input closes (after the current script drains) or
/// `shutdown` resolves.
pub async fn run_session<W, F>(
    app: &mut App,
    mut input: mpsc::Receiver<String>,
    renderer: &mut Renderer<W>,
    threat: &dyn ThreatSource,
    shutdown: F,
) -> Result<SessionEnd, SessionError>
where
    W: Write,
    F: Future<Output = ()>,
{
    tokio::pin!(shutdown);

    let mut input_open = true;
    let mut deadline: Option<Instant> = None;
    let mut prompted = false;

    info!(mode = ?app.mode(), "session started");

    loop {
        while app.next_delay() == Some(Duration::ZERO) {
            if let Some(line) = app.advance() {
                renderer.render_line(line)?;
            }
        }

        if deadline.is_none() {
            deadline = app.next_delay().map(|delay| Instant::now() + delay);
        }

        if !input_open && deadline.is_none() {
            app.on_quit();
            info!("input closed, session finished");
            return Ok(SessionEnd::InputClosed);
        }

        if input_open && !prompted && !app.mode().is_busy() {
            renderer.render_prompt()?;
            prompted = true;
        }

        tokio::select! {
            biased;

            _ = &mut shutdown => {
                let discarded = app.on_quit();
                info!(discarded, "session shut down");
                return Ok(SessionEnd::Shutdown { discarded });
            }

            line = input.recv(), if input_open => match line {
                Some(text) => {
                    prompted = false;
                    match app.on_submit(&text, threat) {
                        SubmitOutcome::Accepted { .. } => {
                            if let Some(echo) = app.transcript().last() {
                                renderer.render_line(echo)?;
                            }
                        }
                        SubmitOutcome::Hint { suggestions } => renderer.render_hint(&suggestions)?,
                        SubmitOutcome::Dropped
                        | SubmitOutcome::Ignored
                        | SubmitOutcome::Closed => {}
                    }
                }
                None => {
                    debug!("input closed");
                    input_open = false;
                }
            },

            _ = sleep_until(deadline.unwrap_or_else(Instant::now)), if deadline.is_some() => {
                deadline = None;
                if let Some(line) = app.advance() {
                    renderer.render_line(line)?;
                }
            }
        }
    }
}

/// Reads stdin on a dedicated thread so a blocked read never holds up runtime
/// shutdown. Lines that are not valid UTF-8 are skipped; only end of input or
/// a read error closes the channel.
pub fn spawn_line_reader<R>(mut reader: R) -> Result<mpsc::Receiver<String>, SessionError>
where
    R: BufRead + Send + 'static,
{
    let (sender, receiver) = mpsc::channel(INPUT_CHANNEL_CAPACITY);

    thread::Builder::new()
        .name("dbc-terminal-input".to_string())
        .spawn(move || {
            let mut buf = Vec::new();
            loop {
                buf.clear();
                match reader.read_until(b'\n', &mut buf) {
                    Ok(0) => break,
                    Ok(_) => {}
                    Err(error) => {
                        warn!(%error, "stdin read failed, closing input");
                        break;
                    }
                }

                let Some(line) = decode_line(&buf) else {
                    warn!(bytes = buf.len(), "skipping input line that is not valid UTF-8");
                    continue;
                };
                if sender.blocking_send(line).is_err() {
                    break;
                }
            }
        })
        .map_err(SessionError::InputReader)?;

    Ok(receiver)
}

fn decode_line(buf: &[u8]) -> Option<String> {
    let line = buf.strip_suffix(b"\n").unwrap_or(buf);
    let line = line.strip_suffix(b"\r").unwrap_or(line);
    String::from_utf8(line.to_vec()).ok()
}

/// Drifts the gauge every `period` until the returned task is aborted.
pub fn spawn_threat_drift(gauge: ThreatGauge, period: Duration) -> JoinHandle<()> {
    tokio::spawn(async move {
        let mut rng = StdRng::from_entropy();
        let mut ticker = tokio::time::interval(period);
        ticker.tick().await;

        loop {
            ticker.tick().await;
            let level = gauge.drift(&mut rng);
            debug!(danger_level = level.value(), "threat gauge drifted");
        }
    })
}
