use std::io::{self, IsTerminal};
use std::time::Duration;

use anyhow::{Context, Result};
use dbc_terminal::runtime::{run_session, spawn_line_reader, spawn_threat_drift};
use dbc_terminal::{logging, App, EnvConfig, Renderer, ScriptBook, ThreatGauge};

const THREAT_DRIFT_PERIOD: Duration = Duration::from_secs(3);

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let config = EnvConfig::from_env();
    logging::init(&config).context("failed to initialize logging")?;

    let book = ScriptBook::load(config.scripts_path.as_deref())
        .context("failed to load script book")?;

    let gauge = ThreatGauge::new(config.initial_danger);
    let drift = spawn_threat_drift(gauge.clone(), THREAT_DRIFT_PERIOD);

    let interactive = io::stdin().is_terminal();
    let input =
        spawn_line_reader(io::BufReader::new(io::stdin())).context("failed to read stdin")?;
    let mut renderer = Renderer::new(io::stdout(), config.render_options(interactive));
    let mut app = App::new(book, config.session_options());

    let shutdown = async {
        if tokio::signal::ctrl_c().await.is_err() {
            std::future::pending::<()>().await;
        }
    };

    let outcome = run_session(&mut app, input, &mut renderer, &gauge, shutdown).await;
    drift.abort();
    outcome.context("terminal session failed")?;

    Ok(())
}
