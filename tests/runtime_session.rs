use std::io::Cursor;
use std::time::Duration;

use dbc_terminal::runtime::spawn_line_reader;
use dbc_terminal::{
    run_session, App, DangerLevel, Mode, Pacing, RenderOptions, Renderer, ScriptBook,
    SessionEnd, SessionOptions,
};
use pretty_assertions::assert_eq;
use tokio::sync::mpsc;

fn plain_renderer() -> Renderer<Vec<u8>> {
    Renderer::new(
        Vec::new(),
        RenderOptions {
            color: false,
            echo_input: true,
            prompt: false,
        },
    )
}

fn paced_app(play_boot: bool) -> App {
    App::new(
        ScriptBook::builtin().expect("builtin book should parse"),
        SessionOptions {
            play_boot,
            bypass_enabled: false,
            pacing: Pacing::new(Duration::from_millis(100)),
        },
    )
}

fn output(renderer: Renderer<Vec<u8>>) -> String {
    String::from_utf8(renderer.into_inner()).expect("utf8 output")
}

async fn closed_input(lines: &[&str]) -> mpsc::Receiver<String> {
    let (sender, receiver) = mpsc::channel(lines.len().max(1));
    for line in lines {
        sender
            .send(line.to_string())
            .await
            .expect("receiver is alive");
    }
    receiver
}

#[tokio::test(start_paused = true)]
async fn line_sent_during_playback_is_dropped() {
    let mut app = paced_app(false);
    let mut renderer = plain_renderer();
    let input = closed_input(&["gm", "status"]).await;
    let auth_len = app.book().auth.len();

    let end = run_session(
        &mut app,
        input,
        &mut renderer,
        &DangerLevel::new(10),
        std::future::pending(),
    )
    .await
    .expect("session runs");

    assert_eq!(end, SessionEnd::InputClosed);
    assert_eq!(app.transcript().len(), 1 + auth_len);
    let rendered = output(renderer);
    assert!(rendered.starts_with("> gm\n"));
    assert!(!rendered.contains("Network Security"));
    assert!(rendered.contains("gm, partner. Identity confirmed."));
}

#[tokio::test(start_paused = true)]
async fn lines_are_revealed_on_their_delays() {
    let mut app = paced_app(false);
    let mut renderer = plain_renderer();
    let input = closed_input(&["gm"]).await;
    let started = tokio::time::Instant::now();

    run_session(
        &mut app,
        input,
        &mut renderer,
        &DangerLevel::new(10),
        std::future::pending(),
    )
    .await
    .expect("session runs");

    // auth script: one 500ms line, then three lines on the 100ms default.
    assert_eq!(started.elapsed(), Duration::from_millis(800));
    assert_eq!(
        output(renderer),
        [
            "> gm",
            "Verifying handshake...",
            "gm, partner. Identity confirmed.",
            "RON: Welcome to the club. We don't sell drugs, we sell memberships.",
            "Type 'help' to see what the club can do for you.",
        ]
        .map(|line| format!("{line}\n"))
        .concat()
    );
}

#[tokio::test(start_paused = true)]
async fn submissions_after_playback_are_accepted() {
    let mut app = paced_app(false);
    let mut renderer = plain_renderer();
    let (sender, receiver) = mpsc::channel(4);

    let feeder = tokio::spawn(async move {
        sender.send("gm".to_string()).await.expect("send gm");
        tokio::time::sleep(Duration::from_secs(5)).await;
        sender.send("status".to_string()).await.expect("send status");
    });

    run_session(
        &mut app,
        receiver,
        &mut renderer,
        &DangerLevel::new(40),
        std::future::pending(),
    )
    .await
    .expect("session runs");
    feeder.await.expect("feeder finishes");

    assert_eq!(app.mode(), Mode::Exiting);
    assert!(output(renderer).contains("Network Security: 60%\n"));
}

#[tokio::test(start_paused = true)]
async fn shutdown_cancels_boot_playback() {
    let mut app = paced_app(true);
    let boot_len = app.book().boot.len();
    let mut renderer = plain_renderer();
    let (_sender, receiver) = mpsc::channel::<String>(1);

    let end = run_session(
        &mut app,
        receiver,
        &mut renderer,
        &DangerLevel::new(0),
        tokio::time::sleep(Duration::from_millis(250)),
    )
    .await
    .expect("session runs");

    // boot: first line at 200ms, the second would land at 300ms.
    assert_eq!(
        end,
        SessionEnd::Shutdown {
            discarded: boot_len - 1
        }
    );
    assert_eq!(app.transcript().len(), 1);
    assert_eq!(app.mode(), Mode::Exiting);
}

#[tokio::test]
async fn instant_pacing_keeps_up_with_piped_input() {
    let mut app = App::new(
        ScriptBook::builtin().expect("builtin book should parse"),
        SessionOptions {
            play_boot: true,
            bypass_enabled: false,
            pacing: Pacing::instant(),
        },
    );
    let mut renderer = plain_renderer();
    let input = closed_input(&["gm", "status"]).await;

    run_session(
        &mut app,
        input,
        &mut renderer,
        &DangerLevel::new(23),
        std::future::pending(),
    )
    .await
    .expect("session runs");

    let rendered = output(renderer);
    assert!(rendered.contains("> gm\n"));
    assert!(rendered.contains("> status\n"));
    assert!(rendered.contains("Network Security: 77%\n"));
}

#[tokio::test(start_paused = true)]
async fn hint_request_prints_completions_and_keeps_the_session_idle() {
    let mut app = paced_app(false);
    let mut renderer = plain_renderer();
    let input = closed_input(&["sta?", "gm"]).await;
    let auth_len = app.book().auth.len();

    run_session(
        &mut app,
        input,
        &mut renderer,
        &DangerLevel::new(10),
        std::future::pending(),
    )
    .await
    .expect("session runs");

    assert_eq!(app.transcript().len(), 1 + auth_len);
    assert!(output(renderer).starts_with("status\n> gm\n"));
}

#[tokio::test(start_paused = true)]
async fn interactive_prompt_returns_after_playback() {
    let mut app = paced_app(false);
    let mut renderer = Renderer::new(
        Vec::new(),
        RenderOptions {
            color: false,
            echo_input: false,
            prompt: true,
        },
    );
    let (sender, receiver) = mpsc::channel(4);

    let feeder = tokio::spawn(async move {
        sender.send("gm".to_string()).await.expect("send gm");
        tokio::time::sleep(Duration::from_secs(5)).await;
    });

    run_session(
        &mut app,
        receiver,
        &mut renderer,
        &DangerLevel::new(10),
        std::future::pending(),
    )
    .await
    .expect("session runs");
    feeder.await.expect("feeder finishes");

    assert_eq!(
        output(renderer),
        [
            "> Verifying handshake...\n",
            "gm, partner. Identity confirmed.\n",
            "RON: Welcome to the club. We don't sell drugs, we sell memberships.\n",
            "Type 'help' to see what the club can do for you.\n",
            "> ",
        ]
        .concat()
    );
}

#[tokio::test]
async fn reader_skips_invalid_utf8_lines() {
    let mut receiver = spawn_line_reader(Cursor::new(b"gm\n\xff\xfe\nstatus\r\n".to_vec()))
        .expect("reader thread starts");

    let mut lines = Vec::new();
    while let Some(line) = receiver.recv().await {
        lines.push(line);
    }

    assert_eq!(lines, vec!["gm".to_string(), "status".to_string()]);
}
