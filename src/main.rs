//! Author timeline TUI.
//!
//! Renders a scrollable, zoomable timeline of historical authors in the
//! terminal, coloring entries by occupation. Data is loaded once per pass
//! from an HTTP endpoint or a local JSON file given as the first argument.

mod api;
mod app;
mod axis;
mod color;
mod config;
mod item;
mod models;
mod theme;
mod timeline;
mod ui;

use std::io::{self, stdout};
use std::time::Duration;

use anyhow::{Context, Result};
use crossterm::{
    event::{self, Event, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::prelude::*;
use tokio::sync::mpsc;

use api::{DataClient, DataCommand, DataMessage, DataSource};
use app::App;
use config::TimelineOptions;

/// Frame rate for the event loop (approximately 30 FPS).
const FRAME_DURATION: Duration = Duration::from_millis(33);

#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install().ok();

    let source = std::env::args()
        .nth(1)
        .map(|arg| DataSource::from_arg(&arg))
        .unwrap_or_default();

    run_tui(source).await
}

/// Run the TUI application.
async fn run_tui(source: DataSource) -> Result<()> {
    enable_raw_mode().context("Failed to enable raw mode")?;
    let mut stdout = stdout();
    execute!(stdout, EnterAlternateScreen).context("Failed to enter alternate screen")?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend).context("Failed to create terminal")?;

    let (data_tx, mut data_rx) = mpsc::channel::<DataMessage>(8);
    let (cmd_tx, mut cmd_rx) = mpsc::channel::<DataCommand>(8);

    let client = DataClient::new(source)?;
    let describe = client.source().describe();
    let worker = tokio::spawn(async move { run_data_worker(client, data_tx, &mut cmd_rx).await });

    // Single load per pass; the worker only acts on explicit commands.
    cmd_tx.send(DataCommand::Refresh).await.ok();

    let mut app = App::new(TimelineOptions::default());
    app.log(app::LogEntry::info(format!("Fetching {}", describe)));

    let result = run_event_loop(&mut terminal, &mut app, &mut data_rx, &cmd_tx).await;

    disable_raw_mode().context("Failed to disable raw mode")?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)
        .context("Failed to leave alternate screen")?;
    terminal.show_cursor().context("Failed to show cursor")?;

    worker.abort();

    result
}

/// Data worker task: waits for commands, performs the load, reports back.
async fn run_data_worker(
    client: DataClient,
    tx: mpsc::Sender<DataMessage>,
    rx: &mut mpsc::Receiver<DataCommand>,
) {
    while let Some(cmd) = rx.recv().await {
        match cmd {
            DataCommand::Refresh => match client.fetch_authors().await {
                Ok(records) => {
                    tx.send(DataMessage::AuthorsLoaded(records)).await.ok();
                }
                Err(e) => {
                    tx.send(DataMessage::Error(format!("{:#}", e))).await.ok();
                }
            },
            DataCommand::Shutdown => break,
        }
    }
}

/// Main event loop.
async fn run_event_loop(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
    data_rx: &mut mpsc::Receiver<DataMessage>,
    cmd_tx: &mpsc::Sender<DataCommand>,
) -> Result<()> {
    loop {
        app.tick();

        terminal.draw(|frame| ui::render(frame, app))?;

        while let Ok(msg) = data_rx.try_recv() {
            app.handle_data_message(msg);
        }

        if event::poll(FRAME_DURATION)? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    if let Some(cmd) = app.handle_key(key) {
                        cmd_tx.send(cmd).await.ok();
                    }
                }
            }
        }

        if app.should_quit {
            break;
        }
    }

    Ok(())
}
