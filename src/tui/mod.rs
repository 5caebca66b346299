mod draw;
mod help;
mod keys;
mod state;

use crate::config::DeskConfig;
use crate::orchestrator::{self, AppEvent, Request, UiCommand};
use crate::rpc::FrappeClient;
use anyhow::{Context, Result};
use crossterm::{
    event::{self, Event, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use keys::{handle_key, KeyOutcome};
use ratatui::{backend::CrosstermBackend, Terminal};
use state::UiState;
use std::{io, time::Duration, time::Instant};
use tokio::sync::mpsc;
use tokio::sync::mpsc::{UnboundedReceiver, UnboundedSender};

pub async fn run(cfg: DeskConfig) -> Result<()> {
    let client = FrappeClient::new(&cfg).context("build HTTP client")?;
    let (event_tx, event_rx) = mpsc::unbounded_channel::<AppEvent>();
    let (cmd_tx, cmd_rx) = mpsc::unbounded_channel::<UiCommand>();

    // TUI runs in a dedicated thread to keep all blocking I/O out of the Tokio runtime.
    let attach_doctype = cfg.attach_doctype.clone();
    let ui_handle = std::thread::spawn(move || run_threaded(&attach_doctype, event_rx, cmd_tx));

    let res = orchestrator::run_controller(client, event_tx, cmd_rx).await;

    let join_res = tokio::task::spawn_blocking(move || ui_handle.join()).await;
    if let Ok(joined) = join_res {
        match joined {
            Ok(Ok(())) => {}
            Ok(Err(e)) => return Err(e),
            Err(_) => return Err(anyhow::anyhow!("TUI thread panicked")),
        }
    }

    res
}

fn dispatch(state: &mut UiState, cmd_tx: &UnboundedSender<UiCommand>, reqs: Vec<Request>) {
    for req in reqs {
        if cmd_tx.send(UiCommand::Request(req)).is_ok() {
            state.in_flight += 1;
        }
    }
}

/// Run the TUI loop on a dedicated thread.
fn run_threaded(
    attach_doctype: &str,
    mut event_rx: UnboundedReceiver<AppEvent>,
    cmd_tx: UnboundedSender<UiCommand>,
) -> Result<()> {
    enable_raw_mode().context("enable raw mode")?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen).ok();

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend).context("create terminal")?;
    terminal.clear().ok();

    let mut state = UiState::new(attach_doctype);
    let initial = vec![
        Request::LoadCustomers,
        Request::SearchBlogs(state.feed.begin_search("")),
    ];
    dispatch(&mut state, &cmd_tx, initial);

    let tick_rate = Duration::from_millis(100);
    let mut last_tick = Instant::now();
    let mut dirty = true;

    let res = loop {
        while let Ok(ev) = event_rx.try_recv() {
            let follow = state.apply_event(ev);
            dispatch(&mut state, &cmd_tx, follow);
            dirty = true;
        }

        if dirty || last_tick.elapsed() >= tick_rate {
            terminal.draw(|f| draw::draw(f.area(), f, &state)).ok();
            last_tick = Instant::now();
            dirty = false;
        }

        if event::poll(Duration::from_millis(10)).unwrap_or(false) {
            if let Ok(Event::Key(k)) = event::read() {
                if k.kind != KeyEventKind::Press {
                    continue;
                }
                match handle_key(&mut state, k) {
                    KeyOutcome::Quit => {
                        let _ = cmd_tx.send(UiCommand::Quit);
                        break Ok(());
                    }
                    KeyOutcome::Requests(reqs) => dispatch(&mut state, &cmd_tx, reqs),
                }
                dirty = true;
            }
        }
    };

    disable_raw_mode().ok();
    let mut stdout = io::stdout();
    execute!(stdout, LeaveAlternateScreen).ok();
    res
}
