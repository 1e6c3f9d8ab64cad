use crate::app::{
    action::Action, command::Command, input::map_event_to_action, reducer, state::AppState, ui,
};
use crate::infrastructure::sites::SiteStore;

use anyhow::Result;
use crossterm::event::{self, Event};
use notify::{RecursiveMode, Watcher};
use ratatui::{backend::Backend, Terminal};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio::time::interval;

const TICK_RATE: Duration = Duration::from_millis(250);

pub async fn run_loop<B: Backend>(
    terminal: &mut Terminal<B>,
    app_state: AppState<'_>,
    store: Arc<dyn SiteStore>,
) -> Result<()> {
    // User input channel
    let (event_tx, event_rx) = mpsc::channel(100);
    tokio::task::spawn_blocking(move || loop {
        match event::read() {
            Ok(evt) => {
                if event_tx.blocking_send(Ok(evt)).is_err() {
                    break;
                }
            }
            Err(e) => {
                let _ = event_tx.blocking_send(Err(e));
                break;
            }
        }
    });

    run_loop_with_events(terminal, app_state, store, event_rx).await
}

pub async fn run_loop_with_events<B: Backend>(
    terminal: &mut Terminal<B>,
    mut app_state: AppState<'_>,
    store: Arc<dyn SiteStore>,
    mut event_rx: mpsc::Receiver<Result<Event, std::io::Error>>,
) -> Result<()> {
    let (action_tx, mut action_rx) = mpsc::channel(100);
    let mut interval = interval(TICK_RATE);

    // Watch the sites file for edits made outside the app.
    let (notify_tx, mut notify_rx) = mpsc::channel(1);
    let mut watcher = notify::recommended_watcher(move |res: notify::Result<notify::Event>| {
        if res.is_ok() {
            let _ = notify_tx.try_send(());
        }
    })?;

    if let Some(path) = store.watch_path() {
        if path.exists() {
            watcher.watch(&path, RecursiveMode::NonRecursive)?;
        }
    }

    let action_tx_clone = action_tx.clone();
    tokio::spawn(async move {
        let mut pending = false;
        let debounce_duration = Duration::from_millis(500);

        loop {
            if pending {
                tokio::select! {
                    Some(()) = notify_rx.recv() => {}
                    () = tokio::time::sleep(debounce_duration) => {
                        let _ = action_tx_clone.send(Action::ExternalChangeDetected).await;
                        pending = false;
                    }
                }
            } else if notify_rx.recv().await.is_some() {
                pending = true;
            } else {
                break;
            }
        }
    });

    // Initial load
    handle_command(Command::LoadSites, store.clone(), action_tx.clone())?;

    // At most one hover-preview timer is live at a time; it belongs to the
    // currently open palette session.
    let mut hover_timer: Option<JoinHandle<()>> = None;

    loop {
        // --- 1. Render ---
        terminal.draw(|f| {
            ui::draw(f, &mut app_state);
        })?;

        // --- 2. Event Handling ---
        let action = tokio::select! {
            _ = interval.tick() => Some(Action::Tick),

            // User Input
            Some(res) = event_rx.recv() => {
                let event = match res {
                    Ok(e) => e,
                    Err(e) => return Err(e.into()),
                };
                map_event_to_action(event, &app_state, terminal.size()?)
            },

            // Async Results
            Some(a) = action_rx.recv() => Some(a),
        };

        // --- 3. Update (Reducer) ---
        if let Some(action) = action {
            if let Action::Quit = action {
                break;
            }

            let command = reducer::update(&mut app_state, action);

            if app_state.should_quit {
                break;
            }

            // Closing the palette invalidates its timer.
            if app_state.palette.is_none() {
                if let Some(handle) = hover_timer.take() {
                    handle.abort();
                }
            }

            if let Some(cmd) = command {
                match cmd {
                    Command::SchedulePreview { generation, delay } => {
                        if let Some(handle) = hover_timer.take() {
                            handle.abort();
                        }
                        let tx = action_tx.clone();
                        hover_timer = Some(tokio::spawn(async move {
                            tokio::time::sleep(delay).await;
                            let _ = tx.send(Action::PaletteHoverElapsed(generation)).await;
                        }));
                    }
                    other => {
                        handle_command(other, store.clone(), action_tx.clone())?;
                    }
                }
            }
        }
    }

    Ok(())
}

pub(crate) fn handle_command(
    command: Command,
    store: Arc<dyn SiteStore>,
    tx: mpsc::Sender<Action>,
) -> Result<()> {
    crate::app::features::sites::handle_command(command, store, tx)
}

#[cfg(test)]
#[path = "loop_tests.rs"]
mod tests;
