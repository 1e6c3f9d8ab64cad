use std::sync::Arc;
use std::time::Duration;
use tracing::warn;

use crate::app::{
    action::{Action, UpdateResult},
    command::Command,
    state::{AppMode, AppState},
};
use crate::palette::{Confirmed, PaletteCommand, PaletteSession, PreviewTarget};
use crate::theme::ThemeId;

pub fn update(state: &mut AppState, action: &Action) -> UpdateResult {
    match action {
        Action::OpenPalette => {
            let commands = build_commands(state);
            let debounce = Duration::from_millis(state.settings.lock().hover_preview_ms);
            let target: Arc<dyn PreviewTarget> = state.theme_service.clone();
            state.palette = Some(PaletteSession::open(
                target,
                state.selection_store.clone(),
                commands,
                debounce,
            ));
            state.mode = AppMode::Palette;
            UpdateResult::Handled(None)
        }
        Action::PaletteNext => {
            if let Some(session) = state.palette.as_mut() {
                session.move_selection(1);
            }
            UpdateResult::Handled(None)
        }
        Action::PalettePrev => {
            if let Some(session) = state.palette.as_mut() {
                session.move_selection(-1);
            }
            UpdateResult::Handled(None)
        }
        Action::TextAreaInput(key) if state.mode == AppMode::Palette => {
            if let Some(session) = state.palette.as_mut() {
                let mut query = session.query().to_string();
                match key.code {
                    crossterm::event::KeyCode::Char(c) => query.push(c),
                    crossterm::event::KeyCode::Backspace => {
                        query.pop();
                    }
                    _ => return UpdateResult::Handled(None),
                }
                session.set_query(query);
            }
            UpdateResult::Handled(None)
        }
        Action::PaletteExitSubmenu => {
            if let Some(session) = state.palette.as_mut() {
                session.exit_submenu();
            }
            UpdateResult::Handled(None)
        }
        Action::PaletteHover(pos) => {
            if let Some(session) = state.palette.as_mut() {
                if let Some(ticket) = session.on_hover(*pos) {
                    return UpdateResult::Handled(Some(Command::SchedulePreview {
                        generation: ticket.generation,
                        delay: ticket.delay,
                    }));
                }
            }
            UpdateResult::Handled(None)
        }
        Action::PaletteHoverElapsed(generation) => {
            if let Some(session) = state.palette.as_mut() {
                session.hover_elapsed(*generation);
            }
            UpdateResult::Handled(None)
        }
        Action::PaletteClick(pos) => {
            if let Some(session) = state.palette.as_mut() {
                session.select_index(*pos);
            }
            confirm_selected(state)
        }
        Action::PaletteConfirm => confirm_selected(state),
        Action::PaletteCancel => close_with_rollback(state),
        Action::CancelMode if state.mode == AppMode::Palette => close_with_rollback(state),
        Action::ApplyTheme(theme) => {
            match state.theme_service.apply_and_persist(theme.id()) {
                Ok(()) => {
                    state.status_message = Some(format!("Theme applied: {}", theme.label()));
                }
                Err(err) => {
                    warn!(theme = theme.id(), error = %err, "failed to apply theme");
                    state.last_error = Some(format!("Failed to apply theme: {err}"));
                }
            }
            UpdateResult::Handled(None)
        }
        _ => UpdateResult::NotHandled,
    }
}

fn confirm_selected(state: &mut AppState) -> UpdateResult {
    let Some(session) = state.palette.as_mut() else {
        return UpdateResult::Handled(None);
    };
    match session.confirm() {
        Confirmed::Dispatched(action) => {
            state.palette = None;
            state.mode = AppMode::Normal;
            // Run the committed command through the reducer in the same
            // event turn, like any other action.
            UpdateResult::Handled(crate::app::reducer::update(state, action))
        }
        Confirmed::SubmenuOpened | Confirmed::NoSelection => UpdateResult::Handled(None),
    }
}

fn close_with_rollback(state: &mut AppState) -> UpdateResult {
    if let Some(session) = state.palette.as_mut() {
        session.cancel();
    }
    state.palette = None;
    state.mode = AppMode::Normal;
    UpdateResult::Handled(None)
}

/// Commands available at the palette root. The theme group is registered as
/// a single submenu entry; the site manager contributes its own commands.
fn build_commands(state: &AppState) -> Vec<PaletteCommand> {
    let theme_commands: Vec<PaletteCommand> = ThemeId::all()
        .iter()
        .map(|t| PaletteCommand::previewable(t.label(), "Theme", t.id(), Action::ApplyTheme(*t)))
        .collect();

    let mut commands = vec![PaletteCommand::submenu(
        "Themes...",
        "Theme",
        "Themes",
        theme_commands,
    )];

    commands.push(PaletteCommand::new("New Site", "Sites", Action::NewSiteIntent));
    if state.selected_site().is_some() {
        commands.push(PaletteCommand::new("Edit Site", "Sites", Action::EditSiteIntent));
        commands.push(PaletteCommand::new(
            "Delete Site",
            "Sites",
            Action::DeleteSiteIntent,
        ));
    }
    commands.push(PaletteCommand::new(
        "Refresh Sites",
        "Sites",
        Action::RefreshSites,
    ));
    commands.push(PaletteCommand::new("Help", "Application", Action::ToggleHelp));
    commands.push(PaletteCommand::new("Quit", "Application", Action::Quit));
    commands
}
