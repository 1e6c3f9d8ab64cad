use super::{
    action::{Action, UpdateResult},
    command::Command,
    features,
    state::{AppMode, AppState},
};

pub fn update(state: &mut AppState, action: Action) -> Option<Command> {
    match features::palette::update(state, &action) {
        UpdateResult::Handled(command) => return command,
        UpdateResult::NotHandled => {}
    }
    match features::sites::update(state, &action) {
        UpdateResult::Handled(command) => return command,
        UpdateResult::NotHandled => {}
    }

    match action {
        Action::Quit => {
            state.should_quit = true;
        }
        Action::CancelMode => {
            state.mode = AppMode::Normal;
            state.form = None;
            state.last_error = None;
        }
        Action::ToggleHelp => {
            state.mode = if state.mode == AppMode::Help {
                AppMode::Normal
            } else {
                AppMode::Help
            };
        }
        Action::Tick => {
            state.frame_count = state.frame_count.wrapping_add(1);
        }

        // --- Async Results ---
        Action::OperationStarted(msg) => {
            state.status_message = Some(msg);
            state.is_loading = true;
        }
        Action::OperationCompleted(result) => {
            state.is_loading = false;
            match result {
                Ok(msg) => {
                    state.status_message = Some(msg);
                    state.last_error = None;
                }
                Err(err) => state.last_error = Some(err),
            }
        }
        Action::ErrorOccurred(err) => {
            state.is_loading = false;
            state.last_error = Some(err);
        }
        Action::ExternalChangeDetected => {
            return Some(Command::LoadSites);
        }

        _ => {}
    }
    None
}
