use crate::app::{
    action::Action,
    state::{AppMode, AppState, FormField},
    ui,
};
use crossterm::event::{
    Event, KeyCode, KeyEventKind, KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
};
use ratatui::layout::{Rect, Size};

pub fn map_event_to_action(
    event: Event,
    app_state: &AppState<'_>,
    terminal_size: Size,
) -> Option<Action> {
    if let Event::Key(key) = &event {
        if key.kind == KeyEventKind::Release {
            return None;
        }
    }

    match app_state.mode {
        AppMode::Palette => map_palette_event(event, app_state, terminal_size),
        AppMode::SiteForm => match event {
            Event::Key(key) => match key.code {
                KeyCode::Esc => Some(Action::CancelMode),
                KeyCode::Enter => Some(Action::SubmitSiteForm),
                KeyCode::Tab => Some(Action::FormNextField),
                KeyCode::BackTab => Some(Action::FormPrevField),
                KeyCode::Char(' ') | KeyCode::Left | KeyCode::Right
                    if app_state
                        .form
                        .as_ref()
                        .is_some_and(|f| f.focused == FormField::Protocol) =>
                {
                    Some(Action::FormCycleProtocol)
                }
                _ => Some(Action::TextAreaInput(key)),
            },
            _ => None,
        },
        AppMode::Help => match event {
            Event::Key(key) => match key.code {
                KeyCode::Esc | KeyCode::Char('q' | '?') => Some(Action::ToggleHelp),
                _ => None,
            },
            _ => None,
        },
        AppMode::Normal => match event {
            Event::Resize(w, h) => Some(Action::Resize(w, h)),
            Event::Key(key) => app_state.keymap.get_action(key),
            Event::Mouse(mouse) => map_normal_mouse(mouse, app_state, terminal_size),
            _ => None,
        },
    }
}

fn map_palette_event(
    event: Event,
    app_state: &AppState<'_>,
    terminal_size: Size,
) -> Option<Action> {
    match event {
        Event::Key(key) => match key.code {
            KeyCode::Esc => Some(Action::PaletteCancel),
            KeyCode::Enter => Some(Action::PaletteConfirm),
            KeyCode::Down => Some(Action::PaletteNext),
            KeyCode::Up => Some(Action::PalettePrev),
            KeyCode::Backspace => {
                // Backspace on an empty query steps out of a submenu;
                // otherwise it edits the query.
                let at_submenu_root = app_state
                    .palette
                    .as_ref()
                    .is_some_and(|p| p.in_submenu() && p.query().is_empty());
                if at_submenu_root {
                    Some(Action::PaletteExitSubmenu)
                } else {
                    Some(Action::TextAreaInput(key))
                }
            }
            KeyCode::Char(_) => {
                if key.modifiers.contains(KeyModifiers::CONTROL) {
                    None
                } else {
                    Some(Action::TextAreaInput(key))
                }
            }
            _ => None,
        },
        Event::Mouse(mouse) => {
            let area = Rect::new(0, 0, terminal_size.width, terminal_size.height);
            let modal = ui::palette_modal_area(area);
            let list = ui::palette_list_area(area);
            let in_list = mouse.column >= list.x
                && mouse.column < list.x + list.width
                && mouse.row >= list.y
                && mouse.row < list.y + list.height;
            let in_modal = mouse.column >= modal.x
                && mouse.column < modal.x + modal.width
                && mouse.row >= modal.y
                && mouse.row < modal.y + modal.height;

            match mouse.kind {
                MouseEventKind::Moved if in_list => {
                    Some(Action::PaletteHover((mouse.row - list.y) as usize))
                }
                MouseEventKind::Down(MouseButton::Left) => {
                    if in_list {
                        Some(Action::PaletteClick((mouse.row - list.y) as usize))
                    } else if in_modal {
                        None
                    } else {
                        // A click elsewhere dismisses without committing.
                        Some(Action::PaletteCancel)
                    }
                }
                MouseEventKind::ScrollDown => Some(Action::PaletteNext),
                MouseEventKind::ScrollUp => Some(Action::PalettePrev),
                _ => None,
            }
        }
        _ => None,
    }
}

fn map_normal_mouse(
    mouse: MouseEvent,
    app_state: &AppState<'_>,
    terminal_size: Size,
) -> Option<Action> {
    let area = Rect::new(0, 0, terminal_size.width, terminal_size.height);
    let layout = ui::get_layout(area);
    let list = layout.body[0];

    match mouse.kind {
        MouseEventKind::ScrollUp => Some(Action::SelectPrevSite),
        MouseEventKind::ScrollDown => Some(Action::SelectNextSite),
        MouseEventKind::Down(MouseButton::Left) => {
            // Account for the panel border: content starts one cell in.
            if mouse.column > list.x
                && mouse.column < list.x + list.width.saturating_sub(1)
                && mouse.row > list.y
                && mouse.row < list.y + list.height.saturating_sub(1)
            {
                let idx = (mouse.row - list.y - 1) as usize;
                if idx < app_state.sites.len() {
                    return Some(Action::SelectSiteIndex(idx));
                }
            }
            None
        }
        _ => None,
    }
}
