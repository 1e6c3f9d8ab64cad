use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    Frame,
};

use super::state::{AppMode, AppState};
use crate::components::{
    footer::Footer,
    header::Header,
    help::HelpModal,
    palette_modal::{self, PaletteModal},
    site_form::SiteFormModal,
    sites::{SiteDetailPanel, SiteListPanel},
};

pub struct AppLayout {
    pub header: Rect,
    pub body: [Rect; 2],
    pub footer: Rect,
}

/// Shared by `draw` and the mouse hit-testing in `input.rs` so both agree
/// on where everything is.
#[must_use]
pub fn get_layout(area: Rect) -> AppLayout {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Min(0),
            Constraint::Length(1),
        ])
        .split(area);

    let body = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(45), Constraint::Percentage(55)])
        .split(rows[1]);

    AppLayout {
        header: rows[0],
        body: [body[0], body[1]],
        footer: rows[2],
    }
}

#[must_use]
pub fn palette_list_area(area: Rect) -> Rect {
    palette_modal::list_area(area)
}

#[must_use]
pub fn palette_modal_area(area: Rect) -> Rect {
    palette_modal::modal_area(area)
}

pub fn draw(f: &mut Frame, state: &mut AppState) {
    let theme = state.theme_service.theme();
    let layout = get_layout(f.area());

    f.render_widget(
        Header {
            theme: &theme,
            site_count: state.sites.len(),
            active_theme: state.theme_service.live_id(),
            loading: state.is_loading,
            frame: state.frame_count,
        },
        layout.header,
    );

    f.render_widget(
        SiteListPanel {
            theme: &theme,
            sites: &state.sites,
            selected: state.selected,
        },
        layout.body[0],
    );

    f.render_widget(
        SiteDetailPanel {
            theme: &theme,
            site: state.selected_site(),
        },
        layout.body[1],
    );

    f.render_widget(
        Footer {
            theme: &theme,
            mode: state.mode,
            status: state.status_message.as_deref(),
            error: state.last_error.as_deref(),
        },
        layout.footer,
    );

    match state.mode {
        AppMode::Palette => {
            if let Some(session) = &state.palette {
                f.render_widget(
                    PaletteModal {
                        theme: &theme,
                        session,
                    },
                    f.area(),
                );
            }
        }
        AppMode::SiteForm => {
            if let Some(form) = &state.form {
                f.render_widget(SiteFormModal { theme: &theme, form }, f.area());
            }
        }
        AppMode::Help => {
            f.render_widget(HelpModal { theme: &theme }, f.area());
        }
        AppMode::Normal => {}
    }
}
