use ratatui::style::{Modifier, Style};
use serde::{Deserialize, Serialize};

pub mod dark;
pub mod light;
pub mod monokai;
pub mod nord;
pub mod ocean;
pub mod palette;
pub mod service;

pub use palette::{dim_color, Palette};
pub use service::ThemeService;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ThemeId {
    Light,
    Dark,
    Ocean,
    Nord,
    Monokai,
}

impl ThemeId {
    #[must_use]
    pub fn label(&self) -> &'static str {
        match self {
            ThemeId::Light => "Light",
            ThemeId::Dark => "Dark",
            ThemeId::Ocean => "Ocean",
            ThemeId::Nord => "Nord",
            ThemeId::Monokai => "Monokai",
        }
    }

    /// Stable identifier used for persistence and palette command ids.
    #[must_use]
    pub fn id(&self) -> &'static str {
        match self {
            ThemeId::Light => "light",
            ThemeId::Dark => "dark",
            ThemeId::Ocean => "ocean",
            ThemeId::Nord => "nord",
            ThemeId::Monokai => "monokai",
        }
    }

    #[must_use]
    pub fn parse(s: &str) -> Option<ThemeId> {
        ThemeId::all().iter().copied().find(|t| t.id() == s)
    }

    #[must_use]
    pub fn all() -> &'static [ThemeId] {
        &[
            ThemeId::Light,
            ThemeId::Dark,
            ThemeId::Ocean,
            ThemeId::Nord,
            ThemeId::Monokai,
        ]
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Theme {
    pub border: Style,
    pub border_focus: Style,

    pub header: Style,
    pub header_logo: Style,
    pub header_item: Style,
    pub header_active: Style,

    pub footer: Style,
    pub footer_segment_key: Style,
    pub footer_segment_val: Style,

    pub list_item: Style,
    pub list_selected: Style,
    pub highlight: Style,
    pub dimmed: Style,

    pub status_ready: Style,
    pub status_info: Style,
    pub status_error: Style,

    pub site_host: Style,
    pub site_protocol: Style,

    pub form_label: Style,
    pub form_value: Style,
    pub form_focus: Style,

    pub palette_category: Style,
}

impl Theme {
    #[must_use]
    pub fn from_theme_id(t: ThemeId) -> Self {
        match t {
            ThemeId::Light => Self::from_palette(&light::LIGHT),
            ThemeId::Dark => Self::from_palette(&dark::DARK),
            ThemeId::Ocean => Self::from_palette(&ocean::OCEAN),
            ThemeId::Nord => Self::from_palette(&nord::NORD),
            ThemeId::Monokai => Self::from_palette(&monokai::MONOKAI),
        }
    }

    #[must_use]
    pub fn from_palette(p: &Palette) -> Self {
        Self {
            border: Style::default().fg(p.surface2),
            border_focus: Style::default().fg(p.blue),

            header: Style::default().bg(p.base).fg(p.text),
            header_logo: Style::default()
                .bg(p.blue)
                .fg(p.crust)
                .add_modifier(Modifier::BOLD),
            header_item: Style::default().bg(p.surface0).fg(p.text),
            header_active: Style::default()
                .bg(p.green)
                .fg(p.crust)
                .add_modifier(Modifier::BOLD),

            footer: Style::default().bg(p.crust).fg(p.subtext),
            footer_segment_key: Style::default()
                .bg(p.surface0)
                .fg(p.blue)
                .add_modifier(Modifier::BOLD),
            footer_segment_val: Style::default().bg(p.base).fg(p.text),

            list_item: Style::default().fg(p.text),
            list_selected: Style::default()
                .bg(p.blue)
                .fg(p.crust)
                .add_modifier(Modifier::BOLD),
            highlight: Style::default().bg(p.surface0).add_modifier(Modifier::BOLD),
            dimmed: Style::default().fg(p.overlay).add_modifier(Modifier::DIM),

            status_ready: Style::default()
                .bg(p.green)
                .fg(p.crust)
                .add_modifier(Modifier::BOLD),
            status_info: Style::default()
                .bg(p.blue)
                .fg(p.crust)
                .add_modifier(Modifier::BOLD),
            status_error: Style::default()
                .bg(p.red)
                .fg(p.crust)
                .add_modifier(Modifier::BOLD),

            site_host: Style::default().fg(p.teal),
            site_protocol: Style::default().fg(p.peach).add_modifier(Modifier::BOLD),

            form_label: Style::default().fg(p.subtext),
            form_value: Style::default().fg(p.text).bg(dim_color(p.surface0, 0.8)),
            form_focus: Style::default().fg(p.yellow).add_modifier(Modifier::BOLD),

            palette_category: Style::default().fg(p.mauve),
        }
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self::from_theme_id(ThemeId::Dark)
    }
}
