use crate::app::state::AppMode;
use crate::theme::Theme;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    text::{Line, Span},
    widgets::Widget,
};

pub struct Footer<'a> {
    pub theme: &'a Theme,
    pub mode: AppMode,
    pub status: Option<&'a str>,
    pub error: Option<&'a str>,
}

impl Widget for Footer<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        buf.set_style(area, self.theme.footer);

        if let Some(error) = self.error {
            let line = Line::from(vec![
                Span::styled(" ERROR ", self.theme.status_error),
                Span::raw(" "),
                Span::styled(error, self.theme.footer_segment_val),
            ]);
            buf.set_line(area.x, area.y, &line, area.width);
            return;
        }

        if let Some(status) = self.status {
            let line = Line::from(vec![
                Span::styled(" OK ", self.theme.status_ready),
                Span::raw(" "),
                Span::styled(status, self.theme.footer_segment_val),
            ]);
            buf.set_line(area.x, area.y, &line, area.width);
            return;
        }

        let hints: &[(&str, &str)] = match self.mode {
            AppMode::Normal => &[
                ("^K", "palette"),
                ("n", "new"),
                ("e", "edit"),
                ("d", "delete"),
                ("?", "help"),
                ("q", "quit"),
            ],
            AppMode::Palette => &[
                ("↑↓", "select"),
                ("⏎", "run"),
                ("⌫", "back"),
                ("esc", "close"),
            ],
            AppMode::SiteForm => &[("tab", "field"), ("⏎", "save"), ("esc", "cancel")],
            AppMode::Help => &[("esc", "close")],
        };

        let mut spans = Vec::new();
        for (key, label) in hints {
            spans.push(Span::styled(format!(" {key} "), self.theme.footer_segment_key));
            spans.push(Span::styled(format!(" {label}  "), self.theme.footer));
        }
        buf.set_line(area.x, area.y, &Line::from(spans), area.width);
    }
}
