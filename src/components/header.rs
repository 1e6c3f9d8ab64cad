use crate::theme::{Theme, ThemeId};
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    text::{Line, Span},
    widgets::Widget,
};

const SPINNER_FRAMES: [&str; 4] = ["⠋", "⠙", "⠸", "⠴"];

pub struct Header<'a> {
    pub theme: &'a Theme,
    pub site_count: usize,
    pub active_theme: ThemeId,
    pub loading: bool,
    pub frame: u64,
}

impl Widget for Header<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        buf.set_style(area, self.theme.header);
        let spinner = if self.loading {
            SPINNER_FRAMES[(self.frame as usize) % SPINNER_FRAMES.len()]
        } else {
            ""
        };
        let line = Line::from(vec![
            Span::styled(" SKIFF ", self.theme.header_logo),
            Span::raw(" "),
            Span::styled(
                format!(" {} sites ", self.site_count),
                self.theme.header_item,
            ),
            Span::raw(" "),
            Span::styled(
                format!(" {} ", self.active_theme.label()),
                self.theme.header_item,
            ),
            Span::raw(" "),
            Span::raw(spinner),
        ]);
        buf.set_line(area.x, area.y, &line, area.width);
    }
}
