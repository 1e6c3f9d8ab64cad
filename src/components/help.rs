use crate::theme::Theme;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Clear, Widget},
};

use super::helpers::{centered_rect, draw_drop_shadow};

pub struct HelpModal<'a> {
    pub theme: &'a Theme,
}

const ENTRIES: &[(&str, &str)] = &[
    ("Ctrl+K or :", "Open the command palette"),
    ("j / k, arrows", "Move site selection"),
    ("n", "New site"),
    ("e / Enter", "Edit the selected site"),
    ("d", "Delete the selected site"),
    ("r", "Reload sites from disk"),
    ("?", "Toggle this help"),
    ("q", "Quit"),
    ("", ""),
    ("In the palette:", ""),
    ("type", "Filter by name or category"),
    ("Enter", "Run the selected command"),
    ("Backspace (empty)", "Leave a submenu"),
    ("Esc", "Close and undo any preview"),
];

impl Widget for HelpModal<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let modal = centered_rect(50, 70, area);
        if modal.width < 10 || modal.height < 5 {
            return;
        }

        draw_drop_shadow(buf, modal, area);
        Clear.render(modal, buf);

        let block = Block::default()
            .title(Line::from(vec![
                Span::raw(" "),
                Span::styled(" HELP ", self.theme.header_active),
                Span::raw(" "),
            ]))
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(self.theme.border_focus);
        let inner = block.inner(modal);
        block.render(modal, buf);

        for (i, (key, description)) in ENTRIES.iter().enumerate() {
            let y = inner.y + i as u16;
            if y >= inner.y + inner.height {
                break;
            }
            let line = Line::from(vec![
                Span::styled(format!("  {key:<18}"), self.theme.footer_segment_key),
                Span::styled(*description, self.theme.list_item),
            ]);
            buf.set_line(inner.x, y, &line, inner.width);
        }
    }
}
