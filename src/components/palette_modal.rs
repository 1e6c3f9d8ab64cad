use crate::palette::PaletteSession;
use crate::theme::Theme;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Clear, List, ListItem, Widget},
};

use super::helpers::{centered_rect_fixed_height, draw_drop_shadow};

pub const PALETTE_WIDTH_PCT: u16 = 55;
pub const PALETTE_HEIGHT: u16 = 16;

/// Whole modal rectangle, shared with the input layer for hit-testing.
#[must_use]
pub fn modal_area(area: Rect) -> Rect {
    centered_rect_fixed_height(PALETTE_WIDTH_PCT, PALETTE_HEIGHT, area)
}

/// Rows occupied by the result list inside the modal.
#[must_use]
pub fn list_area(area: Rect) -> Rect {
    let modal = modal_area(area);
    // One cell of border on each side, then the query row and separator.
    Rect {
        x: modal.x.saturating_add(1),
        y: modal.y.saturating_add(3),
        width: modal.width.saturating_sub(2),
        height: modal.height.saturating_sub(4),
    }
}

pub struct PaletteModal<'a> {
    pub theme: &'a Theme,
    pub session: &'a PaletteSession,
}

impl Widget for PaletteModal<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let modal = modal_area(area);
        if modal.width < 4 || modal.height < 5 {
            return;
        }

        draw_drop_shadow(buf, modal, area);
        Clear.render(modal, buf);

        let title = match self.session.context_title() {
            Some(sub) => format!(" {} ", sub.to_uppercase()),
            None => " COMMAND PALETTE ".to_string(),
        };
        let block = Block::default()
            .title(Line::from(vec![
                Span::raw(" "),
                Span::styled(title, self.theme.header_active),
                Span::raw(" "),
            ]))
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(self.theme.border_focus);

        let inner = block.inner(modal);
        block.render(modal, buf);

        // Query row
        let prompt = if self.session.in_submenu() { " < " } else { " > " };
        let query_line = Line::from(vec![
            Span::styled(prompt, self.theme.footer_segment_key),
            Span::styled(self.session.query(), self.theme.footer_segment_val),
            Span::styled(
                "_",
                self.theme
                    .footer_segment_val
                    .add_modifier(ratatui::style::Modifier::SLOW_BLINK),
            ),
        ]);
        buf.set_line(inner.x, inner.y, &query_line, inner.width);

        // Separator
        let separator = "─".repeat(inner.width as usize);
        buf.set_string(inner.x, inner.y + 1, separator, self.theme.border_focus);

        let list_rect = Rect {
            x: inner.x,
            y: inner.y + 2,
            width: inner.width,
            height: inner.height.saturating_sub(2),
        };

        let commands = self.session.visible_commands();
        if commands.is_empty() {
            let no_results = Line::from(Span::styled(
                "  No matching commands.",
                self.theme.dimmed,
            ));
            buf.set_line(list_rect.x, list_rect.y + 1, &no_results, list_rect.width);
            return;
        }

        let selected = self.session.selected_pos();
        let items: Vec<ListItem> = commands
            .iter()
            .enumerate()
            .map(|(i, cmd)| {
                let style = if Some(i) == selected {
                    self.theme.list_selected
                } else {
                    self.theme.list_item
                };
                let prefix = if Some(i) == selected { "> " } else { "  " };

                ListItem::new(Line::from(vec![
                    Span::styled(prefix, style),
                    Span::styled(format!("{:<28}", cmd.name), style),
                    Span::styled(cmd.category.clone(), self.theme.palette_category),
                ]))
            })
            .collect();

        List::new(items).render(list_rect, buf);
    }
}
