use crate::app::state::{FormField, SiteFormState};
use crate::theme::Theme;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Clear, Widget},
};
use tui_textarea::TextArea;

use super::helpers::{centered_rect_fixed_height, draw_drop_shadow};

pub struct SiteFormModal<'a, 'f> {
    pub theme: &'a Theme,
    pub form: &'a SiteFormState<'f>,
}

impl SiteFormModal<'_, '_> {
    fn text_row(
        &self,
        buf: &mut Buffer,
        inner: Rect,
        row: u16,
        label: &str,
        area: &TextArea,
        field: FormField,
    ) {
        let focused = self.form.focused == field;
        let label_style = if focused {
            self.theme.form_focus
        } else {
            self.theme.form_label
        };
        let value = area.lines().join("");
        let cursor = if focused { "_" } else { "" };
        let line = Line::from(vec![
            Span::styled(format!("  {label:<12}"), label_style),
            Span::styled(format!("{value}{cursor}"), self.theme.form_value),
        ]);
        buf.set_line(inner.x, inner.y + row, &line, inner.width);
    }
}

impl Widget for SiteFormModal<'_, '_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let modal = centered_rect_fixed_height(50, 13, area);
        if modal.width < 20 || modal.height < 11 {
            return;
        }

        draw_drop_shadow(buf, modal, area);
        Clear.render(modal, buf);

        let title = if self.form.editing.is_some() {
            " EDIT SITE "
        } else {
            " NEW SITE "
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

        self.text_row(buf, inner, 0, "Name", &self.form.name, FormField::Name);
        self.text_row(buf, inner, 1, "Host", &self.form.host, FormField::Host);

        let protocol_focused = self.form.focused == FormField::Protocol;
        let protocol_label = if protocol_focused {
            self.theme.form_focus
        } else {
            self.theme.form_label
        };
        let protocol_line = Line::from(vec![
            Span::styled(format!("  {:<12}", "Protocol"), protocol_label),
            Span::styled(
                format!("< {} >", self.form.protocol.label()),
                self.theme.site_protocol,
            ),
        ]);
        buf.set_line(inner.x, inner.y + 2, &protocol_line, inner.width);

        self.text_row(buf, inner, 3, "Port", &self.form.port, FormField::Port);
        self.text_row(
            buf,
            inner,
            4,
            "Username",
            &self.form.username,
            FormField::Username,
        );
        self.text_row(
            buf,
            inner,
            5,
            "Remote path",
            &self.form.remote_path,
            FormField::RemotePath,
        );
        self.text_row(
            buf,
            inner,
            6,
            "Local path",
            &self.form.local_path,
            FormField::LocalPath,
        );

        let hints = Line::from(Span::styled(
            "  Tab next · Shift+Tab prev · Enter save · Esc cancel",
            self.theme.dimmed,
        ));
        buf.set_line(inner.x, inner.y + 8, &hints, inner.width);
    }
}
