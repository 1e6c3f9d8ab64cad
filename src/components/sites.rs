use crate::domain::models::SiteProfile;
use crate::theme::Theme;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, List, ListItem, Widget},
};

pub struct SiteListPanel<'a> {
    pub theme: &'a Theme,
    pub sites: &'a [SiteProfile],
    pub selected: Option<usize>,
}

impl Widget for SiteListPanel<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let block = Block::default()
            .title(Line::from(Span::styled(" SITES ", self.theme.header_item)))
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(self.theme.border_focus);
        let inner = block.inner(area);
        block.render(area, buf);

        if self.sites.is_empty() {
            let hint = Line::from(Span::styled(
                "  No sites yet. Press 'n' to add one.",
                self.theme.dimmed,
            ));
            buf.set_line(inner.x, inner.y, &hint, inner.width);
            return;
        }

        let items: Vec<ListItem> = self
            .sites
            .iter()
            .enumerate()
            .map(|(i, site)| {
                let style = if Some(i) == self.selected {
                    self.theme.list_selected
                } else {
                    self.theme.list_item
                };
                let prefix = if Some(i) == self.selected { "> " } else { "  " };
                ListItem::new(Line::from(vec![
                    Span::styled(prefix, style),
                    Span::styled(format!("{:<20}", site.name), style),
                    Span::styled(site.address(), self.theme.dimmed),
                ]))
            })
            .collect();

        List::new(items).render(inner, buf);
    }
}

pub struct SiteDetailPanel<'a> {
    pub theme: &'a Theme,
    pub site: Option<&'a SiteProfile>,
}

impl Widget for SiteDetailPanel<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let block = Block::default()
            .title(Line::from(Span::styled(" DETAILS ", self.theme.header_item)))
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(self.theme.border);
        let inner = block.inner(area);
        block.render(area, buf);

        let Some(site) = self.site else {
            let hint = Line::from(Span::styled("  Nothing selected.", self.theme.dimmed));
            buf.set_line(inner.x, inner.y, &hint, inner.width);
            return;
        };

        let rows: Vec<(&str, String, ratatui::style::Style)> = vec![
            ("Name", site.name.clone(), self.theme.list_item),
            ("Protocol", site.protocol.label().to_string(), self.theme.site_protocol),
            ("Host", site.host.clone(), self.theme.site_host),
            ("Port", site.port.to_string(), self.theme.list_item),
            ("Username", site.username.clone(), self.theme.list_item),
            ("Remote path", site.default_remote_path.clone(), self.theme.list_item),
            ("Local path", site.default_local_path.clone(), self.theme.list_item),
            (
                "Updated",
                site.updated_utc.format("%Y-%m-%d %H:%M UTC").to_string(),
                self.theme.dimmed,
            ),
        ];

        for (i, (label, value, style)) in rows.into_iter().enumerate() {
            let y = inner.y + i as u16;
            if y >= inner.y + inner.height {
                break;
            }
            let line = Line::from(vec![
                Span::styled(format!("  {label:<12}"), self.theme.form_label),
                Span::styled(value, style),
            ]);
            buf.set_line(inner.x, y, &line, inner.width);
        }
    }
}
