use chrono::Utc;
use tui_textarea::TextArea;

use crate::domain::models::{Protocol, SiteProfile};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormField {
    Name,
    Host,
    Protocol,
    Port,
    Username,
    RemotePath,
    LocalPath,
}

const FIELD_ORDER: [FormField; 7] = [
    FormField::Name,
    FormField::Host,
    FormField::Protocol,
    FormField::Port,
    FormField::Username,
    FormField::RemotePath,
    FormField::LocalPath,
];

/// Modal create/edit form for a site profile. Each text field is its own
/// textarea; the protocol is cycled in place rather than typed.
pub struct SiteFormState<'a> {
    pub editing: Option<SiteProfile>,
    pub name: TextArea<'a>,
    pub host: TextArea<'a>,
    pub port: TextArea<'a>,
    pub username: TextArea<'a>,
    pub remote_path: TextArea<'a>,
    pub local_path: TextArea<'a>,
    pub protocol: Protocol,
    pub focused: FormField,
    port_touched: bool,
}

fn text_area_with(content: &str) -> TextArea<'static> {
    let mut area = TextArea::default();
    area.insert_str(content);
    area
}

fn value_of(area: &TextArea) -> String {
    area.lines().join("").trim().to_string()
}

impl SiteFormState<'_> {
    #[must_use]
    pub fn new() -> Self {
        let protocol = Protocol::Ftp;
        Self {
            editing: None,
            name: TextArea::default(),
            host: TextArea::default(),
            port: text_area_with(&protocol.default_port().to_string()),
            username: TextArea::default(),
            remote_path: text_area_with("/"),
            local_path: TextArea::default(),
            protocol,
            focused: FormField::Name,
            port_touched: false,
        }
    }

    #[must_use]
    pub fn from_site(site: &SiteProfile) -> Self {
        Self {
            editing: Some(site.clone()),
            name: text_area_with(&site.name),
            host: text_area_with(&site.host),
            port: text_area_with(&site.port.to_string()),
            username: text_area_with(&site.username),
            remote_path: text_area_with(&site.default_remote_path),
            local_path: text_area_with(&site.default_local_path),
            protocol: site.protocol,
            focused: FormField::Name,
            // Editing keeps whatever port was saved, even across protocol
            // cycling.
            port_touched: true,
        }
    }

    pub fn focus_next(&mut self) {
        self.focused = Self::neighbor(self.focused, 1);
    }

    pub fn focus_prev(&mut self) {
        self.focused = Self::neighbor(self.focused, FIELD_ORDER.len() as isize - 1);
    }

    fn neighbor(field: FormField, offset: isize) -> FormField {
        let idx = FIELD_ORDER
            .iter()
            .position(|f| *f == field)
            .unwrap_or(0) as isize;
        let len = FIELD_ORDER.len() as isize;
        FIELD_ORDER[((idx + offset).rem_euclid(len)) as usize]
    }

    /// Advance the protocol and re-default the port unless the user already
    /// edited it.
    pub fn cycle_protocol(&mut self) {
        self.protocol = self.protocol.next();
        if !self.port_touched {
            self.port = text_area_with(&self.protocol.default_port().to_string());
        }
    }

    pub fn input(&mut self, key: crossterm::event::KeyEvent) {
        let area = match self.focused {
            FormField::Name => &mut self.name,
            FormField::Host => &mut self.host,
            FormField::Port => &mut self.port,
            FormField::Username => &mut self.username,
            FormField::RemotePath => &mut self.remote_path,
            FormField::LocalPath => &mut self.local_path,
            FormField::Protocol => return,
        };
        let modified = area.input(key);
        if self.focused == FormField::Port && modified {
            self.port_touched = true;
        }
    }

    /// Validate and build the profile to save. Mirrors the site manager's
    /// rules: name and host required, port in 1..=65535, remote path
    /// defaults to "/".
    pub fn to_profile(&self) -> Result<SiteProfile, String> {
        let name = value_of(&self.name);
        if name.is_empty() {
            return Err("Site name is required".to_string());
        }
        let host = value_of(&self.host);
        if host.is_empty() {
            return Err("Host is required".to_string());
        }
        let port: u16 = value_of(&self.port)
            .parse()
            .ok()
            .filter(|p| *p > 0)
            .ok_or_else(|| "Port must be a number between 1 and 65535".to_string())?;

        let mut remote = value_of(&self.remote_path);
        if remote.is_empty() {
            remote = "/".to_string();
        }

        let now = Utc::now();
        let (id, created) = match &self.editing {
            Some(original) => (original.id.clone(), original.created_utc),
            None => (format!("site-{}", now.timestamp_millis()), now),
        };

        Ok(SiteProfile {
            id,
            name,
            protocol: self.protocol,
            host,
            port,
            username: value_of(&self.username),
            default_remote_path: remote,
            default_local_path: value_of(&self.local_path),
            created_utc: created,
            updated_utc: now,
        })
    }
}

impl Default for SiteFormState<'_> {
    fn default() -> Self {
        Self::new()
    }
}
