use anyhow::{bail, Result};
use parking_lot::Mutex;

use super::{Theme, ThemeId};
use crate::infrastructure::settings::{SettingsSaver, SharedSettings};
use crate::palette::PreviewTarget;

/// Owns the theme shown on screen. The live theme can diverge from the
/// persisted one while a palette preview is active; committing narrows them
/// back together, rolling back re-applies the persisted one.
pub struct ThemeService {
    live: Mutex<ThemeId>,
    persisted: Mutex<ThemeId>,
    settings: SharedSettings,
    saver: SettingsSaver,
}

impl ThemeService {
    #[must_use]
    pub fn new(settings: SharedSettings, saver: SettingsSaver) -> Self {
        let initial = settings.lock().active_theme;
        Self {
            live: Mutex::new(initial),
            persisted: Mutex::new(initial),
            settings,
            saver,
        }
    }

    /// Styles for whatever theme is currently live (possibly a preview).
    #[must_use]
    pub fn theme(&self) -> Theme {
        Theme::from_theme_id(*self.live.lock())
    }

    #[must_use]
    pub fn live_id(&self) -> ThemeId {
        *self.live.lock()
    }

    fn parse(id: &str) -> Result<ThemeId> {
        match ThemeId::parse(id) {
            Some(theme) => Ok(theme),
            None => bail!("unknown theme id '{id}'"),
        }
    }
}

impl PreviewTarget for ThemeService {
    fn preview_only(&self, id: &str) -> Result<()> {
        let theme = Self::parse(id)?;
        *self.live.lock() = theme;
        Ok(())
    }

    fn apply_and_persist(&self, id: &str) -> Result<()> {
        let theme = Self::parse(id)?;
        *self.live.lock() = theme;
        *self.persisted.lock() = theme;
        self.settings.lock().active_theme = theme;
        self.saver.request_save();
        Ok(())
    }

    fn restore_last_persisted(&self) -> Result<()> {
        *self.live.lock() = *self.persisted.lock();
        Ok(())
    }

    fn current_id(&self) -> String {
        self.live.lock().id().to_string()
    }
}
