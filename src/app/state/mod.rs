use std::sync::Arc;

pub mod form;

// Re-exports
pub use form::{FormField, SiteFormState};

use super::keymap::KeyMap;
use crate::domain::models::SiteProfile;
use crate::infrastructure::settings::SharedSettings;
use crate::palette::{PaletteSession, SelectionStore};
use crate::theme::ThemeService;

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum AppMode {
    Normal,   // Browsing the site list
    SiteForm, // Creating or editing a site
    Palette,  // Command palette overlay
    Help,     // Help overlay
}

pub struct AppState<'a> {
    // --- Connectivity & Status ---
    pub should_quit: bool,
    pub mode: AppMode,
    pub status_message: Option<String>,
    pub last_error: Option<String>,
    pub is_loading: bool,

    // --- Sites (the "source of truth") ---
    pub sites: Vec<SiteProfile>,
    pub selected: Option<usize>,
    pub form: Option<SiteFormState<'a>>,

    // --- Command palette ---
    // Present only while the palette overlay is open; dropped on close.
    pub palette: Option<PaletteSession>,

    // --- Services ---
    pub theme_service: Arc<ThemeService>,
    pub selection_store: Arc<dyn SelectionStore>,
    pub settings: SharedSettings,
    pub keymap: Arc<KeyMap>,

    // --- Animation ---
    pub frame_count: u64,
}

impl AppState<'_> {
    #[must_use]
    pub fn new(
        settings: SharedSettings,
        theme_service: Arc<ThemeService>,
        selection_store: Arc<dyn SelectionStore>,
    ) -> Self {
        Self {
            should_quit: false,
            mode: AppMode::Normal,
            status_message: None,
            last_error: None,
            is_loading: false,
            sites: Vec::new(),
            selected: None,
            form: None,
            palette: None,
            theme_service,
            selection_store,
            settings,
            keymap: Arc::new(KeyMap::new()),
            frame_count: 0,
        }
    }

    #[must_use]
    pub fn selected_site(&self) -> Option<&SiteProfile> {
        self.selected.and_then(|i| self.sites.get(i))
    }
}

#[cfg(test)]
pub(crate) mod test_support {
    use super::*;
    use crate::infrastructure::paths::AppPaths;
    use crate::infrastructure::settings::{
        AppSettings, SettingsSaver, SettingsSelectionStore, SettingsStore,
    };
    use parking_lot::Mutex;

    /// Builds a fully wired state over a temp config dir. Requires a tokio
    /// runtime (the settings saver spawns its writer task).
    pub fn state_with_tempdir() -> (AppState<'static>, tempfile::TempDir, Arc<SettingsStore>) {
        let dir = tempfile::tempdir().unwrap();
        let paths = AppPaths::at_root(dir.path().join("skiff")).unwrap();
        let store = Arc::new(SettingsStore::new(&paths));
        let shared: SharedSettings = Arc::new(Mutex::new(AppSettings::default()));
        let saver = SettingsSaver::spawn(store.clone(), shared.clone());
        let theme_service = Arc::new(ThemeService::new(shared.clone(), saver.clone()));
        let selection_store: Arc<dyn SelectionStore> =
            Arc::new(SettingsSelectionStore::new(shared.clone(), saver));
        let state = AppState::new(shared, theme_service, selection_store);
        (state, dir, store)
    }
}
