use chrono::{DateTime, Utc};
use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::Arc;
use tokio::sync::mpsc;
use tracing::warn;

use super::paths::AppPaths;
use crate::palette::SelectionStore;
use crate::theme::ThemeId;

pub type SharedSettings = Arc<Mutex<AppSettings>>;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AppSettings {
    pub active_theme: ThemeId,
    /// Quiet period before a hovered preview applies, in milliseconds.
    pub hover_preview_ms: u64,
    pub first_run_utc: DateTime<Utc>,
    pub last_run_utc: DateTime<Utc>,
    /// Last meaningfully-visited palette command id per group. Kept last so
    /// the TOML table serializes after the scalar fields.
    pub last_visited: HashMap<String, String>,
}

impl Default for AppSettings {
    fn default() -> Self {
        let now = Utc::now();
        Self {
            active_theme: ThemeId::Dark,
            hover_preview_ms: 120,
            first_run_utc: now,
            last_run_utc: now,
            last_visited: HashMap::new(),
        }
    }
}

/// Loads and saves `settings.toml`. Load never fails: a missing or
/// unreadable file yields defaults.
pub struct SettingsStore {
    path: PathBuf,
}

impl SettingsStore {
    #[must_use]
    pub fn new(paths: &AppPaths) -> Self {
        Self {
            path: paths.settings_path(),
        }
    }

    #[must_use]
    pub fn load(&self) -> AppSettings {
        match std::fs::read_to_string(&self.path) {
            Ok(content) => match toml::from_str(&content) {
                Ok(settings) => settings,
                Err(err) => {
                    warn!(path = %self.path.display(), error = %err, "settings file unreadable, using defaults");
                    AppSettings::default()
                }
            },
            Err(_) => AppSettings::default(),
        }
    }

    pub fn save(&self, settings: &AppSettings) -> anyhow::Result<()> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(settings)?;
        std::fs::write(&self.path, content)?;
        Ok(())
    }
}

/// Single writer for the settings file. Every mutation of the shared
/// settings goes through `request_save`, which wakes a background task that
/// snapshots and writes. Interaction paths never wait on the write, and a
/// failed write is logged and dropped.
#[derive(Clone)]
pub struct SettingsSaver {
    tx: mpsc::UnboundedSender<()>,
}

impl SettingsSaver {
    pub fn spawn(store: Arc<SettingsStore>, shared: SharedSettings) -> Self {
        let (tx, mut rx) = mpsc::unbounded_channel();
        tokio::spawn(async move {
            while rx.recv().await.is_some() {
                let snapshot = shared.lock().clone();
                if let Err(err) = store.save(&snapshot) {
                    warn!(error = %err, "failed to persist settings");
                }
            }
        });
        Self { tx }
    }

    pub fn request_save(&self) {
        let _ = self.tx.send(());
    }
}

/// Selection memory backed by the shared settings. Reads are in-memory;
/// writes update the shared copy and fire a save request.
pub struct SettingsSelectionStore {
    shared: SharedSettings,
    saver: SettingsSaver,
}

impl SettingsSelectionStore {
    #[must_use]
    pub fn new(shared: SharedSettings, saver: SettingsSaver) -> Self {
        Self { shared, saver }
    }
}

impl SelectionStore for SettingsSelectionStore {
    fn last_visited(&self, group: &str) -> Option<String> {
        self.shared.lock().last_visited.get(group).cloned()
    }

    fn set_last_visited(&self, group: &str, id: &str) {
        self.shared
            .lock()
            .last_visited
            .insert(group.to_string(), id.to_string());
        self.saver.request_save();
    }
}
