use anyhow::{Context, Result};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::domain::models::SiteProfile;

/// Persistence facade for site profiles. The TUI only talks to this trait so
/// tests can substitute a mock, and a future database-backed store can slot
/// in without touching the app layer.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SiteStore: Send + Sync {
    async fn load_sites(&self) -> Result<Vec<SiteProfile>>;

    async fn save_site(&self, site: &SiteProfile) -> Result<()>;

    async fn delete_site(&self, id: &str) -> Result<()>;

    /// Path to watch for external edits, when the store is file-backed.
    fn watch_path(&self) -> Option<PathBuf>;
}

#[derive(Debug, Default, Serialize, Deserialize)]
struct SiteFile {
    #[serde(default)]
    sites: Vec<SiteProfile>,
}

/// File-backed store keeping all profiles in one `sites.toml`.
pub struct TomlSiteStore {
    path: PathBuf,
}

impl TomlSiteStore {
    #[must_use]
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    async fn read_file(&self) -> Result<SiteFile> {
        if !self.path.exists() {
            return Ok(SiteFile::default());
        }
        let content = tokio::fs::read_to_string(&self.path)
            .await
            .with_context(|| format!("reading {}", self.path.display()))?;
        toml::from_str(&content).with_context(|| format!("parsing {}", self.path.display()))
    }

    async fn write_file(&self, file: &SiteFile) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }
        let content = toml::to_string_pretty(file)?;
        tokio::fs::write(&self.path, content)
            .await
            .with_context(|| format!("writing {}", self.path.display()))
    }
}

#[async_trait]
impl SiteStore for TomlSiteStore {
    async fn load_sites(&self) -> Result<Vec<SiteProfile>> {
        Ok(self.read_file().await?.sites)
    }

    async fn save_site(&self, site: &SiteProfile) -> Result<()> {
        let mut file = self.read_file().await?;
        match file.sites.iter_mut().find(|s| s.id == site.id) {
            Some(existing) => *existing = site.clone(),
            None => file.sites.push(site.clone()),
        }
        self.write_file(&file).await
    }

    async fn delete_site(&self, id: &str) -> Result<()> {
        let mut file = self.read_file().await?;
        file.sites.retain(|s| s.id != id);
        self.write_file(&file).await
    }

    fn watch_path(&self) -> Option<PathBuf> {
        Some(self.path.clone())
    }
}
