use anyhow::{Context, Result};
use std::path::{Path, PathBuf};

const APP_DIR: &str = "skiff";

/// Application directory layout. All directories exist after construction.
pub struct AppPaths {
    root: PathBuf,
    logs: PathBuf,
}

impl AppPaths {
    pub fn new() -> Result<Self> {
        let home = home::home_dir().context("could not determine home directory")?;
        Self::at_root(home.join(".config").join(APP_DIR))
    }

    pub fn at_root(root: PathBuf) -> Result<Self> {
        let logs = root.join("logs");
        std::fs::create_dir_all(&logs)
            .with_context(|| format!("creating app directories under {}", root.display()))?;
        Ok(Self { root, logs })
    }

    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    #[must_use]
    pub fn settings_path(&self) -> PathBuf {
        self.root.join("settings.toml")
    }

    #[must_use]
    pub fn sites_path(&self) -> PathBuf {
        self.root.join("sites.toml")
    }

    #[must_use]
    pub fn log_path(&self) -> PathBuf {
        self.logs.join("skiff.log")
    }
}
