//! Project management
//!
//! Handles project initialization and loading its configuration.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use thiserror::Error;

use super::config::{Config, CONFIG_FILE, PROJECT_DIR};

#[derive(Debug, Error)]
pub enum ProjectError {
    #[error("Not in a tina project. Run 'tina init' first.")]
    NotInProject,
}

const DEFAULT_CONFIG: &str = r#"# Tina shell configuration

[sidebar]
hidden = false
# fixed | float | displace | overlay
position = "displace"

[sidebar.buttons]
save = "Save"
reset = "Reset"

# Uploads are not saved until a store is configured.
# [media]
# store = "filesystem"
# root = "public/uploads"
# accept = "image/*"

# [[plugins]]
# __type = "screen"
# name = "Settings"
# layout = "popup"
"#;

/// A tina project
#[derive(Debug)]
pub struct Project {
    root: PathBuf,
    config: Config,
}

impl Project {
    /// Opens an existing project at the given path
    pub fn open(root: impl Into<PathBuf>) -> Result<Self> {
        let root = root.into();

        if !root.join(PROJECT_DIR).is_dir() {
            return Err(ProjectError::NotInProject.into());
        }

        let config = Config::for_project(&root)?;

        Ok(Self { root, config })
    }

    /// Initializes a new project at the given path; an existing config is kept
    pub fn init(root: impl Into<PathBuf>) -> Result<Self> {
        let root = root.into();
        let tina_dir = root.join(PROJECT_DIR);

        fs::create_dir_all(&tina_dir).with_context(|| {
            format!("Failed to create {} directory: {}", PROJECT_DIR, tina_dir.display())
        })?;

        let config_path = tina_dir.join(CONFIG_FILE);
        if !config_path.exists() {
            fs::write(&config_path, DEFAULT_CONFIG)
                .with_context(|| format!("Failed to write config: {}", config_path.display()))?;
            tracing::debug!(path = %config_path.display(), "wrote default config");
        }

        Self::open(root)
    }

    /// Returns the project root path
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Returns the .tina directory path
    pub fn tina_dir(&self) -> PathBuf {
        self.root.join(PROJECT_DIR)
    }

    pub fn config_path(&self) -> PathBuf {
        self.tina_dir().join(CONFIG_FILE)
    }

    /// Returns the configuration
    pub fn config(&self) -> &Config {
        &self.config
    }
}
