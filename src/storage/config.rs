//! Configuration handling
//!
//! Configuration is stored in `.tina/config.toml` (project) and
//! `~/.config/tina/config.toml` (global).

use std::fs;
use std::path::{Path, PathBuf};
use std::rc::Rc;

use anyhow::{Context, Result};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::cms::{CmsConfig, MediaOptions};
use crate::media::FsMediaStore;
use crate::plugin::PluginEntry;
use crate::state::SidebarStateOptions;

/// Directory marking a project root
pub const PROJECT_DIR: &str = ".tina";

/// Config file name inside [`PROJECT_DIR`] and the global config directory
pub const CONFIG_FILE: &str = "config.toml";

const FILESYSTEM_STORE: &str = "filesystem";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid configuration: {0}")]
    Invalid(String),

    #[error("Failed to parse configuration: {0}")]
    Parse(String),

    #[error("Unknown media store '{0}' (supported: filesystem)")]
    UnknownStore(String),
}

/// `[media]` table
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MediaConfig {
    /// Store backend; uploads are not saved when unset
    pub store: Option<String>,

    /// Upload root, relative to the project root
    pub root: PathBuf,

    /// Accepted content types, comma separated
    pub accept: String,
}

impl Default for MediaConfig {
    fn default() -> Self {
        Self {
            store: None,
            root: PathBuf::from("public/uploads"),
            accept: "*".to_string(),
        }
    }
}

impl MediaConfig {
    /// Builds the configured store, or `None` for the placeholder
    pub fn media_options(&self, project_root: &Path) -> Result<Option<MediaOptions>, ConfigError> {
        let Some(store) = self.store.as_deref() else {
            return Ok(None);
        };

        match store.trim() {
            FILESYSTEM_STORE => {
                let root = if self.root.is_absolute() {
                    self.root.clone()
                } else {
                    project_root.join(&self.root)
                };
                Ok(Some(MediaOptions {
                    store: Rc::new(FsMediaStore::new(root, self.accept.clone())),
                }))
            }
            other => Err(ConfigError::UnknownStore(other.to_string())),
        }
    }
}

/// Project-level configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProjectConfig {
    pub sidebar: SidebarStateOptions,

    pub media: MediaConfig,

    /// Plugins registered at startup
    pub plugins: Vec<PluginEntry>,
}

impl ProjectConfig {
    pub fn parse(content: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(content).map_err(|e| ConfigError::Parse(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        for (index, entry) in self.plugins.iter().enumerate() {
            if entry.plugin_type.trim().is_empty() {
                let name = if entry.name.is_empty() {
                    format!("#{}", index + 1)
                } else {
                    format!("'{}'", entry.name)
                };
                return Err(ConfigError::Invalid(format!(
                    "plugin {} is missing __type",
                    name
                )));
            }
        }

        if let Some(store) = self.media.store.as_deref() {
            if store.trim() != FILESYSTEM_STORE {
                return Err(ConfigError::UnknownStore(store.to_string()));
            }
        }

        Ok(())
    }

    /// Shell construction options for a project at `project_root`
    pub fn cms_config(&self, project_root: &Path) -> Result<CmsConfig, ConfigError> {
        Ok(CmsConfig {
            sidebar: self.sidebar.clone(),
            media: self.media.media_options(project_root)?,
            plugins: self.plugins.clone(),
        })
    }
}

/// Global user configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct GlobalConfig {
    /// Default output format (text or json)
    pub default_format: OutputFormat,
}

/// Output format for commands
#[derive(Debug, Clone, Copy, Serialize, Deserialize, Default, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

/// Combined configuration (global + project)
#[derive(Debug, Clone)]
pub struct Config {
    pub project: ProjectConfig,
    pub global: GlobalConfig,
    pub project_root: Option<PathBuf>,
}

impl Config {
    /// Loads configuration from default locations
    pub fn load() -> Result<Self> {
        let global = Self::load_global()?;
        let project_root = Self::find_project_root();
        let project = match &project_root {
            Some(root) => Self::load_project_config(root)?,
            None => ProjectConfig::default(),
        };

        Ok(Self {
            project,
            global,
            project_root,
        })
    }

    /// Loads configuration for a specific project
    pub fn for_project(project_root: &Path) -> Result<Self> {
        let global = Self::load_global()?;
        let project = Self::load_project_config(project_root)?;

        Ok(Self {
            project,
            global,
            project_root: Some(project_root.to_path_buf()),
        })
    }

    /// Loads an explicit project config file.
    ///
    /// The project root is the directory holding `.tina/`, or the file's
    /// own directory when it lives elsewhere.
    pub fn from_file(path: &Path) -> Result<Self> {
        let global = Self::load_global()?;
        let project = Self::read_project_file(path)?;

        let parent = path.parent().unwrap_or_else(|| Path::new("."));
        let root = if parent.file_name().is_some_and(|name| name == PROJECT_DIR) {
            parent.parent().unwrap_or(parent)
        } else {
            parent
        };

        Ok(Self {
            project,
            global,
            project_root: Some(root.to_path_buf()),
        })
    }

    /// Returns the global config directory
    pub fn global_config_dir() -> Option<PathBuf> {
        ProjectDirs::from("dev", "tina", "tina").map(|dirs| dirs.config_dir().to_path_buf())
    }

    fn load_global() -> Result<GlobalConfig> {
        let config_dir = match Self::global_config_dir() {
            Some(dir) => dir,
            None => return Ok(GlobalConfig::default()),
        };

        let config_path = config_dir.join(CONFIG_FILE);
        if !config_path.exists() {
            return Ok(GlobalConfig::default());
        }

        let content = fs::read_to_string(&config_path)
            .with_context(|| format!("Failed to read global config: {}", config_path.display()))?;

        toml::from_str(&content)
            .map_err(|e| ConfigError::Parse(e.to_string()))
            .context("Failed to parse global config")
    }

    fn load_project_config(project_root: &Path) -> Result<ProjectConfig> {
        let config_path = project_root.join(PROJECT_DIR).join(CONFIG_FILE);

        if !config_path.exists() {
            return Ok(ProjectConfig::default());
        }

        Self::read_project_file(&config_path)
    }

    fn read_project_file(path: &Path) -> Result<ProjectConfig> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read project config: {}", path.display()))?;

        ProjectConfig::parse(&content)
            .with_context(|| format!("Failed to load project config: {}", path.display()))
    }

    /// Finds the project root by looking for `.tina/` from the current directory up
    pub fn find_project_root() -> Option<PathBuf> {
        let current = std::env::current_dir().ok()?;
        Self::find_project_root_from(&current)
    }

    /// Finds the project root by looking for `.tina/` from `start` up
    pub fn find_project_root_from(start: &Path) -> Option<PathBuf> {
        let mut current = start.to_path_buf();

        loop {
            if current.join(PROJECT_DIR).is_dir() {
                return Some(current);
            }

            if !current.pop() {
                return None;
            }
        }
    }

    /// Shell construction options; the media root resolves against the
    /// project root, or the current directory outside a project
    pub fn cms_config(&self) -> Result<CmsConfig> {
        let root = self
            .project_root
            .clone()
            .unwrap_or_else(|| PathBuf::from("."));

        self.project
            .cms_config(&root)
            .context("Invalid media configuration")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::plugin::PluginKind;
    use crate::state::SidebarPosition;
    use tempfile::TempDir;

    const FULL: &str = r#"
[sidebar]
hidden = true
position = "overlay"

[sidebar.buttons]
save = "Publish"

[media]
store = "filesystem"
root = "static/img"
accept = "image/*"

[[plugins]]
__type = "screen"
name = "Settings"
layout = "fullscreen"

[[plugins]]
__type = "toolbar"
name = "Bold"
shortcut = "ctrl+b"
"#;

    #[test]
    fn default_config() {
        let config = ProjectConfig::default();

        assert!(!config.sidebar.hidden);
        assert_eq!(config.sidebar.position, None);
        assert_eq!(config.media.store, None);
        assert_eq!(config.media.accept, "*");
        assert!(config.plugins.is_empty());
        assert_eq!(GlobalConfig::default().default_format, OutputFormat::Text);
    }

    #[test]
    fn parse_project_config() {
        let config = ProjectConfig::parse(FULL).unwrap();

        assert!(config.sidebar.hidden);
        assert_eq!(config.sidebar.position, Some(SidebarPosition::Overlay));
        let buttons = config.sidebar.buttons.as_ref().unwrap();
        assert_eq!(buttons.save.as_deref(), Some("Publish"));
        assert_eq!(buttons.reset, None);

        assert_eq!(config.media.store.as_deref(), Some("filesystem"));
        assert_eq!(config.media.root, PathBuf::from("static/img"));

        assert_eq!(config.plugins.len(), 2);
        assert_eq!(config.plugins[0].plugin_type, "screen");
        assert_eq!(config.plugins[1].options["shortcut"], "ctrl+b");
    }

    #[test]
    fn parse_global_config() {
        let config: GlobalConfig = toml::from_str(r#"default_format = "json""#).unwrap();
        assert_eq!(config.default_format, OutputFormat::Json);
    }

    #[test]
    fn invalid_position_is_rejected() {
        let err = ProjectConfig::parse("[sidebar]\nposition = \"sideways\"\n").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn plugin_without_type_is_rejected() {
        let err = ProjectConfig::parse("[[plugins]]\nname = \"Mystery\"\n").unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(ref msg) if msg.contains("'Mystery'")));

        let blank = ProjectConfig::parse("[[plugins]]\n__type = \"  \"\nname = \"x\"\n");
        assert!(blank.is_err());
    }

    #[test]
    fn unknown_store_is_rejected() {
        let err = ProjectConfig::parse("[media]\nstore = \"s3\"\n").unwrap_err();
        assert!(matches!(err, ConfigError::UnknownStore(ref s) if s == "s3"));
    }

    #[test]
    fn cms_config_without_media_uses_placeholder() {
        let config = ProjectConfig::default();
        let cms_config = config.cms_config(Path::new("/project")).unwrap();
        assert!(cms_config.media.is_none());
    }

    #[test]
    fn cms_config_carries_everything() {
        let config = ProjectConfig::parse(FULL).unwrap();
        let cms_config = config.cms_config(Path::new("/project")).unwrap();

        assert_eq!(cms_config.sidebar, config.sidebar);
        assert_eq!(cms_config.plugins, config.plugins);
        let media = cms_config.media.unwrap();
        assert_eq!(media.store.accept(), "image/*");

        let cms = crate::cms::Cms::new(config.cms_config(Path::new("/project")).unwrap()).unwrap();
        assert!(cms.screens().contains("Settings"));
        assert!(cms.plugins().contains_kind(&PluginKind::parse("toolbar").unwrap()));
    }

    #[test]
    fn find_project_root() {
        let dir = TempDir::new().unwrap();
        fs::create_dir_all(dir.path().join(PROJECT_DIR)).unwrap();

        let sub_dir = dir.path().join("sub").join("dir");
        fs::create_dir_all(&sub_dir).unwrap();

        let root = Config::find_project_root_from(&sub_dir);
        assert_eq!(root.as_deref(), Some(dir.path()));
    }

    #[test]
    fn find_project_root_outside_project() {
        let dir = TempDir::new().unwrap();
        // Temp dirs normally have no `.tina` above them
        if Config::find_project_root_from(dir.path()).is_none() {
            assert!(Config::find_project_root_from(&dir.path().join("nested")).is_none());
        }
    }

    #[test]
    fn from_file_inside_project_dir() {
        let dir = TempDir::new().unwrap();
        let tina_dir = dir.path().join(PROJECT_DIR);
        fs::create_dir_all(&tina_dir).unwrap();
        let path = tina_dir.join(CONFIG_FILE);
        fs::write(&path, "[sidebar]\nhidden = true\n").unwrap();

        let config = Config::from_file(&path).unwrap();
        assert!(config.project.sidebar.hidden);
        assert_eq!(config.project_root.as_deref(), Some(dir.path()));
    }

    #[test]
    fn config_not_in_project() {
        let config = Config {
            project: ProjectConfig::default(),
            global: GlobalConfig::default(),
            project_root: None,
        };

        let cms_config = config.cms_config().unwrap();
        assert!(cms_config.media.is_none());
    }
}
