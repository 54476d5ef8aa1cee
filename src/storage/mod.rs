//! # Storage Layer
//!
//! Project discovery and configuration files.
//!
//! ## Project Structure
//!
//! ```text
//! .tina/
//! └── config.toml           # Sidebar, media store and plugin entries
//! ```
//!
//! ## Key Types
//!
//! - [`Project`] - Entry point for a tina project; builds the [`Cms`](crate::Cms)
//! - [`Config`] - Project and global configuration

mod config;
mod project;

pub use config::{
    Config, ConfigError, GlobalConfig, MediaConfig, OutputFormat, ProjectConfig, CONFIG_FILE,
    PROJECT_DIR,
};
pub use project::{Project, ProjectError};
