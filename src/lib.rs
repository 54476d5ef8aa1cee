//! Tina shell - extensibility and reactivity core for a terminal content editor
//!
//! The shell is assembled from small reactive pieces: plugin collections that
//! notify when they change, sidebar and alert state views subscribe to, and a
//! portal layer that lets deeply nested views paint modals over the whole
//! screen.

pub mod cli;
pub mod cms;
pub mod media;
pub mod plugin;
pub mod portal;
pub mod reactive;
pub mod state;
pub mod storage;

pub use cms::{Cms, CmsConfig, MediaOptions};
pub use plugin::{Plugin, PluginKind, PluginRegistry, PluginType, RegistryError};
pub use reactive::{Callback, Subscribable, Unsubscribe};
pub use state::{SidebarPosition, SidebarState};
