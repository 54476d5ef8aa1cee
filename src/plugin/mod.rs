//! # Plugin System
//!
//! Extensibility layer: independently authored editors, screens and forms
//! register themselves into typed collections the shell can enumerate.
//!
//! ## Plugin Kinds
//!
//! | Kind | Rust type | Purpose |
//! |------|-----------|---------|
//! | `field` | [`FieldPlugin`] | Editors for individual form fields |
//! | `screen` | [`ScreenPlugin`] | Standalone screens opened from the shell |
//! | `form` | [`Form`] | Editable forms |
//! | anything else | [`ExtensionPlugin`] (or your own type) | Extension-defined collections |
//!
//! ## Registration
//!
//! Every plugin declares its own `__type` through [`Plugin::plugin_type`].
//! [`PluginRegistry::add`] routes a plugin into the collection for that type,
//! creating the collection on first use:
//!
//! ```text
//! registry.add(screen)           registry.find_or_create_map::<ScreenPlugin>(Screen)
//!        │                                   │
//!        └──► "screen" ──► PluginType<ScreenPlugin> ◄──┘   (same collection)
//! ```
//!
//! ## Key Types
//!
//! - [`PluginRegistry`] - Kind → collection map with get-or-create access
//! - [`PluginType`] - Shared, insertion-ordered collection of one kind
//! - [`PluginEntry`] - Plugin declared as data (config file)

mod collection;
mod extension;
mod field;
mod form;
mod kind;
mod registry;
mod screen;

pub use collection::PluginType;
pub use extension::{ExtensionPlugin, PluginEntry};
pub use field::{builtin_fields, FieldPlugin, Validator, BUILTIN_FIELDS};
pub use form::{FieldDef, FieldError, Form};
pub use kind::PluginKind;
pub use registry::{PluginRegistry, RegistryError};
pub use screen::{ScreenLayout, ScreenPlugin};

/// A self-describing extension object
pub trait Plugin: 'static {
    /// The `__type` tag naming the collection this plugin belongs to
    fn plugin_type(&self) -> &str;

    /// Unique name within its collection
    fn name(&self) -> &str;
}
