//! Registry mapping plugin kinds to their collections

use std::any::{type_name, Any};
use std::cell::RefCell;
use std::rc::Rc;

use indexmap::IndexMap;
use thiserror::Error;

use super::collection::PluginType;
use super::kind::PluginKind;
use super::Plugin;

#[derive(Debug, Error)]
pub enum RegistryError {
    #[error(
        "Plugin '{}' does not declare a plugin type",
        .name.as_deref().unwrap_or("<unnamed>")
    )]
    MissingType { name: Option<String> },

    #[error("Plugin '{name}' declares type '{declared}' but was added to the '{collection}' collection")]
    WrongCollection {
        name: String,
        declared: PluginKind,
        collection: PluginKind,
    },

    #[error("Collection '{kind}' holds {found}, not {expected}")]
    TypeMismatch {
        kind: PluginKind,
        expected: &'static str,
        found: &'static str,
    },

    #[error("Invalid plugin '{name}': {reason}")]
    InvalidPlugin { name: String, reason: String },
}

struct Entry {
    collection: Box<dyn Any>,
    type_name: &'static str,
}

/// Lazily-populated map from [`PluginKind`] to a [`PluginType`] collection.
///
/// Each kind is bound to the Rust type of the first collection created for
/// it; asking for the same kind with another type fails with
/// [`RegistryError::TypeMismatch`].
#[derive(Default)]
pub struct PluginRegistry {
    collections: RefCell<IndexMap<PluginKind, Entry>>,
}

impl std::fmt::Debug for PluginRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PluginRegistry")
            .field("kinds", &self.kinds())
            .finish()
    }
}

impl PluginRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the collection for `kind`, creating an empty one first if needed.
    ///
    /// Repeated calls return handles to the same collection.
    pub fn find_or_create_map<T: Plugin + ?Sized>(
        &self,
        kind: PluginKind,
    ) -> Result<PluginType<T>, RegistryError> {
        let kind = kind.canonical();
        let mut collections = self.collections.borrow_mut();

        let entry = collections.entry(kind.clone()).or_insert_with(|| {
            tracing::debug!(kind = %kind, ty = type_name::<T>(), "creating plugin collection");
            Entry {
                collection: Box::new(PluginType::<T>::new(kind.clone())),
                type_name: type_name::<T>(),
            }
        });

        entry
            .collection
            .downcast_ref::<PluginType<T>>()
            .cloned()
            .ok_or_else(|| RegistryError::TypeMismatch {
                kind,
                expected: type_name::<T>(),
                found: entry.type_name,
            })
    }

    /// Adds a plugin to the collection named by its own `__type`
    pub fn add<T: Plugin>(&self, plugin: T) -> Result<(), RegistryError> {
        self.add_rc(Rc::new(plugin))
    }

    /// Adds a shared plugin to the collection named by its own `__type`
    pub fn add_rc<T: Plugin + ?Sized>(&self, plugin: Rc<T>) -> Result<(), RegistryError> {
        let kind = PluginKind::parse(plugin.plugin_type()).map_err(|_| {
            RegistryError::MissingType {
                name: Some(plugin.name().to_string()),
            }
        })?;

        self.find_or_create_map::<T>(kind)?.add_rc(plugin)
    }

    /// Kinds with a collection, in creation order
    pub fn kinds(&self) -> Vec<PluginKind> {
        self.collections.borrow().keys().cloned().collect()
    }

    pub fn contains_kind(&self, kind: &PluginKind) -> bool {
        self.collections.borrow().contains_key(kind)
    }
}
