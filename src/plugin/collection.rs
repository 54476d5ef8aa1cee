//! Typed, insertion-ordered plugin collections

use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use indexmap::IndexMap;

use super::kind::PluginKind;
use super::registry::RegistryError;
use super::Plugin;
use crate::reactive::{Callback, Subscribable, Unsubscribe};

struct Inner<T: ?Sized> {
    plugins: RefCell<IndexMap<String, Rc<T>>>,
    subscribable: Subscribable,
}

/// All plugins registered under one [`PluginKind`].
///
/// A `PluginType` is a handle: clones share the same underlying collection, so
/// additions made through one handle are visible through every other handle
/// obtained from the registry for the same kind.
pub struct PluginType<T: ?Sized> {
    kind: PluginKind,
    inner: Rc<Inner<T>>,
}

impl<T: ?Sized> Clone for PluginType<T> {
    fn clone(&self) -> Self {
        Self {
            kind: self.kind.clone(),
            inner: Rc::clone(&self.inner),
        }
    }
}

impl<T: ?Sized> fmt::Debug for PluginType<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PluginType")
            .field("kind", &self.kind)
            .field("names", &self.inner.plugins.borrow().keys().collect::<Vec<_>>())
            .finish()
    }
}

impl<T: Plugin> PluginType<T> {
    /// Adds a plugin, see [`PluginType::add_rc`]
    pub fn add(&self, plugin: T) -> Result<(), RegistryError> {
        self.add_rc(Rc::new(plugin))
    }
}

impl<T: Plugin + ?Sized> PluginType<T> {
    pub(crate) fn new(kind: PluginKind) -> Self {
        Self {
            kind,
            inner: Rc::new(Inner {
                plugins: RefCell::new(IndexMap::new()),
                subscribable: Subscribable::new(),
            }),
        }
    }

    pub fn kind(&self) -> &PluginKind {
        &self.kind
    }

    /// Adds a plugin and notifies subscribers.
    ///
    /// The plugin's own `__type` must name this collection. A plugin whose
    /// name is already present replaces the old entry in place.
    pub fn add_rc(&self, plugin: Rc<T>) -> Result<(), RegistryError> {
        let declared = PluginKind::parse(plugin.plugin_type()).map_err(|_| {
            RegistryError::MissingType {
                name: Some(plugin.name().to_string()),
            }
        })?;

        if declared != self.kind {
            return Err(RegistryError::WrongCollection {
                name: plugin.name().to_string(),
                declared,
                collection: self.kind.clone(),
            });
        }

        let name = plugin.name().to_string();
        let replaced = self
            .inner
            .plugins
            .borrow_mut()
            .insert(name.clone(), plugin)
            .is_some();

        tracing::debug!(kind = %self.kind, name = %name, replaced, "plugin added");
        self.inner.subscribable.notify_subscribers();
        Ok(())
    }

    /// Removes the plugin with `name`, notifying subscribers if it existed
    pub fn remove(&self, name: &str) -> Option<Rc<T>> {
        let removed = self.inner.plugins.borrow_mut().shift_remove(name);
        if removed.is_some() {
            tracing::debug!(kind = %self.kind, name, "plugin removed");
            self.inner.subscribable.notify_subscribers();
        }
        removed
    }

    /// Looks up a plugin by name
    pub fn find(&self, name: &str) -> Option<Rc<T>> {
        self.inner.plugins.borrow().get(name).cloned()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.inner.plugins.borrow().contains_key(name)
    }

    /// All plugins in insertion order
    pub fn all(&self) -> Vec<Rc<T>> {
        self.inner.plugins.borrow().values().cloned().collect()
    }

    /// Plugin names in insertion order
    pub fn names(&self) -> Vec<String> {
        self.inner.plugins.borrow().keys().cloned().collect()
    }

    pub fn len(&self) -> usize {
        self.inner.plugins.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.plugins.borrow().is_empty()
    }

    /// Returns true if both handles refer to the same collection
    pub fn same_collection(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.inner, &other.inner)
    }

    /// Subscribes to additions and removals
    pub fn subscribe(&self, callback: Callback) -> Unsubscribe {
        self.inner.subscribable.subscribe(callback)
    }

    pub fn unsubscribe(&self, callback: &Callback) -> bool {
        self.inner.subscribable.unsubscribe(callback)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    #[derive(Debug)]
    struct Widget {
        tag: &'static str,
        name: &'static str,
    }

    impl Plugin for Widget {
        fn plugin_type(&self) -> &str {
            self.tag
        }

        fn name(&self) -> &str {
            self.name
        }
    }

    fn widgets() -> PluginType<Widget> {
        PluginType::new(PluginKind::Other("widget".to_string()))
    }

    #[test]
    fn add_and_find() {
        let collection = widgets();
        collection
            .add(Widget { tag: "widget", name: "clock" })
            .unwrap();

        assert_eq!(collection.len(), 1);
        assert_eq!(collection.find("clock").unwrap().name, "clock");
        assert!(collection.find("missing").is_none());
    }

    #[test]
    fn preserves_insertion_order() {
        let collection = widgets();
        for name in ["c", "a", "b"] {
            collection.add(Widget { tag: "widget", name }).unwrap();
        }
        assert_eq!(collection.names(), vec!["c", "a", "b"]);
    }

    #[test]
    fn same_name_replaces_in_place() {
        let collection = widgets();
        collection.add(Widget { tag: "widget", name: "a" }).unwrap();
        collection.add(Widget { tag: "widget", name: "b" }).unwrap();
        collection.add(Widget { tag: "widget", name: "a" }).unwrap();

        assert_eq!(collection.names(), vec!["a", "b"]);
    }

    #[test]
    fn rejects_plugin_for_other_collection() {
        let collection = widgets();
        let err = collection
            .add(Widget { tag: "screen", name: "x" })
            .unwrap_err();

        assert!(matches!(err, RegistryError::WrongCollection { .. }));
        assert!(collection.is_empty());
    }

    #[test]
    fn rejects_plugin_without_type() {
        let collection = widgets();
        let err = collection.add(Widget { tag: "", name: "x" }).unwrap_err();

        match err {
            RegistryError::MissingType { name } => assert_eq!(name.as_deref(), Some("x")),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn clones_share_storage() {
        let a = widgets();
        let b = a.clone();
        a.add(Widget { tag: "widget", name: "x" }).unwrap();

        assert!(a.same_collection(&b));
        assert!(b.contains("x"));
    }

    #[test]
    fn add_and_remove_notify() {
        let collection = widgets();
        let count = Rc::new(Cell::new(0));
        let count_clone = Rc::clone(&count);
        collection.subscribe(Rc::new(move || count_clone.set(count_clone.get() + 1)));

        collection.add(Widget { tag: "widget", name: "x" }).unwrap();
        assert!(collection.remove("x").is_some());
        assert!(collection.remove("x").is_none());

        assert_eq!(count.get(), 2);
    }
}
