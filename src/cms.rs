//! Shell root
//!
//! [`Cms`] composes the plugin registry, the built-in field editors and the
//! shared reactive UI state for one running editor instance.

use std::fmt;
use std::rc::Rc;

use crate::media::{DummyMediaStore, MediaManager, MediaStore};
use crate::plugin::{
    builtin_fields, FieldPlugin, Form, PluginEntry, PluginKind, PluginRegistry, PluginType,
    RegistryError, ScreenPlugin,
};
use crate::state::{Alerts, SidebarState, SidebarStateOptions};

/// Media configuration: the store uploads go to
#[derive(Clone)]
pub struct MediaOptions {
    pub store: Rc<dyn MediaStore>,
}

impl fmt::Debug for MediaOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MediaOptions")
            .field("accept", &self.store.accept())
            .finish()
    }
}

/// Construction-time configuration for [`Cms`]
#[derive(Debug, Clone, Default)]
pub struct CmsConfig {
    pub sidebar: SidebarStateOptions,

    /// Falls back to [`DummyMediaStore`] when `None`
    pub media: Option<MediaOptions>,

    /// Plugins registered after the built-ins
    pub plugins: Vec<PluginEntry>,
}

/// One running editor shell
pub struct Cms {
    plugins: PluginRegistry,
    forms: PluginType<Form>,
    fields: PluginType<FieldPlugin>,
    screens: PluginType<ScreenPlugin>,
    sidebar: Rc<SidebarState>,
    alerts: Rc<Alerts>,
    media: MediaManager,
    media_configured: bool,
}

impl fmt::Debug for Cms {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Cms")
            .field("plugins", &self.plugins)
            .field("sidebar", &self.sidebar)
            .field("media", &self.media)
            .finish_non_exhaustive()
    }
}

impl Cms {
    /// Builds the shell and registers the built-in field editors in order.
    ///
    /// Fails only if a configured plugin entry is malformed.
    pub fn new(config: CmsConfig) -> Result<Self, RegistryError> {
        let CmsConfig {
            sidebar,
            media,
            plugins: entries,
        } = config;

        let plugins = PluginRegistry::new();
        let forms = plugins.find_or_create_map::<Form>(PluginKind::Form)?;
        let fields = plugins.find_or_create_map::<FieldPlugin>(PluginKind::Field)?;
        let screens = plugins.find_or_create_map::<ScreenPlugin>(PluginKind::Screen)?;

        for field in builtin_fields() {
            fields.add(field)?;
        }

        let alerts = Rc::new(Alerts::new());
        let media_configured = media.is_some();
        let store: Rc<dyn MediaStore> = match media {
            Some(options) => options.store,
            None => Rc::new(DummyMediaStore::new(Rc::clone(&alerts))),
        };

        let cms = Self {
            plugins,
            forms,
            fields,
            screens,
            sidebar: Rc::new(SidebarState::new(sidebar)),
            alerts,
            media: MediaManager::new(store),
            media_configured,
        };

        for entry in &entries {
            entry.register(&cms.plugins)?;
        }

        tracing::debug!(
            fields = cms.fields.len(),
            configured_plugins = entries.len(),
            media_configured,
            "cms initialized"
        );

        Ok(cms)
    }

    pub fn plugins(&self) -> &PluginRegistry {
        &self.plugins
    }

    /// The `form` collection
    pub fn forms(&self) -> PluginType<Form> {
        self.forms.clone()
    }

    /// The `field` collection
    pub fn fields(&self) -> PluginType<FieldPlugin> {
        self.fields.clone()
    }

    /// The `screen` collection
    pub fn screens(&self) -> PluginType<ScreenPlugin> {
        self.screens.clone()
    }

    pub fn sidebar(&self) -> &Rc<SidebarState> {
        &self.sidebar
    }

    pub fn alerts(&self) -> &Rc<Alerts> {
        &self.alerts
    }

    pub fn media(&self) -> &MediaManager {
        &self.media
    }

    /// False when uploads go to the placeholder store
    pub fn media_configured(&self) -> bool {
        self.media_configured
    }
}
