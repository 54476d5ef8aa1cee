//! Declarative plugin entries and the generic extension plugin

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::field::FieldPlugin;
use super::form::Form;
use super::kind::PluginKind;
use super::registry::{PluginRegistry, RegistryError};
use super::screen::ScreenPlugin;
use super::Plugin;

/// A plugin of a kind the shell has no dedicated type for
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExtensionPlugin {
    #[serde(rename = "__type")]
    pub plugin_type: String,

    pub name: String,

    #[serde(default)]
    pub options: Map<String, Value>,
}

impl Plugin for ExtensionPlugin {
    fn plugin_type(&self) -> &str {
        &self.plugin_type
    }

    fn name(&self) -> &str {
        &self.name
    }
}

/// A plugin declared as data, e.g. a `[[plugins]]` table in the config file
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PluginEntry {
    #[serde(rename = "__type", default)]
    pub plugin_type: String,

    pub name: String,

    #[serde(flatten)]
    pub options: Map<String, Value>,
}

impl PluginEntry {
    /// Converts the entry into its typed plugin and adds it to `registry`
    pub fn register(&self, registry: &PluginRegistry) -> Result<(), RegistryError> {
        let kind = PluginKind::parse(&self.plugin_type).map_err(|_| {
            RegistryError::MissingType {
                name: Some(self.name.clone()),
            }
        })?;

        match kind {
            PluginKind::Field => {
                let label = self
                    .options
                    .get("label")
                    .and_then(Value::as_str)
                    .unwrap_or(&self.name)
                    .to_string();
                let mut field = FieldPlugin::new(self.name.clone(), label);
                if let Some(default) = self.options.get("default_value") {
                    field = field.with_default(default.clone());
                }
                registry.add(field)
            }
            PluginKind::Screen => registry.add(self.decode::<ScreenPlugin>("name")?),
            PluginKind::Form => registry.add(self.decode::<Form>("id")?),
            PluginKind::Other(_) => registry.add(ExtensionPlugin {
                plugin_type: self.plugin_type.trim().to_string(),
                name: self.name.clone(),
                options: self.options.clone(),
            }),
        }
    }

    fn decode<T: serde::de::DeserializeOwned>(&self, name_key: &str) -> Result<T, RegistryError> {
        let mut object = self.options.clone();
        object.insert(name_key.to_string(), Value::String(self.name.clone()));
        if name_key == "id" && !object.contains_key("label") {
            object.insert("label".to_string(), Value::String(self.name.clone()));
        }

        serde_json::from_value(Value::Object(object)).map_err(|e| RegistryError::InvalidPlugin {
            name: self.name.clone(),
            reason: e.to_string(),
        })
    }
}
