//! Form plugins

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::collection::PluginType;
use super::field::FieldPlugin;
use super::Plugin;

/// One field in a form, rendered by the field plugin named in `component`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldDef {
    pub name: String,

    #[serde(default)]
    pub label: Option<String>,

    pub component: String,
}

impl FieldDef {
    pub fn new(name: impl Into<String>, component: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            label: None,
            component: component.into(),
        }
    }

    /// Label to display, falling back to the field name
    pub fn display_label(&self) -> &str {
        self.label.as_deref().unwrap_or(&self.name)
    }
}

/// A validation failure for one form field
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldError {
    /// Field that failed validation
    pub field: String,

    /// Error message
    pub message: String,
}

/// An editable form registered with the shell
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Form {
    pub id: String,

    pub label: String,

    #[serde(default)]
    pub fields: Vec<FieldDef>,

    /// Current values keyed by field name
    #[serde(default)]
    pub values: Map<String, Value>,
}

impl Plugin for Form {
    fn plugin_type(&self) -> &str {
        "form"
    }

    fn name(&self) -> &str {
        &self.id
    }
}

impl Form {
    pub fn new(id: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
            fields: Vec::new(),
            values: Map::new(),
        }
    }

    pub fn with_field(mut self, field: FieldDef) -> Self {
        self.fields.push(field);
        self
    }

    pub fn with_value(mut self, name: impl Into<String>, value: Value) -> Self {
        self.values.insert(name.into(), value);
        self
    }

    /// Value for a field, or null when unset
    pub fn value(&self, name: &str) -> &Value {
        self.values.get(name).unwrap_or(&Value::Null)
    }

    /// Values with unset fields filled from their field plugin's default
    pub fn initial_values(&self, fields: &PluginType<FieldPlugin>) -> Map<String, Value> {
        let mut values = self.values.clone();
        for def in &self.fields {
            if values.contains_key(&def.name) {
                continue;
            }
            if let Some(plugin) = fields.find(&def.component) {
                values.insert(def.name.clone(), plugin.default_value.clone());
            }
        }
        values
    }

    /// Validates every field against its field plugin
    pub fn validate(&self, fields: &PluginType<FieldPlugin>) -> Vec<FieldError> {
        let mut errors = Vec::new();

        for def in &self.fields {
            let Some(plugin) = fields.find(&def.component) else {
                errors.push(FieldError {
                    field: def.name.clone(),
                    message: format!("Unknown field component: {}", def.component),
                });
                continue;
            };

            if let Some(message) = plugin.check(self.value(&def.name)) {
                errors.push(FieldError {
                    field: def.name.clone(),
                    message,
                });
            }
        }

        errors
    }
}
