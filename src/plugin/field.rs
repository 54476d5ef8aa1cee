//! Field editor plugins and the built-in set

use chrono::{DateTime, NaiveDate};
use serde::Serialize;
use serde_json::Value;

use super::Plugin;

/// Checks a field value, returning a message when it is invalid
pub type Validator = fn(&Value) -> Option<String>;

/// Names of the built-in field editors, in registration order
pub const BUILTIN_FIELDS: [&str; 13] = [
    "text",
    "textarea",
    "date",
    "image",
    "color",
    "number",
    "toggle",
    "select",
    "markdown",
    "html",
    "group",
    "group-list",
    "blocks",
];

/// An editor for one kind of form field
#[derive(Debug, Clone, Serialize)]
pub struct FieldPlugin {
    /// Component name forms refer to
    pub name: String,

    /// Human-readable label for pickers
    pub label: String,

    /// Value a new field starts with
    pub default_value: Value,

    #[serde(skip)]
    pub validate: Option<Validator>,
}

impl Plugin for FieldPlugin {
    fn plugin_type(&self) -> &str {
        "field"
    }

    fn name(&self) -> &str {
        &self.name
    }
}

impl FieldPlugin {
    pub fn new(name: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            label: label.into(),
            default_value: Value::Null,
            validate: None,
        }
    }

    pub fn with_default(mut self, value: Value) -> Self {
        self.default_value = value;
        self
    }

    pub fn with_validator(mut self, validate: Validator) -> Self {
        self.validate = Some(validate);
        self
    }

    /// Runs the validator, if any. Null values are always accepted.
    pub fn check(&self, value: &Value) -> Option<String> {
        if value.is_null() {
            return None;
        }
        self.validate.and_then(|validate| validate(value))
    }
}

/// The built-in field editors, in the order the shell registers them
pub fn builtin_fields() -> Vec<FieldPlugin> {
    vec![
        FieldPlugin::new("text", "Text")
            .with_default(Value::String(String::new()))
            .with_validator(expect_string),
        FieldPlugin::new("textarea", "Text Area")
            .with_default(Value::String(String::new()))
            .with_validator(expect_string),
        FieldPlugin::new("date", "Date").with_validator(validate_date),
        FieldPlugin::new("image", "Image").with_validator(expect_string),
        FieldPlugin::new("color", "Color")
            .with_default(Value::String("#000000".to_string()))
            .with_validator(validate_color),
        FieldPlugin::new("number", "Number").with_validator(expect_number),
        FieldPlugin::new("toggle", "Toggle")
            .with_default(Value::Bool(false))
            .with_validator(expect_bool),
        FieldPlugin::new("select", "Select").with_validator(expect_string),
        FieldPlugin::new("markdown", "Markdown")
            .with_default(Value::String(String::new()))
            .with_validator(expect_string),
        FieldPlugin::new("html", "HTML")
            .with_default(Value::String(String::new()))
            .with_validator(expect_string),
        FieldPlugin::new("group", "Group")
            .with_default(Value::Object(Default::default()))
            .with_validator(expect_object),
        FieldPlugin::new("group-list", "Group List")
            .with_default(Value::Array(Vec::new()))
            .with_validator(expect_array),
        FieldPlugin::new("blocks", "Blocks")
            .with_default(Value::Array(Vec::new()))
            .with_validator(validate_blocks),
    ]
}

fn expect_string(value: &Value) -> Option<String> {
    (!value.is_string()).then(|| "Expected a string".to_string())
}

fn expect_number(value: &Value) -> Option<String> {
    (!value.is_number()).then(|| "Expected a number".to_string())
}

fn expect_bool(value: &Value) -> Option<String> {
    (!value.is_boolean()).then(|| "Expected true or false".to_string())
}

fn expect_object(value: &Value) -> Option<String> {
    (!value.is_object()).then(|| "Expected a group of fields".to_string())
}

fn expect_array(value: &Value) -> Option<String> {
    (!value.is_array()).then(|| "Expected a list".to_string())
}

fn validate_date(value: &Value) -> Option<String> {
    let Some(s) = value.as_str() else {
        return Some("Expected a date string".to_string());
    };

    let valid = DateTime::parse_from_rfc3339(s).is_ok()
        || NaiveDate::parse_from_str(s, "%Y-%m-%d").is_ok();

    (!valid).then(|| format!("Invalid date: {}", s))
}

fn validate_color(value: &Value) -> Option<String> {
    let Some(s) = value.as_str() else {
        return Some("Expected a color string".to_string());
    };

    let hex = s.strip_prefix('#').unwrap_or("");
    let valid = matches!(hex.len(), 3 | 6) && hex.chars().all(|c| c.is_ascii_hexdigit());

    (!valid).then(|| format!("Invalid color: {} (expected #rgb or #rrggbb)", s))
}

fn validate_blocks(value: &Value) -> Option<String> {
    let Some(blocks) = value.as_array() else {
        return Some("Expected a list of blocks".to_string());
    };

    blocks.iter().enumerate().find_map(|(i, block)| {
        match block.get("_template").and_then(Value::as_str) {
            Some(_) => None,
            None => Some(format!("Block {} is missing its _template", i)),
        }
    })
}
