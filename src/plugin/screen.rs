//! Screen plugins

use serde::{Deserialize, Serialize};

use super::Plugin;

/// How a screen is presented when opened
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScreenLayout {
    Fullscreen,
    #[default]
    Popup,
}

impl ScreenLayout {
    pub fn as_str(&self) -> &str {
        match self {
            ScreenLayout::Fullscreen => "fullscreen",
            ScreenLayout::Popup => "popup",
        }
    }
}

/// A standalone screen reachable from the shell menu
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScreenPlugin {
    pub name: String,

    #[serde(default)]
    pub layout: ScreenLayout,

    /// Text shown in the screen body
    #[serde(default)]
    pub description: String,
}

impl Plugin for ScreenPlugin {
    fn plugin_type(&self) -> &str {
        "screen"
    }

    fn name(&self) -> &str {
        &self.name
    }
}

impl ScreenPlugin {
    pub fn new(name: impl Into<String>, layout: ScreenLayout) -> Self {
        Self {
            name: name.into(),
            layout,
            description: String::new(),
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }
}
