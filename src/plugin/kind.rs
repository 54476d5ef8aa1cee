//! Plugin type discriminators

use std::fmt;

use serde::{Deserialize, Serialize};

use super::registry::RegistryError;

/// Tag naming the collection a plugin belongs to.
///
/// The well-known tags are closed variants; anything an extension invents
/// lands in [`PluginKind::Other`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub enum PluginKind {
    Form,
    Field,
    Screen,
    Other(String),
}

impl PluginKind {
    /// Parses a `__type` tag. An empty tag is a configuration error.
    pub fn parse(tag: &str) -> Result<Self, RegistryError> {
        match tag.trim() {
            "" => Err(RegistryError::MissingType {
                name: None,
            }),
            "form" => Ok(PluginKind::Form),
            "field" => Ok(PluginKind::Field),
            "screen" => Ok(PluginKind::Screen),
            other => Ok(PluginKind::Other(other.to_string())),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            PluginKind::Form => "form",
            PluginKind::Field => "field",
            PluginKind::Screen => "screen",
            PluginKind::Other(tag) => tag,
        }
    }

    /// Folds an `Other` spelling of a well-known tag into its variant
    pub(crate) fn canonical(self) -> Self {
        match self {
            PluginKind::Other(tag) => match tag.as_str() {
                "form" => PluginKind::Form,
                "field" => PluginKind::Field,
                "screen" => PluginKind::Screen,
                _ => PluginKind::Other(tag),
            },
            known => known,
        }
    }
}

impl fmt::Display for PluginKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<PluginKind> for String {
    fn from(kind: PluginKind) -> Self {
        kind.as_str().to_string()
    }
}

impl TryFrom<String> for PluginKind {
    type Error = RegistryError;

    fn try_from(tag: String) -> Result<Self, Self::Error> {
        PluginKind::parse(&tag)
    }
}
