//! Editing sidebar state

use std::cell::Cell;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::reactive::{Callback, Subscribable, Unsubscribe};

/// Where the sidebar docks relative to the content
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SidebarPosition {
    /// Pinned over the left edge, content keeps its width
    Fixed,
    /// Floating panel inset from the edges
    Float,
    /// Pushes the content aside
    #[default]
    Displace,
    /// Drawn over the content
    Overlay,
}

impl SidebarPosition {
    pub fn as_str(&self) -> &str {
        match self {
            SidebarPosition::Fixed => "fixed",
            SidebarPosition::Float => "float",
            SidebarPosition::Displace => "displace",
            SidebarPosition::Overlay => "overlay",
        }
    }
}

impl fmt::Display for SidebarPosition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SidebarPosition {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "fixed" => Ok(SidebarPosition::Fixed),
            "float" => Ok(SidebarPosition::Float),
            "displace" => Ok(SidebarPosition::Displace),
            "overlay" => Ok(SidebarPosition::Overlay),
            other => Err(format!(
                "Invalid sidebar position: {} (expected fixed, float, displace or overlay)",
                other
            )),
        }
    }
}

/// Labels of the sidebar's form buttons
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SidebarButtons {
    pub save: String,
    pub reset: String,
}

impl Default for SidebarButtons {
    fn default() -> Self {
        Self {
            save: "Save".to_string(),
            reset: "Reset".to_string(),
        }
    }
}

/// Partial button labels as supplied by configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SidebarButtonsOptions {
    pub save: Option<String>,
    pub reset: Option<String>,
}

/// Sidebar configuration; every field is optional
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SidebarStateOptions {
    pub hidden: bool,
    pub position: Option<SidebarPosition>,
    pub buttons: Option<SidebarButtonsOptions>,
}

/// Observable state of the editing sidebar.
///
/// `set_is_open` and `set_hidden` always write and then notify, even when the
/// value is unchanged.
pub struct SidebarState {
    is_open: Cell<bool>,
    hidden: Cell<bool>,
    position: SidebarPosition,
    buttons: SidebarButtons,
    subscribable: Subscribable,
}

impl fmt::Debug for SidebarState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SidebarState")
            .field("is_open", &self.is_open.get())
            .field("hidden", &self.hidden.get())
            .field("position", &self.position)
            .field("buttons", &self.buttons)
            .finish()
    }
}

impl Default for SidebarState {
    fn default() -> Self {
        Self::new(SidebarStateOptions::default())
    }
}

impl SidebarState {
    pub fn new(options: SidebarStateOptions) -> Self {
        let mut buttons = SidebarButtons::default();
        if let Some(supplied) = options.buttons {
            // Empty labels keep the defaults.
            if let Some(save) = supplied.save.filter(|s| !s.is_empty()) {
                buttons.save = save;
            }
            if let Some(reset) = supplied.reset.filter(|s| !s.is_empty()) {
                buttons.reset = reset;
            }
        }

        Self {
            is_open: Cell::new(false),
            hidden: Cell::new(options.hidden),
            position: options.position.unwrap_or_default(),
            buttons,
            subscribable: Subscribable::new(),
        }
    }

    pub fn is_open(&self) -> bool {
        self.is_open.get()
    }

    pub fn set_is_open(&self, is_open: bool) {
        self.is_open.set(is_open);
        self.subscribable.notify_subscribers();
    }

    /// Flips `is_open`, returning the new value
    pub fn toggle(&self) -> bool {
        let next = !self.is_open();
        self.set_is_open(next);
        next
    }

    pub fn hidden(&self) -> bool {
        self.hidden.get()
    }

    pub fn set_hidden(&self, hidden: bool) {
        self.hidden.set(hidden);
        self.subscribable.notify_subscribers();
    }

    pub fn position(&self) -> SidebarPosition {
        self.position
    }

    pub fn buttons(&self) -> &SidebarButtons {
        &self.buttons
    }

    pub fn subscribe(&self, callback: Callback) -> Unsubscribe {
        self.subscribable.subscribe(callback)
    }

    pub fn unsubscribe(&self, callback: &Callback) -> bool {
        self.subscribable.unsubscribe(callback)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::rc::Rc;

    #[test]
    fn defaults() {
        let sidebar = SidebarState::default();

        assert!(!sidebar.is_open());
        assert!(!sidebar.hidden());
        assert_eq!(sidebar.position(), SidebarPosition::Displace);
        assert_eq!(sidebar.buttons().save, "Save");
        assert_eq!(sidebar.buttons().reset, "Reset");
    }

    #[test]
    fn options_override_defaults() {
        let sidebar = SidebarState::new(SidebarStateOptions {
            hidden: true,
            position: Some(SidebarPosition::Overlay),
            buttons: Some(SidebarButtonsOptions {
                save: Some("Publish".to_string()),
                reset: None,
            }),
        });

        assert!(sidebar.hidden());
        assert_eq!(sidebar.position(), SidebarPosition::Overlay);
        assert_eq!(sidebar.buttons().save, "Publish");
        assert_eq!(sidebar.buttons().reset, "Reset");
    }

    #[test]
    fn empty_labels_fall_back() {
        let sidebar = SidebarState::new(SidebarStateOptions {
            buttons: Some(SidebarButtonsOptions {
                save: Some(String::new()),
                reset: Some(String::new()),
            }),
            ..Default::default()
        });

        assert_eq!(sidebar.buttons(), &SidebarButtons::default());
    }

    #[test]
    fn setting_same_value_still_notifies() {
        let sidebar = SidebarState::default();
        let count = Rc::new(Cell::new(0));
        let count_clone = Rc::clone(&count);
        sidebar.subscribe(Rc::new(move || count_clone.set(count_clone.get() + 1)));

        sidebar.set_is_open(true);
        sidebar.set_is_open(true);
        assert_eq!(count.get(), 2);

        sidebar.set_hidden(false);
        assert_eq!(count.get(), 3);
    }

    #[test]
    fn subscriber_observes_latest_value() {
        let sidebar = Rc::new(SidebarState::default());
        let seen = Rc::new(Cell::new(None));

        let sidebar_clone = Rc::clone(&sidebar);
        let seen_clone = Rc::clone(&seen);
        sidebar.subscribe(Rc::new(move || seen_clone.set(Some(sidebar_clone.is_open()))));

        sidebar.set_is_open(true);
        assert_eq!(seen.get(), Some(true));

        assert!(!sidebar.toggle());
        assert_eq!(seen.get(), Some(false));
    }

    #[test]
    fn unsubscribed_callback_is_silent() {
        let sidebar = SidebarState::default();
        let count = Rc::new(Cell::new(0));
        let count_clone = Rc::clone(&count);
        let callback: Callback = Rc::new(move || count_clone.set(count_clone.get() + 1));

        sidebar.subscribe(Rc::clone(&callback));
        assert!(sidebar.unsubscribe(&callback));
        sidebar.set_hidden(true);

        assert_eq!(count.get(), 0);
    }

    #[test]
    fn position_from_str() {
        assert_eq!("float".parse::<SidebarPosition>().unwrap(), SidebarPosition::Float);
        assert_eq!("FIXED".parse::<SidebarPosition>().unwrap(), SidebarPosition::Fixed);
        assert!("left".parse::<SidebarPosition>().is_err());
    }

    #[test]
    fn parse_options_from_toml() {
        let options: SidebarStateOptions = toml::from_str(
            r#"
hidden = true
position = "float"

[buttons]
reset = "Undo"
"#,
        )
        .unwrap();

        let sidebar = SidebarState::new(options);
        assert_eq!(sidebar.position(), SidebarPosition::Float);
        assert_eq!(sidebar.buttons().reset, "Undo");
        assert_eq!(sidebar.buttons().save, "Save");
    }

    #[test]
    fn invalid_position_fails_to_parse() {
        let result: Result<SidebarStateOptions, _> = toml::from_str(r#"position = "left""#);
        assert!(result.is_err());
    }
}
