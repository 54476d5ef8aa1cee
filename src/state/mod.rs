//! # Shell State
//!
//! Reactive UI state owned by the shell root. Each type embeds a
//! [`Subscribable`](crate::reactive::Subscribable) and notifies its
//! subscribers from its own setters.
//!
//! - [`SidebarState`] - Editing sidebar: open/hidden flags, docking position, button labels
//! - [`Alerts`] - User-visible notifications (e.g. "no media store configured")

mod alerts;
mod sidebar;

pub use alerts::{Alert, AlertLevel, Alerts};
pub use sidebar::{
    SidebarButtons, SidebarButtonsOptions, SidebarPosition, SidebarState, SidebarStateOptions,
};
