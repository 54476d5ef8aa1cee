//! User-visible alerts

use std::cell::{Cell, RefCell};
use std::fmt;

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::reactive::{Callback, Subscribable, Unsubscribe};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum AlertLevel {
    Info,
    Success,
    Warn,
    Error,
}

impl AlertLevel {
    pub fn as_str(&self) -> &str {
        match self {
            AlertLevel::Info => "info",
            AlertLevel::Success => "success",
            AlertLevel::Warn => "warn",
            AlertLevel::Error => "error",
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct Alert {
    pub id: u64,
    pub level: AlertLevel,
    pub message: String,
    pub created_at: DateTime<Utc>,
}

/// Queue of alerts shown to the user, oldest first
#[derive(Default)]
pub struct Alerts {
    alerts: RefCell<Vec<Alert>>,
    next_id: Cell<u64>,
    subscribable: Subscribable,
}

impl fmt::Debug for Alerts {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Alerts")
            .field("alerts", &self.alerts.borrow())
            .finish()
    }
}

impl Alerts {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queues an alert and notifies subscribers. Returns its id.
    pub fn add(&self, level: AlertLevel, message: impl Into<String>) -> u64 {
        let id = self.next_id.get();
        self.next_id.set(id + 1);

        self.alerts.borrow_mut().push(Alert {
            id,
            level,
            message: message.into(),
            created_at: Utc::now(),
        });

        self.subscribable.notify_subscribers();
        id
    }

    pub fn info(&self, message: impl Into<String>) -> u64 {
        self.add(AlertLevel::Info, message)
    }

    pub fn success(&self, message: impl Into<String>) -> u64 {
        self.add(AlertLevel::Success, message)
    }

    pub fn warn(&self, message: impl Into<String>) -> u64 {
        self.add(AlertLevel::Warn, message)
    }

    pub fn error(&self, message: impl Into<String>) -> u64 {
        self.add(AlertLevel::Error, message)
    }

    /// Removes an alert. Returns whether it existed.
    pub fn dismiss(&self, id: u64) -> bool {
        let removed = {
            let mut alerts = self.alerts.borrow_mut();
            let before = alerts.len();
            alerts.retain(|a| a.id != id);
            alerts.len() != before
        };

        if removed {
            self.subscribable.notify_subscribers();
        }
        removed
    }

    pub fn all(&self) -> Vec<Alert> {
        self.alerts.borrow().clone()
    }

    /// Most recently added alert still queued
    pub fn latest(&self) -> Option<Alert> {
        self.alerts.borrow().last().cloned()
    }

    pub fn len(&self) -> usize {
        self.alerts.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.alerts.borrow().is_empty()
    }

    pub fn subscribe(&self, callback: Callback) -> Unsubscribe {
        self.subscribable.subscribe(callback)
    }

    pub fn unsubscribe(&self, callback: &Callback) -> bool {
        self.subscribable.unsubscribe(callback)
    }
}
