//! Interactive shell
//!
//! Draws the sidebar, the plugin overview and an alert bar with ratatui.
//! Modals are declared inside the view tree and painted through the
//! [`ModalProvider`](crate::portal::ModalProvider) wrapping each frame.

mod app;
mod event;
mod terminal;
mod utils;
mod views;

use std::panic::{self, AssertUnwindSafe};

use anyhow::{anyhow, Result};

use crate::cms::Cms;
use app::App;
use event::EventHandler;
use terminal::{PanicCapture, TerminalGuard};

const TICK_RATE_MS: u64 = 250;

/// Launch the TUI
pub fn run(cms: Cms) -> Result<()> {
    tracing::debug!("starting tui");

    let mut app = App::new(cms);
    let capture = PanicCapture::install();
    let mut guard = TerminalGuard::enter()?;
    let events = EventHandler::new(TICK_RATE_MS);

    // The guard restores the terminal on both paths
    let result = panic::catch_unwind(AssertUnwindSafe(|| {
        app.run(guard.terminal(), &events)
    }));
    drop(guard);

    for message in capture.finish() {
        eprintln!("warning: {}", message);
    }

    match result {
        Ok(inner) => inner,
        Err(payload) => {
            if let Some(s) = payload.downcast_ref::<&str>() {
                Err(anyhow!("TUI panicked: {}", s))
            } else if let Some(s) = payload.downcast_ref::<String>() {
                Err(anyhow!("TUI panicked: {}", s))
            } else {
                Err(anyhow!("TUI panicked with unknown error"))
            }
        }
    }
}
