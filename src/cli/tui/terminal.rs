//! Terminal setup and teardown

use std::io::{stdout, Stdout};
use std::panic;
use std::sync::{Arc, Mutex};

use anyhow::Result;
use crossterm::execute;
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use ratatui::backend::CrosstermBackend;

pub type Terminal = ratatui::Terminal<CrosstermBackend<Stdout>>;

/// Raw mode + alternate screen for as long as it lives
pub struct TerminalGuard {
    terminal: Terminal,
}

impl TerminalGuard {
    pub fn enter() -> Result<Self> {
        enable_raw_mode()?;
        let mut stdout = stdout();
        if let Err(e) = execute!(stdout, EnterAlternateScreen) {
            let _ = disable_raw_mode();
            return Err(e.into());
        }

        let terminal = ratatui::Terminal::new(CrosstermBackend::new(stdout))?;
        Ok(Self { terminal })
    }

    pub fn terminal(&mut self) -> &mut Terminal {
        &mut self.terminal
    }
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        let _ = disable_raw_mode();
        let _ = execute!(self.terminal.backend_mut(), LeaveAlternateScreen);
        let _ = self.terminal.show_cursor();
    }
}

/// Holds back panic messages while the alternate screen is up.
///
/// Panics caught during subscriber notification would otherwise print over
/// the frame. Dropping restores the default hook.
pub struct PanicCapture {
    messages: Arc<Mutex<Vec<String>>>,
}

impl PanicCapture {
    pub fn install() -> Self {
        let messages = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&messages);
        panic::set_hook(Box::new(move |info| {
            if let Ok(mut messages) = sink.lock() {
                messages.push(info.to_string());
            }
        }));

        Self { messages }
    }

    /// Restores the default hook and returns the held-back messages
    pub fn finish(self) -> Vec<String> {
        self.messages
            .lock()
            .map(|mut messages| std::mem::take(&mut *messages))
            .unwrap_or_default()
    }
}

impl Drop for PanicCapture {
    fn drop(&mut self) {
        let _ = panic::take_hook();
    }
}
