//! Frame layout: sidebar, plugin overview, alert bar, then modals

mod alerts;
mod modals;
mod overview;
mod sidebar;

use ratatui::buffer::Buffer;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::widgets::{Clear, Widget};

use crate::cli::tui::app::App;
use crate::portal::Context;

/// Draws one frame of the shell. Runs inside the modal provider.
pub fn draw(app: &App, ctx: &Context, area: Rect, buf: &mut Buffer) {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(1), Constraint::Length(1)])
        .split(area);

    let state = app.cms().sidebar();
    let layout = sidebar::sidebar_layout(state.position(), state.is_open(), state.hidden(), rows[0]);

    overview::draw(app, layout.main, buf);

    if let Some(sidebar_area) = layout.sidebar {
        if layout.dim_main {
            buf.set_style(
                layout.main,
                Style::default().fg(Color::DarkGray).add_modifier(Modifier::DIM),
            );
        }
        if layout.overlaps {
            Clear.render(sidebar_area, buf);
        }
        sidebar::draw(app, sidebar_area, buf);
    }

    alerts::draw(app, rows[1], buf);

    if let Err(e) = modals::draw(app, ctx) {
        tracing::error!(error = %e, "modal could not be rendered");
    }
}
