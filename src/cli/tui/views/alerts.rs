//! Bottom bar: latest alert, or key hints when there is none

use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::{Color, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Paragraph, Widget};

use crate::cli::tui::app::App;
use crate::state::AlertLevel;

const HINTS: &str = "a add field  s screens  b sidebar  w save  r reset  x dismiss  q quit";

pub fn draw(app: &App, area: Rect, buf: &mut Buffer) {
    let line = match app.cms().alerts().latest() {
        Some(alert) => {
            let color = match alert.level {
                AlertLevel::Info => Color::Blue,
                AlertLevel::Success => Color::Green,
                AlertLevel::Warn => Color::Yellow,
                AlertLevel::Error => Color::Red,
            };
            Line::from(vec![
                Span::styled(
                    format!(" {} ", alert.level.as_str()),
                    Style::default().fg(Color::Black).bg(color),
                ),
                Span::raw(" "),
                Span::raw(alert.message),
            ])
        }
        None => Line::from(Span::styled(HINTS, Style::default().fg(Color::DarkGray))),
    };

    Paragraph::new(line).render(area, buf);
}
