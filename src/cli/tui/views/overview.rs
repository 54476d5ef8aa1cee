//! Main panel: registered plugins by type

use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph, Widget, Wrap};

use crate::cli::tui::app::App;
use crate::plugin::{ExtensionPlugin, PluginKind};

pub fn draw(app: &App, area: Rect, buf: &mut Buffer) {
    if area.width == 0 {
        return;
    }

    let block = Block::default().title(" Plugins ").borders(Borders::ALL);
    let inner = block.inner(area);
    block.render(area, buf);

    let cms = app.cms();
    let mut lines = Vec::new();

    for kind in cms.plugins().kinds() {
        let names = match &kind {
            PluginKind::Field => cms.fields().names(),
            PluginKind::Screen => cms.screens().names(),
            PluginKind::Form => cms.forms().names(),
            PluginKind::Other(_) => cms
                .plugins()
                .find_or_create_map::<ExtensionPlugin>(kind.clone())
                .map(|collection| collection.names())
                .unwrap_or_default(),
        };

        lines.push(Line::from(vec![
            Span::styled(
                kind.to_string(),
                Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
            ),
            Span::styled(
                format!(" ({})", names.len()),
                Style::default().fg(Color::DarkGray),
            ),
        ]));
        if names.is_empty() {
            lines.push(Line::from(Span::styled(
                "  none",
                Style::default().fg(Color::DarkGray),
            )));
        } else {
            lines.push(Line::from(format!("  {}", names.join(", "))));
        }
        lines.push(Line::default());
    }

    Paragraph::new(lines)
        .wrap(Wrap { trim: false })
        .render(inner, buf);
}
