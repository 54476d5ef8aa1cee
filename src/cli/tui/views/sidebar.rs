//! Sidebar panel and its placement

use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph, Widget};

use crate::cli::tui::app::App;
use crate::cli::tui::utils::truncate_str;
use crate::portal::{ModalActions, ModalButton};
use crate::state::SidebarPosition;

pub const SIDEBAR_WIDTH: u16 = 32;

/// Where the sidebar and the main content go for one frame
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SidebarLayout {
    pub main: Rect,
    pub sidebar: Option<Rect>,
    /// Sidebar is painted over the main content
    pub overlaps: bool,
    /// Main content is dimmed behind the sidebar
    pub dim_main: bool,
}

pub fn sidebar_layout(
    position: SidebarPosition,
    is_open: bool,
    hidden: bool,
    area: Rect,
) -> SidebarLayout {
    if hidden || !is_open || area.width == 0 {
        return SidebarLayout {
            main: area,
            sidebar: None,
            overlaps: false,
            dim_main: false,
        };
    }

    let width = SIDEBAR_WIDTH.min(area.width);
    let column = Rect { width, ..area };

    match position {
        SidebarPosition::Displace => SidebarLayout {
            main: Rect {
                x: area.x + width,
                width: area.width - width,
                ..area
            },
            sidebar: Some(column),
            overlaps: false,
            dim_main: false,
        },
        SidebarPosition::Fixed => SidebarLayout {
            main: area,
            sidebar: Some(column),
            overlaps: true,
            dim_main: false,
        },
        SidebarPosition::Float => SidebarLayout {
            main: area,
            sidebar: Some(Rect {
                x: area.x.saturating_add(1).min(area.right().saturating_sub(width)),
                y: area.y.saturating_add(1),
                width,
                height: area.height.saturating_sub(2),
            }),
            overlaps: true,
            dim_main: false,
        },
        SidebarPosition::Overlay => SidebarLayout {
            main: area,
            sidebar: Some(column),
            overlaps: true,
            dim_main: true,
        },
    }
}

pub fn draw(app: &App, area: Rect, buf: &mut Buffer) {
    let block = Block::default()
        .title(" Tina ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan));
    let inner = block.inner(area);
    block.render(area, buf);

    if inner.height == 0 {
        return;
    }

    let draft = app.draft();
    let label_width = inner.width.saturating_sub(4) as usize;

    let mut lines = vec![
        Line::from(Span::styled(
            draft.label.clone(),
            Style::default().add_modifier(Modifier::BOLD),
        )),
        Line::default(),
    ];
    if draft.fields.is_empty() {
        lines.push(Line::from(Span::styled(
            "No fields. Press 'a' to add one.",
            Style::default().fg(Color::DarkGray),
        )));
    }
    for field in &draft.fields {
        lines.push(Line::from(vec![
            Span::raw("• "),
            Span::raw(truncate_str(field.display_label(), label_width)),
            Span::styled(
                format!(" {}", field.component),
                Style::default().fg(Color::DarkGray),
            ),
        ]));
    }

    let actions_height = 1.min(inner.height);
    let list_area = Rect {
        height: inner.height - actions_height,
        ..inner
    };
    Paragraph::new(lines).render(list_area, buf);

    let buttons = app.cms().sidebar().buttons();
    let actions = ModalActions::new()
        .button(ModalButton::new(buttons.reset.clone()))
        .button(ModalButton::new(buttons.save.clone()).primary());
    let actions_area = Rect {
        y: inner.bottom() - actions_height,
        height: actions_height,
        ..inner
    };
    (&actions).render(actions_area, buf);
}
