//! Modals declared by the shell: field picker, screen picker, open screen

use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};

use crate::cli::tui::app::{App, InputMode};
use crate::plugin::ScreenLayout;
use crate::portal::{
    Context, Modal, ModalActions, ModalBody, ModalButton, ModalHeader, PortalError,
};

const PICKER_WIDTH: u16 = 48;
const SCREEN_WIDTH: u16 = 64;

/// Queues the modal for the current input mode, if any
pub fn draw(app: &App, ctx: &Context) -> Result<bool, PortalError> {
    let Some(header) = app.modal_header() else {
        return Ok(false);
    };

    let modal = match app.input_mode() {
        InputMode::Normal => return Ok(false),
        InputMode::FieldPicker { index } => {
            let items = app
                .cms()
                .fields()
                .all()
                .iter()
                .map(|field| (field.label.clone(), field.name.clone()))
                .collect();
            picker(header, "Add", items, *index)
        }
        InputMode::ScreenPicker { index } => {
            let items = app
                .cms()
                .screens()
                .all()
                .iter()
                .map(|screen| (screen.name.clone(), screen.layout.as_str().to_string()))
                .collect();
            picker(header, "Open", items, *index)
        }
        InputMode::Screen(name) => {
            let Some(screen) = app.cms().screens().find(name) else {
                return Ok(false);
            };

            let body = if screen.description.is_empty() {
                ModalBody::text("This screen has no content.")
            } else {
                ModalBody::text(&screen.description)
            };
            let width = match screen.layout {
                ScreenLayout::Fullscreen => u16::MAX,
                ScreenLayout::Popup => SCREEN_WIDTH,
            };

            Modal::new(body.padded(true))
                .header(header)
                .width(width)
                .scroll(app.modal_scroll())
        }
    };

    modal.render(ctx)
}

fn picker(
    header: ModalHeader,
    confirm: &str,
    items: Vec<(String, String)>,
    selected: usize,
) -> Modal {
    let lines: Vec<Line<'static>> = items
        .into_iter()
        .enumerate()
        .map(|(i, (label, detail))| {
            let style = if i == selected {
                Style::default().fg(Color::Cyan).add_modifier(Modifier::REVERSED)
            } else {
                Style::default()
            };
            Line::from(vec![
                Span::styled(format!(" {} ", label), style),
                Span::styled(format!(" {}", detail), Style::default().fg(Color::DarkGray)),
            ])
        })
        .collect();

    Modal::new(ModalBody::new(lines))
        .header(header)
        .actions(
            ModalActions::new()
                .button(ModalButton::new("Cancel"))
                .button(ModalButton::new(confirm).primary()),
        )
        .width(PICKER_WIDTH)
        .reveal(u16::try_from(selected).unwrap_or(u16::MAX))
}
