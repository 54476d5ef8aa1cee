//! Modal overlay and its layout pieces

use std::fmt;

use ratatui::buffer::Buffer;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph, Widget};

use super::context::{use_modal_container, Context, PortalError};
use super::OVERLAY_Z_INDEX;
use crate::reactive::Callback;

const DEFAULT_WIDTH: u16 = 60;
const CLOSE_LABEL: &str = "[x]";

/// Title row with an optional close affordance
pub struct ModalHeader {
    title: String,
    close: Option<Callback>,
}

impl fmt::Debug for ModalHeader {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ModalHeader")
            .field("title", &self.title)
            .field("has_close", &self.has_close())
            .finish()
    }
}

impl ModalHeader {
    /// Title row plus the separator under it
    pub const HEIGHT: u16 = 2;

    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            close: None,
        }
    }

    /// Shows the close affordance; `close` runs when the modal is dismissed
    pub fn on_close(mut self, close: Callback) -> Self {
        self.close = Some(close);
        self
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn has_close(&self) -> bool {
        self.close.is_some()
    }

    /// Runs the close callback. Returns false when there is none.
    pub fn close(&self) -> bool {
        match &self.close {
            Some(close) => {
                close();
                true
            }
            None => false,
        }
    }
}

impl Widget for &ModalHeader {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.height == 0 || area.width < 2 {
            return;
        }

        let close_width = if self.has_close() {
            Span::raw(CLOSE_LABEL).width() as u16 + 1
        } else {
            0
        };
        let title_width = area.width.saturating_sub(2 + close_width) as usize;
        buf.set_stringn(
            area.x + 1,
            area.y,
            &self.title,
            title_width,
            Style::default().add_modifier(Modifier::BOLD),
        );

        if self.has_close() {
            let x = area.right().saturating_sub(close_width);
            buf.set_string(x, area.y, CLOSE_LABEL, Style::default().fg(Color::Gray));
        }

        if area.height > 1 {
            let rule = "─".repeat(area.width as usize);
            buf.set_string(area.x, area.y + 1, rule, Style::default().fg(Color::DarkGray));
        }
    }
}

/// Main content of a modal
#[derive(Debug, Clone, Default)]
pub struct ModalBody {
    lines: Vec<Line<'static>>,
    padded: bool,
}

impl ModalBody {
    pub const MIN_HEIGHT: u16 = 8;

    pub fn new<I, L>(lines: I) -> Self
    where
        I: IntoIterator<Item = L>,
        L: Into<Line<'static>>,
    {
        Self {
            lines: lines.into_iter().map(Into::into).collect(),
            padded: false,
        }
    }

    /// One line per line of `text`
    pub fn text(text: &str) -> Self {
        Self::new(text.lines().map(|line| Line::from(line.to_string())))
    }

    pub fn padded(mut self, padded: bool) -> Self {
        self.padded = padded;
        self
    }

    pub fn height(&self) -> u16 {
        let lines = u16::try_from(self.lines.len()).unwrap_or(u16::MAX);
        let padding = if self.padded { 2 } else { 0 };
        lines.saturating_add(padding).max(Self::MIN_HEIGHT)
    }
}

impl Widget for &ModalBody {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let inner = if self.padded {
            Rect {
                x: area.x.saturating_add(2),
                y: area.y.saturating_add(1),
                width: area.width.saturating_sub(4),
                height: area.height.saturating_sub(2),
            }
        } else {
            area
        };

        Paragraph::new(self.lines.clone()).render(inner, buf);
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModalButton {
    pub label: String,
    pub primary: bool,
}

impl ModalButton {
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            primary: false,
        }
    }

    pub fn primary(mut self) -> Self {
        self.primary = true;
        self
    }

    fn text(&self) -> String {
        format!("[ {} ]", self.label)
    }
}

/// Right-aligned row of buttons
#[derive(Debug, Clone, Default)]
pub struct ModalActions {
    buttons: Vec<ModalButton>,
}

impl ModalActions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn button(mut self, button: ModalButton) -> Self {
        self.buttons.push(button);
        self
    }

    pub fn buttons(&self) -> &[ModalButton] {
        &self.buttons
    }

    /// Button row plus bottom padding; zero when empty
    pub fn height(&self) -> u16 {
        if self.buttons.is_empty() {
            0
        } else {
            2
        }
    }
}

impl Widget for &ModalActions {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.height == 0 || self.buttons.is_empty() {
            return;
        }

        let texts: Vec<String> = self.buttons.iter().map(ModalButton::text).collect();
        let total: usize = texts.iter().map(|t| Span::raw(t.as_str()).width()).sum::<usize>()
            + texts.len().saturating_sub(1);

        let mut x = area
            .right()
            .saturating_sub(u16::try_from(total).unwrap_or(u16::MAX).saturating_add(1))
            .max(area.x);

        for (button, text) in self.buttons.iter().zip(&texts) {
            let style = if button.primary {
                Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD)
            } else {
                Style::default()
            };
            let (next_x, _) = buf.set_stringn(
                x,
                area.y,
                text,
                area.right().saturating_sub(x) as usize,
                style,
            );
            x = next_x.saturating_add(1);
            if x >= area.right() {
                break;
            }
        }
    }
}

/// Overlay content declared in the view tree and painted through the
/// nearest portal
#[derive(Debug)]
pub struct Modal {
    header: Option<ModalHeader>,
    body: ModalBody,
    actions: Option<ModalActions>,
    width: u16,
    scroll: u16,
    reveal: Option<u16>,
    layer: i32,
}

impl Modal {
    pub fn new(body: ModalBody) -> Self {
        Self {
            header: None,
            body,
            actions: None,
            width: DEFAULT_WIDTH,
            scroll: 0,
            reveal: None,
            layer: 0,
        }
    }

    pub fn header(mut self, header: ModalHeader) -> Self {
        self.header = Some(header);
        self
    }

    pub fn actions(mut self, actions: ModalActions) -> Self {
        self.actions = Some(actions);
        self
    }

    /// Preferred dialog width in columns
    pub fn width(mut self, width: u16) -> Self {
        self.width = width;
        self
    }

    /// Rows scrolled past when the content overflows
    pub fn scroll(mut self, offset: u16) -> Self {
        self.scroll = offset;
        self
    }

    /// Keeps body line `line` inside the visible window when scrolled
    pub fn reveal(mut self, line: u16) -> Self {
        self.reveal = Some(line);
        self
    }

    /// Stacks this modal `offset` above the default overlay index
    pub fn layer(mut self, offset: i32) -> Self {
        self.layer = offset;
        self
    }

    pub fn z_index(&self) -> i32 {
        OVERLAY_Z_INDEX.saturating_add(self.layer)
    }

    /// Header + body + actions rows
    pub fn content_height(&self) -> u16 {
        let header = self.header.as_ref().map_or(0, |_| ModalHeader::HEIGHT);
        let actions = self.actions.as_ref().map_or(0, ModalActions::height);
        header
            .saturating_add(self.body.height())
            .saturating_add(actions)
    }

    /// Runs the header's close callback, if any
    pub fn close(&self) -> bool {
        self.header.as_ref().is_some_and(ModalHeader::close)
    }

    /// Queues this modal on the nearest portal target.
    ///
    /// Returns `Ok(false)` without rendering while the target has not mounted
    /// yet, and an error outside any provider.
    pub fn render(self, ctx: &Context) -> Result<bool, PortalError> {
        let container = use_modal_container(ctx)?;
        let Some(node) = container.portal_node.as_ref() else {
            return Ok(false);
        };

        let z_index = self.z_index();
        node.push(z_index, move |area, buf| ModalOverlay::new(self).render(area, buf));
        Ok(true)
    }

    fn paint_sections(&self, area: Rect, buf: &mut Buffer) {
        let header_height = self.header.as_ref().map_or(0, |_| ModalHeader::HEIGHT);
        let actions_height = self.actions.as_ref().map_or(0, ModalActions::height);

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(header_height),
                Constraint::Min(0),
                Constraint::Length(actions_height),
            ])
            .split(area);

        if let Some(header) = &self.header {
            header.render(chunks[0], buf);
        }
        self.body.render(chunks[1], buf);
        if let Some(actions) = &self.actions {
            actions.render(chunks[2], buf);
        }
    }

    /// First content row shown in a window `height` rows tall
    fn visible_offset(&self, height: u16) -> u16 {
        let Some(line) = self.reveal else {
            return self.scroll;
        };

        let header = self.header.as_ref().map_or(0, |_| ModalHeader::HEIGHT);
        let padding = if self.body.padded { 1 } else { 0 };
        let row = header.saturating_add(padding).saturating_add(line);

        if row < self.scroll {
            row
        } else if row >= self.scroll.saturating_add(height) {
            row - height.saturating_sub(1)
        } else {
            self.scroll
        }
    }

    fn paint_content(&self, area: Rect, buf: &mut Buffer) {
        let content_height = self.content_height();
        if content_height <= area.height {
            self.paint_sections(area, buf);
            return;
        }

        // Overflow: paint off-screen at full height, copy the visible window
        let mut scratch = Buffer::empty(Rect::new(0, 0, area.width, content_height));
        self.paint_sections(scratch.area, &mut scratch);

        let offset = self
            .visible_offset(area.height)
            .min(content_height - area.height);
        for row in 0..area.height {
            for col in 0..area.width {
                let source = scratch.cell((col, row + offset)).cloned();
                if let (Some(source), Some(target)) =
                    (source, buf.cell_mut((area.x + col, area.y + row)))
                {
                    *target = source;
                }
            }
        }
    }
}

/// Full-area dimmed backdrop with the modal dialog centered on top
#[derive(Debug)]
pub struct ModalOverlay {
    modal: Modal,
}

impl ModalOverlay {
    pub fn new(modal: Modal) -> Self {
        Self { modal }
    }

    fn dialog_area(&self, area: Rect) -> Rect {
        let width = self.modal.width.min(area.width.saturating_sub(2));
        let height = self
            .modal
            .content_height()
            .saturating_add(2)
            .min(area.height.saturating_sub(2));

        Rect {
            x: area.x + (area.width - width) / 2,
            y: area.y + (area.height - height) / 2,
            width,
            height,
        }
    }
}

impl Widget for ModalOverlay {
    fn render(self, area: Rect, buf: &mut Buffer) {
        // Dims what is underneath without erasing it
        buf.set_style(
            area,
            Style::default().fg(Color::DarkGray).add_modifier(Modifier::DIM),
        );

        let dialog = self.dialog_area(area);
        if dialog.width < 3 || dialog.height < 3 {
            return;
        }

        Clear.render(dialog, buf);
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Gray));
        let inner = block.inner(dialog);
        block.render(dialog, buf);

        self.modal.paint_content(inner, buf);
    }
}
