//! TUI application state and logic

use std::cell::Cell;
use std::rc::Rc;

use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::Frame;

use super::event::{Event, EventHandler};
use super::terminal::Terminal;
use super::views;
use crate::cms::Cms;
use crate::plugin::{FieldDef, Form};
use crate::portal::{Context, ModalHeader, ModalProvider, Rendered};
use crate::reactive::{Callback, Unsubscribe};

/// What the keyboard is driving
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum InputMode {
    #[default]
    Normal,
    /// Choosing a field editor to add to the draft form
    FieldPicker { index: usize },
    ScreenPicker { index: usize },
    /// A screen plugin is open
    Screen(String),
}

/// Application state
pub struct App {
    cms: Cms,
    provider: ModalProvider,

    /// Form being assembled from field plugins
    draft: Form,

    input_mode: InputMode,
    modal_scroll: u16,

    /// Set by state subscriptions; the loop redraws only when set
    dirty: Rc<Cell<bool>>,
    close_requested: Rc<Cell<bool>>,
    close_modal: Callback,
    subscriptions: Vec<Unsubscribe>,

    should_quit: bool,
}

impl App {
    pub fn new(cms: Cms) -> Self {
        let dirty = Rc::new(Cell::new(true));
        let mark_dirty: Callback = {
            let dirty = Rc::clone(&dirty);
            Rc::new(move || dirty.set(true))
        };

        let subscriptions = vec![
            cms.sidebar().subscribe(Rc::clone(&mark_dirty)),
            cms.alerts().subscribe(Rc::clone(&mark_dirty)),
            cms.fields().subscribe(Rc::clone(&mark_dirty)),
            cms.screens().subscribe(mark_dirty),
        ];

        let close_requested = Rc::new(Cell::new(false));
        let close_modal: Callback = {
            let close_requested = Rc::clone(&close_requested);
            Rc::new(move || close_requested.set(true))
        };

        Self {
            cms,
            provider: ModalProvider::new(),
            draft: Form::new("draft", "Untitled"),
            input_mode: InputMode::Normal,
            modal_scroll: 0,
            dirty,
            close_requested,
            close_modal,
            subscriptions,
            should_quit: false,
        }
    }

    /// Run the main application loop
    pub fn run(&mut self, terminal: &mut Terminal, events: &EventHandler) -> Result<()> {
        while !self.should_quit() {
            if self.dirty.replace(false) {
                terminal.draw(|frame| self.draw(frame))?;
            }

            match events.next()? {
                Event::Key(key) => self.handle_key(key),
                Event::Resize(_, _) => self.dirty.set(true),
                Event::Tick => {}
            }
        }

        for subscription in &self.subscriptions {
            subscription.unsubscribe();
        }

        Ok(())
    }

    fn draw(&self, frame: &mut Frame) {
        let area = frame.area();
        self.render(area, frame.buffer_mut());
    }

    /// Paints one frame; a freshly mounted portal schedules another
    pub fn render(&self, area: Rect, buf: &mut Buffer) -> Rendered<()> {
        let rendered = self
            .provider
            .render(&Context::new(), area, buf, |ctx, area, buf| {
                views::draw(self, ctx, area, buf)
            });

        if rendered.needs_redraw {
            self.dirty.set(true);
        }
        rendered
    }

    pub fn handle_key(&mut self, key: KeyEvent) {
        self.dirty.set(true);

        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            self.should_quit = true;
            return;
        }

        match self.input_mode.clone() {
            InputMode::Normal => self.handle_normal_key(key),
            InputMode::FieldPicker { index } => {
                let count = self.cms.fields().len();
                match key.code {
                    KeyCode::Enter => {
                        if let Some(field) = self.cms.fields().all().get(index) {
                            self.add_field(&field.name);
                        }
                        (self.close_modal)();
                    }
                    code => self.handle_picker_key(code, index, count, |index| {
                        InputMode::FieldPicker { index }
                    }),
                }
            }
            InputMode::ScreenPicker { index } => {
                let count = self.cms.screens().len();
                match key.code {
                    KeyCode::Enter => {
                        if let Some(screen) = self.cms.screens().all().get(index) {
                            self.input_mode = InputMode::Screen(screen.name.clone());
                            self.modal_scroll = 0;
                        }
                    }
                    code => self.handle_picker_key(code, index, count, |index| {
                        InputMode::ScreenPicker { index }
                    }),
                }
            }
            InputMode::Screen(_) => match key.code {
                KeyCode::Esc | KeyCode::Char('q') => self.close_open_modal(),
                KeyCode::Down | KeyCode::Char('j') => {
                    self.modal_scroll = self.modal_scroll.saturating_add(1)
                }
                KeyCode::Up | KeyCode::Char('k') => {
                    self.modal_scroll = self.modal_scroll.saturating_sub(1)
                }
                _ => {}
            },
        }

        if self.close_requested.replace(false) {
            self.input_mode = InputMode::Normal;
            self.modal_scroll = 0;
        }
    }

    fn handle_normal_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Char('q') => self.should_quit = true,
            KeyCode::Char('b') => {
                self.cms.sidebar().toggle();
            }
            KeyCode::Char('a') => self.input_mode = InputMode::FieldPicker { index: 0 },
            KeyCode::Char('s') => {
                if self.cms.screens().is_empty() {
                    self.cms.alerts().info("No screens registered");
                } else {
                    self.input_mode = InputMode::ScreenPicker { index: 0 };
                }
            }
            KeyCode::Char('w') => self.save(),
            KeyCode::Char('r') => self.reset(),
            KeyCode::Char('x') => {
                if let Some(alert) = self.cms.alerts().latest() {
                    self.cms.alerts().dismiss(alert.id);
                }
            }
            _ => {}
        }
    }

    fn handle_picker_key(
        &mut self,
        code: KeyCode,
        index: usize,
        count: usize,
        mode: impl Fn(usize) -> InputMode,
    ) {
        match code {
            KeyCode::Esc => self.close_open_modal(),
            KeyCode::Down | KeyCode::Char('j') if index + 1 < count => {
                self.input_mode = mode(index + 1)
            }
            KeyCode::Up | KeyCode::Char('k') => self.input_mode = mode(index.saturating_sub(1)),
            _ => {}
        }
    }

    /// Presses the open modal's `[x]`
    fn close_open_modal(&self) {
        if let Some(header) = self.modal_header() {
            header.close();
        }
    }

    fn add_field(&mut self, component: &str) {
        let label = self
            .cms
            .fields()
            .find(component)
            .map(|field| field.label.clone());
        let name = format!("{}_{}", component.replace('-', "_"), self.draft.fields.len() + 1);

        let mut def = FieldDef::new(name, component);
        def.label = label;
        self.draft.fields.push(def);
    }

    fn save(&mut self) {
        let fields = self.cms.fields();
        self.draft.values = self.draft.initial_values(&fields);

        let errors = self.draft.validate(&fields);
        if errors.is_empty() {
            self.cms.alerts().success(format!(
                "{}: {} ({} fields)",
                self.cms.sidebar().buttons().save,
                self.draft.label,
                self.draft.fields.len()
            ));
        } else {
            let detail: Vec<_> = errors
                .iter()
                .map(|e| format!("{}: {}", e.field, e.message))
                .collect();
            self.cms.alerts().error(detail.join("; "));
        }
    }

    fn reset(&mut self) {
        self.draft.fields.clear();
        self.draft.values.clear();
        self.cms.alerts().info(format!(
            "{}: {}",
            self.cms.sidebar().buttons().reset,
            self.draft.label
        ));
    }

    pub fn cms(&self) -> &Cms {
        &self.cms
    }

    pub fn draft(&self) -> &Form {
        &self.draft
    }

    pub fn input_mode(&self) -> &InputMode {
        &self.input_mode
    }

    pub fn modal_scroll(&self) -> u16 {
        self.modal_scroll
    }

    /// Header of the modal for the current input mode, wired to close it
    pub fn modal_header(&self) -> Option<ModalHeader> {
        let title = match &self.input_mode {
            InputMode::Normal => return None,
            InputMode::FieldPicker { .. } => "Add Field".to_string(),
            InputMode::ScreenPicker { .. } => "Screens".to_string(),
            InputMode::Screen(name) => name.clone(),
        };
        Some(ModalHeader::new(title).on_close(Rc::clone(&self.close_modal)))
    }

    pub fn should_quit(&self) -> bool {
        self.should_quit
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cms::CmsConfig;
    use crate::plugin::{ScreenLayout, ScreenPlugin};
    use crate::state::AlertLevel;

    fn shell() -> App {
        App::new(Cms::new(CmsConfig::default()).unwrap())
    }

    fn press(app: &mut App, code: KeyCode) {
        app.handle_key(KeyEvent::new(code, KeyModifiers::NONE));
    }

    fn screen_text(app: &App, area: Rect) -> String {
        let mut buf = Buffer::empty(area);
        app.render(area, &mut buf);
        (area.y..area.bottom())
            .map(|y| {
                (area.x..area.right())
                    .map(|x| buf[(x, y)].symbol().to_string())
                    .collect::<String>()
            })
            .collect::<Vec<_>>()
            .join("\n")
    }

    #[test]
    fn sidebar_toggle_marks_dirty() {
        let app = shell();
        app.dirty.set(false);

        app.cms().sidebar().toggle();

        assert!(app.dirty.get());
    }

    #[test]
    fn first_frame_requests_redraw() {
        let app = shell();
        let area = Rect::new(0, 0, 80, 24);
        let mut buf = Buffer::empty(area);

        assert!(app.render(area, &mut buf).needs_redraw);
        assert!(!app.render(area, &mut buf).needs_redraw);
    }

    #[test]
    fn field_picker_opens_as_modal() {
        let mut app = shell();
        let area = Rect::new(0, 0, 80, 24);
        screen_text(&app, area);

        press(&mut app, KeyCode::Char('a'));

        assert_eq!(app.input_mode(), &InputMode::FieldPicker { index: 0 });
        assert!(screen_text(&app, area).contains("Add Field"));
    }

    #[test]
    fn picking_a_field_adds_it_to_the_draft() {
        let mut app = shell();
        press(&mut app, KeyCode::Char('a'));
        press(&mut app, KeyCode::Down);
        press(&mut app, KeyCode::Enter);

        assert_eq!(app.input_mode(), &InputMode::Normal);
        assert_eq!(app.draft().fields.len(), 1);
        assert_eq!(app.draft().fields[0].component, "textarea");
    }

    #[test]
    fn escape_closes_through_header_callback() {
        let mut app = shell();
        assert!(app.modal_header().is_none());

        press(&mut app, KeyCode::Char('a'));
        let header = app.modal_header().unwrap();
        assert_eq!(header.title(), "Add Field");
        assert!(header.has_close());

        press(&mut app, KeyCode::Esc);

        assert_eq!(app.input_mode(), &InputMode::Normal);
        assert!(app.draft().fields.is_empty());
    }

    #[test]
    fn picker_selection_visible_in_short_terminal() {
        let mut app = shell();
        let area = Rect::new(0, 0, 80, 12);
        screen_text(&app, area);

        press(&mut app, KeyCode::Char('a'));
        for _ in 0..12 {
            press(&mut app, KeyCode::Down);
        }
        assert_eq!(app.input_mode(), &InputMode::FieldPicker { index: 12 });

        let selected = app.cms().fields().all()[12].label.clone();
        assert!(screen_text(&app, area).contains(&selected));
    }

    #[test]
    fn screens_without_plugins_alert() {
        let mut app = shell();
        press(&mut app, KeyCode::Char('s'));

        assert_eq!(app.input_mode(), &InputMode::Normal);
        assert_eq!(app.cms().alerts().latest().unwrap().level, AlertLevel::Info);
    }

    #[test]
    fn screen_plugin_opens() {
        let mut app = shell();
        app.cms()
            .plugins()
            .add(ScreenPlugin::new("Settings", ScreenLayout::Popup).with_description("Site settings"))
            .unwrap();

        press(&mut app, KeyCode::Char('s'));
        press(&mut app, KeyCode::Enter);
        assert_eq!(app.input_mode(), &InputMode::Screen("Settings".to_string()));

        let area = Rect::new(0, 0, 80, 24);
        screen_text(&app, area);
        assert!(screen_text(&app, area).contains("Site settings"));
    }

    #[test]
    fn save_and_reset_raise_alerts() {
        let mut app = shell();
        press(&mut app, KeyCode::Char('a'));
        press(&mut app, KeyCode::Enter);

        press(&mut app, KeyCode::Char('w'));
        let saved = app.cms().alerts().latest().unwrap();
        assert_eq!(saved.level, AlertLevel::Success);
        assert!(saved.message.starts_with("Save:"));

        press(&mut app, KeyCode::Char('r'));
        assert!(app.draft().fields.is_empty());
        assert!(app.cms().alerts().latest().unwrap().message.starts_with("Reset:"));

        press(&mut app, KeyCode::Char('x'));
        assert_eq!(app.cms().alerts().len(), 1);
    }

    #[test]
    fn quit_keys() {
        let mut app = shell();
        press(&mut app, KeyCode::Char('q'));
        assert!(app.should_quit());

        let mut app = shell();
        app.handle_key(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL));
        assert!(app.should_quit());
    }
}
