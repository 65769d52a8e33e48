//! TUI Application
//!
//! Main application state and event handling using crossterm.
//! Keyboard and mouse input become calculator keys; everything the screen
//! shows comes from the engine's current state.
//!
//! History is kept in a JSON session file. Unless a session file is
//! configured, a temp file is created and removed when the app exits.

use crate::config::AppConfig;
use crate::keys::convert_key;
use crate::ui::display::DisplayPane;
use crate::ui::history_pane::HistoryPane;
use crate::ui::keypad::{Keypad, hit_test};
use crate::ui::layout::{ComputedLayout, LayoutConfig, StatusContent};
use calc_core::{Calculator, FileStore, Key};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers, MouseButton, MouseEvent, MouseEventKind};
use ratatui::{
    Frame,
    layout::Rect,
    style::{Color, Style},
    text::{Line, Span},
    widgets::Paragraph,
};
use std::cell::Cell;
use tempfile::NamedTempFile;
use tracing::debug;

/// Key hints shown in the status bar
const HINT: &str = "q quit  h history";

/// Main application state
pub struct App {
    /// The calculator and its persisted history
    calculator: Calculator<FileStore>,
    /// Layout configuration
    pub layout_config: LayoutConfig,
    /// Session file shown in the status bar
    pub session_name: String,
    /// Whether the app should quit
    pub should_quit: bool,
    /// Status message (clears after next action)
    pub status_message: Option<String>,
    /// Last key sent to the calculator, highlighted on the keypad
    pub last_key: Option<Key>,
    /// Temp file handle (kept alive to prevent deletion)
    _temp_file: Option<NamedTempFile>,
    /// Areas from the last draw, for mouse hit-testing
    last_layout: Cell<ComputedLayout>,
}

impl App {
    /// Create a new application with a temp session file
    pub fn new() -> Result<Self, String> {
        Self::with_config(AppConfig::default())
    }

    /// Create an application from settings
    pub fn with_config(config: AppConfig) -> Result<Self, String> {
        let (store, session_name, temp_file) = match &config.session_file {
            Some(path) => (FileStore::new(path), path.display().to_string(), None),
            None => {
                let temp_file = NamedTempFile::with_suffix(".json")
                    .map_err(|e| format!("Failed to create session file: {}", e))?;
                let store = FileStore::new(temp_file.path());
                (store, "(session)".to_string(), Some(temp_file))
            }
        };

        let calculator = Calculator::with_key(store, config.history_key.clone())
            .history_shown(config.show_history);

        Ok(Self {
            calculator,
            layout_config: config.layout,
            session_name,
            should_quit: false,
            status_message: None,
            last_key: None,
            _temp_file: temp_file,
            last_layout: Cell::new(ComputedLayout::default()),
        })
    }

    /// The calculator driven by this app
    pub fn calculator(&self) -> &Calculator<FileStore> {
        &self.calculator
    }

    /// Handle a key event
    pub fn handle_key(&mut self, key: KeyEvent) {
        // Clear status message on any key
        self.status_message = None;

        let quit = match key.code {
            KeyCode::Char('c') => key.modifiers.contains(KeyModifiers::CONTROL),
            KeyCode::Char('q') | KeyCode::Esc => true,
            _ => false,
        };
        if quit {
            self.should_quit = true;
            return;
        }

        if let Some(calc_key) = convert_key(key) {
            self.press(calc_key);
        }
    }

    /// Handle a mouse event; a left click on a keypad button presses it
    pub fn handle_mouse(&mut self, mouse: MouseEvent) {
        if mouse.kind != MouseEventKind::Down(MouseButton::Left) {
            return;
        }
        let keypad = self.last_layout.get().keypad;
        if let Some(key) = hit_test(keypad, mouse.column, mouse.row) {
            self.status_message = None;
            self.press(key);
        }
    }

    fn press(&mut self, key: Key) {
        debug!(?key, "key pressed");
        self.last_key = Some(key);
        let state = self.calculator.press(key);

        self.status_message = match key {
            Key::Evaluate if state.is_error() => Some("Cannot evaluate expression.".to_string()),
            Key::AllClear => Some("History cleared.".to_string()),
            Key::ToggleHistory if state.history_visible() => Some("History shown.".to_string()),
            Key::ToggleHistory => Some("History hidden.".to_string()),
            _ => None,
        };
    }

    /// Render the application
    pub fn render(&self, frame: &mut Frame) {
        let state = self.calculator.state();
        let layout = ComputedLayout::compute(
            frame.area(),
            &self.layout_config,
            state.history_visible(),
        );
        self.last_layout.set(layout);

        frame.render_widget(&DisplayPane::new(state), layout.display);

        let keypad = Keypad::new()
            .history_active(state.history_visible())
            .pressed(self.last_key);
        frame.render_widget(&keypad, layout.keypad);

        // Render history pane (if visible)
        if layout.history_visible() {
            frame.render_widget(&HistoryPane::new(state.history()), layout.history);
        }

        self.render_status_bar(frame, layout.status);
    }

    fn render_status_bar(&self, frame: &mut Frame, area: Rect) {
        let mut status = StatusContent::new()
            .session(&self.session_name)
            .history_count(self.calculator.state().history().len())
            .hint(HINT);
        if let Some(msg) = &self.status_message {
            status = status.message(msg);
        }

        let style = Style::default().bg(Color::DarkGray).fg(Color::White);
        let paragraph = Paragraph::new(Line::from(Span::styled(status.format(area.width), style)));
        frame.render_widget(paragraph, area);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use calc_core::{HISTORY_KEY, HistoryEntry, SessionStore};
    use ratatui::{Terminal, backend::TestBackend};

    fn type_keys(app: &mut App, text: &str) {
        for c in text.chars() {
            let code = match c {
                '\n' => KeyCode::Enter,
                '<' => KeyCode::Backspace,
                _ => KeyCode::Char(c),
            };
            app.handle_key(KeyEvent::from(code));
        }
    }

    fn draw(app: &App) -> Result<String, String> {
        let mut terminal =
            Terminal::new(TestBackend::new(80, 24)).map_err(|e| e.to_string())?;
        terminal
            .draw(|frame| app.render(frame))
            .map_err(|e| e.to_string())?;
        Ok(terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|cell| cell.symbol())
            .collect())
    }

    fn click(column: u16, row: u16) -> MouseEvent {
        MouseEvent {
            kind: MouseEventKind::Down(MouseButton::Left),
            column,
            row,
            modifiers: KeyModifiers::NONE,
        }
    }

    #[test]
    fn test_app_creation() -> Result<(), String> {
        let app = App::new()?;
        assert!(!app.should_quit);
        assert_eq!(app.calculator().state().display(), "0");
        assert!(!app.calculator().state().history_visible());
        Ok(())
    }

    #[test]
    fn test_keyboard_calculation() -> Result<(), String> {
        let mut app = App::new()?;
        type_keys(&mut app, "12*3\n");
        assert_eq!(app.calculator().state().display(), "36");
        assert_eq!(
            app.calculator().state().history(),
            &[HistoryEntry::new("12×3", 36.0)]
        );
        Ok(())
    }

    #[test]
    fn test_backspace_deletes() -> Result<(), String> {
        let mut app = App::new()?;
        type_keys(&mut app, "45<");
        assert_eq!(app.calculator().state().display(), "4");
        Ok(())
    }

    #[test]
    fn test_quit_keys() -> Result<(), String> {
        for event in [
            KeyEvent::from(KeyCode::Char('q')),
            KeyEvent::from(KeyCode::Esc),
            KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL),
        ] {
            let mut app = App::new()?;
            app.handle_key(event);
            assert!(app.should_quit);
        }
        Ok(())
    }

    #[test]
    fn test_plain_c_clears_without_quitting() -> Result<(), String> {
        let mut app = App::new()?;
        type_keys(&mut app, "7c");
        assert!(!app.should_quit);
        assert_eq!(app.calculator().state().display(), "0");
        Ok(())
    }

    #[test]
    fn test_status_messages() -> Result<(), String> {
        let mut app = App::new()?;
        type_keys(&mut app, "1/0\n");
        assert_eq!(app.status_message.as_deref(), Some("Cannot evaluate expression."));

        app.handle_key(KeyEvent::from(KeyCode::Delete));
        assert_eq!(app.status_message.as_deref(), Some("History cleared."));

        type_keys(&mut app, "h");
        assert_eq!(app.status_message.as_deref(), Some("History shown."));

        type_keys(&mut app, "5");
        assert_eq!(app.status_message, None);
        Ok(())
    }

    #[test]
    fn test_render() -> Result<(), String> {
        let mut app = App::new()?;
        type_keys(&mut app, "2+3\nh");
        let screen = draw(&app)?;
        assert!(screen.contains("History"));
        assert!(screen.contains("2+3 = 5"));
        assert!(screen.contains("history: 1"));
        Ok(())
    }

    #[test]
    fn test_render_empty_history() -> Result<(), String> {
        let mut app = App::new()?;
        type_keys(&mut app, "h");
        let screen = draw(&app)?;
        assert!(screen.contains("No calculations yet."));
        Ok(())
    }

    #[test]
    fn test_mouse_click_presses_button() -> Result<(), String> {
        let mut app = App::new()?;
        // Clicks are resolved against the last drawn layout
        draw(&app)?;
        let keypad = app.last_layout.get().keypad;
        let buttons = crate::ui::keypad::button_areas(keypad);

        for key in [Key::Digit(6), Key::Op(calc_core::Operator::Multiply), Key::Digit(7), Key::Evaluate] {
            let (rect, _) = buttons
                .iter()
                .find(|(_, k)| *k == key)
                .ok_or_else(|| format!("no button for {:?}", key))?;
            app.handle_mouse(click(rect.x + 1, rect.y + 1));
        }
        assert_eq!(app.calculator().state().display(), "42");
        assert_eq!(app.last_key, Some(Key::Evaluate));
        Ok(())
    }

    #[test]
    fn test_mouse_outside_keypad_ignored() -> Result<(), String> {
        let mut app = App::new()?;
        draw(&app)?;
        // Row 0 is the display
        app.handle_mouse(click(1, 0));
        assert_eq!(app.last_key, None);
        Ok(())
    }

    #[test]
    fn test_session_file_persists() -> Result<(), Box<dyn std::error::Error>> {
        let dir = tempfile::tempdir()?;
        let path = dir.path().join("calc.json");
        let config = AppConfig::new().session_file(&path);

        let mut app = App::with_config(config.clone())?;
        type_keys(&mut app, "9-4\n");
        assert!(app.calculator().store().get(HISTORY_KEY)?.is_some());
        drop(app);

        let app = App::with_config(config)?;
        assert_eq!(
            app.calculator().state().history(),
            &[HistoryEntry::new("9−4", 5.0)]
        );
        assert_eq!(app.session_name, path.display().to_string());
        Ok(())
    }

    #[test]
    fn test_show_history_config() -> Result<(), String> {
        let app = App::with_config(AppConfig::new().show_history(true))?;
        assert!(app.calculator().state().history_visible());
        Ok(())
    }
}
