//! Keypad Widget
//!
//! A 5x4 grid of buttons. Each button knows the key token it sends, so the
//! same grid drives both rendering and mouse hit-testing.

use calc_core::{Key, Operator};
use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Widget},
};

/// Button rows, top to bottom
pub const ROWS: [[Key; 4]; 5] = [
    [
        Key::Digit(7),
        Key::Digit(8),
        Key::Digit(9),
        Key::Op(Operator::Divide),
    ],
    [
        Key::Digit(4),
        Key::Digit(5),
        Key::Digit(6),
        Key::Op(Operator::Multiply),
    ],
    [
        Key::Digit(1),
        Key::Digit(2),
        Key::Digit(3),
        Key::Op(Operator::Subtract),
    ],
    [
        Key::Decimal,
        Key::Digit(0),
        Key::Evaluate,
        Key::Op(Operator::Add),
    ],
    [Key::Clear, Key::AllClear, Key::Delete, Key::ToggleHistory],
];

/// Screen area of every button within the keypad area
pub fn button_areas(area: Rect) -> Vec<(Rect, Key)> {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Ratio(1, 5); 5])
        .split(area);

    let mut buttons = Vec::with_capacity(20);
    for (row_area, keys) in rows.iter().zip(ROWS.iter()) {
        let cells = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Ratio(1, 4); 4])
            .split(*row_area);
        for (cell, key) in cells.iter().zip(keys.iter()) {
            buttons.push((*cell, *key));
        }
    }
    buttons
}

/// The button under a screen position, if any
pub fn hit_test(area: Rect, column: u16, row: u16) -> Option<Key> {
    button_areas(area)
        .into_iter()
        .find(|(rect, _)| {
            column >= rect.x && column < rect.right() && row >= rect.y && row < rect.bottom()
        })
        .map(|(_, key)| key)
}

/// The keypad widget
#[derive(Debug, Clone, Default)]
pub struct Keypad {
    /// Whether the history list is open (lights the history button)
    history_active: bool,
    /// Most recently pressed key, shown highlighted
    pressed: Option<Key>,
}

impl Keypad {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn history_active(mut self, active: bool) -> Self {
        self.history_active = active;
        self
    }

    pub fn pressed(mut self, key: Option<Key>) -> Self {
        self.pressed = key;
        self
    }

    fn key_style(&self, key: Key) -> Style {
        let base = match key {
            Key::Digit(_) | Key::Decimal => Style::default().fg(Color::White),
            Key::Op(_) => Style::default().fg(Color::Yellow),
            Key::Evaluate => Style::default().fg(Color::Green),
            Key::Clear | Key::AllClear | Key::Delete => Style::default().fg(Color::Red),
            Key::ToggleHistory if self.history_active => Style::default().fg(Color::Cyan),
            Key::ToggleHistory => Style::default().fg(Color::DarkGray),
        };
        if self.pressed == Some(key) {
            base.add_modifier(Modifier::REVERSED | Modifier::BOLD)
        } else {
            base.add_modifier(Modifier::BOLD)
        }
    }
}

impl Widget for &Keypad {
    fn render(self, area: Rect, buf: &mut Buffer) {
        for (rect, key) in button_areas(area) {
            if rect.width == 0 || rect.height == 0 {
                continue;
            }
            let style = self.key_style(key);
            let block = Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::DarkGray));
            let inner = block.inner(rect);
            block.render(rect, buf);

            if inner.height == 0 {
                continue;
            }
            // Label on the middle line of the button
            let label_area = Rect::new(inner.x, inner.y + inner.height / 2, inner.width, 1);
            Paragraph::new(Line::from(Span::styled(key.label(), style)))
                .alignment(Alignment::Center)
                .render(label_area, buf);
        }
    }
}
