//! Display Widget
//!
//! Renders the calculator's display string, right aligned like a pocket
//! calculator. When the text is wider than the pane the leading characters
//! are cut so the most recent input stays visible.

use calc_core::CalcState;
use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Widget},
};

/// The display pane widget
pub struct DisplayPane<'a> {
    state: &'a CalcState,
}

impl<'a> DisplayPane<'a> {
    pub fn new(state: &'a CalcState) -> Self {
        Self { state }
    }

    /// The text that fits in `width` columns, keeping the tail
    fn visible_text(&self, width: usize) -> String {
        let text = self.state.display();
        let len = text.chars().count();
        if len <= width {
            text
        } else {
            text.chars().skip(len - width).collect()
        }
    }
}

impl Widget for &DisplayPane<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::DarkGray));
        let inner_width = block.inner(area).width as usize;

        let style = if self.state.is_error() {
            Style::default().fg(Color::Red).add_modifier(Modifier::BOLD)
        } else if self.state.result().is_some() {
            Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::White)
        };

        let line = Line::from(Span::styled(self.visible_text(inner_width), style));
        Paragraph::new(line)
            .alignment(Alignment::Right)
            .block(block)
            .render(area, buf);
    }
}
