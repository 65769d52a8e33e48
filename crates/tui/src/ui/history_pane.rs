//! History Pane Widget
//!
//! Lists completed calculations oldest first as `expression = result`,
//! scrolled so the newest entry stays in view.

use calc_core::HistoryEntry;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Widget},
};

/// Shown when the session has no calculations
pub const EMPTY_MESSAGE: &str = "No calculations yet.";

/// The history pane widget
pub struct HistoryPane<'a> {
    entries: &'a [HistoryEntry],
}

impl<'a> HistoryPane<'a> {
    pub fn new(entries: &'a [HistoryEntry]) -> Self {
        Self { entries }
    }

    fn build_lines(&self) -> Vec<Line<'a>> {
        if self.entries.is_empty() {
            return vec![Line::from(Span::styled(
                EMPTY_MESSAGE,
                Style::default()
                    .fg(Color::DarkGray)
                    .add_modifier(Modifier::ITALIC),
            ))];
        }

        self.entries
            .iter()
            .map(|entry| {
                Line::from(vec![
                    Span::styled(entry.expression.clone(), Style::default().fg(Color::White)),
                    Span::styled(" = ", Style::default().fg(Color::DarkGray)),
                    Span::styled(
                        entry.result_text(),
                        Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
                    ),
                ])
            })
            .collect()
    }
}

impl Widget for &HistoryPane<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let block = Block::default()
            .title(" History ")
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::DarkGray));

        let inner = block.inner(area);
        block.render(area, buf);

        let lines = self.build_lines();

        // Keep the newest entry visible
        let scroll = u16::try_from(lines.len())
            .unwrap_or(u16::MAX)
            .saturating_sub(inner.height);

        Paragraph::new(lines).scroll((scroll, 0)).render(inner, buf);
    }
}
