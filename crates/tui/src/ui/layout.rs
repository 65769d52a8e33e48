//! Layout Manager
//!
//! Manages the pane layout for the calculator.
//! The calculator column (display above keypad) sits on the left; the history
//! pane, when shown, takes the right side. A status bar runs along the bottom.

use ratatui::layout::{Constraint, Direction, Layout, Rect};
use serde::Deserialize;

/// Layout configuration
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LayoutConfig {
    /// Height of the display, borders included
    pub display_height: u16,
    /// Percentage of width for the history pane (0-100)
    pub history_width_percent: u16,
    /// Minimum width for each pane
    pub min_pane_width: u16,
    /// Height reserved for status bar
    pub status_bar_height: u16,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            display_height: 3,
            history_width_percent: 40,
            min_pane_width: 20,
            status_bar_height: 1,
        }
    }
}

impl LayoutConfig {
    /// Create a new layout config
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the history pane width percentage
    pub fn history_width(mut self, percent: u16) -> Self {
        self.history_width_percent = percent.clamp(10, 90);
        self
    }

    /// Set the display height (at least one line inside the border)
    pub fn display(mut self, height: u16) -> Self {
        self.display_height = height.max(3);
        self
    }

    /// Clamp values read from a config file into their usable ranges
    pub fn normalized(self) -> Self {
        let (percent, height) = (self.history_width_percent, self.display_height);
        self.history_width(percent).display(height)
    }
}

/// The computed layout areas
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ComputedLayout {
    /// Area for the display
    pub display: Rect,
    /// Area for the keypad
    pub keypad: Rect,
    /// Area for the history pane
    pub history: Rect,
    /// Area for the status bar
    pub status: Rect,
}

impl ComputedLayout {
    /// Compute the layout for a given terminal area
    pub fn compute(area: Rect, config: &LayoutConfig, show_history: bool) -> Self {
        // First split: main content vs status bar
        let vertical_chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Min(0),
                Constraint::Length(config.status_bar_height),
            ])
            .split(area);

        let main_area = vertical_chunks[0];
        let status_area = vertical_chunks[1];

        // Check if we have enough width for split view
        let min_split_width = config.min_pane_width * 2;
        let percent = config.history_width_percent.min(100);

        let (calc_area, history_area) = if show_history && main_area.width >= min_split_width {
            let horizontal_chunks = Layout::default()
                .direction(Direction::Horizontal)
                .constraints([
                    Constraint::Percentage(100 - percent),
                    Constraint::Percentage(percent),
                ])
                .split(main_area);

            (horizontal_chunks[0], horizontal_chunks[1])
        } else {
            // Hidden, or too narrow - calculator gets everything
            (main_area, Rect::default())
        };

        let calc_chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(config.display_height),
                Constraint::Min(0),
            ])
            .split(calc_area);

        Self {
            display: calc_chunks[0],
            keypad: calc_chunks[1],
            history: history_area,
            status: status_area,
        }
    }

    /// Check if history pane is visible
    pub fn history_visible(&self) -> bool {
        self.history.width > 0 && self.history.height > 0
    }
}

/// Status bar content
#[derive(Debug, Clone, Default)]
pub struct StatusContent {
    /// Session file name (or temp indicator)
    pub session: String,
    /// Number of history entries
    pub history_count: usize,
    /// Key hints
    pub hint: String,
    /// Any additional status message
    pub message: Option<String>,
}

impl StatusContent {
    /// Create a new status content
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the session name
    pub fn session(mut self, name: impl Into<String>) -> Self {
        self.session = name.into();
        self
    }

    /// Set the history entry count
    pub fn history_count(mut self, count: usize) -> Self {
        self.history_count = count;
        self
    }

    /// Set the key hints
    pub fn hint(mut self, hint: impl Into<String>) -> Self {
        self.hint = hint.into();
        self
    }

    /// Set a status message
    pub fn message(mut self, msg: impl Into<String>) -> Self {
        self.message = Some(msg.into());
        self
    }

    /// Format for display
    pub fn format(&self, width: u16) -> String {
        let left = format!(" {} ", self.session);
        let middle = self.message.clone().unwrap_or_default();
        let right = format!(" {} | history: {} ", self.hint, self.history_count);

        let padding_needed = (width as usize)
            .saturating_sub(left.chars().count())
            .saturating_sub(middle.chars().count())
            .saturating_sub(right.chars().count());

        let left_pad = padding_needed / 2;
        let right_pad = padding_needed - left_pad;

        format!(
            "{}{}{}{}{}",
            left,
            " ".repeat(left_pad),
            middle,
            " ".repeat(right_pad),
            right
        )
    }
}
