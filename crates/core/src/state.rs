//! Calculator state and the reducer
//!
//! [`CalcState`] is a plain value. [`CalcState::apply`] never mutates it: each
//! key press produces a new state plus an [`Effect`] describing what must
//! happen to the persisted history. That keeps every transition testable
//! without a store or a screen.

use crate::expr::{self, Evaluation};
use crate::format::format_number;
use crate::history::HistoryEntry;
use crate::key::Key;
use tracing::debug;

/// The text shown on the display in place of the input
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Outcome {
    Value(f64),
    Error,
}

impl Outcome {
    pub fn text(&self) -> String {
        match self {
            Outcome::Value(v) => format_number(*v),
            Outcome::Error => "Error".to_string(),
        }
    }

    pub fn is_error(&self) -> bool {
        matches!(self, Outcome::Error)
    }
}

/// Persistence work requested by a transition
#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    None,
    /// A calculation completed and must be appended to the stored history
    AppendHistory(HistoryEntry),
    /// History was wiped and the stored copy must be removed
    ClearHistory,
}

/// Result of applying one key
#[derive(Debug, Clone, PartialEq)]
pub struct Transition {
    pub state: CalcState,
    pub effect: Effect,
}

impl Transition {
    fn pure(state: CalcState) -> Self {
        Self {
            state,
            effect: Effect::None,
        }
    }
}

/// Everything the calculator knows
#[derive(Debug, Clone, PartialEq, Default)]
pub struct CalcState {
    /// The expression being typed
    input: String,
    /// Last evaluation, shown until new input begins
    result: Option<Outcome>,
    /// Completed calculations, oldest first
    history: Vec<HistoryEntry>,
    /// Whether the history list is shown
    history_visible: bool,
}

impl CalcState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a session with previously stored history
    pub fn with_history(history: Vec<HistoryEntry>) -> Self {
        Self {
            history,
            ..Self::default()
        }
    }

    /// Builder for the initial history visibility
    pub fn history_shown(mut self, visible: bool) -> Self {
        self.history_visible = visible;
        self
    }

    pub fn input(&self) -> &str {
        &self.input
    }

    pub fn result(&self) -> Option<Outcome> {
        self.result
    }

    pub fn history(&self) -> &[HistoryEntry] {
        &self.history
    }

    pub fn history_visible(&self) -> bool {
        self.history_visible
    }

    /// The display text: the result if one is showing, otherwise the input,
    /// otherwise `0`
    pub fn display(&self) -> String {
        match self.result {
            Some(outcome) => outcome.text(),
            None if self.input.is_empty() => "0".to_string(),
            None => self.input.clone(),
        }
    }

    /// Whether the display currently shows an error
    pub fn is_error(&self) -> bool {
        self.result.is_some_and(|r| r.is_error())
    }

    /// Apply one key press
    pub fn apply(&self, key: Key) -> Transition {
        let transition = match key {
            Key::Digit(_) | Key::Op(_) | Key::Decimal => self.push_input(key),
            Key::Evaluate => self.evaluate(),
            Key::Clear => Transition::pure(Self {
                input: String::new(),
                result: None,
                ..self.clone()
            }),
            Key::AllClear => Transition {
                state: Self {
                    input: String::new(),
                    result: None,
                    history: Vec::new(),
                    history_visible: self.history_visible,
                },
                effect: Effect::ClearHistory,
            },
            Key::Delete => {
                let mut input = self.input.clone();
                input.pop();
                Transition::pure(Self {
                    input,
                    result: None,
                    ..self.clone()
                })
            }
            Key::ToggleHistory => Transition::pure(Self {
                history_visible: !self.history_visible,
                ..self.clone()
            }),
        };
        debug!(
            ?key,
            input = %transition.state.input,
            display = %transition.state.display(),
            "key applied"
        );
        transition
    }

    fn push_input(&self, key: Key) -> Transition {
        let Some(glyph) = key.glyph() else {
            return Transition::pure(self.clone());
        };

        if key == Key::Decimal && self.trailing_numeral().contains('.') {
            return Transition::pure(self.clone());
        }

        let mut input = self.input.clone();
        input.push(glyph);
        Transition::pure(Self {
            input,
            result: None,
            ..self.clone()
        })
    }

    /// The numeric run at the end of the input: everything after the last
    /// character that is neither a digit nor a decimal point
    fn trailing_numeral(&self) -> &str {
        let start = self
            .input
            .char_indices()
            .rev()
            .find(|(_, c)| !(c.is_ascii_digit() || *c == '.'))
            .map_or(0, |(i, c)| i + c.len_utf8());
        &self.input[start..]
    }

    fn evaluate(&self) -> Transition {
        // A standing result means nothing new was typed since the last "="
        if self.result.is_some() {
            return Transition::pure(self.clone());
        }

        match expr::evaluate(&self.input) {
            Ok(Evaluation::Empty) => Transition::pure(Self {
                input: "0".to_string(),
                result: Some(Outcome::Value(0.0)),
                ..self.clone()
            }),
            Ok(Evaluation::Value(value)) => {
                let entry = HistoryEntry::new(self.input.clone(), value);
                let mut history = self.history.clone();
                history.push(entry.clone());
                Transition {
                    state: Self {
                        input: format_number(value),
                        result: Some(Outcome::Value(value)),
                        history,
                        history_visible: self.history_visible,
                    },
                    effect: Effect::AppendHistory(entry),
                }
            }
            Err(e) => {
                debug!(input = %self.input, error = %e, "evaluation failed");
                Transition::pure(Self {
                    input: String::new(),
                    result: Some(Outcome::Error),
                    ..self.clone()
                })
            }
        }
    }
}
