//! Calc Core: the engine behind the keypad calculator
//!
//! Everything a front end needs to drive the calculator without a rendering
//! surface. Front ends send [`Key`] tokens and render from [`CalcState`].
//!
//! Key design principles:
//! - CalcState: one value holding input buffer, result, history and the
//!   history-visible flag, replaced wholesale by every key press
//! - Reducer: `CalcState::apply` is pure; persistence is returned as an
//!   [`Effect`] and carried out by [`Calculator`]
//! - Evaluator: a restricted arithmetic parser, never a general evaluator
//!
//! # Modules
//!
//! - `key`: Key tokens and operator glyphs
//! - `expr`: Arithmetic lexer, recursive-descent parser and evaluator
//! - `format`: Numeral formatting for results
//! - `state`: Calculator state and the reducer
//! - `history`: History entries, session stores and the history store
//! - `engine`: Calculator engine tying state to a session store
//! - `error`: Evaluation and storage errors

pub mod engine;
pub mod error;
pub mod expr;
pub mod format;
pub mod history;
pub mod key;
pub mod state;

pub use engine::Calculator;
pub use error::{EvalError, StoreError};
pub use expr::{Evaluation, evaluate};
pub use format::format_number;
pub use history::{
    FileStore, HISTORY_KEY, HistoryEntry, HistoryStore, MemoryStore, SessionStore,
};
pub use key::{Key, Operator};
pub use state::{CalcState, Effect, Outcome, Transition};
