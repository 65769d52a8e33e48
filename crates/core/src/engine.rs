//! Calculator engine
//!
//! Owns the current [`CalcState`] and the [`HistoryStore`] it is mirrored to.
//! Front ends call [`Calculator::press`] for every token and render from
//! [`Calculator::state`].

use crate::history::{HistoryStore, SessionStore};
use crate::key::Key;
use crate::state::{CalcState, Effect, Transition};
use tracing::info;

pub struct Calculator<S: SessionStore> {
    state: CalcState,
    history: HistoryStore<S>,
}

impl<S: SessionStore> Calculator<S> {
    /// Start a calculator, restoring any history already in `store`
    pub fn new(store: S) -> Self {
        Self::from_history(HistoryStore::load(store))
    }

    /// Start a calculator whose history lives under a custom store key
    pub fn with_key(store: S, key: impl Into<String>) -> Self {
        Self::from_history(HistoryStore::load_with_key(store, key))
    }

    fn from_history(history: HistoryStore<S>) -> Self {
        info!(entries = history.len(), "calculator ready");
        Self {
            state: CalcState::with_history(history.entries().to_vec()),
            history,
        }
    }

    /// Builder for the initial history visibility
    pub fn history_shown(mut self, visible: bool) -> Self {
        self.state = self.state.history_shown(visible);
        self
    }

    pub fn state(&self) -> &CalcState {
        &self.state
    }

    pub fn store(&self) -> &S {
        self.history.store()
    }

    /// Apply one key and carry out its persistence effect
    pub fn press(&mut self, key: Key) -> &CalcState {
        let Transition { state, effect } = self.state.apply(key);
        match effect {
            Effect::None => {}
            Effect::AppendHistory(entry) => self.history.append(entry),
            Effect::ClearHistory => self.history.clear(),
        }
        self.state = state;
        &self.state
    }

    /// Apply a sequence of keys in order
    pub fn press_all(&mut self, keys: impl IntoIterator<Item = Key>) -> &CalcState {
        for key in keys {
            self.press(key);
        }
        &self.state
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::history::{HISTORY_KEY, HistoryEntry, MemoryStore};
    use crate::key::Operator;

    #[test]
    fn test_press_persists_history() {
        let mut calc = Calculator::new(MemoryStore::new());
        calc.press_all([
            Key::Digit(1),
            Key::Op(Operator::Add),
            Key::Digit(2),
            Key::Evaluate,
        ]);
        assert_eq!(calc.state().display(), "3");
        assert!(matches!(calc.store().get(HISTORY_KEY), Ok(Some(_))));
    }

    #[test]
    fn test_state_and_store_stay_in_step() {
        let mut calc = Calculator::new(MemoryStore::new());
        calc.press_all([Key::Digit(4), Key::Op(Operator::Multiply), Key::Digit(2)]);
        calc.press(Key::Evaluate);
        calc.press_all([Key::Op(Operator::Subtract), Key::Digit(3), Key::Evaluate]);

        let reloaded = HistoryStore::load(calc.store().clone());
        assert_eq!(reloaded.entries(), calc.state().history());
        assert_eq!(
            calc.state().history(),
            &[HistoryEntry::new("4×2", 8.0), HistoryEntry::new("8−3", 5.0)]
        );
    }

    #[test]
    fn test_restores_history_on_start() {
        let mut first = Calculator::new(MemoryStore::new());
        first.press_all([Key::Digit(9), Key::Op(Operator::Divide), Key::Digit(3)]);
        first.press(Key::Evaluate);

        let second = Calculator::new(first.store().clone());
        assert_eq!(second.state().history(), &[HistoryEntry::new("9÷3", 3.0)]);
        assert_eq!(second.state().display(), "0");
    }

    #[test]
    fn test_all_clear_purges_store() {
        let mut calc = Calculator::new(MemoryStore::new());
        calc.press_all([Key::Digit(2), Key::Op(Operator::Add), Key::Digit(2)]);
        calc.press(Key::Evaluate);
        calc.press(Key::AllClear);
        assert!(matches!(calc.store().get(HISTORY_KEY), Ok(None)));
        assert!(calc.state().history().is_empty());
    }

    #[test]
    fn test_history_shown_builder() {
        let calc = Calculator::new(MemoryStore::new()).history_shown(true);
        assert!(calc.state().history_visible());
    }

    #[test]
    fn test_custom_key() {
        let mut calc = Calculator::with_key(MemoryStore::new(), "tab-1");
        calc.press_all([Key::Digit(1), Key::Op(Operator::Add), Key::Digit(1)]);
        calc.press(Key::Evaluate);
        assert!(matches!(calc.store().get("tab-1"), Ok(Some(_))));
        assert!(matches!(calc.store().get(HISTORY_KEY), Ok(None)));
    }
}
