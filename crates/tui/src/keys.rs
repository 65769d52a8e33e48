//! Key conversion from crossterm to calculator tokens.

use calc_core::Key;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// Convert a crossterm KeyEvent to a calculator Key.
///
/// Digits and `+ - * / . =` go through [`Key::from_glyph`]; Enter evaluates,
/// Backspace deletes, Delete clears everything, `c` clears the current input
/// and `h` toggles the history list. Anything else (including keys held with
/// Ctrl or Alt) is ignored.
pub fn convert_key(event: KeyEvent) -> Option<Key> {
    if event
        .modifiers
        .intersects(KeyModifiers::CONTROL | KeyModifiers::ALT)
    {
        return None;
    }

    match event.code {
        KeyCode::Enter => Some(Key::Evaluate),
        KeyCode::Backspace => Some(Key::Delete),
        KeyCode::Delete => Some(Key::AllClear),
        KeyCode::Char('c') => Some(Key::Clear),
        KeyCode::Char('h') => Some(Key::ToggleHistory),
        KeyCode::Char(c) if c.is_ascii() => Key::from_glyph(c),
        _ => None,
    }
}
