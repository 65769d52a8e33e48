//! UI components for the calculator
//!
//! These modules handle rendering of the display, keypad and history list.

pub mod display;
pub mod history_pane;
pub mod keypad;
pub mod layout;
