//! Key tokens
//!
//! The single vocabulary shared by the keypad, the keyboard mapping and the
//! reducer. One token per event.

/// The four arithmetic operators on the keypad
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operator {
    Add,
    Subtract,
    Multiply,
    Divide,
}

impl Operator {
    /// Glyph written into the input buffer and shown on the keypad
    pub fn glyph(self) -> char {
        match self {
            Operator::Add => '+',
            Operator::Subtract => '−',
            Operator::Multiply => '×',
            Operator::Divide => '÷',
        }
    }

    /// Recognize an operator from its display glyph or its ASCII form
    pub fn from_char(c: char) -> Option<Self> {
        match c {
            '+' => Some(Operator::Add),
            '-' | '−' => Some(Operator::Subtract),
            '*' | '×' => Some(Operator::Multiply),
            '/' | '÷' => Some(Operator::Divide),
            _ => None,
        }
    }

    /// Binding power: multiply/divide bind tighter than add/subtract
    pub fn precedence(self) -> u8 {
        match self {
            Operator::Add | Operator::Subtract => 1,
            Operator::Multiply | Operator::Divide => 2,
        }
    }

    pub fn apply(self, lhs: f64, rhs: f64) -> f64 {
        match self {
            Operator::Add => lhs + rhs,
            Operator::Subtract => lhs - rhs,
            Operator::Multiply => lhs * rhs,
            Operator::Divide => lhs / rhs,
        }
    }
}

/// A single calculator event
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    /// A digit 0-9
    Digit(u8),
    /// An arithmetic operator
    Op(Operator),
    /// The decimal point
    Decimal,
    /// `=`: evaluate the input buffer
    Evaluate,
    /// `C`: clear the current input and result
    Clear,
    /// `AC`: clear input, result and the whole history
    AllClear,
    /// `DEL`: remove the last input character
    Delete,
    /// Show or hide the history list
    ToggleHistory,
}

const DIGIT_LABELS: [&str; 10] = ["0", "1", "2", "3", "4", "5", "6", "7", "8", "9"];

impl Key {
    /// Digit key, if `d` is a single decimal digit
    pub fn digit(d: u8) -> Option<Self> {
        (d <= 9).then_some(Key::Digit(d))
    }

    /// Map a buffer glyph to its key: digits, operators (display or ASCII
    /// form), `.` and `=`
    pub fn from_glyph(c: char) -> Option<Self> {
        if let Some(d) = c.to_digit(10) {
            return Key::digit(d as u8);
        }
        match c {
            '.' => Some(Key::Decimal),
            '=' => Some(Key::Evaluate),
            _ => Operator::from_char(c).map(Key::Op),
        }
    }

    /// Character appended to the input buffer, for input keys only
    pub fn glyph(self) -> Option<char> {
        match self {
            Key::Digit(d) => char::from_digit(u32::from(d), 10),
            Key::Op(op) => Some(op.glyph()),
            Key::Decimal => Some('.'),
            _ => None,
        }
    }

    /// Keypad label
    pub fn label(self) -> &'static str {
        match self {
            Key::Digit(d) => DIGIT_LABELS.get(usize::from(d)).copied().unwrap_or("?"),
            Key::Op(Operator::Add) => "+",
            Key::Op(Operator::Subtract) => "−",
            Key::Op(Operator::Multiply) => "×",
            Key::Op(Operator::Divide) => "÷",
            Key::Decimal => ".",
            Key::Evaluate => "=",
            Key::Clear => "C",
            Key::AllClear => "AC",
            Key::Delete => "⌫",
            Key::ToggleHistory => "H",
        }
    }
}
