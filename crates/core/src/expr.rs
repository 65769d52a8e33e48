//! Arithmetic expression evaluation
//!
//! A restricted evaluator for the calculator's input buffer. It understands
//! numerals, the four operators (in display glyph or ASCII form) and unary
//! sign prefixes, nothing else.
//!
//! Input handling, in order:
//! 1. An empty or all-zero buffer evaluates to [`Evaluation::Empty`]
//! 2. Trailing operators and decimal points are dropped
//! 3. Nothing left: [`Evaluation::Empty`]
//! 4. Numerals are lexed as decimals, so leading zeros never change meaning
//!    (`007` is `7`) and a second decimal point is an error
//! 5. A divide operator directly followed by a zero numeral is an error
//! 6. Precedence climbing: `× ÷` over `+ −`, left associative

use crate::error::EvalError;
use crate::key::Operator;
use std::ops::Range;

/// What a successful evaluation produced
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Evaluation {
    /// Nothing worth evaluating (empty, all zeros, or only operators).
    /// Shown as `0` and never recorded in history.
    Empty,
    /// A finite numeric result
    Value(f64),
}

/// Lexical token kinds
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TokenKind {
    Number(f64),
    Op(Operator),
}

/// A token with its character span in the source
#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    pub kind: TokenKind,
    pub span: Range<usize>,
    pub text: String,
}

impl Token {
    fn new(kind: TokenKind, start: usize, end: usize, text: impl Into<String>) -> Self {
        Self {
            kind,
            span: start..end,
            text: text.into(),
        }
    }
}

fn is_trailing_junk(c: char) -> bool {
    c == '.' || Operator::from_char(c).is_some()
}

/// Evaluate a calculator input buffer
pub fn evaluate(input: &str) -> Result<Evaluation, EvalError> {
    if input.chars().all(|c| c == '0') {
        return Ok(Evaluation::Empty);
    }

    let expr = input.trim_end().trim_end_matches(is_trailing_junk);
    if expr.trim().is_empty() {
        return Ok(Evaluation::Empty);
    }

    let tokens = tokenize(expr)?;
    let value = Parser::new(&tokens, expr.chars().count()).parse()?;
    if !value.is_finite() {
        return Err(EvalError::NonFinite);
    }

    // -0 only arises from sign games like "−0"; it is still zero
    Ok(Evaluation::Value(if value == 0.0 { 0.0 } else { value }))
}

/// Split an expression into numerals and operators
pub fn tokenize(source: &str) -> Result<Vec<Token>, EvalError> {
    let mut tokens = Vec::new();
    let chars: Vec<char> = source.chars().collect();
    let mut pos = 0;

    while pos < chars.len() {
        let start = pos;
        let ch = chars[pos];

        if ch.is_whitespace() {
            pos += 1;
            continue;
        }

        if let Some(op) = Operator::from_char(ch) {
            pos += 1;
            tokens.push(Token::new(TokenKind::Op(op), start, pos, ch.to_string()));
            continue;
        }

        // Numerals: a run of digits and decimal points
        if ch.is_ascii_digit() || ch == '.' {
            while pos < chars.len() && (chars[pos].is_ascii_digit() || chars[pos] == '.') {
                pos += 1;
            }
            let text: String = chars[start..pos].iter().collect();

            if text.matches('.').count() > 1 {
                return Err(EvalError::InvalidDecimal {
                    numeral: text,
                    position: start,
                });
            }
            let value = parse_numeral(&text)
                .ok_or_else(|| EvalError::syntax(start, "decimal point without digits"))?;
            tokens.push(Token::new(TokenKind::Number(value), start, pos, text));
            continue;
        }

        return Err(EvalError::syntax(start, format!("unexpected character '{ch}'")));
    }

    // "++" and "--" read as increment/decrement, which is never valid here
    for pair in tokens.windows(2) {
        if let [a, b] = pair
            && a.span.end == b.span.start
            && matches!(
                (a.kind, b.kind),
                (
                    TokenKind::Op(Operator::Add),
                    TokenKind::Op(Operator::Add)
                ) | (
                    TokenKind::Op(Operator::Subtract),
                    TokenKind::Op(Operator::Subtract)
                )
            )
        {
            return Err(EvalError::syntax(
                a.span.start,
                format!("'{}{}' is not an operator", a.text, b.text),
            ));
        }
    }

    Ok(tokens)
}

/// Parse a numeral with at most one decimal point. `.5` and `5.` are
/// accepted; a bare `.` is not.
fn parse_numeral(text: &str) -> Option<f64> {
    if !text.chars().any(|c| c.is_ascii_digit()) {
        return None;
    }
    let mut normalized = String::with_capacity(text.len() + 1);
    if text.starts_with('.') {
        normalized.push('0');
    }
    normalized.push_str(text.strip_suffix('.').unwrap_or(text));
    normalized.parse().ok()
}

/// Precedence-climbing parser that evaluates as it goes
struct Parser<'a> {
    tokens: &'a [Token],
    pos: usize,
    /// Source length, for errors at end of input
    end: usize,
}

impl<'a> Parser<'a> {
    fn new(tokens: &'a [Token], end: usize) -> Self {
        Parser {
            tokens,
            pos: 0,
            end,
        }
    }

    fn parse(mut self) -> Result<f64, EvalError> {
        let value = self.parse_binary(1)?;
        if let Some(token) = self.peek() {
            return Err(EvalError::syntax(
                token.span.start,
                format!("unexpected '{}'", token.text),
            ));
        }
        Ok(value)
    }

    fn peek(&self) -> Option<&'a Token> {
        self.tokens.get(self.pos)
    }

    fn advance(&mut self) -> Option<&'a Token> {
        let token = self.tokens.get(self.pos);
        if token.is_some() {
            self.pos += 1;
        }
        token
    }

    fn parse_binary(&mut self, min_precedence: u8) -> Result<f64, EvalError> {
        let mut lhs = self.parse_unary()?;

        loop {
            let (op, position) = match self.peek() {
                Some(Token {
                    kind: TokenKind::Op(op),
                    span,
                    ..
                }) if op.precedence() >= min_precedence => (*op, span.start),
                _ => break,
            };
            self.pos += 1;

            if op == Operator::Divide {
                self.check_divisor(position)?;
            }

            let rhs = self.parse_binary(op.precedence() + 1)?;
            lhs = op.apply(lhs, rhs);
        }

        Ok(lhs)
    }

    /// A numeral behind any run of sign prefixes. Signs are folded in a loop
    /// so prefix length never grows the call stack.
    fn parse_unary(&mut self) -> Result<f64, EvalError> {
        let mut negative = false;
        loop {
            match self.peek() {
                Some(Token {
                    kind: TokenKind::Op(Operator::Add),
                    ..
                }) => {}
                Some(Token {
                    kind: TokenKind::Op(Operator::Subtract),
                    ..
                }) => negative = !negative,
                _ => break,
            }
            self.pos += 1;
        }

        match self.advance() {
            Some(Token {
                kind: TokenKind::Number(value),
                ..
            }) => Ok(if negative { -*value } else { *value }),
            Some(token) => Err(EvalError::syntax(
                token.span.start,
                format!("'{}' needs a left operand", token.text),
            )),
            None => Err(EvalError::syntax(self.end, "unexpected end of expression")),
        }
    }

    /// Literal zero right after a divide operator. Runtime zeros such as
    /// `8÷−0` are caught later as a non-finite result.
    fn check_divisor(&self, position: usize) -> Result<(), EvalError> {
        match self.peek() {
            Some(Token {
                kind: TokenKind::Number(value),
                ..
            }) if *value == 0.0 => Err(EvalError::DivideByZero { position }),
            _ => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn value(input: &str) -> f64 {
        match evaluate(input) {
            Ok(Evaluation::Value(v)) => v,
            other => panic!("Expected a value for {:?}, got {:?}", input, other),
        }
    }

    #[test]
    fn test_basic_operators() {
        assert_eq!(value("1+2"), 3.0);
        assert_eq!(value("9−4"), 5.0);
        assert_eq!(value("7×6"), 42.0);
        assert_eq!(value("8÷2"), 4.0);
        assert_eq!(value("9-4"), 5.0);
        assert_eq!(value("7*6"), 42.0);
        assert_eq!(value("8/2"), 4.0);
    }

    #[test]
    fn test_precedence_and_associativity() {
        assert_eq!(value("2+3×4"), 14.0);
        assert_eq!(value("2×3+4"), 10.0);
        assert_eq!(value("10−4−3"), 3.0);
        assert_eq!(value("8÷4÷2"), 1.0);
        assert_eq!(value("1+6÷3−2×2"), -1.0);
    }

    #[test]
    fn test_empty_and_zero_inputs() {
        assert_eq!(evaluate(""), Ok(Evaluation::Empty));
        assert_eq!(evaluate("0"), Ok(Evaluation::Empty));
        assert_eq!(evaluate("0000"), Ok(Evaluation::Empty));
        assert_eq!(evaluate("−"), Ok(Evaluation::Empty));
        assert_eq!(evaluate("+×."), Ok(Evaluation::Empty));
    }

    #[test]
    fn test_zero_expression_is_a_value() {
        // Only a pure run of zeros short-circuits; "0+0" is a real calculation
        assert_eq!(evaluate("0+0"), Ok(Evaluation::Value(0.0)));
    }

    #[test]
    fn test_trailing_operators_dropped() {
        assert_eq!(value("5+"), 5.0);
        assert_eq!(value("5÷×"), 5.0);
        assert_eq!(value("5."), 5.0);
        assert_eq!(value("2+3−."), 5.0);
    }

    #[test]
    fn test_leading_zeros() {
        assert_eq!(value("007+1"), 8.0);
        assert_eq!(value("00.5"), 0.5);
        assert_eq!(value("1.007"), 1.007);
        assert_eq!(value("8÷05"), 1.6);
    }

    #[test]
    fn test_decimals() {
        assert!((value("2.5+3.1") - 5.6).abs() < 1e-9);
        assert_eq!(value(".5+.5"), 1.0);
        assert_eq!(value("5.+3"), 8.0);
    }

    #[test]
    fn test_invalid_decimal() {
        assert!(matches!(
            evaluate("1.2.3+4"),
            Err(EvalError::InvalidDecimal { ref numeral, position: 0 }) if numeral == "1.2.3"
        ));
        assert!(matches!(
            evaluate("4+1..2"),
            Err(EvalError::InvalidDecimal { position: 2, .. })
        ));
    }

    #[test]
    fn test_divide_by_literal_zero() {
        assert_eq!(
            evaluate("8÷0"),
            Err(EvalError::DivideByZero { position: 1 })
        );
        assert!(matches!(evaluate("8÷0.0"), Err(EvalError::DivideByZero { .. })));
        assert!(matches!(evaluate("8÷00"), Err(EvalError::DivideByZero { .. })));
        assert!(matches!(evaluate("1+8÷0+"), Err(EvalError::DivideByZero { .. })));
        // Non-zero divisors that start with zero are fine
        assert_eq!(value("8÷0.5"), 16.0);
    }

    #[test]
    fn test_runtime_zero_divisor_is_non_finite() {
        assert_eq!(evaluate("8÷−0"), Err(EvalError::NonFinite));
    }

    #[test]
    fn test_unary_signs() {
        assert_eq!(value("−2+1"), -1.0);
        assert_eq!(value("5×−2"), -10.0);
        assert_eq!(value("5−+2"), 3.0);
        assert_eq!(value("+5"), 5.0);
        assert_eq!(value("5+−+−2"), 7.0);
    }

    #[test]
    fn test_long_sign_chain() {
        // 100k minus signs cancel out; a recursive descent would overflow here
        let input = format!("5{}2", "+−".repeat(100_000));
        assert_eq!(value(&input), 7.0);

        let input = format!("5{}+−2", "+−".repeat(100_000));
        assert_eq!(value(&input), 3.0);
    }

    #[test]
    fn test_negative_zero_normalized() {
        match evaluate("−0") {
            Ok(Evaluation::Value(v)) => assert!(v == 0.0 && v.is_sign_positive()),
            other => panic!("Expected zero, got {:?}", other),
        }
    }

    #[test]
    fn test_syntax_errors() {
        assert!(matches!(evaluate("×5"), Err(EvalError::Syntax { .. })));
        assert!(matches!(evaluate("5−−2"), Err(EvalError::Syntax { .. })));
        assert!(matches!(evaluate("5++2"), Err(EvalError::Syntax { .. })));
        assert!(matches!(evaluate("5+.+3"), Err(EvalError::Syntax { .. })));
        assert!(matches!(evaluate("2e5"), Err(EvalError::Syntax { .. })));
        assert!(matches!(evaluate("5×÷2"), Err(EvalError::Syntax { .. })));
    }

    #[test]
    fn test_tokenize_spans() -> Result<(), EvalError> {
        let tokens = tokenize("12.5×3")?;
        assert_eq!(tokens.len(), 3);
        assert_eq!(tokens[0].kind, TokenKind::Number(12.5));
        assert_eq!(tokens[0].span, 0..4);
        assert_eq!(tokens[1].kind, TokenKind::Op(Operator::Multiply));
        assert_eq!(tokens[1].span, 4..5);
        assert_eq!(tokens[2].text, "3");
        Ok(())
    }

    #[test]
    fn test_tokenize_allows_spaced_signs() -> Result<(), EvalError> {
        let tokens = tokenize("5 - -2")?;
        assert_eq!(tokens.len(), 4);
        Ok(())
    }
}
