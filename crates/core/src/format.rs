//! Result formatting
//!
//! Results are shown as the shortest decimal text that reads back to the same
//! f64, never in exponent form, so the text can be fed straight back into
//! the evaluator when a calculation is chained. Binary floating point
//! artifacts are not rounded away: `0.1+0.2` shows `0.30000000000000004`.

/// Format a finite result for display and chaining
pub fn format_number(value: f64) -> String {
    if value == 0.0 {
        // Covers -0
        return "0".to_string();
    }
    format!("{}", value)
}
