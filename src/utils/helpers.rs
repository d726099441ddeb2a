//! Helper functions and utilities
//!
//! This module contains common helper functions used throughout the application.

/// Magnitude from which amounts are shown in scientific notation
const SCIENTIFIC_FROM: f64 = 1e15;

/// Format a money amount for display: at most two decimals, no trailing zeros.
///
/// Huge amounts use scientific notation. Non-zero amounts that would round to
/// zero keep their own precision.
pub fn format_amount(amount: f64) -> String {
    if amount.abs() >= SCIENTIFIC_FROM {
        return format!("{:e}", amount);
    }

    let rounded = format!("{:.2}", amount);
    let trimmed = rounded.trim_end_matches('0').trim_end_matches('.');
    match trimmed {
        "-0" | "" | "0" if amount != 0.0 => amount.to_string(),
        "-0" | "" => "0".to_string(),
        other => other.to_string(),
    }
}

/// Parse a user-supplied money amount, rejecting NaN and infinities
pub fn parse_amount(text: &str) -> Option<f64> {
    text.trim()
        .parse::<f64>()
        .ok()
        .filter(|value| value.is_finite())
}

/// Truncate text to a maximum number of characters with ellipsis
pub fn truncate_text(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        text.to_string()
    } else {
        let kept: String = text.chars().take(max_chars.saturating_sub(3)).collect();
        format!("{}...", kept)
    }
}
