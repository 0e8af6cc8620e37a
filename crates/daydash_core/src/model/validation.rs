//! Field-level validation shared by record drafts.

use chrono::NaiveDate;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Input rejected before any mutation happens.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// Required text is empty after trim.
    EmptyField(&'static str),
    /// Amount is not a finite number strictly greater than zero.
    InvalidAmount { field: &'static str, input: String },
    /// Date is not `YYYY-MM-DD`.
    InvalidDate { field: &'static str, input: String },
    /// Value is outside the field's closed set of choices.
    UnknownChoice { field: &'static str, input: String },
}

impl ValidationError {
    /// Field that failed validation.
    pub fn field(&self) -> &'static str {
        match self {
            Self::EmptyField(field) => field,
            Self::InvalidAmount { field, .. }
            | Self::InvalidDate { field, .. }
            | Self::UnknownChoice { field, .. } => field,
        }
    }

    /// Blocking notice shown to the user.
    pub fn notice(&self) -> String {
        match self {
            Self::EmptyField(field) => format!("Please enter a {field}."),
            Self::InvalidAmount { .. } => "Please enter a valid amount.".to_string(),
            Self::InvalidDate { .. } => "Please enter a date as YYYY-MM-DD.".to_string(),
            Self::UnknownChoice { field, .. } => format!("Please choose a valid {field}."),
        }
    }
}

impl Display for ValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyField(field) => write!(f, "{field} must not be blank"),
            Self::InvalidAmount { field, input } => {
                write!(f, "{field} must be a number greater than zero, got `{input}`")
            }
            Self::InvalidDate { field, input } => {
                write!(f, "{field} must be a YYYY-MM-DD date, got `{input}`")
            }
            Self::UnknownChoice { field, input } => {
                write!(f, "{field} has unknown value `{input}`")
            }
        }
    }
}

impl Error for ValidationError {}

/// Returns trimmed text, rejecting blank input.
pub fn require_text(field: &'static str, value: &str) -> Result<String, ValidationError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::EmptyField(field));
    }
    Ok(trimmed.to_string())
}

/// Parses a money amount; must be finite and `> 0`.
pub fn parse_amount(field: &'static str, value: &str) -> Result<f64, ValidationError> {
    let trimmed = value.trim();
    match trimmed.parse::<f64>() {
        Ok(amount) if amount.is_finite() && amount > 0.0 => Ok(amount),
        _ => Err(ValidationError::InvalidAmount {
            field,
            input: trimmed.to_string(),
        }),
    }
}

/// Parses a calendar date in `YYYY-MM-DD` form.
pub fn parse_date(field: &'static str, value: &str) -> Result<NaiveDate, ValidationError> {
    let trimmed = value.trim();
    NaiveDate::parse_from_str(trimmed, "%Y-%m-%d").map_err(|_| ValidationError::InvalidDate {
        field,
        input: trimmed.to_string(),
    })
}

/// Lenient non-negative integer parse over the leading number.
///
/// `"8000 steps"` is 8000 and `"7.5"` is 7. Blank, garbage or negative input
/// is 0; values past `u32::MAX` saturate.
pub fn parse_count(value: &str) -> u32 {
    let number = leading_number(value, false);
    if number.is_empty() || number.starts_with('-') {
        return 0;
    }
    number
        .trim_start_matches('+')
        .parse::<u64>()
        .map_or(u32::MAX, |count| u32::try_from(count).unwrap_or(u32::MAX))
}

/// Lenient non-negative decimal parse over the leading number.
///
/// `"6h"` is 6.0. Blank, garbage or negative input is 0.
pub fn parse_hours(value: &str) -> f64 {
    match leading_number(value, true).parse::<f64>() {
        Ok(hours) if hours.is_finite() && hours > 0.0 => hours,
        _ => 0.0,
    }
}

/// Longest prefix of `value` (after leading whitespace) shaped like
/// `[+-]digits[.digits]`, or `""` when it has no digits.
fn leading_number(value: &str, allow_fraction: bool) -> &str {
    let trimmed = value.trim_start();
    let bytes = trimmed.as_bytes();
    let digits_after = |start: usize| {
        bytes[start..]
            .iter()
            .take_while(|byte| byte.is_ascii_digit())
            .count()
    };

    let mut end = usize::from(matches!(bytes.first(), Some(b'+' | b'-')));
    let whole = digits_after(end);
    end += whole;
    let mut has_digits = whole > 0;

    if allow_fraction && bytes.get(end) == Some(&b'.') {
        let fraction = digits_after(end + 1);
        if fraction > 0 {
            end += 1 + fraction;
            has_digits = true;
        }
    }

    if has_digits {
        &trimmed[..end]
    } else {
        ""
    }
}

/// Formats a money value with exactly two decimals.
pub fn format_money(value: f64) -> String {
    format!("{value:.2}")
}
