//! Amount field input handling.
//!
//! Amount fields are free text. Keystrokes and pastes are sanitized to digits
//! with at most one decimal point and two fractional digits; totals read the
//! text back leniently, the way a browser's `parseFloat(x) || 0` would, except
//! that a number too large for `Decimal` is an error rather than zero.

use std::str::FromStr;

use rust_decimal::Decimal;
use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use thiserror::Error;

/// Restricts `value` to a non-negative decimal with at most two fractional
/// digits.
///
/// Everything but ASCII digits and `.` is dropped. Text after a second `.`
/// is discarded and the fraction is cut to two digits.
///
/// ```
/// use hoffstee_core::voucher::allow_two_decimals;
///
/// assert_eq!(allow_two_decimals("12.345"), "12.34");
/// assert_eq!(allow_two_decimals("12.3.4"), "12.3");
/// assert_eq!(allow_two_decimals("abc12.5"), "12.5");
/// ```
#[must_use]
pub fn allow_two_decimals(value: &str) -> String {
    let sanitized: String = value
        .chars()
        .filter(|c| c.is_ascii_digit() || *c == '.')
        .collect();

    let mut parts = sanitized.split('.');
    let whole = parts.next().unwrap_or_default();
    match parts.next() {
        None => whole.to_string(),
        Some(fraction) => {
            let fraction: String = fraction.chars().take(2).collect();
            format!("{whole}.{fraction}")
        }
    }
}

/// Sanitizes pasted clipboard text for an amount field.
///
/// The caller must cancel the default paste insertion and apply the returned
/// text to the field state instead.
#[must_use]
pub fn handle_decimal_paste(clipboard: &str) -> String {
    allow_two_decimals(clipboard)
}

/// Amount text holding a number that does not fit a `Decimal`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("amount {0:?} is out of range")]
pub struct AmountOutOfRange(pub String);

/// Raw amount text as held by a form field.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct AmountInput(String);

impl AmountInput {
    /// Wraps text as-is (e.g. loaded from the backend).
    #[must_use]
    pub fn new(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    /// Wraps text after running it through [`allow_two_decimals`].
    #[must_use]
    pub fn sanitized(raw: &str) -> Self {
        Self(allow_two_decimals(raw))
    }

    /// Formats a decimal amount.
    #[must_use]
    pub fn from_decimal(amount: Decimal) -> Self {
        Self(amount.to_string())
    }

    /// Returns the raw text.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns true if the field is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Reads the leading number out of the text; text without a leading
    /// number is zero.
    ///
    /// # Errors
    ///
    /// Returns `AmountOutOfRange` if the number is too large for `Decimal`.
    pub fn value(&self) -> Result<Decimal, AmountOutOfRange> {
        match leading_number(&self.0) {
            None => Ok(Decimal::ZERO),
            Some(number) => {
                Decimal::from_str(&number).map_err(|_| AmountOutOfRange(self.0.clone()))
            }
        }
    }
}

impl From<&str> for AmountInput {
    fn from(raw: &str) -> Self {
        Self::new(raw)
    }
}

impl std::fmt::Display for AmountInput {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl<'de> Deserialize<'de> for AmountInput {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        match Value::deserialize(deserializer)? {
            Value::Null => Ok(Self::default()),
            Value::String(s) => Ok(Self(s)),
            Value::Number(n) => Ok(Self(n.to_string())),
            other => Err(D::Error::custom(format!("unexpected amount value: {other}"))),
        }
    }
}

/// Extracts the longest `[+-]digits[.digits]` prefix after leading whitespace,
/// normalized so `Decimal::from_str` accepts it (`".5"` becomes `"0.5"`).
fn leading_number(text: &str) -> Option<String> {
    let text = text.trim_start();
    let bytes = text.as_bytes();

    let mut pos = 0;
    let negative = match bytes.first() {
        Some(b'-') => {
            pos = 1;
            true
        }
        Some(b'+') => {
            pos = 1;
            false
        }
        _ => false,
    };

    let whole_start = pos;
    while pos < bytes.len() && bytes[pos].is_ascii_digit() {
        pos += 1;
    }
    let whole = &text[whole_start..pos];

    let mut fraction = "";
    if bytes.get(pos) == Some(&b'.') {
        let fraction_start = pos + 1;
        let mut end = fraction_start;
        while end < bytes.len() && bytes[end].is_ascii_digit() {
            end += 1;
        }
        fraction = &text[fraction_start..end];
    }

    if whole.is_empty() && fraction.is_empty() {
        return None;
    }

    let mut normalized = String::with_capacity(whole.len() + fraction.len() + 3);
    if negative {
        normalized.push('-');
    }
    normalized.push_str(if whole.is_empty() { "0" } else { whole });
    if !fraction.is_empty() {
        normalized.push('.');
        normalized.push_str(fraction);
    }
    Some(normalized)
}
