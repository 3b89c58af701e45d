//! Phone-number normalization to the canonical domestic form.
//!
//! The directory stores every number in domestic notation (leading
//! `0`). All ingested numbers are rewritten to that form before any
//! directory write or comparison; raw representations are never stored.

use crate::{AppError, Result};

/// Normalize a raw phone number to canonical domestic form.
///
/// Accepts `+<cc>…`, `00<cc>…`, and domestic `0…` notations, with `-`,
/// spaces, and parentheses tolerated as separators. `cc` is the
/// configured country calling code.
///
/// # Errors
///
/// Returns `AppError::MalformedEvent` when the input is empty, carries
/// a foreign country code, contains non-digit residue, or does not
/// start with a recognized prefix.
pub fn normalize(raw: &str, country_code: &str) -> Result<String> {
    let mut digits = String::with_capacity(raw.len());
    let mut plus = false;
    for (idx, ch) in raw.chars().enumerate() {
        match ch {
            '+' if idx == 0 => plus = true,
            '0'..='9' => digits.push(ch),
            '-' | ' ' | '(' | ')' => {}
            _ => {
                return Err(AppError::MalformedEvent(format!(
                    "invalid character in phone number: {ch}"
                )))
            }
        }
    }

    if digits.is_empty() {
        return Err(AppError::MalformedEvent("empty phone number".into()));
    }

    let international = format!("00{country_code}");
    let national = if plus {
        digits
            .strip_prefix(country_code)
            .ok_or_else(|| AppError::MalformedEvent("unexpected country code".into()))?
    } else if let Some(rest) = digits.strip_prefix(&international) {
        rest
    } else if digits.starts_with('0') {
        return Ok(digits);
    } else if let Some(rest) = digits.strip_prefix(country_code) {
        // Bare international form without `+`, as some platforms send it.
        rest
    } else {
        return Err(AppError::MalformedEvent(format!(
            "unrecognized phone number prefix: {raw}"
        )));
    };

    if national.is_empty() {
        return Err(AppError::MalformedEvent("empty national number".into()));
    }

    Ok(format!("0{national}"))
}
