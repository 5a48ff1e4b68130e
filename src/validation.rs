//! Input validation for command arguments and habit data.

use crate::command::ArgumentMap;
use crate::error::{Result, WellnusError};

/// Maximum allowed length for a habit description.
pub const MAX_DESCRIPTION_LENGTH: usize = 200;

/// Sequence that separates arguments on the command line and fields on disk.
const FORBIDDEN_DESCRIPTION_SEQUENCE: &str = "--";

/// The argument map holds exactly `expected` arguments.
pub fn expect_count(arguments: &ArgumentMap, expected: usize, message: &str) -> Result<()> {
    if arguments.len() != expected {
        return Err(WellnusError::bad_command(message));
    }
    Ok(())
}

/// The argument map holds `key`.
pub fn expect_key(arguments: &ArgumentMap, key: &str, message: &str) -> Result<()> {
    if !arguments.contains_key(key) {
        return Err(WellnusError::bad_command(message));
    }
    Ok(())
}

/// The payload of `key` is empty. Compares content, not identity.
pub fn expect_empty_payload(arguments: &ArgumentMap, key: &str, message: &str) -> Result<()> {
    match arguments.get(key) {
        Some(payload) if payload.is_empty() => Ok(()),
        _ => Err(WellnusError::bad_command(message)),
    }
}

/// A bare command: just `keyword`, no payload, no further arguments.
pub fn expect_bare_keyword(arguments: &ArgumentMap, keyword: &str, message: &str) -> Result<()> {
    expect_count(arguments, 1, message)?;
    expect_key(arguments, keyword, message)?;
    expect_empty_payload(arguments, keyword, message)
}

/// A feature-prefixed command: `feature keyword` followed by exactly `expected - 1` arguments.
pub fn expect_prefixed_command(
    arguments: &ArgumentMap,
    feature: &str,
    keyword: &str,
    expected: usize,
    message: &str,
) -> Result<()> {
    expect_count(arguments, expected, message)?;
    match arguments.get(feature) {
        Some(payload) if payload == keyword => Ok(()),
        _ => Err(WellnusError::BadCommand(format!(
            "Wrong command given for {}!",
            keyword
        ))),
    }
}

/// Validates a habit description.
pub fn validate_description(description: &str) -> Result<()> {
    if description.trim().is_empty() {
        return Err(WellnusError::bad_command("Habit name cannot be empty"));
    }
    if description.chars().count() > MAX_DESCRIPTION_LENGTH {
        return Err(WellnusError::BadCommand(format!(
            "Habit name exceeds maximum length of {} characters",
            MAX_DESCRIPTION_LENGTH
        )));
    }
    if description.contains(FORBIDDEN_DESCRIPTION_SEQUENCE) {
        return Err(WellnusError::BadCommand(format!(
            "Habit name cannot contain '{}'",
            FORBIDDEN_DESCRIPTION_SEQUENCE
        )));
    }
    Ok(())
}

/// Parses a 1-based list index.
pub fn parse_index(payload: &str) -> Result<usize> {
    match payload.trim().parse::<usize>() {
        Ok(index) if index > 0 => Ok(index),
        _ => Err(WellnusError::BadCommand(format!(
            "Invalid id '{}', expected a positive whole number",
            payload
        ))),
    }
}

/// Parses a non-zero signed change to a count.
pub fn parse_delta(payload: &str) -> Result<i64> {
    match payload.trim().parse::<i64>() {
        Ok(delta) if delta != 0 => Ok(delta),
        _ => Err(WellnusError::BadCommand(format!(
            "Invalid amount '{}', expected a non-zero whole number",
            payload
        ))),
    }
}
