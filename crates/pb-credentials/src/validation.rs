// Copyright 2025 Schelling Point Labs Inc
// SPDX-License-Identifier: AGPL-3.0-only

//! Validation routines for service names, logins and passwords

/// Maximum length of a service name, login or password, in characters
pub const MAX_FIELD_LEN: usize = 50;

/// Validate a single user-supplied field
///
/// Fields must:
/// - Be non-empty
/// - Be at most [`MAX_FIELD_LEN`] characters long (counted as chars, not bytes)
/// - Contain no whitespace, since commands are whitespace-delimited
pub fn validate_field(value: &str) -> bool {
    !value.is_empty()
        && value.chars().count() <= MAX_FIELD_LEN
        && !value.chars().any(char::is_whitespace)
}

/// Validate every field, stopping at the first invalid one
pub fn validate_fields<'a>(values: impl IntoIterator<Item = &'a str>) -> bool {
    values.into_iter().all(validate_field)
}
