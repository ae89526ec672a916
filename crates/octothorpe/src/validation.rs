// File: src/validation.rs
// Purpose: Pure input predicates run before any collaborator call

use once_cell::sync::Lazy;
use regex::Regex;

// Email validation regex
static EMAIL_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[a-zA-Z0-9._%+-]+@[a-zA-Z0-9.-]+\.[a-zA-Z]{2,}$").unwrap()
});

/// Validate email format
pub fn is_email(value: &str) -> bool {
    EMAIL_REGEX.is_match(value)
}

/// True when the value is empty or whitespace only
pub fn is_empty(value: &str) -> bool {
    value.trim().is_empty()
}

/// True when the value has at least `min` characters
pub fn min_length(value: &str, min: usize) -> bool {
    value.chars().count() >= min
}
