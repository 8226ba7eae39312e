//! Class-name sanitization.
//!
//! Every candidate wrapper key goes through [`sanitize_class_name`] before
//! any registry lookup. The operation is lossy on purpose; callers that need
//! the raw key capture it beforehand.

use std::sync::LazyLock;

use regex::Regex;

static SUFFIXES: LazyLock<Regex> = LazyLock::new(|| Regex::new("Renderer|Model").unwrap());
static RADIO: LazyLock<Regex> = LazyLock::new(|| Regex::new("Radio").unwrap());
static COMMAND_LIKE: LazyLock<Regex> = LazyLock::new(|| Regex::new("(Command|Endpoint|Action)$").unwrap());

/// Sanitize a raw wrapper key into a registry class name.
///
/// Capitalizes the first letter, strips every `Renderer`/`Model` substring,
/// rewrites `Radio` to `Mix`, and trims. Idempotent.
pub fn sanitize_class_name(name: &str) -> String {
    let mut capitalized = String::with_capacity(name.len());
    let mut chars = name.chars();
    if let Some(first) = chars.next() {
        capitalized.extend(first.to_uppercase());
        capitalized.push_str(chars.as_str());
    }
    let stripped = SUFFIXES.replace_all(&capitalized, "");
    let aliased = RADIO.replace_all(&stripped, "Mix");
    aliased.trim().to_string()
}

/// Whether a raw key names a dispatchable command, endpoint or action.
pub fn is_command_key(key: &str) -> bool {
    COMMAND_LIKE.is_match(key)
}

/// Project a camelCase raw key to the snake_case field name convention.
pub fn snake_case(key: &str) -> String {
    let mut out = String::with_capacity(key.len() + 4);
    let mut prev_lower = false;
    for c in key.chars() {
        if c.is_ascii_uppercase() {
            if prev_lower {
                out.push('_');
            }
            out.push(c.to_ascii_lowercase());
            prev_lower = false;
        } else {
            prev_lower = c.is_ascii_lowercase() || c.is_ascii_digit();
            out.push(c);
        }
    }
    out
}
