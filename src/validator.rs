//! Input predicates for user creation.
//!
//! Both checks are pure and cheap; the email pattern is compiled once.

use once_cell::sync::Lazy;
use regex::Regex;

/// Minimum display-name length, in characters.
pub const MIN_NAME_CHARS: usize = 2;
/// Maximum display-name length, in characters.
pub const MAX_NAME_CHARS: usize = 100;

static EMAIL_RE: Lazy<Regex> = Lazy::new(|| {
    #[allow(clippy::expect_used)]
    Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email pattern is a valid regex")
});

/// Returns `true` when `name` is between 2 and 100 characters long.
///
/// Length is measured in Unicode scalar values, so `"Zoë"` counts as three
/// characters even though it is four bytes.
#[must_use]
pub fn is_valid_name(name: &str) -> bool {
    let len = name.chars().count();
    (MIN_NAME_CHARS..=MAX_NAME_CHARS).contains(&len)
}

/// Returns `true` when `email` has the `local@domain.tld` shape with no
/// whitespace and exactly one `@`.
#[must_use]
pub fn is_valid_email(email: &str) -> bool {
    EMAIL_RE.is_match(email)
}
