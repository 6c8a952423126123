// ─── Username ───
// Syntactic gate for Minecraft account names. Runs before any network call.

use std::fmt;
use std::sync::LazyLock;

use regex::Regex;

use crate::core::error::{SkinPackError, SkinPackResult};

static USERNAME_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[A-Za-z0-9_]{3,16}$").expect("username pattern is a valid regex")
});

/// `true` iff `candidate` is 3-16 characters of ASCII letters, digits or `_`.
pub fn is_valid_username(candidate: &str) -> bool {
    USERNAME_PATTERN.is_match(candidate)
}

/// A username that already passed [`is_valid_username`].
///
/// The resolver only accepts this type, so an unchecked string can never
/// reach an upstream request.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Username(String);

impl Username {
    pub fn parse(candidate: &str) -> SkinPackResult<Self> {
        if is_valid_username(candidate) {
            Ok(Self(candidate.to_string()))
        } else {
            Err(SkinPackError::InvalidUsername(candidate.to_string()))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Username {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
