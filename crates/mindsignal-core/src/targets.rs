//! Validated forum and user names.
//!
//! Raw input comes straight from a text box, so parsing is forgiving about
//! whitespace and the usual `r/` / `u/` prefixes but strict about the
//! character set, which keeps the names safe to splice into API paths.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{CoreError, TargetKind};

/// A forum (subreddit) name without its `r/` prefix.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ForumName(String);

impl ForumName {
    pub const MIN_LEN: usize = 2;
    pub const MAX_LEN: usize = 21;

    pub fn parse(raw: &str) -> Result<Self, CoreError> {
        let compact: String = raw.chars().filter(|c| !c.is_whitespace()).collect();
        let name = strip_prefixes(&compact, &["/r/", "r/"]);
        validate(name, TargetKind::Forum, Self::MIN_LEN, Self::MAX_LEN, |c| {
            c.is_ascii_alphanumeric() || c == '_'
        })?;
        Ok(Self(name.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// A forum user name without its `u/` prefix.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Username(String);

impl Username {
    pub const MIN_LEN: usize = 3;
    pub const MAX_LEN: usize = 20;

    pub fn parse(raw: &str) -> Result<Self, CoreError> {
        let trimmed = raw.trim();
        let name = strip_prefixes(trimmed, &["/u/", "u/", "/user/", "user/"]);
        validate(name, TargetKind::User, Self::MIN_LEN, Self::MAX_LEN, |c| {
            c.is_ascii_alphanumeric() || c == '_' || c == '-'
        })?;
        Ok(Self(name.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

fn strip_prefixes<'a>(value: &'a str, prefixes: &[&str]) -> &'a str {
    prefixes
        .iter()
        .find_map(|p| value.strip_prefix(p))
        .unwrap_or(value)
}

fn validate(
    name: &str,
    kind: TargetKind,
    min: usize,
    max: usize,
    allowed: impl Fn(char) -> bool,
) -> Result<(), CoreError> {
    let invalid = |reason: String| CoreError::InvalidTarget {
        kind,
        value: name.to_string(),
        reason,
    };

    let len = name.chars().count();
    if len < min || len > max {
        return Err(invalid(format!("must be {min}-{max} characters long")));
    }
    if let Some(bad) = name.chars().find(|c| !allowed(*c)) {
        return Err(invalid(format!("character '{bad}' is not allowed")));
    }
    Ok(())
}

impl fmt::Display for ForumName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "r/{}", self.0)
    }
}

impl fmt::Display for Username {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "u/{}", self.0)
    }
}

impl TryFrom<String> for ForumName {
    type Error = CoreError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl TryFrom<String> for Username {
    type Error = CoreError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<ForumName> for String {
    fn from(value: ForumName) -> Self {
        value.0
    }
}

impl From<Username> for String {
    fn from(value: Username) -> Self {
        value.0
    }
}
