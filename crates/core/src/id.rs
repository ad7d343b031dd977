//! Document identifiers.
//!
//! The document store hands out string ids, but records written by older
//! clients may carry numeric ids (including floats such as `12.0` and values
//! past `i64::MAX`). Both forms compare by their string form.

use core::hash::{Hash, Hasher};
use core::str::FromStr;
use std::borrow::Cow;

use serde::{Deserialize, Serialize};
use serde_json::Number;
use uuid::Uuid;

use crate::error::DomainError;

/// Identifier of a stored document (order, booking, item, promotion, ...).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum DocumentId {
    Text(String),
    Number(Number),
}

impl DocumentId {
    /// Create a new identifier.
    ///
    /// Uses UUIDv7 (time-ordered). Prefer passing ids explicitly in tests
    /// for determinism.
    pub fn generate() -> Self {
        Self::Text(Uuid::now_v7().to_string())
    }

    /// String form used for comparisons and store keys.
    pub fn as_key(&self) -> Cow<'_, str> {
        match self {
            Self::Text(s) => Cow::Borrowed(s.as_str()),
            Self::Number(n) => Cow::Owned(number_key(n)),
        }
    }

    /// Compare against a raw key without allocating for text ids.
    pub fn matches_key(&self, key: &str) -> bool {
        self.as_key() == key
    }
}

/// Integral floats key like integers (`12.0` -> `"12"`).
fn number_key(n: &Number) -> String {
    if let Some(i) = n.as_i64() {
        return i.to_string();
    }
    if let Some(u) = n.as_u64() {
        return u.to_string();
    }
    match n.as_f64() {
        Some(f) if f.fract() == 0.0 && f.abs() < 9_007_199_254_740_992.0 => (f as i64).to_string(),
        _ => n.to_string(),
    }
}

impl PartialEq for DocumentId {
    fn eq(&self, other: &Self) -> bool {
        self.as_key() == other.as_key()
    }
}

impl Eq for DocumentId {}

impl Hash for DocumentId {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.as_key().hash(state);
    }
}

impl core::fmt::Display for DocumentId {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(&self.as_key())
    }
}

impl From<&str> for DocumentId {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for DocumentId {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<i64> for DocumentId {
    fn from(value: i64) -> Self {
        Self::Number(value.into())
    }
}

impl FromStr for DocumentId {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            return Err(DomainError::invalid_id("document id cannot be empty"));
        }
        Ok(Self::Text(trimmed.to_string()))
    }
}
