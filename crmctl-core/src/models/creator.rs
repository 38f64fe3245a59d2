//! Creator identity references
//!
//! Records point at the user that created them through a 24-character
//! hexadecimal identifier. Lookup of the user behind the identifier is not
//! wired up, so listings carry an explicit unresolved placeholder.

use std::fmt;

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

use super::ValidationError;

/// Display label for a creator that could not be resolved to a user
pub const UNRESOLVED_CREATOR_LABEL: &str = "Unknown user";

static OBJECT_ID_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[0-9a-fA-F]{24}$").expect("invalid object id regex"));

/// Validated creator identifier (24 hex characters, stored lowercase)
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct CreatorId(String);

impl CreatorId {
    /// Create a creator id, validating its lexical shape.
    ///
    /// # Example
    /// ```
    /// use crmctl_core::models::CreatorId;
    ///
    /// assert!(CreatorId::new("64b7f0c2a1b2c3d4e5f60718").is_ok());
    /// assert!(CreatorId::new("not-a-valid-id").is_err());
    /// ```
    pub fn new(s: &str) -> Result<Self, ValidationError> {
        if s.is_empty() {
            return Err(ValidationError::Missing { field: "createdBy" });
        }

        if !OBJECT_ID_RE.is_match(s) {
            return Err(ValidationError::InvalidFormat {
                field: "createdBy",
                reason: "must be a 24-character hexadecimal identifier",
            });
        }

        Ok(Self(s.to_ascii_lowercase()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CreatorId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<String> for CreatorId {
    type Error = ValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(&value)
    }
}

impl From<CreatorId> for String {
    fn from(id: CreatorId) -> Self {
        id.0
    }
}

/// Creator as shown in listings
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CreatorRef {
    pub id: CreatorId,
    pub username: String,
}

impl CreatorRef {
    /// Reference whose user could not be looked up
    pub fn unresolved(id: CreatorId) -> Self {
        Self {
            id,
            username: UNRESOLVED_CREATOR_LABEL.to_string(),
        }
    }

    pub fn is_unresolved(&self) -> bool {
        self.username == UNRESOLVED_CREATOR_LABEL
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_mixed_case_hex() {
        let id = CreatorId::new("64B7F0C2A1B2C3D4E5F60718").unwrap();
        assert_eq!(id.as_str(), "64b7f0c2a1b2c3d4e5f60718");
    }

    #[test]
    fn rejects_wrong_length() {
        assert!(CreatorId::new("64b7f0c2a1b2c3d4e5f6071").is_err());
        assert!(CreatorId::new("64b7f0c2a1b2c3d4e5f607189").is_err());
    }

    #[test]
    fn rejects_non_hex() {
        let err = CreatorId::new("not-a-valid-id").unwrap_err();
        assert!(matches!(
            err,
            ValidationError::InvalidFormat { field: "createdBy", .. }
        ));
        assert!(CreatorId::new("zzzzzzzzzzzzzzzzzzzzzzzz").is_err());
    }

    #[test]
    fn empty_is_missing() {
        assert_eq!(
            CreatorId::new("").unwrap_err(),
            ValidationError::Missing { field: "createdBy" }
        );
    }

    #[test]
    fn deserialize_validates() {
        let ok: Result<CreatorId, _> = serde_json::from_str("\"64b7f0c2a1b2c3d4e5f60718\"");
        assert!(ok.is_ok());
        let bad: Result<CreatorId, _> = serde_json::from_str("\"nope\"");
        assert!(bad.is_err());
    }

    #[test]
    fn unresolved_placeholder() {
        let creator = CreatorRef::unresolved(CreatorId::new("64b7f0c2a1b2c3d4e5f60718").unwrap());
        assert_eq!(creator.username, UNRESOLVED_CREATOR_LABEL);
        assert!(creator.is_unresolved());
    }
}
