//! Strongly-typed identifier value objects.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

use super::ValidationError;

/// Handle on the change request a review belongs to.
///
/// Reviews only ever hold this handle, never the change request itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ChangeRequestId(Uuid);

impl ChangeRequestId {
    /// Creates a new random ChangeRequestId.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Creates a ChangeRequestId from an existing UUID.
    pub fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    /// Returns the inner UUID.
    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl Default for ChangeRequestId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for ChangeRequestId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for ChangeRequestId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self(Uuid::parse_str(s)?))
    }
}

/// Reference to a wiki user, e.g. `XWiki.Alice`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserReference(String);

impl UserReference {
    /// Creates a new UserReference, returning error if empty.
    pub fn new(reference: impl Into<String>) -> Result<Self, ValidationError> {
        let reference = reference.into();
        if reference.trim().is_empty() {
            return Err(ValidationError::empty_field("user_reference"));
        }
        Ok(Self(reference))
    }

    /// Returns the inner string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for UserReference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for UserReference {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

/// Storage identifier of a review, assigned once the review is persisted.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ReviewId(String);

impl ReviewId {
    /// Creates a new ReviewId, returning error if empty.
    pub fn new(id: impl Into<String>) -> Result<Self, ValidationError> {
        let id = id.into();
        if id.is_empty() {
            return Err(ValidationError::empty_field("review_id"));
        }
        if id.chars().any(char::is_whitespace) {
            return Err(ValidationError::invalid_format(
                "review_id",
                "must not contain whitespace",
            ));
        }
        Ok(Self(id))
    }

    /// Returns the inner string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ReviewId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for ReviewId {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn change_request_id_generates_unique_values() {
        let id1 = ChangeRequestId::new();
        let id2 = ChangeRequestId::new();
        assert_ne!(id1, id2);
    }

    #[test]
    fn change_request_id_parses_from_valid_string() {
        let uuid_str = "550e8400-e29b-41d4-a716-446655440000";
        let id: ChangeRequestId = uuid_str.parse().unwrap();
        assert_eq!(id.to_string(), uuid_str);
    }

    #[test]
    fn change_request_id_rejects_invalid_string() {
        let result: Result<ChangeRequestId, _> = "not-a-uuid".parse();
        assert!(result.is_err());
    }

    #[test]
    fn change_request_id_serializes_as_bare_uuid() {
        let uuid = Uuid::parse_str("550e8400-e29b-41d4-a716-446655440000").unwrap();
        let id = ChangeRequestId::from_uuid(uuid);
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, "\"550e8400-e29b-41d4-a716-446655440000\"");
    }

    #[test]
    fn user_reference_accepts_non_empty_string() {
        let user = UserReference::new("XWiki.Alice").unwrap();
        assert_eq!(user.as_str(), "XWiki.Alice");
        assert_eq!(user.to_string(), "XWiki.Alice");
    }

    #[test]
    fn user_reference_rejects_empty_string() {
        assert!(UserReference::new("").is_err());
        assert!(UserReference::new("   ").is_err());
    }

    #[test]
    fn review_id_rejects_empty_string() {
        let err = ReviewId::new("").unwrap_err();
        assert_eq!(err.to_string(), "Field 'review_id' cannot be empty");
    }

    #[test]
    fn review_id_rejects_whitespace() {
        assert!(ReviewId::new("review 1").is_err());
    }

    #[test]
    fn review_id_parses_from_str() {
        let id: ReviewId = "review-42".parse().unwrap();
        assert_eq!(id.as_str(), "review-42");
    }
}
