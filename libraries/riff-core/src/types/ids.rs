/// ID types for Riff Player entities
use serde::{Deserialize, Serialize};
use std::fmt;

/// Track identifier
///
/// Opaque string handed out by the catalog. Two ids are the same track when
/// their strings are equal.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TrackId(String);

impl TrackId {
    /// Create a new track ID
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Get the inner string
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TrackId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for TrackId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

impl From<String> for TrackId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl AsRef<str> for TrackId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn equality_is_by_value() {
        assert_eq!(TrackId::new("abc"), TrackId::from("abc".to_string()));
        assert_ne!(TrackId::new("abc"), TrackId::new("abd"));
    }

    #[test]
    fn serializes_as_plain_string() {
        let id = TrackId::new("42");
        assert_eq!(serde_json::to_string(&id).unwrap(), "\"42\"");

        let parsed: TrackId = serde_json::from_str("\"42\"").unwrap();
        assert_eq!(parsed, id);
        assert_eq!(parsed.to_string(), "42");
    }
}
