//! Tag identity - the deduplication key of the registry

use std::fmt;

/// A tag key, optionally paired with an exact value.
///
/// Key and value are kept as separate fields, so a value that itself
/// contains `=` never collides with another identity.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TagIdentity {
    pub key: String,
    pub value: Option<String>,
}

impl TagIdentity {
    pub fn new(key: impl Into<String>, value: Option<String>) -> Self {
        TagIdentity {
            key: key.into(),
            value,
        }
    }

    /// Identity for a tag whose presence matters, not its value
    pub fn key_only(key: impl Into<String>) -> Self {
        Self::new(key, None)
    }

    pub fn with_value(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self::new(key, Some(value.into()))
    }
}

impl fmt::Display for TagIdentity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.value {
            Some(value) => write!(f, "{}={}", self.key, value),
            None => f.write_str(&self.key),
        }
    }
}
