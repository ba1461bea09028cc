//! Validated table identifiers.

use std::fmt;

use super::error::KvError;

/// A table name that is safe to splice into SQL text.
///
/// Names are non-empty and limited to ASCII letters, digits and `_`. They are
/// still emitted double-quoted (see [`TableName::quoted`]) so that names which
/// collide with SQL keywords, such as `order`, work as well.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TableName(String);

impl TableName {
    /// Validate `name`.
    ///
    /// Fails with [`KvError::InvalidIdentifier`] for an empty name or one
    /// containing any character outside `[A-Za-z0-9_]`.
    pub fn new(name: impl Into<String>) -> Result<Self, KvError> {
        let name = name.into();
        if name.is_empty() || !name.chars().all(|c| c.is_ascii_alphanumeric() || c == '_') {
            return Err(KvError::InvalidIdentifier(name));
        }
        Ok(Self(name))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The identifier as it appears in SQL: `"name"`.
    pub fn quoted(&self) -> String {
        format!("\"{}\"", self.0)
    }
}

impl fmt::Display for TableName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for TableName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
