//! This file defines the `Source` type and the types needed to create one.

use std::fmt::Display;

use serde::{Deserialize, Serialize};

use crate::{Error, database_id::DatabaseId};

/// The name of a source.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, Hash)]
pub struct SourceName(String);

impl SourceName {
    /// Create a source name.
    ///
    /// # Errors
    /// Returns [Error::EmptySourceName] if `name` is empty or whitespace, or
    /// [Error::SourceNameTooLong] if `name` is longer than 100 characters.
    pub fn new(name: &str) -> Result<Self, Error> {
        if name.trim().is_empty() {
            return Err(Error::EmptySourceName);
        }

        let length = name.chars().count();
        if length > 100 {
            return Err(Error::SourceNameTooLong(length));
        }

        Ok(Self(name.to_string()))
    }

    /// Create a source name without validation.
    ///
    /// The caller should ensure that the string is not empty and no longer
    /// than 100 characters. This function has `_unchecked` in the name but is
    /// not `unsafe`, because a violated invariant causes incorrect behaviour
    /// but not memory unsafety.
    pub fn new_unchecked(name: &str) -> Self {
        Self(name.to_string())
    }
}

impl AsRef<str> for SourceName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl Display for SourceName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A named category that incomes and outcomes are attributed to.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, Hash)]
pub struct Source {
    /// The source's ID in the database.
    pub id: DatabaseId,
    /// The display name of the source.
    pub name: SourceName,
}

/// The request body for creating or replacing a source.
#[derive(Debug, Deserialize)]
pub struct SourceData {
    /// The record ID. Ignored on create, must match the path ID on update.
    #[serde(default)]
    pub id: DatabaseId,
    /// The display name of the source.
    pub name: String,
}

#[cfg(test)]
mod source_name_tests {
    use crate::Error;

    use super::SourceName;

    #[test]
    fn new_fails_on_empty_string() {
        let source_name = SourceName::new("");

        assert_eq!(source_name, Err(Error::EmptySourceName));
    }

    #[test]
    fn new_fails_on_just_whitespace() {
        let source_name = SourceName::new("\n\t \r");

        assert_eq!(source_name, Err(Error::EmptySourceName));
    }

    #[test]
    fn new_fails_on_name_longer_than_column_limit() {
        let source_name = SourceName::new(&"a".repeat(101));

        assert_eq!(source_name, Err(Error::SourceNameTooLong(101)));
    }

    #[test]
    fn new_succeeds_on_non_empty_string() {
        let source_name = SourceName::new("🔥");

        assert!(source_name.is_ok())
    }
}
