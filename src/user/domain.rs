//! This file defines a user of the application and its supporting types.

use std::fmt::Display;

use serde::{Deserialize, Serialize};

use crate::{Error, database_id::DatabaseId};

/// A newtype wrapper for validated usernames.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, Hash)]
pub struct Username(String);

impl Username {
    /// Create a username.
    ///
    /// # Errors
    /// Returns [Error::InvalidUsernameLength] if `username` is shorter than
    /// 3 or longer than 50 characters.
    pub fn new(username: &str) -> Result<Self, Error> {
        let length = username.chars().count();

        if !(3..=50).contains(&length) {
            return Err(Error::InvalidUsernameLength(length));
        }

        Ok(Self(username.to_string()))
    }

    /// Create a username without validation.
    ///
    /// The caller should ensure that the string is between 3 and 50
    /// characters. This function has `_unchecked` in the name but is not
    /// `unsafe`, because a violated length invariant causes incorrect
    /// behaviour but not memory unsafety.
    pub fn new_unchecked(username: &str) -> Self {
        Self(username.to_string())
    }
}

impl AsRef<str> for Username {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl Display for Username {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A user of the application.
///
/// The password is stored in plaintext and serialized out with the rest of
/// the record, a known defect kept for compatibility with existing clients.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    /// The user's ID in the database.
    pub id: DatabaseId,
    /// The name the user logs in with.
    pub username: Username,
    /// The user's password.
    pub password: String,
    /// The email address associated with the user.
    pub email_address: String,
    /// The user's role, e.g. "Admin".
    pub role: String,
    /// The user's family name.
    pub surname: String,
    /// The user's given name.
    pub given_name: String,
}

/// The fields of a user record without its ID.
#[derive(Clone, Debug, PartialEq)]
pub struct NewUser {
    /// The name the user logs in with.
    pub username: Username,
    /// The user's password.
    pub password: String,
    /// The email address associated with the user.
    pub email_address: String,
    /// The user's role.
    pub role: String,
    /// The user's family name.
    pub surname: String,
    /// The user's given name.
    pub given_name: String,
}

/// The request body for creating or replacing a user.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserData {
    /// The record ID. Ignored on create, must match the path ID on update.
    #[serde(default)]
    pub id: DatabaseId,
    /// The name the user logs in with.
    pub username: String,
    /// The user's password.
    pub password: String,
    /// The email address associated with the user.
    pub email_address: String,
    /// The user's role.
    pub role: String,
    /// The user's family name.
    pub surname: String,
    /// The user's given name.
    pub given_name: String,
}

impl UserData {
    /// Validate the client-supplied fields into a [NewUser].
    ///
    /// # Errors
    /// Returns an error if the username is outside the accepted length range.
    pub fn to_new_user(&self) -> Result<NewUser, Error> {
        Ok(NewUser {
            username: Username::new(&self.username)?,
            password: self.password.clone(),
            email_address: self.email_address.clone(),
            role: self.role.clone(),
            surname: self.surname.clone(),
            given_name: self.given_name.clone(),
        })
    }
}
