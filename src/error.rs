//! Defines the app level error type and its conversion to JSON error responses.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use time::Date;

use crate::database_id::DatabaseId;

/// The errors that may occur in the application.
#[derive(Debug, thiserror::Error, PartialEq)]
pub enum Error {
    /// The user provided a username/password pair that does not match a
    /// stored user.
    #[error("invalid username or password")]
    InvalidCredentials,

    /// The request did not carry a readable `Authorization: Bearer` header.
    #[error("missing bearer token")]
    MissingToken,

    /// The bearer token was malformed, mis-signed or expired.
    #[error("invalid or expired bearer token")]
    InvalidToken,

    /// The token could not be signed.
    ///
    /// The cause should only be logged on the server, the client receives a
    /// generic internal server error.
    #[error("could not create token")]
    TokenCreation,

    /// The requested resource was not found.
    ///
    /// Internally, this error may occur when a query returns no rows.
    #[error("the requested resource could not be found")]
    NotFound,

    /// An empty string was used to create a source name.
    #[error("source name cannot be empty")]
    EmptySourceName,

    /// A string longer than the column limit was used to create a source name.
    #[error("source name cannot be longer than 100 characters, got {0}")]
    SourceNameTooLong(usize),

    /// A username outside the accepted length range was provided.
    #[error("username must be between 3 and 50 characters, got {0}")]
    InvalidUsernameLength(usize),

    /// An amount outside the accepted range was provided.
    #[error("amount must be between 0.01 and 1,000,000, got {0}")]
    AmountOutOfRange(f64),

    /// A date range where the start comes after the end.
    #[error("the start date {start} must be on or before the end date {end}")]
    InvalidDateRange {
        /// Start of the rejected range.
        start: Date,
        /// End of the rejected range.
        end: Date,
    },

    /// A month number outside 1-12 was used in an aggregation route.
    #[error("{0} is not a valid month number")]
    InvalidMonth(u8),

    /// A year/month/day combination that does not form a calendar date.
    #[error("the given date components do not form a valid date")]
    InvalidDate,

    /// The ID in the request path does not match the ID in the request body.
    #[error("the ID in the path ({path}) does not match the ID in the body ({body})")]
    PathIdMismatch {
        /// ID taken from the request path.
        path: DatabaseId,
        /// ID taken from the request body.
        body: DatabaseId,
    },

    /// Tried to delete a source that an income or outcome still references.
    #[error("cannot delete a source that is still referenced by incomes or outcomes")]
    SourceInUse,

    /// A write referenced a source ID that does not exist.
    #[error("the source ID does not refer to a valid source")]
    InvalidForeignKey,

    /// Could not acquire the database lock.
    #[error("could not acquire the database lock")]
    DatabaseLockError,

    /// An unhandled/unexpected SQL error.
    #[error("an unexpected SQL error occurred: {0}")]
    SqlError(rusqlite::Error),
}

impl From<rusqlite::Error> for Error {
    fn from(value: rusqlite::Error) -> Self {
        match value {
            // Code 787 occurs when a FOREIGN KEY constraint failed.
            rusqlite::Error::SqliteFailure(sql_error, Some(_))
                if sql_error.extended_code == 787 =>
            {
                Error::InvalidForeignKey
            }
            rusqlite::Error::QueryReturnedNoRows => Error::NotFound,
            error => {
                tracing::error!("an unhandled SQL error occurred: {}", error);
                Error::SqlError(error)
            }
        }
    }
}

impl Error {
    fn status_code(&self) -> StatusCode {
        match self {
            Error::InvalidCredentials | Error::MissingToken | Error::InvalidToken => {
                StatusCode::UNAUTHORIZED
            }
            Error::NotFound => StatusCode::NOT_FOUND,
            Error::EmptySourceName
            | Error::SourceNameTooLong(_)
            | Error::InvalidUsernameLength(_)
            | Error::AmountOutOfRange(_)
            | Error::InvalidDateRange { .. }
            | Error::InvalidMonth(_)
            | Error::InvalidDate
            | Error::PathIdMismatch { .. }
            | Error::SourceInUse
            | Error::InvalidForeignKey => StatusCode::BAD_REQUEST,
            Error::TokenCreation | Error::DatabaseLockError | Error::SqlError(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        let status_code = self.status_code();

        // Server-side faults are logged in full and reported to the client
        // with a generic message.
        let message = if status_code == StatusCode::INTERNAL_SERVER_ERROR {
            tracing::error!("An unexpected error occurred: {}", self);
            "an internal server error occurred".to_owned()
        } else {
            self.to_string()
        };

        (status_code, Json(json!({ "error": message }))).into_response()
    }
}
