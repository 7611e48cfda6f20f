//! Endpoint for reading the identity carried by the presented token.

use axum::{Extension, Json};

use crate::auth::Claims;

/// A route handler that returns the username of the authenticated user.
///
/// The claims are placed into the request by the auth middleware, so this
/// handler can only be reached with a valid token.
pub async fn get_current_user(Extension(claims): Extension<Claims>) -> Json<String> {
    Json(claims.sub)
}
