//! Authentication middleware that validates bearer tokens on protected routes.

use axum::{
    RequestPartsExt,
    extract::{FromRef, Request, State},
    middleware::Next,
    response::{IntoResponse, Response},
};
use axum_extra::{
    TypedHeader,
    headers::{Authorization, authorization::Bearer},
};
use jsonwebtoken::DecodingKey;

use crate::{AppState, Error, auth::token::decode_token};

/// The state needed for the auth middleware.
#[derive(Clone)]
pub struct AuthState {
    /// The key for verifying presented bearer tokens.
    pub decoding_key: DecodingKey,
}

impl FromRef<AppState> for AuthState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            decoding_key: state.jwt_keys.decoding_key.clone(),
        }
    }
}

/// Middleware function that checks for a valid `Authorization: Bearer` token.
///
/// The token's claims are placed into the request and then the request
/// executed normally if the token is valid, otherwise a 401 response is
/// returned before any route handler runs.
///
/// **Note**: Route handlers can use the function argument
/// `Extension(claims): Extension<Claims>` to receive the caller's identity.
pub async fn auth_guard(State(state): State<AuthState>, request: Request, next: Next) -> Response {
    let (mut parts, body) = request.into_parts();

    let bearer = match parts
        .extract::<TypedHeader<Authorization<Bearer>>>()
        .await
    {
        Ok(TypedHeader(Authorization(bearer))) => bearer,
        Err(_) => return Error::MissingToken.into_response(),
    };

    let claims = match decode_token(bearer.token(), &state.decoding_key) {
        Ok(claims) => claims,
        Err(error) => return error.into_response(),
    };

    parts.extensions.insert(claims);

    next.run(Request::from_parts(parts, body)).await
}

#[cfg(test)]
mod auth_guard_tests {
    use axum::{Json, Router, http::StatusCode, middleware, routing::get};
    use axum_test::TestServer;
    use jsonwebtoken::{EncodingKey, Header, encode};
    use time::OffsetDateTime;

    use crate::{
        app_state::JwtKeys,
        auth::token::{Claims, encode_token},
    };

    use super::{AuthState, auth_guard};

    const TEST_PROTECTED_ROUTE: &str = "/protected";

    async fn test_handler() -> Json<&'static str> {
        Json("Hello, World!")
    }

    fn get_test_server(jwt_keys: &JwtKeys) -> TestServer {
        let state = AuthState {
            decoding_key: jwt_keys.decoding_key.clone(),
        };

        let app = Router::new()
            .route(TEST_PROTECTED_ROUTE, get(test_handler))
            .route_layer(middleware::from_fn_with_state(state, auth_guard));

        TestServer::try_new(app).expect("Could not create test server.")
    }

    #[tokio::test]
    async fn get_protected_route_with_valid_token() {
        let jwt_keys = JwtKeys::from_secret("foobar");
        let server = get_test_server(&jwt_keys);

        let token = encode_token("alice", &jwt_keys.encoding_key).unwrap();

        server
            .get(TEST_PROTECTED_ROUTE)
            .authorization_bearer(token)
            .await
            .assert_status_ok();
    }

    #[tokio::test]
    async fn get_protected_route_with_missing_header_returns_unauthorized() {
        let jwt_keys = JwtKeys::from_secret("foobar");
        let server = get_test_server(&jwt_keys);

        server
            .get(TEST_PROTECTED_ROUTE)
            .await
            .assert_status(StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn get_protected_route_with_garbage_token_returns_unauthorized() {
        let jwt_keys = JwtKeys::from_secret("foobar");
        let server = get_test_server(&jwt_keys);

        server
            .get(TEST_PROTECTED_ROUTE)
            .authorization_bearer("FOOBAR")
            .await
            .assert_status(StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn get_protected_route_with_token_signed_by_other_secret_returns_unauthorized() {
        let jwt_keys = JwtKeys::from_secret("foobar");
        let server = get_test_server(&jwt_keys);

        let other_keys = JwtKeys::from_secret("not foobar");
        let token = encode_token("alice", &other_keys.encoding_key).unwrap();

        server
            .get(TEST_PROTECTED_ROUTE)
            .authorization_bearer(token)
            .await
            .assert_status(StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn get_protected_route_with_expired_token_returns_unauthorized() {
        let jwt_keys = JwtKeys::from_secret("foobar");
        let server = get_test_server(&jwt_keys);

        let issued_at = OffsetDateTime::now_utc().unix_timestamp() as usize - 3600;
        let claims = Claims {
            sub: "alice".to_owned(),
            iat: issued_at,
            exp: issued_at + 60,
        };
        let token = encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret("foobar".as_ref()),
        )
        .unwrap();

        server
            .get(TEST_PROTECTED_ROUTE)
            .authorization_bearer(token)
            .await
            .assert_status(StatusCode::UNAUTHORIZED);
    }
}
