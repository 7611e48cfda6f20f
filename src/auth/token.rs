//! Defines the bearer token claims and how to sign and verify a token.

use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};
use time::{Duration, OffsetDateTime};

use crate::Error;

/// How long a bearer token stays valid after issuance.
pub const TOKEN_DURATION: Duration = Duration::minutes(15);

/// The contents of a signed bearer token.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Claims {
    /// The username the token was issued to.
    pub sub: String,
    /// The time the token was issued as a unix timestamp.
    pub iat: usize,
    /// The expiry time of the token as a unix timestamp.
    pub exp: usize,
}

/// Sign a token for `username` that expires [TOKEN_DURATION] from now.
///
/// # Errors
/// Returns [Error::TokenCreation] if the claims could not be signed. The
/// underlying cause is logged, not returned.
pub fn encode_token(username: &str, encoding_key: &EncodingKey) -> Result<String, Error> {
    let now = OffsetDateTime::now_utc();
    let claims = Claims {
        sub: username.to_owned(),
        iat: now.unix_timestamp() as usize,
        exp: (now + TOKEN_DURATION).unix_timestamp() as usize,
    };

    encode(&Header::default(), &claims, encoding_key).map_err(|error| {
        tracing::error!("could not sign bearer token: {}", error);
        Error::TokenCreation
    })
}

/// Verify the signature and expiry of `token` and return its claims.
///
/// Issuer and audience are not part of the token contract and are not
/// checked, only the signature and the expiry are.
///
/// # Errors
/// Returns [Error::InvalidToken] if the token is malformed, mis-signed or
/// expired.
pub fn decode_token(token: &str, decoding_key: &DecodingKey) -> Result<Claims, Error> {
    decode(token, decoding_key, &Validation::default())
        .map(|token_data| token_data.claims)
        .map_err(|_| Error::InvalidToken)
}

#[cfg(test)]
mod token_tests {
    use jsonwebtoken::{EncodingKey, Header, encode};
    use time::OffsetDateTime;

    use crate::{Error, app_state::JwtKeys};

    use super::{Claims, TOKEN_DURATION, decode_token, encode_token};

    #[test]
    fn decode_token_gives_back_the_username() {
        let keys = JwtKeys::from_secret("foobar");

        let token = encode_token("alice", &keys.encoding_key).unwrap();
        let claims = decode_token(&token, &keys.decoding_key).unwrap();

        assert_eq!(claims.sub, "alice");
    }

    #[test]
    fn token_expires_fifteen_minutes_after_issuance() {
        let keys = JwtKeys::from_secret("foobar");
        let issued_at = OffsetDateTime::now_utc().unix_timestamp() as usize;

        let token = encode_token("alice", &keys.encoding_key).unwrap();
        let claims = decode_token(&token, &keys.decoding_key).unwrap();

        let expected_expiry = issued_at + TOKEN_DURATION.whole_seconds() as usize;
        assert!(
            claims.exp.abs_diff(expected_expiry) <= 1,
            "got expiry {}, want roughly {}",
            claims.exp,
            expected_expiry
        );
    }

    #[test]
    fn decode_token_rejects_token_signed_with_other_secret() {
        let signing_keys = JwtKeys::from_secret("foobar");
        let verifying_keys = JwtKeys::from_secret("not foobar");

        let token = encode_token("alice", &signing_keys.encoding_key).unwrap();

        assert_eq!(
            decode_token(&token, &verifying_keys.decoding_key),
            Err(Error::InvalidToken)
        );
    }

    #[test]
    fn decode_token_rejects_expired_token() {
        let keys = JwtKeys::from_secret("foobar");
        // Well past the default validation leeway.
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

        assert_eq!(
            decode_token(&token, &keys.decoding_key),
            Err(Error::InvalidToken)
        );
    }

    #[test]
    fn decode_token_rejects_garbage() {
        let keys = JwtKeys::from_secret("foobar");

        assert_eq!(
            decode_token("FOOBAR", &keys.decoding_key),
            Err(Error::InvalidToken)
        );
    }
}
