use chrono::Utc;
use jsonwebtoken::{
    Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode, errors::ErrorKind,
};

use super::Claims;
use crate::services::ServiceError;

#[derive(Clone)]
pub struct JwtKeys {
    pub enc: EncodingKey,
    pub dec: DecodingKey,
}

impl JwtKeys {
    pub fn from_secret(secret: &[u8]) -> Self {
        Self {
            enc: EncodingKey::from_secret(secret),
            dec: DecodingKey::from_secret(secret),
        }
    }
}

pub fn now_unix() -> u64 {
    u64::try_from(Utc::now().timestamp()).unwrap_or_default()
}

pub fn make_claims(user_id: i32, email: &str, ttl_secs: u64) -> Claims {
    let iat = now_unix();
    Claims {
        user_id,
        email: email.to_string(),
        iat,
        exp: iat + ttl_secs,
    }
}

pub fn encode_token(keys: &JwtKeys, claims: &Claims) -> Result<String, ServiceError> {
    let mut header = Header::new(Algorithm::HS256);
    header.typ = Some("JWT".into());

    encode(&header, claims, &keys.enc)
        .map_err(|err| ServiceError::internal(format!("Token encoding failed: {err}")))
}

/// Checks signature and expiry. Expiry is reported separately from every
/// other failure so clients can tell "log in again" apart from "bad token".
pub fn decode_token(keys: &JwtKeys, token: &str) -> Result<Claims, ServiceError> {
    let mut validation = Validation::new(Algorithm::HS256);
    validation.validate_exp = true;
    validation.leeway = 0;

    decode::<Claims>(token, &keys.dec, &validation)
        .map(|data| data.claims)
        .map_err(|err| match err.kind() {
            ErrorKind::ExpiredSignature => ServiceError::TokenExpired,
            _ => ServiceError::TokenInvalid,
        })
}

#[cfg(test)]
mod tests {
    use super::{JwtKeys, decode_token, encode_token, make_claims, now_unix};
    use crate::{auth::Claims, services::ServiceError};

    #[test]
    fn makes_claims_with_expected_subject_and_ttl() {
        let claims = make_claims(7, "a@b.com", 60);

        assert_eq!(claims.user_id, 7);
        assert_eq!(claims.email, "a@b.com");
        assert_eq!(claims.exp.saturating_sub(claims.iat), 60);
    }

    #[test]
    fn token_round_trips_with_same_secret() {
        let keys = JwtKeys::from_secret(b"unit-test-secret");
        let claims = make_claims(7, "a@b.com", 600);
        let token = encode_token(&keys, &claims).expect("token should encode");

        let decoded = decode_token(&keys, &token).expect("token should decode");

        assert_eq!(decoded, claims);
    }

    #[test]
    fn expired_token_is_reported_as_expired() {
        let keys = JwtKeys::from_secret(b"unit-test-secret");
        let issued = now_unix() - 7200;
        let claims = Claims {
            user_id: 7,
            email: "a@b.com".to_string(),
            iat: issued,
            exp: issued + 60,
        };
        let token = encode_token(&keys, &claims).expect("token should encode");

        let err = decode_token(&keys, &token).expect_err("token should be expired");

        assert!(matches!(err, ServiceError::TokenExpired));
        assert_eq!(err.to_string(), "Token has expired");
    }

    #[test]
    fn token_just_past_expiry_is_rejected() {
        let keys = JwtKeys::from_secret(b"unit-test-secret");
        let now = now_unix();
        let claims = Claims {
            user_id: 7,
            email: "a@b.com".to_string(),
            iat: now - 600,
            exp: now - 30,
        };
        let token = encode_token(&keys, &claims).expect("token should encode");

        let err = decode_token(&keys, &token).expect_err("no clock leeway is allowed");

        assert!(matches!(err, ServiceError::TokenExpired));
    }

    #[test]
    fn foreign_signature_and_garbage_are_invalid() {
        let claims = make_claims(7, "a@b.com", 600);
        let token = encode_token(&JwtKeys::from_secret(b"secret-a"), &claims)
            .expect("token should encode");
        let keys = JwtKeys::from_secret(b"secret-b");

        let wrong_secret = decode_token(&keys, &token).expect_err("signature should not match");
        let garbage = decode_token(&keys, "not-a-jwt").expect_err("garbage should not decode");

        assert!(matches!(wrong_secret, ServiceError::TokenInvalid));
        assert!(matches!(garbage, ServiceError::TokenInvalid));
        assert_eq!(garbage.to_string(), "Invalid token");
    }
}
