use actix_web::{FromRequest, HttpRequest, dev::Payload, http::header::AUTHORIZATION, web};
use chrono::{Duration, Utc};
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};
use std::future::{Ready, ready};

use crate::api::error::ApiError;

/// JWT claims carried by every request
///
/// Tokens are minted by the external auth service; this service only
/// verifies them. `test_user` marks the read-only demo account.
#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    pub user_id: i32,
    pub test_user: bool,
    pub exp: i64,
}

impl Claims {
    pub fn new(user_id: i32, test_user: bool, lifetime: Duration) -> Self {
        Self {
            user_id,
            test_user,
            exp: (Utc::now() + lifetime).timestamp(),
        }
    }
}

/// Shared signing/verification keys, derived from JWT_SECRET
#[derive(Clone)]
pub struct AuthKeys {
    encoding: EncodingKey,
    decoding: DecodingKey,
}

impl AuthKeys {
    pub fn from_secret(secret: &str) -> Self {
        Self {
            encoding: EncodingKey::from_secret(secret.as_bytes()),
            decoding: DecodingKey::from_secret(secret.as_bytes()),
        }
    }

    /// Sign a token for the given claims. Used operationally for issuing
    /// service tokens and by tests; login itself lives elsewhere.
    pub fn issue(&self, claims: &Claims) -> Result<String, jsonwebtoken::errors::Error> {
        encode(&Header::default(), claims, &self.encoding)
    }

    pub fn verify(&self, token: &str) -> Result<Claims, jsonwebtoken::errors::Error> {
        decode::<Claims>(token, &self.decoding, &Validation::default()).map(|data| data.claims)
    }
}

/// Authenticated caller, resolved from the bearer token before any
/// handler logic runs
#[derive(Clone, Debug)]
pub struct AuthUser {
    pub user_id: i32,
    pub test_user: bool,
}

impl From<Claims> for AuthUser {
    fn from(claims: Claims) -> Self {
        Self {
            user_id: claims.user_id,
            test_user: claims.test_user,
        }
    }
}

impl FromRequest for AuthUser {
    type Error = ApiError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        ready(resolve_caller(req))
    }
}

fn resolve_caller(req: &HttpRequest) -> Result<AuthUser, ApiError> {
    let keys = req
        .app_data::<web::Data<AuthKeys>>()
        .ok_or_else(|| ApiError::Unauthorized("Authentication is not configured".into()))?;

    let token = bearer_token(req)?;
    let claims = keys
        .verify(token)
        .map_err(|e| ApiError::Unauthorized(format!("Invalid token: {}", e)))?;

    Ok(AuthUser::from(claims))
}

fn bearer_token(req: &HttpRequest) -> Result<&str, ApiError> {
    let header = req
        .headers()
        .get(AUTHORIZATION)
        .ok_or_else(|| ApiError::Unauthorized("Missing Authorization header".into()))?;

    let value = header
        .to_str()
        .map_err(|_| ApiError::Unauthorized("Invalid Authorization header".into()))?;

    value
        .strip_prefix("Bearer ")
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .ok_or_else(|| ApiError::Unauthorized("Authorization header must use Bearer format".into()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::test::TestRequest;

    fn keys() -> web::Data<AuthKeys> {
        web::Data::new(AuthKeys::from_secret("test-secret"))
    }

    #[test]
    fn token_round_trips_claims() {
        let keys = AuthKeys::from_secret("test-secret");
        let token = keys
            .issue(&Claims::new(42, true, Duration::hours(1)))
            .unwrap();
        let claims = keys.verify(&token).unwrap();
        assert_eq!(claims.user_id, 42);
        assert!(claims.test_user);
    }

    #[test]
    fn rejects_token_signed_with_other_secret() {
        let other = AuthKeys::from_secret("other-secret");
        let token = other
            .issue(&Claims::new(1, false, Duration::hours(1)))
            .unwrap();
        assert!(AuthKeys::from_secret("test-secret").verify(&token).is_err());
    }

    #[actix_web::test]
    async fn extractor_resolves_bearer_token() {
        let keys = keys();
        let token = keys
            .issue(&Claims::new(7, false, Duration::hours(1)))
            .unwrap();
        let req = TestRequest::default()
            .app_data(keys)
            .insert_header((AUTHORIZATION, format!("Bearer {}", token)))
            .to_http_request();

        let user = AuthUser::from_request(&req, &mut Payload::None)
            .await
            .unwrap();
        assert_eq!(user.user_id, 7);
        assert!(!user.test_user);
    }

    #[actix_web::test]
    async fn extractor_rejects_missing_header() {
        let req = TestRequest::default().app_data(keys()).to_http_request();
        let err = AuthUser::from_request(&req, &mut Payload::None)
            .await
            .unwrap_err();
        assert!(matches!(err, ApiError::Unauthorized(_)));
    }

    #[actix_web::test]
    async fn extractor_rejects_non_bearer_scheme() {
        let req = TestRequest::default()
            .app_data(keys())
            .insert_header((AUTHORIZATION, "Basic abc"))
            .to_http_request();
        let err = AuthUser::from_request(&req, &mut Payload::None)
            .await
            .unwrap_err();
        assert!(matches!(err, ApiError::Unauthorized(_)));
    }
}
