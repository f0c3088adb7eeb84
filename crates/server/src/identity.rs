//! Caller identity resolution.
//!
//! A request carries its identity as an HS256 JWT, either in
//! `Authorization: Bearer <token>` or in the `auth_token` cookie. The `sub`
//! claim is the user id. Anything missing or unverifiable resolves to an
//! anonymous caller; handlers and services decide what anonymous may do.

use axum::{async_trait, extract::FromRequestParts, http::{header, request::Parts, HeaderMap}};
use axum_extra::extract::cookie::CookieJar;
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header as JwtHeader, Validation};
use serde::{Deserialize, Serialize};
use std::convert::Infallible;
use uuid::Uuid;

use service::Caller;

use crate::state::ServerState;

pub const AUTH_COOKIE: &str = "auth_token";

#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String,
    pub exp: usize,
}

/// Sign a token for `user_id` valid for `ttl`. Used by operators and tests;
/// this service does not run a sign-in flow.
pub fn issue_token(secret: &str, user_id: Uuid, ttl: chrono::Duration) -> Result<String, jsonwebtoken::errors::Error> {
    let exp = (chrono::Utc::now() + ttl).timestamp().max(0) as usize;
    let claims = Claims { sub: user_id.to_string(), exp };
    encode(&JwtHeader::default(), &claims, &EncodingKey::from_secret(secret.as_bytes()))
}

fn bearer_token(headers: &HeaderMap) -> Option<String> {
    let value = headers.get(header::AUTHORIZATION)?.to_str().ok()?;
    value.strip_prefix("Bearer ").map(|t| t.trim().to_string())
}

fn cookie_token(headers: &HeaderMap) -> Option<String> {
    CookieJar::from_headers(headers)
        .get(AUTH_COOKIE)
        .map(|c| c.value().to_string())
        .filter(|v| !v.is_empty())
}

/// Resolve the caller from request headers. Never fails.
pub fn resolve_caller(headers: &HeaderMap, secret: &str) -> Caller {
    let Some(token) = bearer_token(headers).or_else(|| cookie_token(headers)) else {
        return Caller::anonymous();
    };

    let key = DecodingKey::from_secret(secret.as_bytes());
    let mut validation = Validation::new(Algorithm::HS256);
    validation.validate_exp = true;

    match decode::<Claims>(&token, &key, &validation) {
        Ok(data) => match Uuid::parse_str(&data.claims.sub) {
            Ok(id) => Caller::user(id),
            Err(e) => {
                tracing::warn!(err = %e, "token subject is not a user id; treating caller as anonymous");
                Caller::anonymous()
            }
        },
        Err(e) => {
            tracing::warn!(err = %e, "token validation failed; treating caller as anonymous");
            Caller::anonymous()
        }
    }
}

/// Extractor yielding the resolved caller (possibly anonymous).
#[derive(Debug, Clone, Copy)]
pub struct CurrentCaller(pub Caller);

#[async_trait]
impl FromRequestParts<ServerState> for CurrentCaller {
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, state: &ServerState) -> Result<Self, Self::Rejection> {
        Ok(CurrentCaller(resolve_caller(&parts.headers, &state.auth.jwt_secret)))
    }
}
