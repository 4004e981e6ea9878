use axum::{
    extract::FromRequestParts,
    http::{header, request::Parts, StatusCode},
};
use chrono::Utc;
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::config::JwtConfig;

/// Explicit session context for one authenticated visitor. Credential checks
/// happen at the external authentication gate; the engine only consumes a
/// valid token and never reads identity from ambient state.
#[derive(Debug, Clone)]
pub struct SessionContext {
    pub visitor_id: String,
    pub email: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct SessionClaims {
    pub sub: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    pub exp: i64,
}

/// Mints a session token the way the authentication gate does. Used at the
/// navigation boundary (and by the dev server to print a demo token).
pub fn issue_token(
    config: &JwtConfig,
    visitor_id: &str,
    email: Option<&str>,
) -> Result<String, jsonwebtoken::errors::Error> {
    let claims = SessionClaims {
        sub: visitor_id.to_string(),
        email: email.map(str::to_string),
        exp: (Utc::now() + chrono::Duration::hours(config.expires_in_hours)).timestamp(),
    };
    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(config.secret.as_bytes()),
    )
}

// Bearer token extractor
impl FromRequestParts<Arc<crate::AppState>> for SessionContext {
    type Rejection = StatusCode;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &Arc<crate::AppState>,
    ) -> Result<Self, Self::Rejection> {
        let auth_header = parts
            .headers
            .get(header::AUTHORIZATION)
            .and_then(|value| value.to_str().ok())
            .ok_or(StatusCode::UNAUTHORIZED)?;

        let token = auth_header
            .strip_prefix("Bearer ")
            .ok_or(StatusCode::UNAUTHORIZED)?;

        let decoded = decode::<SessionClaims>(
            token,
            &DecodingKey::from_secret(state.config.jwt.secret.as_bytes()),
            &Validation::default(),
        )
        .map_err(|_| StatusCode::UNAUTHORIZED)?;

        Ok(SessionContext {
            visitor_id: decoded.claims.sub,
            email: decoded.claims.email,
        })
    }
}
