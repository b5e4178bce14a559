//! Admin session verification.
//!
//! Back-office users carry a signed session token (HS256 JWT) either in the
//! admin session cookie or as a bearer token. Only a token that verifies
//! against the configured secret, has not expired and carries `role: "admin"`
//! grants [`AccessLevel::Admin`]. Anything else, including a missing or broken
//! token, is treated as a public caller; it never fails the request.

use axum::{
    async_trait,
    extract::FromRequestParts,
    http::{header, request::Parts, HeaderMap},
};
use jsonwebtoken::{decode, Algorithm, DecodingKey, Validation};
use serde::{Deserialize, Serialize};
use std::convert::Infallible;

use crate::{config::AdminConfig, db::products::AccessLevel, state::AppState};

const ADMIN_ROLE: &str = "admin";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionClaims {
    pub sub: String,
    pub role: String,
    pub exp: u64,
}

/// Verifies admin session tokens.
#[derive(Clone)]
pub struct AdminSessionVerifier {
    key: Option<DecodingKey>,
    cookie_name: String,
}

impl AdminSessionVerifier {
    pub fn new(config: &AdminConfig) -> Self {
        let key = config
            .session_secret
            .as_deref()
            .filter(|secret| !secret.is_empty())
            .map(|secret| DecodingKey::from_secret(secret.as_bytes()));
        if key.is_none() {
            tracing::info!("No admin session secret configured; admin page-size cap disabled");
        }
        Self {
            key,
            cookie_name: config.session_cookie.clone(),
        }
    }

    pub fn enabled(&self) -> bool {
        self.key.is_some()
    }

    /// Decide the caller's access level from request headers.
    pub fn access_level(&self, headers: &HeaderMap) -> AccessLevel {
        let Some(key) = &self.key else {
            return AccessLevel::Public;
        };
        let Some(token) = self.token_from_headers(headers) else {
            return AccessLevel::Public;
        };

        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = 30;
        validation.set_required_spec_claims(&["exp", "sub"]);

        match decode::<SessionClaims>(&token, key, &validation) {
            Ok(data) if data.claims.role == ADMIN_ROLE => {
                tracing::debug!(subject = %data.claims.sub, "Verified admin session");
                AccessLevel::Admin
            }
            Ok(data) => {
                tracing::debug!(subject = %data.claims.sub, role = %data.claims.role, "Session without admin role");
                AccessLevel::Public
            }
            Err(e) => {
                tracing::debug!(error = %e, "Rejected admin session token");
                AccessLevel::Public
            }
        }
    }

    fn token_from_headers(&self, headers: &HeaderMap) -> Option<String> {
        if let Some(token) = cookie_value(headers, &self.cookie_name) {
            return Some(token);
        }

        let authz = headers.get(header::AUTHORIZATION)?.to_str().ok()?;
        authz
            .strip_prefix("Bearer ")
            .or_else(|| authz.strip_prefix("bearer "))
            .map(|t| t.trim().to_string())
            .filter(|t| !t.is_empty())
    }
}

/// Find a cookie by name across all `Cookie` headers.
fn cookie_value(headers: &HeaderMap, name: &str) -> Option<String> {
    headers
        .get_all(header::COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .flat_map(|value| value.split(';'))
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(key, _)| *key == name)
        .map(|(_, value)| value.trim().to_string())
        .filter(|value| !value.is_empty())
}

#[async_trait]
impl FromRequestParts<AppState> for AccessLevel {
    type Rejection = Infallible;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        Ok(state.admin_sessions.access_level(&parts.headers))
    }
}
