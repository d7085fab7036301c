use std::sync::Arc;

use axum::RequestPartsExt;
use axum::extract::{FromRef, FromRequestParts};
use axum::http::request::Parts;
use axum_extra::TypedHeader;
use headers::{Authorization, authorization::Basic};
use subtle::ConstantTimeEq;
use tracing::warn;

use crate::error::CatalogError;

/// The single username/password pair accepted by the service.
#[derive(Clone)]
pub struct BasicCredentials {
    username: String,
    password: String,
}

impl BasicCredentials {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }

    /// Constant-time check of both fields. Both comparisons always run.
    pub fn verify(&self, username: &str, password: &str) -> bool {
        let user_ok = username.as_bytes().ct_eq(self.username.as_bytes());
        let pass_ok = password.as_bytes().ct_eq(self.password.as_bytes());
        bool::from(user_ok & pass_ok)
    }
}

/// Ensure the inbound request carries the configured Basic credentials.
/// Rejects with 401 and `WWW-Authenticate: Basic` otherwise.
#[derive(Debug, Clone, Copy)]
pub struct RequireBasicAuth;

impl<S> FromRequestParts<S> for RequireBasicAuth
where
    S: Send + Sync,
    Arc<BasicCredentials>: FromRef<S>,
{
    type Rejection = CatalogError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let expected = Arc::<BasicCredentials>::from_ref(state);

        let Ok(TypedHeader(Authorization(basic))) =
            parts.extract::<TypedHeader<Authorization<Basic>>>().await
        else {
            warn!(path = %parts.uri.path(), "request without basic credentials");
            return Err(CatalogError::Unauthorized);
        };

        if !expected.verify(basic.username(), basic.password()) {
            warn!(
                path = %parts.uri.path(),
                username = %basic.username(),
                "basic credentials rejected"
            );
            return Err(CatalogError::Unauthorized);
        }
        Ok(Self)
    }
}
