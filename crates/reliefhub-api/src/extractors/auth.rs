//! `AuthUser` extractor — the identity and role resolver.
//!
//! Pulls the bearer JWT from the Authorization header, validates it, loads
//! the user row, and injects the request context. The role comes from the
//! loaded row, not from the token, so role changes and deactivations take
//! effect on the next request.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;

use reliefhub_core::error::AppError;
use reliefhub_service::context::RequestContext;

use crate::state::AppState;

/// Extracted authenticated user context available in handlers.
#[derive(Debug, Clone)]
pub struct AuthUser(pub RequestContext);

impl std::ops::Deref for AuthUser {
    type Target = RequestContext;
    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl FromRequestParts<AppState> for AuthUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let auth_header = parts
            .headers
            .get("authorization")
            .and_then(|v| v.to_str().ok())
            .ok_or_else(|| AppError::authentication("Missing Authorization header"))?;

        let token = auth_header
            .strip_prefix("Bearer ")
            .ok_or_else(|| AppError::authentication("Invalid Authorization header format"))?;

        let claims = state.jwt_decoder.decode(token)?;

        let user = state
            .users
            .find_by_id(claims.user_id())
            .await?
            .ok_or_else(|| AppError::authentication("Not authorized, user not found"))?;

        if !user.is_active {
            return Err(AppError::account_disabled("Account is deactivated"));
        }

        Ok(AuthUser(RequestContext::for_user(&user)))
    }
}
