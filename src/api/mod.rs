//! API handlers for Bookshelf REST endpoints

pub mod auth;
pub mod books;
pub mod health;
pub mod openapi;

use axum::{
    async_trait,
    extract::{FromRequest, FromRequestParts},
    http::{header::AUTHORIZATION, request::Parts},
};

use crate::{error::AppError, models::user::User, AppState};

/// JSON body extractor rejecting malformed payloads as bad requests.
///
/// Axum's default `Json` rejection answers 422 for body-shape errors; the
/// API contract requires 400 for any malformed body.
#[derive(FromRequest)]
#[from_request(via(axum::Json), rejection(AppError))]
pub struct ValidJson<T>(pub T);

/// Extractor for the authenticated user behind a bearer token.
///
/// Verifies the token signature and expiry, then resolves the embedded
/// identifier to a user record. Any failure rejects the request as
/// unauthorized before handler code runs.
pub struct AuthenticatedUser(pub User);

#[async_trait]
impl FromRequestParts<AppState> for AuthenticatedUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let auth_header = parts
            .headers
            .get(AUTHORIZATION)
            .and_then(|value| value.to_str().ok())
            .ok_or_else(|| AppError::Authentication("Missing authorization header".to_string()))?;

        let token = auth_header
            .strip_prefix("Bearer ")
            .ok_or_else(|| {
                AppError::Authentication("Invalid authorization header format".to_string())
            })?;

        let claims = crate::models::user::UserClaims::from_token(
            token,
            &state.config.auth.jwt_secret,
        )
        .map_err(|e| AppError::Authentication(e.to_string()))?;

        let user = state.services.auth.resolve_claims(&claims).await?;

        Ok(AuthenticatedUser(user))
    }
}
