//! Authentication endpoints

use axum::{extract::State, http::StatusCode, Json};

use crate::{
    error::AppResult,
    models::user::{LoginRequest, SignUpRequest, TokenResponse, User},
};

use super::{AuthenticatedUser, ValidJson};

/// Register a new user
#[utoipa::path(
    post,
    path = "/auth/signup",
    tag = "auth",
    request_body = SignUpRequest,
    responses(
        (status = 201, description = "User registered", body = TokenResponse),
        (status = 400, description = "Invalid input"),
        (status = 409, description = "Email already registered")
    )
)]
pub async fn sign_up(
    State(state): State<crate::AppState>,
    ValidJson(request): ValidJson<SignUpRequest>,
) -> AppResult<(StatusCode, Json<TokenResponse>)> {
    let token = state.services.auth.sign_up(request).await?;
    Ok((StatusCode::CREATED, Json(TokenResponse { token })))
}

/// Log in with email and password
#[utoipa::path(
    post,
    path = "/auth/login",
    tag = "auth",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Login successful", body = TokenResponse),
        (status = 401, description = "Invalid credentials")
    )
)]
pub async fn login(
    State(state): State<crate::AppState>,
    ValidJson(request): ValidJson<LoginRequest>,
) -> AppResult<Json<TokenResponse>> {
    let token = state.services.auth.login(request).await?;
    Ok(Json(TokenResponse { token }))
}

/// Get the currently authenticated user
#[utoipa::path(
    get,
    path = "/auth/me",
    tag = "auth",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Current user", body = User),
        (status = 401, description = "Not authenticated")
    )
)]
pub async fn me(AuthenticatedUser(user): AuthenticatedUser) -> Json<User> {
    Json(user)
}
