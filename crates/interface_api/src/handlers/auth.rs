//! Login handler

use axum::{extract::State, Json};
use validator::Validate;

use crate::auth::create_token;
use crate::dto::auth::{LoginRequest, LoginResponse};
use crate::{error::ApiError, AppState};

/// Logs in with identifier or email, password and role; returns a bearer token
pub async fn login(
    State(state): State<AppState>,
    Json(request): Json<LoginRequest>,
) -> Result<Json<LoginResponse>, ApiError> {
    request.validate()?;

    let user = state.service.login(&request.into()).await?;
    let token = create_token(&user, &state.config.jwt_secret, state.config.jwt_expiration_secs)?;

    Ok(Json(LoginResponse {
        token,
        token_type: "Bearer".to_string(),
        expires_in: state.config.jwt_expiration_secs,
        user: user.into(),
    }))
}
