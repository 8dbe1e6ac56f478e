use axum::{
    extract::{rejection::JsonRejection, State},
    Extension, Json,
};
use std::sync::Arc;
use tracing::{info, instrument};

use super::{
    service::UserService,
    types::{CredentialsRequest, LoginResponse, UserDataResponse},
};
use crate::auth::Claims;
use crate::shared::{AppError, AppState, MessageResponse};

fn user_service(state: &AppState) -> UserService {
    UserService::new(
        Arc::clone(&state.user_repository),
        Arc::clone(&state.country_repository),
        state.token_config.clone(),
        state.password_hasher,
    )
}

/// HTTP handler for registering a new user
///
/// POST /register
#[instrument(name = "register", skip(state, body))]
pub async fn register(
    State(state): State<AppState>,
    body: Result<Json<CredentialsRequest>, JsonRejection>,
) -> Result<Json<MessageResponse>, AppError> {
    let Json(request) = body?;
    info!("Registering new user");

    let response = user_service(&state).register(request).await?;

    Ok(Json(response))
}

/// HTTP handler for logging in
///
/// POST /login
/// Returns a JWT token valid for the configured number of days
#[instrument(name = "login", skip(state, body))]
pub async fn login(
    State(state): State<AppState>,
    body: Result<Json<CredentialsRequest>, JsonRejection>,
) -> Result<Json<LoginResponse>, AppError> {
    let Json(request) = body?;
    info!("Logging in user");

    let response = user_service(&state).login(request).await?;

    info!(token_length = response.token.len(), "Login successful");

    Ok(Json(response))
}

/// HTTP handler for the authenticated user's data
///
/// POST /getUserData
#[instrument(name = "get_user_data", skip(state, claims))]
pub async fn get_user_data(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
) -> Result<Json<UserDataResponse>, AppError> {
    let response = user_service(&state).get_user_data(&claims).await?;

    Ok(Json(response))
}
