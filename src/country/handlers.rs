use axum::{
    extract::{rejection::JsonRejection, State},
    Extension, Json,
};
use std::sync::Arc;
use tracing::{info, instrument};

use super::{
    service::CountryService,
    types::{AddCountryRequest, AddCountryResponse, DeleteCountryRequest},
};
use crate::auth::Claims;
use crate::shared::{AppError, AppState, MessageResponse};

/// HTTP handler for recording a visited country
///
/// POST /addCountry
/// Returns the id of the new record
#[instrument(name = "add_country", skip(state, claims, body))]
pub async fn add_country(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    body: Result<Json<AddCountryRequest>, JsonRejection>,
) -> Result<Json<AddCountryResponse>, AppError> {
    let Json(request) = body?;
    info!(user_id = claims.id, code = %request.code, "Adding country");

    let service = CountryService::new(
        Arc::clone(&state.country_repository),
        Arc::clone(&state.user_repository),
    );
    let response = service.add_country(&claims, request).await?;

    Ok(Json(response))
}

/// HTTP handler for removing a visited country
///
/// DELETE /deleteCountry
#[instrument(name = "delete_country", skip(state, claims, body))]
pub async fn delete_country(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    body: Result<Json<DeleteCountryRequest>, JsonRejection>,
) -> Result<Json<MessageResponse>, AppError> {
    let Json(request) = body?;
    info!(
        user_id = claims.id,
        country_id = request.country_id_to_delete,
        "Deleting country"
    );

    let service = CountryService::new(
        Arc::clone(&state.country_repository),
        Arc::clone(&state.user_repository),
    );
    let response = service.delete_country(&claims, request).await?;

    Ok(Json(response))
}
