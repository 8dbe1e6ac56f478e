use axum::{
    middleware,
    routing::{delete, get, post},
    Json, Router,
};
use serde_json::{json, Value};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::{auth, country, shared::AppState, user};

/// Builds the full application router.
///
/// `/register` and `/login` are public; everything else sits behind `jwt_auth`.
pub fn create_router(state: AppState) -> Router {
    let protected = Router::new()
        .route("/getUserData", post(user::get_user_data))
        .route("/addCountry", post(country::add_country))
        .route("/deleteCountry", delete(country::delete_country))
        .route_layer(middleware::from_fn_with_state(state.clone(), auth::jwt_auth));

    Router::new()
        .route("/", get(health))
        .route("/register", post(user::register))
        .route("/login", post(user::login))
        .merge(protected)
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn health() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}
