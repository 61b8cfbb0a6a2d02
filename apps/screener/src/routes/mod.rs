pub mod health;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};

use crate::screening::handlers;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    let upload_limit = state.config.max_upload_bytes;

    Router::new()
        .route("/health", get(health::health_handler))
        .route(
            "/api/v1/screenings",
            post(handlers::handle_create_screening).layer(DefaultBodyLimit::max(upload_limit)),
        )
        .route(
            "/api/v1/offer-letters/:file_name",
            get(handlers::handle_download_offer_letter),
        )
        .with_state(state)
}
