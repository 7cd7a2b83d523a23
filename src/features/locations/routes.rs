use std::sync::Arc;

use axum::{
    routing::{get, post},
    Router,
};

use crate::features::locations::handlers;
use crate::features::locations::services::LocationService;

/// Create routes for the locations feature
pub fn routes(service: Arc<LocationService>) -> Router {
    Router::new()
        .route("/locations", post(handlers::submit_location))
        .route(
            "/locations/{device_id}/recent",
            get(handlers::get_recent_locations),
        )
        .with_state(service)
}
