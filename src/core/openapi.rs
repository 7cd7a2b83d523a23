use utoipa::{Modify, OpenApi};

use crate::features::health;
use crate::features::locations::{dtos as locations_dtos, handlers as locations_handlers};
use crate::shared::types::{ApiResponse, Meta};

#[derive(OpenApi)]
#[openapi(
    paths(
        // Health
        health::health_check,
        // Locations
        locations_handlers::submit_location,
        locations_handlers::get_recent_locations,
    ),
    components(
        schemas(
            // Shared
            Meta,
            // Health
            health::HealthResponseDto,
            // Locations
            locations_dtos::SubmitLocationDto,
            locations_dtos::LocationResponseDto,
            ApiResponse<locations_dtos::LocationResponseDto>,
            ApiResponse<Vec<locations_dtos::LocationResponseDto>>,
        )
    ),
    tags(
        (name = "health", description = "Liveness check"),
        (name = "locations", description = "Device location ingestion and lookup"),
    ),
    info(
        title = "Geoping API",
        version = "0.1.0",
        description = "Device location ingestion API",
    )
)]
pub struct ApiDoc;

/// Modifier to override OpenAPI info from config
pub struct SwaggerInfoModifier {
    pub title: String,
    pub version: String,
    pub description: String,
}

impl Modify for SwaggerInfoModifier {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        openapi.info.title = self.title.clone();
        openapi.info.version = self.version.clone();
        openapi.info.description = Some(self.description.clone());
    }
}
