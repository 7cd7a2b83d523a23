use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};

use crate::core::error::Result;
use crate::core::extractor::{AppJson, AppQuery};
use crate::features::locations::dtos::{
    LocationResponseDto, RecentLocationsQuery, SubmitLocationDto,
};
use crate::features::locations::services::LocationService;
use crate::shared::types::{ApiResponse, Meta};

/// Submit a location reading
///
/// `recordedAt` is optional; when omitted the server time of the write is used.
#[utoipa::path(
    post,
    path = "/locations",
    request_body = SubmitLocationDto,
    responses(
        (status = 201, description = "Location saved", body = ApiResponse<LocationResponseDto>),
        (status = 400, description = "Validation error"),
        (status = 500, description = "Failed to save location")
    ),
    tag = "locations"
)]
pub async fn submit_location(
    State(service): State<Arc<LocationService>>,
    AppJson(dto): AppJson<SubmitLocationDto>,
) -> Result<(StatusCode, Json<ApiResponse<LocationResponseDto>>)> {
    let location = service.submit(dto).await?;

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success(
            Some(location),
            Some("Location saved".to_string()),
            None,
        )),
    ))
}

/// Get the most recent readings for a device
#[utoipa::path(
    get,
    path = "/locations/{deviceId}/recent",
    params(
        ("deviceId" = String, Path, description = "Device identifier"),
        RecentLocationsQuery
    ),
    responses(
        (status = 200, description = "Readings, newest first", body = ApiResponse<Vec<LocationResponseDto>>),
        (status = 400, description = "Malformed query string"),
        (status = 500, description = "Failed to fetch locations")
    ),
    tag = "locations"
)]
pub async fn get_recent_locations(
    State(service): State<Arc<LocationService>>,
    Path(device_id): Path<String>,
    AppQuery(query): AppQuery<RecentLocationsQuery>,
) -> Result<Json<ApiResponse<Vec<LocationResponseDto>>>> {
    let locations = service
        .recent(&device_id, query.limit.as_deref())
        .await?;
    let total = locations.len() as i64;

    Ok(Json(ApiResponse::success(
        Some(locations),
        None,
        Some(Meta { total }),
    )))
}
