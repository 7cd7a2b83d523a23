use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;

/// Request DTO for submitting a reading.
///
/// Fields stay untyped here so the validator can report which field is wrong
/// and how, instead of a generic deserialization error. Unknown fields are
/// dropped.
#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SubmitLocationDto {
    /// Optional identifier of the reporting device
    #[serde(default)]
    #[schema(value_type = Option<String>, example = "dev1")]
    pub device_id: Option<Value>,

    /// Latitude in degrees, -90 to 90
    #[serde(default)]
    #[schema(value_type = f64, example = 48.8566)]
    pub latitude: Option<Value>,

    /// Longitude in degrees, -180 to 180
    #[serde(default)]
    #[schema(value_type = f64, example = 2.3522)]
    pub longitude: Option<Value>,

    /// When the reading was taken (ISO 8601); defaults to server time
    #[serde(default)]
    #[schema(value_type = Option<String>, format = DateTime, example = "2025-01-15T10:30:00Z")]
    pub recorded_at: Option<Value>,
}

/// A reading after validation, before the store assigns `id` and `created_at`
#[derive(Debug, Clone, PartialEq)]
pub struct LocationDraft {
    pub device_id: Option<String>,
    pub latitude: f64,
    pub longitude: f64,
    pub recorded_at: Option<DateTime<Utc>>,
}

/// Response DTO for a persisted reading
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct LocationResponseDto {
    pub id: Uuid,
    pub device_id: Option<String>,
    pub latitude: f64,
    pub longitude: f64,
    pub recorded_at: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
}

/// Query parameters for the recent readings endpoint
#[derive(Debug, Clone, Default, Deserialize, IntoParams)]
pub struct RecentLocationsQuery {
    /// Maximum number of readings (default: 20, max: 100). Non-numeric or
    /// non-positive values fall back to the default.
    #[param(value_type = Option<i64>, example = 20)]
    pub limit: Option<String>,
}
