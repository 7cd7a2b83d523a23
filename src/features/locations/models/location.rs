use chrono::{DateTime, Utc};
use sqlx::FromRow;
use uuid::Uuid;

use crate::features::locations::dtos::LocationResponseDto;

/// Database model for a persisted location reading
#[derive(Debug, Clone, PartialEq, FromRow)]
pub struct Location {
    pub id: Uuid,
    pub device_id: Option<String>,
    pub latitude: f64,
    pub longitude: f64,
    pub recorded_at: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
}

impl From<Location> for LocationResponseDto {
    fn from(l: Location) -> Self {
        Self {
            id: l.id,
            device_id: l.device_id,
            latitude: l.latitude,
            longitude: l.longitude,
            recorded_at: l.recorded_at,
            created_at: l.created_at,
        }
    }
}
