use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use crate::core::error::{AppError, Result};
use crate::features::locations::dtos::LocationDraft;
use crate::features::locations::models::Location;

/// Persistence boundary for location readings.
///
/// Each call is a single round trip to the durable store. Failures surface as
/// [`AppError::StoreWrite`] or [`AppError::StoreRead`] and are logged once,
/// when the error is turned into a response. Nothing is retried here.
#[async_trait]
pub trait LocationStore: Send + Sync {
    /// Persist one reading. `id` and `created_at` are assigned as part of the
    /// write, and a missing `recorded_at` becomes the time of the write.
    async fn insert(&self, draft: LocationDraft) -> Result<Location>;

    /// Up to `limit` readings for `device_id`, newest `recorded_at` first,
    /// ties broken by `id` descending.
    async fn fetch_recent(&self, device_id: &str, limit: i64) -> Result<Vec<Location>>;
}

/// PostgreSQL-backed store over a shared connection pool
pub struct PgLocationStore {
    pool: PgPool,
}

impl PgLocationStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl LocationStore for PgLocationStore {
    async fn insert(&self, draft: LocationDraft) -> Result<Location> {
        let location = sqlx::query_as::<_, Location>(
            r#"
            INSERT INTO locations (id, device_id, latitude, longitude, recorded_at)
            VALUES ($1, $2, $3, $4, COALESCE($5, NOW()))
            RETURNING id, device_id, latitude, longitude, recorded_at, created_at
            "#,
        )
        .bind(Uuid::now_v7())
        .bind(&draft.device_id)
        .bind(draft.latitude)
        .bind(draft.longitude)
        .bind(draft.recorded_at)
        .fetch_one(&self.pool)
        .await
        .map_err(AppError::StoreWrite)?;

        Ok(location)
    }

    async fn fetch_recent(&self, device_id: &str, limit: i64) -> Result<Vec<Location>> {
        let locations = sqlx::query_as::<_, Location>(
            r#"
            SELECT id, device_id, latitude, longitude, recorded_at, created_at
            FROM locations
            WHERE device_id = $1
            ORDER BY recorded_at DESC, id DESC
            LIMIT $2
            "#,
        )
        .bind(device_id)
        .bind(limit)
        .fetch_all(&self.pool)
        .await
        .map_err(AppError::StoreRead)?;

        Ok(locations)
    }
}
