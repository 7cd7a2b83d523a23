//! In-process stand-ins for the durable store, used by unit and handler tests.

#[cfg(test)]
use std::sync::Mutex;

#[cfg(test)]
use async_trait::async_trait;
#[cfg(test)]
use chrono::Utc;
#[cfg(test)]
use uuid::Uuid;

#[cfg(test)]
use crate::core::error::{AppError, Result};
#[cfg(test)]
use crate::features::locations::dtos::LocationDraft;
#[cfg(test)]
use crate::features::locations::models::Location;
#[cfg(test)]
use crate::features::locations::services::LocationStore;

/// Vec-backed store with the same ordering rules as the Postgres one.
/// Ids increase with every insert, mirroring time-ordered UUIDs.
#[cfg(test)]
#[derive(Default)]
pub struct InMemoryLocationStore {
    rows: Mutex<Vec<Location>>,
}

#[cfg(test)]
impl InMemoryLocationStore {
    pub fn len(&self) -> usize {
        self.rows.lock().unwrap().len()
    }
}

#[cfg(test)]
#[async_trait]
impl LocationStore for InMemoryLocationStore {
    async fn insert(&self, draft: LocationDraft) -> Result<Location> {
        let mut rows = self.rows.lock().unwrap();
        let now = Utc::now();
        let location = Location {
            id: Uuid::from_u128(rows.len() as u128 + 1),
            device_id: draft.device_id,
            latitude: draft.latitude,
            longitude: draft.longitude,
            recorded_at: draft.recorded_at.unwrap_or(now),
            created_at: now,
        };
        rows.push(location.clone());
        Ok(location)
    }

    async fn fetch_recent(&self, device_id: &str, limit: i64) -> Result<Vec<Location>> {
        let mut matches: Vec<Location> = self
            .rows
            .lock()
            .unwrap()
            .iter()
            .filter(|l| l.device_id.as_deref() == Some(device_id))
            .cloned()
            .collect();

        matches.sort_by(|a, b| {
            b.recorded_at
                .cmp(&a.recorded_at)
                .then_with(|| b.id.cmp(&a.id))
        });
        matches.truncate(usize::try_from(limit).unwrap_or(0));
        Ok(matches)
    }
}

/// Store whose every call fails as if the pool timed out
#[cfg(test)]
pub struct FailingLocationStore;

#[cfg(test)]
#[async_trait]
impl LocationStore for FailingLocationStore {
    async fn insert(&self, _draft: LocationDraft) -> Result<Location> {
        Err(AppError::StoreWrite(sqlx::Error::PoolTimedOut))
    }

    async fn fetch_recent(&self, _device_id: &str, _limit: i64) -> Result<Vec<Location>> {
        Err(AppError::StoreRead(sqlx::Error::PoolTimedOut))
    }
}
