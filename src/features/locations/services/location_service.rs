use std::sync::Arc;

use crate::core::error::Result;
use crate::features::locations::dtos::{LocationResponseDto, SubmitLocationDto};
use crate::features::locations::services::LocationStore;
use crate::features::locations::validation::validate_submission;
use crate::shared::constants::{DEFAULT_RECENT_LIMIT, MAX_RECENT_LIMIT};

/// Validates submissions and hands them to the store
pub struct LocationService {
    store: Arc<dyn LocationStore>,
}

impl LocationService {
    pub fn new(store: Arc<dyn LocationStore>) -> Self {
        Self { store }
    }

    /// Validate and persist one reading
    pub async fn submit(&self, dto: SubmitLocationDto) -> Result<LocationResponseDto> {
        let draft = validate_submission(dto)?;
        let location = self.store.insert(draft).await?;

        tracing::info!(
            "Location saved: id={}, device_id={:?}",
            location.id,
            location.device_id
        );

        Ok(location.into())
    }

    /// Most recent readings for a device, newest first
    pub async fn recent(
        &self,
        device_id: &str,
        raw_limit: Option<&str>,
    ) -> Result<Vec<LocationResponseDto>> {
        let limit = resolve_limit(raw_limit);
        let locations = self.store.fetch_recent(device_id, limit).await?;

        Ok(locations.into_iter().map(Into::into).collect())
    }
}

/// Interpret the `limit` query value.
///
/// Leading integer digits are used (`"3abc"` is 3). Missing, non-numeric and
/// non-positive values give the default; large values are clamped.
pub fn resolve_limit(raw: Option<&str>) -> i64 {
    raw.and_then(leading_integer)
        .filter(|n| *n > 0)
        .map(|n| n.min(MAX_RECENT_LIMIT))
        .unwrap_or(DEFAULT_RECENT_LIMIT)
}

fn leading_integer(raw: &str) -> Option<i64> {
    let s = raw.trim_start();
    let digits_start = usize::from(s.starts_with(['+', '-']));
    let digits_len = s[digits_start..]
        .bytes()
        .take_while(u8::is_ascii_digit)
        .count();

    if digits_len == 0 {
        return None;
    }

    match s[..digits_start + digits_len].parse::<i64>() {
        Ok(n) => Some(n),
        // Too many digits for i64; the sign decides which side of the range
        Err(_) if s.starts_with('-') => Some(i64::MIN),
        Err(_) => Some(i64::MAX),
    }
}
