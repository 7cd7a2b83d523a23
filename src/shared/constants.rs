/// Number of readings returned by the recent-readings query when the caller
/// gives no usable limit
pub const DEFAULT_RECENT_LIMIT: i64 = 20;

/// Ceiling on the recent-readings limit
pub const MAX_RECENT_LIMIT: i64 = 100;
