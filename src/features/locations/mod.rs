//! Device location readings: ingestion and recent-history lookup.
//!
//! ## Endpoints
//!
//! | Method | Endpoint | Description |
//! |--------|----------|-------------|
//! | POST | `/locations` | Validate and store one reading |
//! | GET | `/locations/{deviceId}/recent` | Latest readings for a device, newest first |

pub mod dtos;
pub mod handlers;
pub mod models;
pub mod routes;
pub mod services;
pub mod validation;

pub use services::{LocationService, LocationStore, PgLocationStore};
