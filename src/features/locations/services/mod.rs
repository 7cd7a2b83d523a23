mod location_service;
mod location_store;

pub use location_service::LocationService;
pub use location_store::{LocationStore, PgLocationStore};
