mod location_dto;

pub use location_dto::{LocationDraft, LocationResponseDto, RecentLocationsQuery, SubmitLocationDto};
