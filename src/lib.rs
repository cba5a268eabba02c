//! schoolscout - Find schools near an address using OpenStreetMap data

pub mod api;
pub mod config;
pub mod domain;
pub mod error;
pub mod geometry;
pub mod osm;
pub mod report;
pub mod search;

pub use error::SearchError;
pub use search::{ProximitySearch, SchoolQuery, SearchResults};
