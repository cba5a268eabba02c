pub mod distance;

pub use distance::{EARTH_RADIUS_KM, distance_km};
