use serde::Serialize;

use crate::error::{Result, SearchError};

/// A WGS84 point. Latitude is within [-90, 90], longitude within [-180, 180].
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Coordinate {
    pub lat: f64,
    pub lon: f64,
}

impl Coordinate {
    /// Build a coordinate, rejecting non-finite or out-of-range values.
    pub fn new(lat: f64, lon: f64) -> Result<Self> {
        if !lat.is_finite() || !(-90.0..=90.0).contains(&lat) {
            return Err(SearchError::invalid_filter(format!(
                "latitude {lat} is outside [-90, 90]"
            )));
        }
        if !lon.is_finite() || !(-180.0..=180.0).contains(&lon) {
            return Err(SearchError::invalid_filter(format!(
                "longitude {lon} is outside [-180, 180]"
            )));
        }
        Ok(Self { lat, lon })
    }

    /// Link to this point on Google Maps
    pub fn maps_url(&self) -> String {
        format!("https://www.google.com/maps?q={},{}", self.lat, self.lon)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_coordinate_bounds() {
        assert!(Coordinate::new(90.0, 180.0).is_ok());
        assert!(Coordinate::new(-90.0, -180.0).is_ok());
        assert!(matches!(
            Coordinate::new(90.5, 0.0),
            Err(SearchError::InvalidFilter(_))
        ));
        assert!(matches!(
            Coordinate::new(0.0, -180.1),
            Err(SearchError::InvalidFilter(_))
        ));
        assert!(Coordinate::new(f64::NAN, 0.0).is_err());
    }

    #[test]
    fn test_maps_url() {
        let c = Coordinate::new(51.5074, -0.1278).unwrap();
        assert_eq!(c.maps_url(), "https://www.google.com/maps?q=51.5074,-0.1278");
    }
}
