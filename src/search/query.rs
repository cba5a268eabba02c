use crate::domain::{Coordinate, SearchFilters, TypeFilter};
use crate::error::{Result, SearchError};

/// A lat/lon school request as a caller sends it, before defaults are applied.
///
/// `max_distance_km` defaults to 10 and `school_type` to "all".
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SchoolQuery {
    pub lat: Option<f64>,
    pub lon: Option<f64>,
    pub max_distance_km: Option<f64>,
    pub school_type: Option<String>,
}

impl SchoolQuery {
    /// Validate the request and split it into an origin and filters.
    pub fn resolve(&self) -> Result<(Coordinate, SearchFilters)> {
        let (Some(lat), Some(lon)) = (self.lat, self.lon) else {
            return Err(SearchError::invalid_filter(
                "latitude and longitude are required",
            ));
        };
        let origin = Coordinate::new(lat, lon)?;

        let school_type = match self.school_type.as_deref() {
            Some(s) => s.parse()?,
            None => TypeFilter::All,
        };
        let filters = SearchFilters::new(
            self.max_distance_km
                .unwrap_or(SearchFilters::DEFAULT_MAX_DISTANCE_KM),
            school_type,
        );
        filters.validate()?;

        Ok((origin, filters))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_defaults() {
        let query = SchoolQuery {
            lat: Some(40.0),
            lon: Some(-75.0),
            ..SchoolQuery::default()
        };
        let (origin, filters) = query.resolve().unwrap();
        assert_eq!(origin, Coordinate::new(40.0, -75.0).unwrap());
        assert_eq!(filters, SearchFilters::default());
    }

    #[test]
    fn test_resolve_explicit_values() {
        let query = SchoolQuery {
            lat: Some(51.5),
            lon: Some(-0.12),
            max_distance_km: Some(3.5),
            school_type: Some("High School/Secondary School".to_string()),
        };
        let (_, filters) = query.resolve().unwrap();
        assert_eq!(filters.max_distance_km, 3.5);
        assert_eq!(filters.school_type, TypeFilter::HighSchool);
    }

    #[test]
    fn test_resolve_rejects_bad_input() {
        let missing = SchoolQuery {
            lon: Some(-75.0),
            ..SchoolQuery::default()
        };
        assert!(matches!(missing.resolve(), Err(SearchError::InvalidFilter(_))));

        let zero = SchoolQuery {
            lat: Some(40.0),
            lon: Some(-75.0),
            max_distance_km: Some(0.0),
            ..SchoolQuery::default()
        };
        assert!(matches!(zero.resolve(), Err(SearchError::InvalidFilter(_))));

        let bad_type = SchoolQuery {
            lat: Some(40.0),
            lon: Some(-75.0),
            school_type: Some("daycare".to_string()),
            ..SchoolQuery::default()
        };
        assert!(matches!(bad_type.resolve(), Err(SearchError::InvalidFilter(_))));

        let out_of_range = SchoolQuery {
            lat: Some(-91.0),
            lon: Some(-75.0),
            ..SchoolQuery::default()
        };
        assert!(matches!(
            out_of_range.resolve(),
            Err(SearchError::InvalidFilter(_))
        ));
    }
}
