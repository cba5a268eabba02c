//! Proximity search: geocode an address, query schools around it, then
//! annotate, filter and order the results.

pub mod query;

pub use query::SchoolQuery;

use crate::api::{GeocodeCandidate, Geocoder, SchoolFinder};
use crate::domain::{Coordinate, EnrichedSchoolRecord, SchoolRecord, SchoolType, SearchFilters};
use crate::error::{Result, SearchError};
use crate::geometry::distance_km;

/// Outcome of a search by address
#[derive(Debug, Clone)]
pub struct SearchResults {
    /// Geocoded origin of the search
    pub origin: GeocodeCandidate,
    /// Matching schools, nearest first
    pub schools: Vec<EnrichedSchoolRecord>,
}

/// The search pipeline over an injected geocoder and school finder.
///
/// Holds no mutable state; one instance can serve any number of searches.
pub struct ProximitySearch<G, F> {
    geocoder: G,
    finder: F,
}

impl<G: Geocoder, F: SchoolFinder> ProximitySearch<G, F> {
    pub fn new(geocoder: G, finder: F) -> Self {
        Self { geocoder, finder }
    }

    /// Geocode an address without filtering the candidates.
    ///
    /// # Arguments
    /// * `address` - Free-text address (e.g., "Philadelphia")
    ///
    /// # Returns
    /// * `Ok(candidates)` - Every geocoder match in upstream order, possibly empty
    /// * `Err(UpstreamUnavailable)` - If the geocoder could not be reached or decoded
    pub fn geocode(&self, address: &str) -> Result<Vec<GeocodeCandidate>> {
        self.geocoder
            .geocode(address)
            .map_err(|e| SearchError::upstream(self.geocoder.name(), e))
    }

    /// First geocoder candidate for `address`.
    pub fn locate(&self, address: &str) -> Result<GeocodeCandidate> {
        self.geocode(address)?
            .into_iter()
            .next()
            .ok_or_else(|| SearchError::AddressNotFound {
                address: address.to_string(),
            })
    }

    /// Find schools around a known point.
    ///
    /// # Arguments
    /// * `origin` - Search center
    /// * `filters` - Maximum distance in km and school type
    ///
    /// # Returns
    /// * `Ok(schools)` - Matching schools, nearest first
    /// * `Err(InvalidFilter)` - If the distance is not positive; nothing is fetched
    /// * `Err(UpstreamUnavailable)` - If the school finder failed
    pub fn schools_near(
        &self,
        origin: Coordinate,
        filters: &SearchFilters,
    ) -> Result<Vec<EnrichedSchoolRecord>> {
        filters.validate()?;

        let records = self
            .finder
            .find_schools(origin, filters.radius_m())
            .map_err(|e| SearchError::upstream(self.finder.name(), e))?;

        Ok(enrich(origin, records, filters))
    }

    /// Find schools for a lat/lon request, applying the 10 km / "all" defaults.
    ///
    /// # Returns
    /// * `Err(InvalidFilter)` - If lat/lon are missing or out of range, the
    ///   distance is not positive, or the type is unknown
    pub fn schools(&self, query: &SchoolQuery) -> Result<Vec<EnrichedSchoolRecord>> {
        let (origin, filters) = query.resolve()?;
        self.schools_near(origin, &filters)
    }

    /// Geocode an address and find schools around its first match.
    ///
    /// Filters are checked before any network call.
    ///
    /// # Arguments
    /// * `address` - Free-text address
    /// * `filters` - Maximum distance in km and school type
    ///
    /// # Returns
    /// * `Ok(SearchResults)` - The origin used plus matching schools, nearest first
    /// * `Err(InvalidFilter)` - If `filters` are invalid
    /// * `Err(AddressNotFound)` - If the geocoder had no match; no school query is made
    /// * `Err(UpstreamUnavailable)` - If either collaborator failed
    pub fn search(&self, address: &str, filters: &SearchFilters) -> Result<SearchResults> {
        filters.validate()?;

        let origin = self.locate(address)?;
        tracing::debug!(
            "Search origin for {:?}: ({:.5}, {:.5})",
            address,
            origin.coordinate.lat,
            origin.coordinate.lon
        );

        let schools = self.schools_near(origin.coordinate, filters)?;
        Ok(SearchResults { origin, schools })
    }
}

/// Annotate records with distance and type, apply `filters`, and order them
/// nearest first. Equal distances keep their upstream order.
pub fn enrich(
    origin: Coordinate,
    records: Vec<SchoolRecord>,
    filters: &SearchFilters,
) -> Vec<EnrichedSchoolRecord> {
    let mut schools: Vec<EnrichedSchoolRecord> = records
        .into_iter()
        .map(|school| {
            let distance_km = distance_km(origin, school.coordinate);
            let school_type = SchoolType::from_name(school.name.as_deref());
            EnrichedSchoolRecord {
                school,
                distance_km,
                school_type,
            }
        })
        .filter(|s| s.distance_km <= filters.max_distance_km)
        .filter(|s| filters.school_type.matches(s.school_type))
        .collect();

    schools.sort_by(|a, b| a.distance_km.total_cmp(&b.distance_km));
    schools
}
