use anyhow::{Context, Result, bail};
use serde::Deserialize;
use std::collections::BTreeMap;

use super::SchoolFinder;
use crate::domain::{Coordinate, SchoolRecord};
use crate::osm::parse_schools;

/// Raw Overpass API response
#[derive(Debug, Deserialize)]
pub struct OverpassResponse {
    pub elements: Vec<Element>,
}

/// A single element from Overpass
#[derive(Debug, Deserialize)]
pub struct Element {
    #[serde(rename = "type")]
    pub type_: String,
    pub id: u64,
    #[serde(default)]
    pub tags: Option<BTreeMap<String, String>>,
    #[serde(default)]
    pub lat: Option<f64>,
    #[serde(default)]
    pub lon: Option<f64>,
}

/// Overpass QL for school nodes within `radius_m` meters of `origin`
fn build_school_query(origin: Coordinate, radius_m: f64, timeout_secs: u64) -> String {
    format!(
        r#"[out:json][timeout:{timeout}];
node["amenity"="school"](around:{radius},{lat},{lon});
out;"#,
        timeout = timeout_secs,
        radius = radius_m,
        lat = origin.lat,
        lon = origin.lon
    )
}

/// School finder backed by an Overpass API interpreter endpoint
pub struct OverpassSchoolFinder {
    client: reqwest::blocking::Client,
    url: String,
    query_timeout_secs: u64,
}

impl OverpassSchoolFinder {
    pub fn new(
        client: reqwest::blocking::Client,
        url: impl Into<String>,
        query_timeout_secs: u64,
    ) -> Self {
        Self {
            client,
            url: url.into(),
            query_timeout_secs,
        }
    }

    fn execute_query(&self, query: &str) -> Result<OverpassResponse> {
        // Overpass expects a form-encoded `data` field, not a raw body
        let response = self
            .client
            .post(&self.url)
            .form(&[("data", query)])
            .send()
            .context("Failed to send request to Overpass API")?;

        if !response.status().is_success() {
            bail!("Overpass API returned error status: {}", response.status());
        }

        response
            .json()
            .context("Failed to parse Overpass JSON response")
    }
}

impl SchoolFinder for OverpassSchoolFinder {
    fn name(&self) -> &str {
        "overpass"
    }

    fn find_schools(&self, origin: Coordinate, radius_m: f64) -> Result<Vec<SchoolRecord>> {
        let query = build_school_query(origin, radius_m, self.query_timeout_secs);
        tracing::debug!(url = %self.url, radius_m, "Querying Overpass for schools");

        let response = self.execute_query(&query)?;
        let schools = parse_schools(&response);
        tracing::debug!(
            "Overpass returned {} elements, {} usable schools",
            response.elements.len(),
            schools.len()
        );
        Ok(schools)
    }
}
