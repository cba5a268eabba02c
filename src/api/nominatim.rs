use anyhow::{Context, Result, bail};
use serde::Deserialize;

use super::{GeocodeCandidate, Geocoder};
use crate::domain::Coordinate;

/// Nominatim sends coordinates as strings; accept plain numbers as well.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum Degrees {
    Number(f64),
    Text(String),
}

impl Degrees {
    fn value(&self) -> Result<f64> {
        match self {
            Degrees::Number(v) => Ok(*v),
            Degrees::Text(s) => s
                .trim()
                .parse()
                .with_context(|| format!("Not a number: {:?}", s)),
        }
    }
}

#[derive(Debug, Deserialize)]
struct NominatimResult {
    lat: Degrees,
    lon: Degrees,
    #[serde(default)]
    display_name: Option<String>,
}

impl NominatimResult {
    fn into_candidate(self) -> Result<GeocodeCandidate> {
        let lat = self
            .lat
            .value()
            .context("Failed to parse latitude from Nominatim response")?;
        let lon = self
            .lon
            .value()
            .context("Failed to parse longitude from Nominatim response")?;
        let coordinate = Coordinate::new(lat, lon)
            .context("Nominatim returned an out-of-range coordinate")?;
        Ok(GeocodeCandidate {
            coordinate,
            display_name: self.display_name,
        })
    }
}

fn parse_candidates(results: Vec<NominatimResult>) -> Result<Vec<GeocodeCandidate>> {
    results
        .into_iter()
        .map(NominatimResult::into_candidate)
        .collect()
}

/// Geocoder backed by the Nominatim search endpoint
pub struct NominatimGeocoder {
    client: reqwest::blocking::Client,
    url: String,
}

impl NominatimGeocoder {
    pub fn new(client: reqwest::blocking::Client, url: impl Into<String>) -> Self {
        Self {
            client,
            url: url.into(),
        }
    }
}

impl Geocoder for NominatimGeocoder {
    fn name(&self) -> &str {
        "nominatim"
    }

    /// Every candidate Nominatim returns for `address`, in its order.
    fn geocode(&self, address: &str) -> Result<Vec<GeocodeCandidate>> {
        tracing::debug!(address, url = %self.url, "Geocoding address");

        let response = self
            .client
            .get(&self.url)
            .query(&[("q", address), ("format", "json")])
            .send()
            .context("Failed to send request to Nominatim API")?;

        if !response.status().is_success() {
            bail!("Nominatim API returned error status: {}", response.status());
        }

        let results: Vec<NominatimResult> = response
            .json()
            .context("Failed to parse Nominatim JSON response")?;

        let candidates = parse_candidates(results)?;
        tracing::debug!("Nominatim returned {} candidates", candidates.len());
        Ok(candidates)
    }
}
