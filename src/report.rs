//! Presentation of geocode candidates and school results.

use anyhow::{Context, Result};
use serde::Serialize;
use serde_json::{Value, json};
use std::collections::BTreeMap;

use crate::api::GeocodeCandidate;
use crate::domain::{Coordinate, EnrichedSchoolRecord, SchoolType};

#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// Human-readable list
    Text,
    /// JSON array
    Json,
    /// GeoJSON FeatureCollection for map display
    Geojson,
}

/// Wire shape of one school, matching the original HTTP response
#[derive(Debug, Serialize)]
struct SchoolView<'a> {
    id: u64,
    lat: f64,
    lon: f64,
    tags: &'a BTreeMap<String, String>,
    name: &'a str,
    distance: f64,
    #[serde(rename = "type")]
    school_type: SchoolType,
    maps_url: String,
}

impl<'a> From<&'a EnrichedSchoolRecord> for SchoolView<'a> {
    fn from(s: &'a EnrichedSchoolRecord) -> Self {
        Self {
            id: s.school.id,
            lat: s.school.coordinate.lat,
            lon: s.school.coordinate.lon,
            tags: &s.school.tags,
            name: s.display_name(),
            distance: s.distance_km,
            school_type: s.school_type,
            maps_url: s.maps_url(),
        }
    }
}

pub fn render_candidates(candidates: &[GeocodeCandidate], format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Text => Ok(candidates
            .iter()
            .enumerate()
            .map(|(i, c)| {
                format!(
                    "{:>2}. ({:.5}, {:.5})  {}\n",
                    i + 1,
                    c.coordinate.lat,
                    c.coordinate.lon,
                    c.display_name.as_deref().unwrap_or("")
                )
            })
            .collect()),
        OutputFormat::Json => {
            serde_json::to_string_pretty(candidates).context("Failed to serialize candidates")
        }
        OutputFormat::Geojson => {
            let features: Vec<Value> = candidates
                .iter()
                .map(|c| {
                    point_feature(
                        c.coordinate,
                        json!({ "display_name": c.display_name }),
                    )
                })
                .collect();
            to_feature_collection(features)
        }
    }
}

/// Render schools, nearest first. `origin` is the point searched around.
pub fn render_schools(
    origin: Coordinate,
    schools: &[EnrichedSchoolRecord],
    format: OutputFormat,
) -> Result<String> {
    match format {
        OutputFormat::Text => Ok(render_school_list(schools)),
        OutputFormat::Json => {
            let views: Vec<SchoolView> = schools.iter().map(SchoolView::from).collect();
            serde_json::to_string_pretty(&views).context("Failed to serialize schools")
        }
        OutputFormat::Geojson => {
            let mut features = Vec::with_capacity(schools.len() + 1);
            features.push(point_feature(
                origin,
                json!({ "role": "origin", "name": "You are here" }),
            ));
            for school in schools {
                let view = SchoolView::from(school);
                let properties =
                    serde_json::to_value(&view).context("Failed to serialize school")?;
                features.push(point_feature(school.school.coordinate, properties));
            }
            to_feature_collection(features)
        }
    }
}

fn render_school_list(schools: &[EnrichedSchoolRecord]) -> String {
    if schools.is_empty() {
        return "No schools found.\n".to_string();
    }

    let mut out = String::new();
    for (i, s) in schools.iter().enumerate() {
        out.push_str(&format!("{:>3}. {}\n", i + 1, s.display_name()));
        out.push_str(&format!("     Distance: {:.2} km\n", s.distance_km));
        out.push_str(&format!("     Type: {}\n", s.school_type));
        out.push_str(&format!("     Map: {}\n", s.maps_url()));
    }
    out
}

fn point_feature(coordinate: Coordinate, properties: Value) -> Value {
    // GeoJSON positions are [lon, lat]
    json!({
        "type": "Feature",
        "geometry": {
            "type": "Point",
            "coordinates": [coordinate.lon, coordinate.lat],
        },
        "properties": properties,
    })
}

fn to_feature_collection(features: Vec<Value>) -> Result<String> {
    let collection = json!({
        "type": "FeatureCollection",
        "features": features,
    });
    serde_json::to_string_pretty(&collection).context("Failed to serialize GeoJSON")
}
