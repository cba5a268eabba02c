use crate::api::OverpassResponse;
use crate::domain::{Coordinate, SchoolRecord};

/// Parse an Overpass response into school records.
///
/// Upstream order is kept. Elements without a usable position are skipped;
/// missing tags become an empty map.
pub fn parse_schools(response: &OverpassResponse) -> Vec<SchoolRecord> {
    let mut schools = Vec::with_capacity(response.elements.len());

    for element in &response.elements {
        let (Some(lat), Some(lon)) = (element.lat, element.lon) else {
            tracing::warn!(
                "Skipping {} {}: no coordinates",
                element.type_,
                element.id
            );
            continue;
        };

        let coordinate = match Coordinate::new(lat, lon) {
            Ok(c) => c,
            Err(e) => {
                tracing::warn!("Skipping {} {}: {}", element.type_, element.id, e);
                continue;
            }
        };

        let tags = element.tags.clone().unwrap_or_default();
        schools.push(SchoolRecord::new(element.id, coordinate, tags));
    }

    schools
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::overpass::Element;
    use std::collections::BTreeMap;

    fn node(id: u64, lat: Option<f64>, lon: Option<f64>, name: Option<&str>) -> Element {
        Element {
            type_: "node".to_string(),
            id,
            lat,
            lon,
            tags: name.map(|n| {
                let mut m = BTreeMap::new();
                m.insert("amenity".to_string(), "school".to_string());
                m.insert("name".to_string(), n.to_string());
                m
            }),
        }
    }

    #[test]
    fn test_parse_schools() {
        let response = OverpassResponse {
            elements: vec![
                node(1, Some(40.01), Some(-75.0), Some("Central High School")),
                node(2, None, None, Some("Nowhere Primary")),
                node(3, Some(40.02), Some(-75.01), None),
                node(4, Some(95.0), Some(-75.0), Some("Bad Data College")),
            ],
        };

        let schools = parse_schools(&response);
        assert_eq!(schools.len(), 2);
        assert_eq!(schools[0].id, 1);
        assert_eq!(schools[0].name.as_deref(), Some("Central High School"));
        assert_eq!(schools[0].tags.get("amenity").map(String::as_str), Some("school"));
        assert_eq!(schools[1].id, 3);
        assert_eq!(schools[1].name, None);
        assert!(schools[1].tags.is_empty());
    }
}
