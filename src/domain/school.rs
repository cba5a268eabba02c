use serde::Serialize;
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use super::Coordinate;
use crate::error::{Result, SearchError};

/// Shown wherever a school has no usable name
pub const UNNAMED_SCHOOL: &str = "Unnamed School";

/// Educational level inferred from a school's name
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum SchoolType {
    #[serde(rename = "Elementary/Primary School")]
    Elementary,
    #[serde(rename = "High School/Secondary School")]
    HighSchool,
    #[serde(rename = "College/University")]
    CollegeUniversity,
    #[serde(rename = "unknown")]
    Unknown,
}

impl SchoolType {
    /// Classify a free-text school name by keyword.
    ///
    /// Rules are checked in priority order and the first hit wins, so
    /// "Secondary College" is a high school. Overlapping names are
    /// deliberately left to this ordering.
    pub fn from_name(name: Option<&str>) -> SchoolType {
        let Some(name) = name.filter(|n| !n.is_empty()) else {
            return SchoolType::Unknown;
        };
        let lower = name.to_lowercase();

        if lower.contains("elementary") || lower.contains("primary") {
            SchoolType::Elementary
        } else if lower.contains("high school") || lower.contains("secondary") {
            SchoolType::HighSchool
        } else if lower.contains("university") || lower.contains("college") {
            SchoolType::CollegeUniversity
        } else {
            SchoolType::Unknown
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            SchoolType::Elementary => "Elementary/Primary School",
            SchoolType::HighSchool => "High School/Secondary School",
            SchoolType::CollegeUniversity => "College/University",
            SchoolType::Unknown => "unknown",
        }
    }
}

impl fmt::Display for SchoolType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Category constraint applied after the radius query
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TypeFilter {
    #[default]
    All,
    Elementary,
    HighSchool,
    CollegeUniversity,
}

impl TypeFilter {
    pub fn matches(&self, school_type: SchoolType) -> bool {
        match self {
            TypeFilter::All => true,
            TypeFilter::Elementary => school_type == SchoolType::Elementary,
            TypeFilter::HighSchool => school_type == SchoolType::HighSchool,
            TypeFilter::CollegeUniversity => school_type == SchoolType::CollegeUniversity,
        }
    }
}

impl FromStr for TypeFilter {
    type Err = SearchError;

    /// Accepts "all", the display labels, or a short form such as "high-school".
    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "" | "all" => Ok(TypeFilter::All),
            "elementary" | "primary" | "elementary/primary school" => Ok(TypeFilter::Elementary),
            "high-school" | "high school" | "highschool" | "secondary"
            | "high school/secondary school" => Ok(TypeFilter::HighSchool),
            "college" | "university" | "college/university" => Ok(TypeFilter::CollegeUniversity),
            other => Err(SearchError::invalid_filter(format!(
                "unknown school type: {other}"
            ))),
        }
    }
}

impl fmt::Display for TypeFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            TypeFilter::All => "all",
            TypeFilter::Elementary => SchoolType::Elementary.label(),
            TypeFilter::HighSchool => SchoolType::HighSchool.label(),
            TypeFilter::CollegeUniversity => SchoolType::CollegeUniversity.label(),
        };
        f.write_str(label)
    }
}

/// Distance and category constraints for one search
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SearchFilters {
    pub max_distance_km: f64,
    pub school_type: TypeFilter,
}

impl SearchFilters {
    pub const DEFAULT_MAX_DISTANCE_KM: f64 = 10.0;

    pub fn new(max_distance_km: f64, school_type: TypeFilter) -> Self {
        Self {
            max_distance_km,
            school_type,
        }
    }

    pub fn validate(&self) -> Result<()> {
        if !self.max_distance_km.is_finite() || self.max_distance_km <= 0.0 {
            return Err(SearchError::invalid_filter(format!(
                "max distance must be a positive number of km, got {}",
                self.max_distance_km
            )));
        }
        Ok(())
    }

    /// Radius for the upstream query, in meters
    pub fn radius_m(&self) -> f64 {
        self.max_distance_km * 1000.0
    }
}

impl Default for SearchFilters {
    fn default() -> Self {
        Self::new(Self::DEFAULT_MAX_DISTANCE_KM, TypeFilter::All)
    }
}

/// A school point as returned by the school finder
#[derive(Debug, Clone, PartialEq)]
pub struct SchoolRecord {
    pub id: u64,
    pub coordinate: Coordinate,
    pub name: Option<String>,
    pub tags: BTreeMap<String, String>,
}

impl SchoolRecord {
    pub fn new(id: u64, coordinate: Coordinate, tags: BTreeMap<String, String>) -> Self {
        let name = tags.get("name").cloned();
        Self {
            id,
            coordinate,
            name,
            tags,
        }
    }
}

/// A school annotated with its distance from the search origin and its category
#[derive(Debug, Clone, PartialEq)]
pub struct EnrichedSchoolRecord {
    pub school: SchoolRecord,
    pub distance_km: f64,
    pub school_type: SchoolType,
}

impl EnrichedSchoolRecord {
    pub fn display_name(&self) -> &str {
        self.school
            .name
            .as_deref()
            .filter(|n| !n.is_empty())
            .unwrap_or(UNNAMED_SCHOOL)
    }

    pub fn maps_url(&self) -> String {
        self.school.coordinate.maps_url()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(None, SchoolType::Unknown)]
    #[case(Some(""), SchoolType::Unknown)]
    #[case(Some("Springfield Elementary School"), SchoolType::Elementary)]
    #[case(Some("St. Mary's Primary"), SchoolType::Elementary)]
    #[case(Some("Central High School"), SchoolType::HighSchool)]
    #[case(Some("Riverside Secondary"), SchoolType::HighSchool)]
    #[case(Some("State University"), SchoolType::CollegeUniversity)]
    #[case(Some("Community College"), SchoolType::CollegeUniversity)]
    #[case(Some("XYZ Academy"), SchoolType::Unknown)]
    #[case(Some("HIGH SCHOOL OF ARTS"), SchoolType::HighSchool)]
    fn test_classify(#[case] name: Option<&str>, #[case] expected: SchoolType) {
        assert_eq!(SchoolType::from_name(name), expected);
    }

    #[test]
    fn test_classify_first_rule_wins() {
        assert_eq!(
            SchoolType::from_name(Some("Secondary College")),
            SchoolType::HighSchool
        );
        assert_eq!(
            SchoolType::from_name(Some("Primary College of Music")),
            SchoolType::Elementary
        );
    }

    #[test]
    fn test_type_filter_from_str() {
        assert_eq!("all".parse::<TypeFilter>().unwrap(), TypeFilter::All);
        assert_eq!(
            "Elementary/Primary School".parse::<TypeFilter>().unwrap(),
            TypeFilter::Elementary
        );
        assert_eq!(
            "high-school".parse::<TypeFilter>().unwrap(),
            TypeFilter::HighSchool
        );
        assert_eq!(
            "College/University".parse::<TypeFilter>().unwrap(),
            TypeFilter::CollegeUniversity
        );
        assert!(matches!(
            "kindergarten".parse::<TypeFilter>(),
            Err(SearchError::InvalidFilter(_))
        ));
        assert!(matches!(
            "unknown".parse::<TypeFilter>(),
            Err(SearchError::InvalidFilter(_))
        ));
    }

    #[test]
    fn test_type_filter_matches() {
        assert!(TypeFilter::All.matches(SchoolType::Unknown));
        assert!(TypeFilter::Elementary.matches(SchoolType::Elementary));
        assert!(!TypeFilter::Elementary.matches(SchoolType::HighSchool));
        assert!(!TypeFilter::CollegeUniversity.matches(SchoolType::Unknown));
    }

    #[test]
    fn test_filters_validate() {
        assert!(SearchFilters::default().validate().is_ok());
        assert!(SearchFilters::new(0.0, TypeFilter::All).validate().is_err());
        assert!(SearchFilters::new(-3.0, TypeFilter::All).validate().is_err());
        assert!(
            SearchFilters::new(f64::INFINITY, TypeFilter::All)
                .validate()
                .is_err()
        );
        assert_eq!(SearchFilters::new(2.5, TypeFilter::All).radius_m(), 2500.0);
    }

    #[test]
    fn test_record_name_from_tags() {
        let mut tags = BTreeMap::new();
        tags.insert("amenity".to_string(), "school".to_string());
        tags.insert("name".to_string(), "Lincoln Elementary".to_string());
        let record = SchoolRecord::new(7, Coordinate::new(1.0, 2.0).unwrap(), tags);
        assert_eq!(record.name.as_deref(), Some("Lincoln Elementary"));

        let unnamed = EnrichedSchoolRecord {
            school: SchoolRecord::new(8, Coordinate::new(1.0, 2.0).unwrap(), BTreeMap::new()),
            distance_km: 0.5,
            school_type: SchoolType::Unknown,
        };
        assert_eq!(unnamed.display_name(), UNNAMED_SCHOOL);
    }
}
