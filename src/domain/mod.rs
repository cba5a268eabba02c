pub mod coordinate;
pub mod school;

pub use coordinate::Coordinate;
pub use school::{
    EnrichedSchoolRecord, SchoolRecord, SchoolType, SearchFilters, TypeFilter, UNNAMED_SCHOOL,
};
