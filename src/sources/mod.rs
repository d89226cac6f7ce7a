//! Catalog sources: the three CSV tables and the read-only [`catalog::Catalog`] built from them.

pub mod bundled;
pub mod catalog;
pub(crate) mod table;

pub const MAPPING_SOURCE: &str = "symptom_disease_mapping.csv";
pub const DESCRIPTION_SOURCE: &str = "symptom_Description.csv";
pub const PRECAUTION_SOURCE: &str = "symptom_precaution.csv";

pub const REQUIRED_SOURCES: [&str; 3] = [MAPPING_SOURCE, DESCRIPTION_SOURCE, PRECAUTION_SOURCE];
