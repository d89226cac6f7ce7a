//! Output renderers: JSON for machines, Markdown for people.

pub mod json;
pub mod markdown;
