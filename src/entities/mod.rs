//! Data model shared by the catalog, the matching engine, and the renderers.

pub mod diagnosis;
pub mod disease;
