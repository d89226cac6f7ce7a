//! Internal utility helpers for text cleaning and data-directory lookup.

pub(crate) mod paths;
pub(crate) mod text;
