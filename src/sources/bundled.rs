use std::borrow::Cow;

use rust_embed::RustEmbed;

use crate::error::MediMatchError;
use crate::sources::table::Table;

#[derive(RustEmbed)]
#[folder = "data/"]
struct BundledData;

pub(crate) fn table(source_name: &str) -> Result<Table, MediMatchError> {
    let Some(asset) = BundledData::get(source_name) else {
        return Err(MediMatchError::MissingSource {
            source_name: source_name.to_string(),
            path: format!("<bundled>/{source_name}"),
        });
    };
    let bytes: Cow<'static, [u8]> = asset.data;
    Table::from_reader(source_name, bytes.as_ref())
}

pub fn source_names() -> Vec<String> {
    let mut names: Vec<String> = BundledData::iter().map(|name| name.into_owned()).collect();
    names.sort();
    names
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sources::{DESCRIPTION_SOURCE, MAPPING_SOURCE, PRECAUTION_SOURCE};

    #[test]
    fn ships_all_three_sources() {
        let names = source_names();
        for required in [MAPPING_SOURCE, DESCRIPTION_SOURCE, PRECAUTION_SOURCE] {
            assert!(names.iter().any(|n| n == required), "missing {required}");
        }
    }

    #[test]
    fn unknown_source_is_missing() {
        let err = table("nope.csv").expect_err("missing");
        assert!(err.to_string().contains("<bundled>/nope.csv"));
    }
}
