use serde::Serialize;

use crate::error::MediMatchError;

pub fn to_pretty<T: Serialize>(value: &T) -> Result<String, MediMatchError> {
    Ok(serde_json::to_string_pretty(value)?)
}
