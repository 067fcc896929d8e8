//! YAML output formatter

use crate::output::FormatError;
use serde::Serialize;

/// Format any report as YAML
pub fn format_yaml<T: Serialize + ?Sized>(data: &T) -> Result<String, FormatError> {
    serde_yaml::to_string(data).map_err(FormatError::from)
}
