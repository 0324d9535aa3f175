//! Format-agnostic loading of structured settings files

use serde::de::DeserializeOwned;

use crate::{Error, NormalizedPath, ReadLimits, Result, io};

/// Load a settings file, choosing the format from its extension.
///
/// - `.toml` -> TOML
/// - `.json` -> JSON
pub fn load<T: DeserializeOwned>(path: &NormalizedPath) -> Result<T> {
    let content = io::read_text(path, ReadLimits::default())?;
    let extension = path.extension().unwrap_or("");

    match extension.to_lowercase().as_str() {
        "toml" => toml::from_str(&content).map_err(|e| Error::ConfigParse {
            path: path.to_native(),
            format: "TOML".into(),
            message: e.to_string(),
        }),
        "json" => serde_json::from_str(&content).map_err(|e| Error::ConfigParse {
            path: path.to_native(),
            format: "JSON".into(),
            message: e.to_string(),
        }),
        _ => Err(Error::UnsupportedFormat {
            extension: extension.to_string(),
        }),
    }
}
