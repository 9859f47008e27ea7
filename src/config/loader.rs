use std::path::Path;

use crate::args::DEFAULT_CONFIG_FILES;
use crate::error::{AppResult, ConfigError};

use super::types::ConfigFile;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ConfigFormat {
    Toml,
    Json,
}

impl ConfigFormat {
    fn from_path(path: &Path) -> Option<Self> {
        match path.extension()?.to_str()? {
            "toml" => Some(Self::Toml),
            "json" => Some(Self::Json),
            _ => None,
        }
    }
}

/// Loads `path`, or the first default config file found in the working
/// directory. `Ok(None)` means no path was given and no default exists.
///
/// # Errors
///
/// Returns an error when the file cannot be read, has an unknown extension,
/// or does not parse.
pub fn load_config(path: Option<&str>) -> AppResult<Option<ConfigFile>> {
    if let Some(path) = path {
        return load_config_file(Path::new(path)).map(Some);
    }

    let Some(found) = DEFAULT_CONFIG_FILES
        .iter()
        .map(Path::new)
        .find(|candidate| candidate.exists())
    else {
        return Ok(None);
    };
    tracing::debug!("Using config file {}", found.display());
    load_config_file(found).map(Some)
}

pub(crate) fn load_config_file(path: &Path) -> AppResult<ConfigFile> {
    let format = ConfigFormat::from_path(path).ok_or_else(|| ConfigError::UnknownFormat {
        path: path.to_path_buf(),
    })?;
    let content = std::fs::read_to_string(path).map_err(|err| ConfigError::Read {
        path: path.to_path_buf(),
        source: err,
    })?;

    let parsed = match format {
        ConfigFormat::Toml => toml::from_str(&content).map_err(|err| ConfigError::Toml {
            path: path.to_path_buf(),
            source: err,
        })?,
        ConfigFormat::Json => serde_json::from_str(&content).map_err(|err| ConfigError::Json {
            path: path.to_path_buf(),
            source: err,
        })?,
    };
    Ok(parsed)
}
