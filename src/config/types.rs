use std::time::Duration;

use serde::Deserialize;

use crate::args::parsers::{BareUnit, parse_duration_text};
use crate::error::ValidationError;

/// Optional settings read from `flooder.toml` / `flooder.json`.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ConfigFile {
    pub endpoint: Option<String>,
    #[serde(alias = "rate", alias = "rps")]
    pub requests_per_second: Option<u64>,
    pub duration: Option<u64>,
    pub timeout: Option<DurationValue>,
    #[serde(alias = "maxRetry")]
    pub max_retry: Option<u32>,
    pub report: Option<String>,
    pub verbose: Option<bool>,
    pub shutdown_grace: Option<DurationValue>,
    pub no_color: Option<bool>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum DurationValue {
    /// A bare number; its unit depends on the field.
    Number(u64),
    Text(String),
}

impl DurationValue {
    pub(crate) fn to_duration(&self, bare: BareUnit) -> Result<Duration, ValidationError> {
        match self {
            DurationValue::Number(value) => {
                let duration = match bare {
                    BareUnit::Millis => Duration::from_millis(*value),
                    BareUnit::Seconds => Duration::from_secs(*value),
                };
                if duration.is_zero() {
                    Err(ValidationError::DurationZero)
                } else {
                    Ok(duration)
                }
            }
            DurationValue::Text(text) => parse_duration_text(text, bare),
        }
    }
}
