use std::num::NonZeroU64;
use std::time::Duration;

use crate::error::{AppError, AppResult, ValidationError};

/// Unit applied when a duration value carries no suffix.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum BareUnit {
    Millis,
    Seconds,
}

pub(super) fn parse_positive_u64(s: &str) -> AppResult<NonZeroU64> {
    let value = s.trim();
    let number: u64 = value
        .parse()
        .map_err(|err| ValidationError::InvalidNumber {
            value: value.to_owned(),
            source: err,
        })?;
    NonZeroU64::new(number).ok_or_else(|| AppError::from(ValidationError::NotPositive))
}

pub(crate) fn parse_bool_env(s: &str) -> AppResult<bool> {
    match s.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "y" | "on" => Ok(true),
        "0" | "false" | "no" | "n" | "off" => Ok(false),
        _ => Err(AppError::from(ValidationError::InvalidBoolean {
            value: s.to_owned(),
        })),
    }
}

/// Request timeouts default to milliseconds (`--timeout 1500`).
pub(super) fn parse_timeout_arg(s: &str) -> AppResult<Duration> {
    parse_duration_text(s, BareUnit::Millis).map_err(AppError::from)
}

pub(super) fn parse_duration_arg(s: &str) -> AppResult<Duration> {
    parse_duration_text(s, BareUnit::Seconds).map_err(AppError::from)
}

/// Parses `<digits>[ms|s|m|h]` into a non-zero duration.
pub(crate) fn parse_duration_text(s: &str, bare: BareUnit) -> Result<Duration, ValidationError> {
    let value = s.trim();
    if value.is_empty() {
        return Err(ValidationError::DurationEmpty);
    }

    let digits_len = value.chars().take_while(char::is_ascii_digit).count();
    if digits_len == 0 {
        return Err(ValidationError::InvalidDurationFormat {
            value: value.to_owned(),
        });
    }
    let (num_part, unit_part) = value.split_at(digits_len);
    let number: u64 = num_part
        .parse()
        .map_err(|err| ValidationError::InvalidDurationNumber {
            value: value.to_owned(),
            source: err,
        })?;

    let unit = match (unit_part.trim(), bare) {
        ("", BareUnit::Millis) => "ms",
        ("", BareUnit::Seconds) => "s",
        (unit, _) => unit,
    };
    let duration = match unit {
        "ms" => Duration::from_millis(number),
        "s" => Duration::from_secs(number),
        "m" => {
            let secs = number
                .checked_mul(60)
                .ok_or(ValidationError::DurationOverflow)?;
            Duration::from_secs(secs)
        }
        "h" => {
            let secs = number
                .checked_mul(60)
                .and_then(|seconds| seconds.checked_mul(60))
                .ok_or(ValidationError::DurationOverflow)?;
            Duration::from_secs(secs)
        }
        _ => {
            return Err(ValidationError::InvalidDurationUnit {
                unit: unit.to_owned(),
            });
        }
    };

    if duration.is_zero() {
        return Err(ValidationError::DurationZero);
    }

    Ok(duration)
}
