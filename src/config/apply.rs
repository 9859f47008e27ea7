use std::num::NonZeroU64;

use clap::ArgMatches;
use clap::parser::ValueSource;

use crate::args::FlooderArgs;
use crate::args::parsers::BareUnit;
use crate::error::{AppError, AppResult, ConfigError, ValidationError};

use super::types::ConfigFile;

/// Applies configuration values to CLI arguments. Values given explicitly on
/// the command line are kept.
///
/// # Errors
///
/// Returns an error when config values are invalid.
pub fn apply_config(
    args: &mut FlooderArgs,
    matches: &ArgMatches,
    config: &ConfigFile,
) -> AppResult<()> {
    if !is_explicit(matches, "endpoint")
        && let Some(endpoint) = config.endpoint.clone()
    {
        args.endpoint = Some(endpoint);
    }

    if !is_cli(matches, "requests_per_second")
        && let Some(rate) = config.requests_per_second
    {
        args.requests_per_second = ensure_positive_u64(rate, "requests_per_second")?;
    }

    if !is_cli(matches, "duration")
        && let Some(duration) = config.duration
    {
        args.duration = ensure_positive_u64(duration, "duration")?;
    }

    if !is_cli(matches, "timeout")
        && let Some(timeout) = config.timeout.as_ref()
    {
        args.timeout = timeout.to_duration(BareUnit::Millis).map_err(|err| {
            AppError::from(ConfigError::Field {
                field: "timeout",
                source: err,
            })
        })?;
    }

    if !is_cli(matches, "max_retry")
        && let Some(max_retry) = config.max_retry
    {
        args.max_retry = max_retry;
    }

    if !is_cli(matches, "report")
        && let Some(report) = config.report.clone()
    {
        args.report = Some(report);
    }

    if !is_cli(matches, "verbose")
        && let Some(verbose) = config.verbose
    {
        args.verbose = verbose;
    }

    if !is_cli(matches, "shutdown_grace")
        && let Some(grace) = config.shutdown_grace.as_ref()
    {
        args.shutdown_grace = Some(grace.to_duration(BareUnit::Seconds).map_err(|err| {
            AppError::from(ConfigError::Field {
                field: "shutdown_grace",
                source: err,
            })
        })?);
    }

    if !is_explicit(matches, "no_color")
        && let Some(no_color) = config.no_color
    {
        args.no_color = no_color;
    }

    Ok(())
}

fn is_cli(matches: &ArgMatches, name: &str) -> bool {
    matches.value_source(name) == Some(ValueSource::CommandLine)
}

/// Command line or environment.
fn is_explicit(matches: &ArgMatches, name: &str) -> bool {
    matches!(
        matches.value_source(name),
        Some(ValueSource::CommandLine | ValueSource::EnvVariable)
    )
}

fn ensure_positive_u64(value: u64, field: &'static str) -> AppResult<NonZeroU64> {
    NonZeroU64::new(value).ok_or_else(|| {
        AppError::from(ConfigError::Field {
            field,
            source: ValidationError::NotPositive,
        })
    })
}
