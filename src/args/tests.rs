use super::parsers::{BareUnit, parse_bool_env, parse_duration_text};
use super::*;
use crate::error::ValidationError;
use clap::Parser;
use std::time::Duration;

fn parse_test_args<I, T>(args: I) -> Result<FlooderArgs, String>
where
    I: IntoIterator<Item = T>,
    T: Into<std::ffi::OsString> + Clone,
{
    FlooderArgs::try_parse_from(args).map_err(|err| err.to_string())
}

#[test]
fn parse_args_defaults() -> Result<(), String> {
    let args = parse_test_args(["flooder", "--endpoint", "http://localhost:8080/time"])?;

    let checks = [
        (
            args.endpoint.as_deref() == Some("http://localhost:8080/time"),
            "Unexpected endpoint",
        ),
        (
            args.requests_per_second.get() == 1,
            "Unexpected requests_per_second",
        ),
        (args.duration.get() == 10, "Unexpected duration"),
        (
            args.timeout == Duration::from_millis(1000),
            "Unexpected timeout",
        ),
        (args.max_retry == DEFAULT_MAX_RETRY, "Unexpected max_retry"),
        (args.report.is_none(), "Expected report to be None"),
        (!args.verbose, "Expected verbose to be false"),
        (args.config.is_none(), "Expected config to be None"),
        (
            args.shutdown_grace.is_none(),
            "Expected shutdown_grace to be None",
        ),
    ];
    for (ok, message) in checks {
        if !ok {
            return Err(message.to_owned());
        }
    }
    Ok(())
}

#[test]
fn parse_args_short_flags() -> Result<(), String> {
    let args = parse_test_args([
        "flooder", "-e", "http://api:8080", "-r", "25", "-d", "3", "-t", "250", "-v",
    ])?;
    if args.requests_per_second.get() != 25 {
        return Err("Unexpected requests_per_second".to_owned());
    }
    if args.duration.get() != 3 {
        return Err("Unexpected duration".to_owned());
    }
    if args.timeout != Duration::from_millis(250) {
        return Err(format!(
            "Unexpected timeout: {:?}",
            args.timeout
        ));
    }
    if !args.verbose {
        return Err("Expected verbose".to_owned());
    }
    Ok(())
}

#[test]
fn parse_args_accepts_legacy_max_retry_spelling() -> Result<(), String> {
    let args = parse_test_args(["flooder", "-e", "http://api", "--maxRetry", "7"])?;
    if args.max_retry != 7 {
        return Err("Expected maxRetry alias to be parsed".to_owned());
    }
    Ok(())
}

#[test]
fn parse_args_timeout_with_unit() -> Result<(), String> {
    let args = parse_test_args(["flooder", "-e", "http://api", "--timeout", "2s"])?;
    if args.timeout != Duration::from_secs(2) {
        return Err("Expected 2s timeout".to_owned());
    }
    Ok(())
}

#[test]
fn parse_args_rejects_zero_rate_and_duration() -> Result<(), String> {
    if parse_test_args(["flooder", "-e", "http://api", "-r", "0"]).is_ok() {
        return Err("Expected zero rate to be rejected".to_owned());
    }
    if parse_test_args(["flooder", "-e", "http://api", "-d", "0"]).is_ok() {
        return Err("Expected zero duration to be rejected".to_owned());
    }
    if parse_test_args(["flooder", "-e", "http://api", "-t", "0"]).is_ok() {
        return Err("Expected zero timeout to be rejected".to_owned());
    }
    Ok(())
}

#[test]
fn parse_args_endpoint_is_optional_at_parse_time() -> Result<(), String> {
    let args = parse_test_args(["flooder"])?;
    if args.endpoint.is_some() && std::env::var_os("FLOODER_ENDPOINT").is_none() {
        return Err("Expected endpoint to be None".to_owned());
    }
    Ok(())
}

#[test]
fn duration_text_units() -> Result<(), String> {
    let cases = [
        ("150", BareUnit::Millis, Duration::from_millis(150)),
        ("150", BareUnit::Seconds, Duration::from_secs(150)),
        ("20ms", BareUnit::Seconds, Duration::from_millis(20)),
        ("3s", BareUnit::Millis, Duration::from_secs(3)),
        ("2m", BareUnit::Millis, Duration::from_secs(120)),
        ("1h", BareUnit::Millis, Duration::from_secs(3600)),
    ];
    for (input, bare, expected) in cases {
        let parsed = parse_duration_text(input, bare).map_err(|err| err.to_string())?;
        if parsed != expected {
            return Err(format!(
                "Unexpected duration for {}: {:?}",
                input, parsed
            ));
        }
    }
    Ok(())
}

#[test]
fn duration_text_errors() -> Result<(), String> {
    if !matches!(
        parse_duration_text("", BareUnit::Millis),
        Err(ValidationError::DurationEmpty)
    ) {
        return Err("Expected DurationEmpty".to_owned());
    }
    if !matches!(
        parse_duration_text("ms", BareUnit::Millis),
        Err(ValidationError::InvalidDurationFormat { .. })
    ) {
        return Err("Expected InvalidDurationFormat".to_owned());
    }
    if !matches!(
        parse_duration_text("5d", BareUnit::Millis),
        Err(ValidationError::InvalidDurationUnit { .. })
    ) {
        return Err("Expected InvalidDurationUnit".to_owned());
    }
    if !matches!(
        parse_duration_text("0s", BareUnit::Millis),
        Err(ValidationError::DurationZero)
    ) {
        return Err("Expected DurationZero".to_owned());
    }
    Ok(())
}

#[test]
fn bool_env_values() -> Result<(), String> {
    for value in ["1", "true", "YES", "on"] {
        if !parse_bool_env(value).map_err(|err| err.to_string())? {
            return Err(format!("Expected true for {}", value));
        }
    }
    for value in ["0", "false", "No", "off"] {
        if parse_bool_env(value).map_err(|err| err.to_string())? {
            return Err(format!("Expected false for {}", value));
        }
    }
    if parse_bool_env("maybe").is_ok() {
        return Err("Expected invalid boolean".to_owned());
    }
    Ok(())
}
