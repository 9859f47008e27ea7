use std::num::NonZeroU64;
use std::time::Duration;

use url::Url;

use crate::args::{DEFAULT_MAX_RETRY, DEFAULT_SHUTDOWN_GRACE, FlooderArgs};
use crate::error::ValidationError;

/// Settings for one flood. Built once at startup and never mutated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunConfig {
    pub endpoint: Url,
    pub requests_per_second: NonZeroU64,
    pub duration: NonZeroU64,
    pub timeout: Duration,
    pub verbose: bool,
    pub report_path: Option<String>,
    pub shutdown_grace: Duration,
}

impl RunConfig {
    /// Validates merged CLI/config arguments.
    ///
    /// # Errors
    ///
    /// Returns an error when the endpoint is missing or is not an absolute
    /// http(s) URL, or when the timeout is zero.
    pub fn from_args(args: &FlooderArgs) -> Result<Self, ValidationError> {
        let raw = args
            .endpoint
            .as_deref()
            .map(str::trim)
            .filter(|value| !value.is_empty())
            .ok_or(ValidationError::MissingEndpoint)?;
        let endpoint = parse_endpoint(raw)?;

        if args.timeout.is_zero() {
            return Err(ValidationError::DurationZero);
        }
        if args.max_retry != DEFAULT_MAX_RETRY {
            tracing::warn!(
                "--max-retry={} ignored: failed requests are never retried.",
                args.max_retry
            );
        }

        Ok(Self {
            endpoint,
            requests_per_second: args.requests_per_second,
            duration: args.duration,
            timeout: args.timeout,
            verbose: args.verbose,
            report_path: args
                .report
                .clone()
                .filter(|path| !path.trim().is_empty()),
            shutdown_grace: args.shutdown_grace.unwrap_or(DEFAULT_SHUTDOWN_GRACE),
        })
    }

    /// Number of requests a run that is not interrupted sends.
    #[must_use]
    pub const fn total_requests(&self) -> u64 {
        self.duration
            .get()
            .saturating_mul(self.requests_per_second.get())
    }
}

fn parse_endpoint(raw: &str) -> Result<Url, ValidationError> {
    let endpoint = Url::parse(raw).map_err(|err| ValidationError::InvalidEndpoint {
        value: raw.to_owned(),
        source: err,
    })?;
    match endpoint.scheme() {
        "http" | "https" => {}
        other => {
            return Err(ValidationError::UnsupportedScheme {
                scheme: other.to_owned(),
            });
        }
    }
    if endpoint.host_str().is_none_or(str::is_empty) {
        return Err(ValidationError::EndpointWithoutHost {
            value: raw.to_owned(),
        });
    }
    Ok(endpoint)
}
