use clap::Parser;
use std::num::NonZeroU64;
use std::time::Duration;

use super::defaults::DEFAULT_MAX_RETRY;
use super::parsers::{parse_bool_env, parse_duration_arg, parse_positive_u64, parse_timeout_arg};

#[derive(Debug, Parser, Clone)]
#[clap(
    version,
    about = "Fire HTTP GET requests at a fixed rate and report average time-to-first-byte and time-to-last-byte."
)]
pub struct FlooderArgs {
    /// Endpoint to GET, e.g. http://localhost:8080/time
    #[arg(long, short = 'e', env = "FLOODER_ENDPOINT")]
    pub endpoint: Option<String>,

    /// Number of GET requests launched every second
    #[arg(
        long = "requests-per-second",
        short = 'r',
        default_value = "1",
        value_parser = parse_positive_u64
    )]
    pub requests_per_second: NonZeroU64,

    /// How long to run the flood (seconds, one batch per second)
    #[arg(
        long = "duration",
        short = 'd',
        default_value = "10",
        value_parser = parse_positive_u64
    )]
    pub duration: NonZeroU64,

    /// Per-request timeout; bare numbers are milliseconds (supports ms/s/m/h)
    #[arg(
        long = "timeout",
        short = 't',
        default_value = "1000",
        value_parser = parse_timeout_arg
    )]
    pub timeout: Duration,

    /// Max retries for failed requests (accepted but not used)
    #[arg(long = "max-retry", alias = "maxRetry", default_value_t = DEFAULT_MAX_RETRY)]
    pub max_retry: u32,

    /// Write the final aggregation as JSON to this path
    #[arg(long)]
    pub report: Option<String>,

    /// Print per-request TTFB/TTLB lines and request failures
    #[arg(long, short = 'v')]
    pub verbose: bool,

    /// Path to config file (TOML/JSON). Defaults to ./flooder.toml or ./flooder.json if present.
    #[arg(long)]
    pub config: Option<String>,

    /// How long to wait for in-flight requests after Ctrl-C (supports ms/s/m/h)
    #[arg(long = "shutdown-grace", value_parser = parse_duration_arg)]
    pub shutdown_grace: Option<Duration>,

    /// Disable color output
    #[arg(long = "no-color", env = "NO_COLOR", value_parser = parse_bool_env)]
    pub no_color: bool,
}
