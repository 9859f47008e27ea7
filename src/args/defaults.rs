use std::time::Duration;

pub(crate) const DEFAULT_USER_AGENT: &str = concat!("flooder/", env!("CARGO_PKG_VERSION"));

/// Config files checked in the working directory when `--config` is not given.
pub(crate) const DEFAULT_CONFIG_FILES: [&str; 2] = ["flooder.toml", "flooder.json"];

/// Accepted for compatibility; retries are never attempted.
pub(crate) const DEFAULT_MAX_RETRY: u32 = 3;

pub(crate) const DEFAULT_SHUTDOWN_GRACE: Duration = Duration::from_secs(5);
