use std::time::Duration;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum HttpError {
    /// The TLS backend or connector could not be set up.
    #[error("Failed to build HTTP client (timeout {timeout:?}): {source}")]
    ClientSetup {
        timeout: Duration,
        #[source]
        source: reqwest::Error,
    },
}
