use std::time::Duration;

use reqwest::{
    Client,
    header::{CONNECTION, HeaderMap, HeaderValue},
    redirect,
};

use crate::args::DEFAULT_USER_AGENT;
use crate::error::HttpError;

/// Builds the client shared by every request of a run.
///
/// Connection pooling is off, so each request dials its own connection and
/// its connect-start instant is meaningful. Redirects are not followed; a 3xx
/// counts as a non-2xx answer.
///
/// # Errors
///
/// Returns an error when the TLS backend or client cannot be initialised.
pub fn build_client(timeout: Duration) -> Result<Client, HttpError> {
    let mut headers = HeaderMap::new();
    headers.insert(CONNECTION, HeaderValue::from_static("close"));

    Client::builder()
        .timeout(timeout)
        .user_agent(DEFAULT_USER_AGENT)
        .default_headers(headers)
        .redirect(redirect::Policy::none())
        .pool_max_idle_per_host(0)
        .pool_idle_timeout(Some(Duration::from_secs(0)))
        .build()
        .map_err(|err| HttpError::ClientSetup {
            timeout,
            source: err,
        })
}
