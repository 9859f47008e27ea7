use async_trait::async_trait;
use futures_util::StreamExt;
use reqwest::Client;
use tracing::debug;
use url::Url;

use crate::metrics::{FailureReason, RequestOutcome};

use super::trace::{InstantTracer, LatencyTracer};

/// One request attempt, as seen by the dispatcher.
#[async_trait]
pub trait RequestProbe: Send + Sync {
    async fn probe(&self) -> RequestOutcome;
}

/// Traced GET against a fixed endpoint.
#[derive(Debug, Clone)]
pub struct HttpProbe {
    client: Client,
    endpoint: Url,
}

impl HttpProbe {
    #[must_use]
    pub const fn new(client: Client, endpoint: Url) -> Self {
        Self { client, endpoint }
    }
}

#[async_trait]
impl RequestProbe for HttpProbe {
    async fn probe(&self) -> RequestOutcome {
        let mut tracer = InstantTracer::new();
        match traced_get(&self.client, self.endpoint.as_str(), &mut tracer).await {
            Ok(()) => {
                let timings = tracer.timings();
                RequestOutcome::Success {
                    ttfb: timings.ttfb,
                    ttlb: timings.ttlb,
                }
            }
            Err(reason) => RequestOutcome::failure(reason),
        }
    }
}

/// Issues one GET and drives the tracer hooks.
///
/// The client must have pooling disabled: the connect-start hook fires when
/// the request is handed to the client, which only matches the real connect
/// when no idle connection can be reused. Name resolution happens after the
/// connect-start hook, so both TTFB and TTLB include DNS time. The first-byte
/// hook fires once the
/// response head is parsed. The body is drained chunk by chunk and the
/// response dropped before the completion hook fires.
///
/// # Errors
///
/// Returns the failure reason when the request cannot be built, the exchange
/// fails or times out, the status is outside 2xx, or the body cannot be read.
pub async fn traced_get<T>(client: &Client, endpoint: &str, tracer: &mut T) -> Result<(), FailureReason>
where
    T: LatencyTracer + Send,
{
    let request = client.get(endpoint).build().map_err(|err| {
        debug!("Failed forming request {}: {}", endpoint, err);
        FailureReason::RequestConstruction
    })?;

    tracer.on_connect_start();
    let response = client.execute(request).await.map_err(|err| {
        debug!("Failed issuing request {}: {}", endpoint, err);
        if err.is_builder() {
            FailureReason::RequestConstruction
        } else {
            FailureReason::Transport
        }
    })?;
    tracer.on_first_byte();

    let status = response.status();
    if !status.is_success() {
        debug!("Received non-2xx response from server: {}", status.as_u16());
        return Err(FailureReason::NonSuccessStatus(status.as_u16()));
    }

    let mut body = response.bytes_stream();
    while let Some(chunk) = body.next().await {
        if let Err(err) = chunk {
            debug!("Failed reading response from {}: {}", endpoint, err);
            return Err(if err.is_timeout() {
                FailureReason::Transport
            } else {
                FailureReason::BodyRead
            });
        }
    }
    drop(body);
    tracer.on_body_complete();

    Ok(())
}
