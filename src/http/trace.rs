use std::time::Duration;

use tokio::time::Instant;

/// Lifecycle hooks for one outbound request.
///
/// An HTTP client integration calls each hook once, in order, at the moment
/// the event happens.
pub trait LatencyTracer {
    /// The connection for this request starts being established.
    fn on_connect_start(&mut self);
    /// The first byte of the response arrived.
    fn on_first_byte(&mut self);
    /// The whole body was read and the connection released.
    fn on_body_complete(&mut self);
}

/// Latencies measured from connection start.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Timings {
    pub ttfb: Duration,
    pub ttlb: Duration,
}

/// Stamps every hook with a monotonic instant.
#[derive(Debug, Clone, Copy)]
pub struct InstantTracer {
    connect_start: Instant,
    first_byte: Instant,
    body_complete: Instant,
}

impl InstantTracer {
    #[must_use]
    pub fn new() -> Self {
        let now = Instant::now();
        Self {
            connect_start: now,
            first_byte: now,
            body_complete: now,
        }
    }

    #[must_use]
    pub fn timings(&self) -> Timings {
        Timings {
            ttfb: self
                .first_byte
                .saturating_duration_since(self.connect_start),
            ttlb: self
                .body_complete
                .saturating_duration_since(self.connect_start),
        }
    }
}

impl Default for InstantTracer {
    fn default() -> Self {
        Self::new()
    }
}

impl LatencyTracer for InstantTracer {
    fn on_connect_start(&mut self) {
        self.connect_start = Instant::now();
    }

    fn on_first_byte(&mut self) {
        self.first_byte = Instant::now();
    }

    fn on_body_complete(&mut self) {
        self.body_complete = Instant::now();
    }
}
