use std::fmt;
use std::time::Duration;

use serde::Serialize;

/// Why a single request attempt did not count as a success.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureReason {
    /// The request could not be built (e.g. a malformed URL).
    RequestConstruction,
    /// DNS, connect, or timeout failure before a full exchange.
    Transport,
    /// The server answered with a status outside 2xx.
    NonSuccessStatus(u16),
    /// The body stream failed part way through.
    BodyRead,
    /// The body or connection could not be closed cleanly.
    BodyClose,
}

impl FailureReason {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            FailureReason::RequestConstruction => "request-construction-error",
            FailureReason::Transport => "transport-error",
            FailureReason::NonSuccessStatus(_) => "non-2xx-status",
            FailureReason::BodyRead => "body-read-error",
            FailureReason::BodyClose => "body-close-error",
        }
    }
}

impl fmt::Display for FailureReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FailureReason::NonSuccessStatus(status) => write!(f, "{} ({})", self.as_str(), status),
            FailureReason::RequestConstruction
            | FailureReason::Transport
            | FailureReason::BodyRead
            | FailureReason::BodyClose => f.write_str(self.as_str()),
        }
    }
}

/// Result of one traced request attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequestOutcome {
    Success { ttfb: Duration, ttlb: Duration },
    Failure { reason: FailureReason },
}

impl RequestOutcome {
    #[must_use]
    pub const fn failure(reason: FailureReason) -> Self {
        RequestOutcome::Failure { reason }
    }
}

/// Failure counts per reason.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FailureBreakdown {
    pub request_construction: u64,
    pub transport: u64,
    pub non_success_status: u64,
    pub body_read: u64,
    pub body_close: u64,
}

impl FailureBreakdown {
    pub(crate) fn bump(&mut self, reason: FailureReason) {
        let slot = match reason {
            FailureReason::RequestConstruction => &mut self.request_construction,
            FailureReason::Transport => &mut self.transport,
            FailureReason::NonSuccessStatus(_) => &mut self.non_success_status,
            FailureReason::BodyRead => &mut self.body_read,
            FailureReason::BodyClose => &mut self.body_close,
        };
        *slot = slot.saturating_add(1);
    }

    /// Non-zero counts, labelled, in a stable order.
    #[must_use]
    pub fn entries(&self) -> Vec<(&'static str, u64)> {
        [
            ("request-construction-error", self.request_construction),
            ("transport-error", self.transport),
            ("non-2xx-status", self.non_success_status),
            ("body-read-error", self.body_read),
            ("body-close-error", self.body_close),
        ]
        .into_iter()
        .filter(|(_, count)| *count > 0)
        .collect()
    }
}

/// Consistent copy of the aggregation at one instant.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AggregationSnapshot {
    pub successes: u64,
    pub failures: u64,
    /// Average time to first byte; `None` until the first success.
    pub avg_ttfb: Option<Duration>,
    /// Average time to last byte; `None` until the first success.
    pub avg_ttlb: Option<Duration>,
    pub breakdown: FailureBreakdown,
}

impl AggregationSnapshot {
    #[must_use]
    pub const fn total(&self) -> u64 {
        self.successes.saturating_add(self.failures)
    }
}

/// On-disk form of the aggregation. Durations are nanosecond counts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PersistedReport {
    pub successes: u64,
    pub failures: u64,
    pub ttfb: u64,
    pub ttlb: u64,
}

impl From<&AggregationSnapshot> for PersistedReport {
    fn from(snapshot: &AggregationSnapshot) -> Self {
        Self {
            successes: snapshot.successes,
            failures: snapshot.failures,
            ttfb: duration_nanos(snapshot.avg_ttfb),
            ttlb: duration_nanos(snapshot.avg_ttlb),
        }
    }
}

fn duration_nanos(value: Option<Duration>) -> u64 {
    value.map_or(0, |duration| {
        u64::try_from(duration.as_nanos()).unwrap_or(u64::MAX)
    })
}
