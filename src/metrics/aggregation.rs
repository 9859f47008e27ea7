use std::path::Path;
use std::sync::{Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use crate::error::ReportError;

use super::types::{AggregationSnapshot, FailureBreakdown, FailureReason, PersistedReport, RequestOutcome};

/// Integer running mean in nanoseconds.
///
/// `carry_ns` keeps the remainder the integer division drops, so after `n`
/// samples `mean_ns == floor(sum / n)` and `carry_ns == sum % n` no matter
/// which order the samples arrived in.
#[derive(Debug, Default, Clone, Copy)]
struct RunningMean {
    mean_ns: i128,
    carry_ns: i128,
}

impl RunningMean {
    /// `count` is the number of samples including this one.
    fn update(&mut self, sample: Duration, count: u64) {
        let count = i128::from(count.max(1));
        let sample_ns = i128::try_from(sample.as_nanos()).unwrap_or(i128::MAX);
        let delta = sample_ns
            .saturating_sub(self.mean_ns)
            .saturating_add(self.carry_ns);
        self.mean_ns = self
            .mean_ns
            .saturating_add(delta.checked_div_euclid(count).unwrap_or(0));
        self.carry_ns = delta.checked_rem_euclid(count).unwrap_or(0);
    }

    fn value(self) -> Duration {
        Duration::from_nanos(u64::try_from(self.mean_ns.max(0)).unwrap_or(u64::MAX))
    }
}

#[derive(Debug, Default)]
struct AggregationState {
    successes: u64,
    failures: u64,
    ttfb: RunningMean,
    ttlb: RunningMean,
    breakdown: FailureBreakdown,
}

/// Run-wide statistics shared by every request task.
///
/// Each update takes the lock once, so counts and averages always move
/// together.
#[derive(Debug, Default)]
pub struct Aggregator {
    state: Mutex<AggregationState>,
}

impl Aggregator {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_success(&self, ttfb: Duration, ttlb: Duration) {
        let mut state = self.lock();
        state.successes = state.successes.saturating_add(1);
        let count = state.successes;
        state.ttfb.update(ttfb, count);
        state.ttlb.update(ttlb, count);
    }

    pub fn add_failure(&self, reason: FailureReason) {
        let mut state = self.lock();
        state.failures = state.failures.saturating_add(1);
        state.breakdown.bump(reason);
    }

    pub fn record(&self, outcome: &RequestOutcome) {
        match *outcome {
            RequestOutcome::Success { ttfb, ttlb } => self.add_success(ttfb, ttlb),
            RequestOutcome::Failure { reason } => self.add_failure(reason),
        }
    }

    #[must_use]
    pub fn snapshot(&self) -> AggregationSnapshot {
        let state = self.lock();
        let has_successes = state.successes > 0;
        AggregationSnapshot {
            successes: state.successes,
            failures: state.failures,
            avg_ttfb: has_successes.then(|| state.ttfb.value()),
            avg_ttlb: has_successes.then(|| state.ttlb.value()),
            breakdown: state.breakdown,
        }
    }

    /// Writes the current snapshot as JSON to `path`.
    ///
    /// # Errors
    ///
    /// Returns an error when the snapshot cannot be serialized or the file
    /// cannot be written.
    pub async fn persist(&self, path: &Path) -> Result<AggregationSnapshot, ReportError> {
        let snapshot = self.snapshot();
        let payload = serde_json::to_vec(&PersistedReport::from(&snapshot))
            .map_err(|err| ReportError::Serialize { source: err })?;
        tokio::fs::write(path, payload)
            .await
            .map_err(|err| ReportError::Write {
                path: path.to_path_buf(),
                source: err,
            })?;
        Ok(snapshot)
    }

    fn lock(&self) -> MutexGuard<'_, AggregationState> {
        // Updates cannot panic half way, so a poisoned guard still holds consistent state.
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
