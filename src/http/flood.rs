use std::sync::Arc;
use std::time::Duration;

use tokio::sync::broadcast::error::RecvError;
use tokio::task::{JoinError, JoinSet};
use tokio::time::{Instant, interval, sleep_until};
use tracing::{debug, error, info, warn};

use crate::domain::run::RunConfig;
use crate::metrics::{Aggregator, FailureReason, RequestOutcome};
use crate::shutdown::ShutdownReceiver;

use super::probe::RequestProbe;

/// Scheduling signal period: one batch per tick.
const TICK_INTERVAL: Duration = Duration::from_secs(1);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FloodState {
    Idle,
    Running,
    Draining,
    Done,
}

/// Schedule for one flood.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FloodPlan {
    pub requests_per_tick: u64,
    pub ticks: u64,
    pub tick_interval: Duration,
    pub shutdown_grace: Duration,
    pub verbose: bool,
}

impl From<&RunConfig> for FloodPlan {
    fn from(run: &RunConfig) -> Self {
        Self {
            requests_per_tick: run.requests_per_second.get(),
            ticks: run.duration.get(),
            tick_interval: TICK_INTERVAL,
            shutdown_grace: run.shutdown_grace,
            verbose: run.verbose,
        }
    }
}

/// What the dispatcher did, as opposed to what the requests measured.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FloodReport {
    pub ticks: u64,
    pub launched: u64,
    pub settled: u64,
    /// Tasks aborted after the shutdown grace period; never recorded.
    pub abandoned: u64,
    pub interrupted: bool,
}

/// Fixed-rate dispatcher.
///
/// Every tick launches `requests_per_tick` request tasks into one task set.
/// After the last tick the set is drained; the flood is `Done` only once every
/// launched task has recorded its outcome, or was abandoned after a shutdown.
pub struct Flood<P> {
    plan: FloodPlan,
    probe: Arc<P>,
    aggregator: Arc<Aggregator>,
    state: FloodState,
}

impl<P> Flood<P>
where
    P: RequestProbe + 'static,
{
    #[must_use]
    pub const fn new(plan: FloodPlan, probe: Arc<P>, aggregator: Arc<Aggregator>) -> Self {
        Self {
            plan,
            probe,
            aggregator,
            state: FloodState::Idle,
        }
    }

    #[must_use]
    pub const fn state(&self) -> FloodState {
        self.state
    }

    /// Runs the schedule to completion.
    ///
    /// A message on `shutdown_rx` stops scheduling; tasks still in flight get
    /// `shutdown_grace` to finish before they are aborted.
    pub async fn run(&mut self, shutdown_rx: &mut ShutdownReceiver) -> FloodReport {
        let mut report = FloodReport::default();
        let mut tasks = JoinSet::new();
        let mut shutdown_open = true;

        self.state = FloodState::Running;
        let mut ticker = interval(self.plan.tick_interval);
        loop {
            tokio::select! {
                received = shutdown_rx.recv(), if shutdown_open => {
                    if is_shutdown(received) {
                        info!("Shutdown requested; no further batches will be sent.");
                        report.interrupted = true;
                        break;
                    }
                    shutdown_open = false;
                }
                _ = ticker.tick() => {
                    if report.ticks >= self.plan.ticks {
                        break;
                    }
                    debug!("Sending batch {}", report.ticks);
                    self.launch_batch(&mut tasks, &mut report);
                    report.ticks = report.ticks.saturating_add(1);
                }
            }

            while let Some(joined) = tasks.try_join_next() {
                self.settle(joined, &mut report);
            }
        }
        drop(ticker);

        self.state = FloodState::Draining;
        self.drain(&mut tasks, &mut report, shutdown_rx, shutdown_open)
            .await;

        self.state = FloodState::Done;
        report
    }

    fn launch_batch(&self, tasks: &mut JoinSet<()>, report: &mut FloodReport) {
        for _ in 0..self.plan.requests_per_tick {
            let probe = Arc::clone(&self.probe);
            let aggregator = Arc::clone(&self.aggregator);
            let verbose = self.plan.verbose;
            tasks.spawn(async move {
                let outcome = probe.probe().await;
                aggregator.record(&outcome);
                if verbose && let RequestOutcome::Success { ttfb, ttlb } = outcome {
                    println!(
                        "ttfb={:?} ttlb={:?} delta={:?}",
                        ttfb,
                        ttlb,
                        ttlb.saturating_sub(ttfb)
                    );
                }
            });
            report.launched = report.launched.saturating_add(1);
        }
    }

    async fn drain(
        &self,
        tasks: &mut JoinSet<()>,
        report: &mut FloodReport,
        shutdown_rx: &mut ShutdownReceiver,
        mut shutdown_open: bool,
    ) {
        let mut deadline = report.interrupted.then(|| self.grace_deadline());

        loop {
            let joined = if let Some(deadline) = deadline {
                tokio::select! {
                    joined = tasks.join_next() => joined,
                    () = sleep_until(deadline) => {
                        self.abandon(tasks, report).await;
                        return;
                    }
                }
            } else {
                tokio::select! {
                    joined = tasks.join_next() => joined,
                    received = shutdown_rx.recv(), if shutdown_open => {
                        if is_shutdown(received) {
                            info!(
                                "Shutdown requested; waiting up to {:?} for {} in-flight request(s).",
                                self.plan.shutdown_grace,
                                tasks.len()
                            );
                            report.interrupted = true;
                            deadline = Some(self.grace_deadline());
                        } else {
                            shutdown_open = false;
                        }
                        continue;
                    }
                }
            };

            match joined {
                Some(joined) => self.settle(joined, report),
                None => return,
            }
        }
    }

    fn grace_deadline(&self) -> Instant {
        let now = Instant::now();
        now.checked_add(self.plan.shutdown_grace).unwrap_or(now)
    }

    async fn abandon(&self, tasks: &mut JoinSet<()>, report: &mut FloodReport) {
        if !tasks.is_empty() {
            warn!(
                "Grace period elapsed; abandoning {} in-flight request(s).",
                tasks.len()
            );
        }
        tasks.abort_all();
        while let Some(joined) = tasks.join_next().await {
            match joined {
                Err(err) if err.is_cancelled() => {
                    report.abandoned = report.abandoned.saturating_add(1);
                }
                other => self.settle(other, report),
            }
        }
    }

    fn settle(&self, joined: Result<(), JoinError>, report: &mut FloodReport) {
        report.settled = report.settled.saturating_add(1);
        if let Err(err) = joined {
            // The task died before recording; count it so totals still add up.
            error!("Request task failed: {}", err);
            self.aggregator.add_failure(FailureReason::Transport);
        }
    }
}

/// Lagged still means a shutdown was sent.
fn is_shutdown(received: Result<(), RecvError>) -> bool {
    matches!(received, Ok(()) | Err(RecvError::Lagged(_)))
}
