use std::path::Path;
use std::sync::Arc;

use tracing::{error, info};

use crate::domain::run::RunConfig;
use crate::error::{AppError, AppResult};
use crate::http::{Flood, FloodPlan, HttpProbe, build_client};
use crate::metrics::Aggregator;
use crate::shutdown_handlers::{setup_signal_shutdown_handler, shutdown_channel};

use super::summary;

/// Runs one flood against `run.endpoint`, prints the summary and writes the
/// report file when one is configured.
///
/// The summary is printed before the report is written, so a failed write
/// still leaves the measured stats on stdout.
pub(crate) async fn run_local(run: RunConfig) -> AppResult<()> {
    for line in summary::banner_lines(&run) {
        println!("{}", line);
    }

    let client = build_client(run.timeout)?;
    let probe = Arc::new(HttpProbe::new(client, run.endpoint.clone()));
    let aggregator = Arc::new(Aggregator::new());

    let (shutdown_tx, mut shutdown_rx) = shutdown_channel();
    let signal_shutdown_handle = setup_signal_shutdown_handler(&shutdown_tx);

    let mut flood = Flood::new(FloodPlan::from(&run), probe, Arc::clone(&aggregator));
    let flood_report = flood.run(&mut shutdown_rx).await;
    info!(
        "Flood finished: {} launched, {} settled, {} abandoned.",
        flood_report.launched, flood_report.settled, flood_report.abandoned
    );

    // Releases the signal handler.
    drop(shutdown_tx.send(()));
    signal_shutdown_handle.await?;

    let snapshot = aggregator.snapshot();
    summary::print_summary(&snapshot, &flood_report);

    if let Some(path) = run.report_path.as_deref() {
        match aggregator.persist(Path::new(path)).await {
            Ok(_) => info!("Report written to {}", path),
            Err(err) => {
                error!("Failed to write report: {}", err);
                return Err(AppError::from(err));
            }
        }
    }

    Ok(())
}
