//! Run-wide shutdown fan-out.
use tokio::sync::broadcast;

/// Fired once when the run should stop scheduling new batches.
pub type ShutdownSender = broadcast::Sender<()>;
pub type ShutdownReceiver = broadcast::Receiver<()>;
