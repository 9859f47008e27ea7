//! HTTP request tracing and the flood dispatcher.
mod client;
mod flood;
mod probe;
mod trace;


pub use client::build_client;
pub use flood::{Flood, FloodPlan, FloodReport, FloodState};
pub use probe::{HttpProbe, RequestProbe, traced_get};
pub use trace::{InstantTracer, LatencyTracer, Timings};
