//! Error types for every fallible layer outside the request path.
//!
//! Request-level failures are not errors here: they are counted as
//! `metrics::FailureReason` values and never abort a run.
mod app;
mod config;
mod http;
mod report;
mod validation;

pub use app::{AppError, AppResult};
pub use config::ConfigError;
pub use http::HttpError;
pub use report::ReportError;
pub use validation::ValidationError;
