//! Core library for the `flooder` CLI.
//!
//! `flooder` sends a fixed number of HTTP GET requests per second to one
//! endpoint for a fixed number of seconds, measures time to first byte and
//! time to last byte of every request, and reports running averages. The
//! library exposes the building blocks used by the binary: argument and
//! config types, the latency tracer and dispatcher, and the aggregator.
pub mod args;
pub mod config;
pub mod domain;
pub mod error;
pub mod http;
pub mod metrics;
pub mod shutdown;
pub mod shutdown_handlers;
