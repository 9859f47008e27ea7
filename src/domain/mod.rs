//! Validated, immutable run settings.
pub mod run;
