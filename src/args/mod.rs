//! CLI argument types and parsing helpers.
mod cli;
mod defaults;
pub(crate) mod parsers;

#[cfg(test)]
mod tests;

pub use cli::FlooderArgs;

pub(crate) use defaults::{
    DEFAULT_CONFIG_FILES, DEFAULT_MAX_RETRY, DEFAULT_SHUTDOWN_GRACE, DEFAULT_USER_AGENT,
};
