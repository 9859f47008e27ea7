use tracing_subscriber::{EnvFilter, FmtSubscriber};

/// Environment variables consulted, in order, before the verbosity default.
const FILTER_ENV_VARS: [&str; 2] = ["FLOODER_LOG", "RUST_LOG"];

const fn default_directives(verbose: bool) -> &'static str {
    if verbose { "flooder=debug,info" } else { "info" }
}

fn env_filter(verbose: bool) -> EnvFilter {
    FILTER_ENV_VARS
        .iter()
        .find_map(|name| std::env::var(name).ok())
        .and_then(|directives| EnvFilter::try_new(directives).ok())
        .unwrap_or_else(|| EnvFilter::new(default_directives(verbose)))
}

/// Installs the global subscriber on stderr, leaving stdout to the banner,
/// the per-request lines and the summary.
pub fn init_logging(verbose: bool, no_color: bool) {
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(env_filter(verbose))
        .with_ansi(!no_color)
        .with_target(false)
        .with_writer(std::io::stderr)
        .finish();

    if let Err(err) = tracing::subscriber::set_global_default(subscriber) {
        eprintln!("Failed to set global default subscriber: {}", err);
    }
}
