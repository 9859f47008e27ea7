use std::ffi::OsString;
use std::path::Path;

use clap::{ArgMatches, CommandFactory, FromArgMatches};

use crate::app::run_local;
use crate::args::{DEFAULT_CONFIG_FILES, FlooderArgs};
use crate::config::{apply_config, load_config};
use crate::domain::run::RunConfig;
use crate::error::{AppResult, ValidationError};

pub(crate) fn run() -> AppResult<()> {
    let (mut args, matches) = parse_args()?;

    if let Some(config) = load_config(args.config.as_deref())? {
        apply_config(&mut args, &matches, &config)?;
    }

    crate::logger::init_logging(args.verbose, args.no_color);

    let run = match RunConfig::from_args(&args) {
        Ok(run) => run,
        Err(err) => {
            tracing::error!("{}", err);
            return Err(err.into());
        }
    };

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()?;

    runtime.block_on(run_local(run))
}

fn parse_args() -> AppResult<(FlooderArgs, ArgMatches)> {
    let mut cmd = FlooderArgs::command();
    let raw_args: Vec<OsString> = std::env::args_os().collect();

    if should_show_help(&raw_args) {
        // Usage goes to stderr; a run without an endpoint is still an error.
        eprintln!("{}", cmd.render_help());
        return Err(ValidationError::MissingEndpoint.into());
    }

    let matches = cmd.get_matches_from(raw_args);
    let args = FlooderArgs::from_arg_matches(&matches)?;

    Ok((args, matches))
}

/// A bare invocation is a usage error unless a default config file or an
/// endpoint in the environment could drive the run.
fn should_show_help(raw_args: &[OsString]) -> bool {
    let treat_as_empty =
        matches!(raw_args, [] | [_]) || matches!(raw_args, [_, second] if second == "--");
    if !treat_as_empty {
        return false;
    }

    !has_default_config() && std::env::var_os("FLOODER_ENDPOINT").is_none()
}

fn has_default_config() -> bool {
    DEFAULT_CONFIG_FILES
        .iter()
        .any(|path| Path::new(path).exists())
}
