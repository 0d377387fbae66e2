mod choices;
mod cli_model;
mod options;

pub use choices::{CutadaptMode, RunMode, TrimmingSoftware};
pub(crate) use cli_model::NAME;
pub use options::{Execution, Options};

use crate::log_utils::{init_log, LogLevel};

/// What the command line asks for
pub enum Request {
    /// Print the external dependencies and stop
    Deps,
    Setup(Options),
}

/// Parse the command line, start logging and validate the options.
///
/// `--help` and `--version` are handled (and the process exits) inside clap
/// before anything else happens.
pub fn handle_cli() -> anyhow::Result<Request> {
    let m = cli_model::cli_model().get_matches();

    let level = m
        .get_one::<LogLevel>("level")
        .copied()
        .unwrap_or(LogLevel::Info);
    init_log(level)?;
    debug!("Log level set to {}", level);

    if m.get_flag("deps") {
        return Ok(Request::Deps);
    }
    Options::from_matches(&m).map(Request::Setup)
}

/// Options from an explicit argument list, program name excluded
#[cfg(test)]
pub(crate) fn options_from_args(args: &[&str]) -> anyhow::Result<Options> {
    let m = cli_model::cli_model()
        .try_get_matches_from(std::iter::once(NAME).chain(args.iter().copied()))?;
    Options::from_matches(&m)
}
