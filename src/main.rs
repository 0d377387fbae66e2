#[macro_use]
extern crate log;
#[macro_use]
extern crate anyhow;

mod assets;
mod cli;
mod config;
mod deps;
mod error;
mod inputs;
mod launch;
mod launcher;
mod log_utils;
mod workdir;

use std::io;

use assets::AssetSet;
use cli::{Options, Request};
use config::ConfigRecord;
use error::QcError;
use launcher::LAUNCHER_FILE;
use workdir::Workdir;

fn main() {
    if let Err(e) = run() {
        error!("{:#}", e);
        std::process::exit(error::exit_code(&e));
    }
}

fn run() -> anyhow::Result<()> {
    match cli::handle_cli()? {
        Request::Deps => deps::write_report(io::stdout().lock())
            .map_err(|e| anyhow::Error::from(QcError::io("Could not write dependency report", e))),
        Request::Setup(opts) => setup(&opts),
    }
}

fn setup(opts: &Options) -> anyhow::Result<()> {
    let x = opts.execution();

    // All checks before the first write
    let workdir = Workdir::new(x.working_directory(), x.force())?;
    workdir.check()?;
    let assets = AssetSet::locate(x.data_directory())?;
    debug!(
        "Using {} pipeline file(s) from {}",
        assets.assets().len(),
        assets.data_dir().display()
    );
    let found = inputs::discover(
        opts.input_directory(),
        opts.input_pattern(),
        opts.input_readtag(),
    )?;
    debug!(
        "{} input file(s): {} read 1, {} read 2",
        found.files, found.read1, found.read2
    );

    let config = ConfigRecord::from_options(opts)?;
    let script = launcher::launcher_script(x)?;
    workdir.materialize(&config, &assets, &script)?;
    info!(
        "Working directory {} ready ({} mode)",
        workdir.path().display(),
        x.run_mode()
    );

    if !x.execute() {
        info!(
            "Check the script {}/{}, then run it (it starts from its own directory)",
            workdir.path().display(),
            LAUNCHER_FILE
        );
        return Ok(());
    }

    let status = launch::launch(workdir.path(), LAUNCHER_FILE)?;
    if !status.success() {
        return Err(QcError::Delegate(status).into());
    }
    if x.dry_run() {
        info!("Dry run complete");
    } else {
        match launch::report(workdir.path()) {
            Some(p) => info!("Workflow finished; report in {}", p.display()),
            None => warn!(
                "Workflow finished but no {} was produced",
                launch::REPORT_FILE
            ),
        }
    }
    Ok(())
}
