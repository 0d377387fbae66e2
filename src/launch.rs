use std::{
    path::{Path, PathBuf},
    process::{Command, ExitStatus},
};

use crate::error::QcError;

/// Report written by the workflow at the end of a successful run
pub const REPORT_FILE: &str = "summary.html";

/// Run the launcher script in `workdir` and wait for it.
///
/// Output goes straight to the terminal and the exit status is returned
/// as is.
pub fn launch(workdir: &Path, launcher_name: &str) -> Result<ExitStatus, QcError> {
    info!("Running {} in {}", launcher_name, workdir.display());
    Command::new("bash")
        .arg(launcher_name)
        .current_dir(workdir)
        .status()
        .map_err(|e| QcError::io(format!("Could not start {}", launcher_name), e))
}

/// Location of the summary report, if the workflow produced one
pub fn report(workdir: &Path) -> Option<PathBuf> {
    let p = workdir.join(REPORT_FILE);
    if p.is_file() {
        Some(p)
    } else {
        None
    }
}
