use std::path::{self, Path};

use anyhow::Context;

use crate::{
    assets::RULES_FILE,
    cli::{Execution, RunMode, NAME},
    config::CONFIG_FILE,
};

pub const LAUNCHER_FILE: &str = "quality_control.sh";
pub const STATS_FILE: &str = "stats.txt";

/// Quote `s` for a POSIX shell unless it is made only of safe characters
pub fn shell_quote(s: &str) -> String {
    let safe = !s.is_empty()
        && s
            .bytes()
            .all(|b| b.is_ascii_alphanumeric() || b"-_./=:,+@%".contains(&b));
    if safe {
        s.to_string()
    } else {
        format!("'{}'", s.replace('\'', r"'\''"))
    }
}

/// Snakemake command line, one argument per element
pub fn snakemake_args(x: &Execution) -> anyhow::Result<Vec<String>> {
    let jobs = x.jobs().to_string();
    let mut args: Vec<String> = [
        "snakemake",
        "-s",
        RULES_FILE,
        "--configfile",
        CONFIG_FILE,
        "--cores",
        jobs.as_str(),
        "--jobs",
        jobs.as_str(),
        "--printshellcmds",
        "--rerun-incomplete",
        "--keep-going",
        "--stats",
        STATS_FILE,
    ]
    .iter()
    .map(|s| s.to_string())
    .collect();

    if x.run_mode() == RunMode::Slurm {
        args.extend([
            "--executor".to_string(),
            "slurm".to_string(),
            "--default-resources".to_string(),
            format!("slurm_partition={}", x.slurm_queue()),
            format!("mem={}", x.slurm_memory()),
        ]);
    }

    if x.use_apptainer() {
        args.push("--use-apptainer".to_string());
        if let Some(p) = x.apptainer_prefix() {
            let p = absolute(p)?;
            args.push("--apptainer-prefix".to_string());
            args.push(p.display().to_string());
        }
    }

    if x.dry_run() {
        args.push("--dry-run".to_string());
    }
    Ok(args)
}

fn absolute(p: &Path) -> anyhow::Result<path::PathBuf> {
    path::absolute(p).with_context(|| format!("Could not resolve path {}", p.display()))
}

/// Full text of the launcher script.
///
/// The script changes to its own directory first, so it can be started
/// from anywhere.
pub fn launcher_script(x: &Execution) -> anyhow::Result<String> {
    let cmd: Vec<_> = snakemake_args(x)?.iter().map(|a| shell_quote(a)).collect();
    Ok(format!(
        "#!/usr/bin/env bash\n# {} {} ({} mode)\nset -e\ncd \"$(dirname \"$0\")\"\n{}\n",
        NAME,
        env!("CARGO_PKG_VERSION"),
        x.run_mode(),
        cmd.join(" ")
    ))
}
