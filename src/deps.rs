use std::{
    env,
    io::{self, Write},
    path::{Path, PathBuf},
};

/// External programs the workflow calls, with what they are used for
pub const DEPENDENCIES: &[(&str, &str)] = &[
    ("snakemake", "workflow engine"),
    ("bwa", "phix removal"),
    ("samtools", "phix removal"),
    ("cutadapt", "trimming (cutadapt)"),
    ("atropos", "trimming (atropos)"),
    ("fastqc", "read quality reports"),
    ("kraken2", "taxonomic classification"),
    ("multiqc", "summary report"),
];

#[cfg(unix)]
fn is_executable(p: &Path) -> bool {
    use std::os::unix::fs::PermissionsExt;
    p.metadata()
        .map(|m| m.is_file() && m.permissions().mode() & 0o111 != 0)
        .unwrap_or(false)
}

#[cfg(not(unix))]
fn is_executable(p: &Path) -> bool {
    p.is_file()
}

/// First executable called `name` found on `PATH`
pub fn find_in_path(name: &str) -> Option<PathBuf> {
    let path = env::var_os("PATH")?;
    env::split_paths(&path)
        .map(|d| d.join(name))
        .find(|p| is_executable(p))
}

/// Write one line per dependency: name, purpose and location (if found)
pub fn write_report<W: Write>(mut wrt: W) -> io::Result<()> {
    for (name, purpose) in DEPENDENCIES {
        let loc = find_in_path(name)
            .map(|p| p.display().to_string())
            .unwrap_or_else(|| "not found".to_string());
        writeln!(wrt, "{:<10}\t{:<26}\t{}", name, purpose, loc)?;
    }
    Ok(())
}
