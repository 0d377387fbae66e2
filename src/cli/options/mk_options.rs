use std::path::{Path, PathBuf};

use clap::ArgMatches;
use lazy_static::lazy_static;
use regex::Regex;

use crate::{deps::find_in_path, error::QcError};

use super::{
    super::choices::{CutadaptMode, RunMode, TrimmingSoftware},
    Execution, Options,
};

lazy_static! {
    static ref RE_MEMORY: Regex = Regex::new(r"^(?i:[0-9]+[KMGT]?)$").unwrap();
}

fn get_value<T: Clone + Send + Sync + 'static>(m: &ArgMatches, id: &str) -> anyhow::Result<T> {
    m.try_get_one::<T>(id)?
        .cloned()
        .ok_or_else(|| anyhow!("Missing value for option {}", id))
}

fn get_str(m: &ArgMatches, id: &str) -> anyhow::Result<Box<str>> {
    get_value::<String>(m, id).map(Box::from)
}

/// Adapters are handed to the trimmer as given; only a `file:PATH`
/// reference is checked, and it must name an existing file
fn check_adapter(adapter: &str, opt: &str) -> Result<(), QcError> {
    match adapter.strip_prefix("file:") {
        Some(p) if !Path::new(p).is_file() => Err(QcError::validation(format!(
            "adapter file '{}' given with --{} does not exist",
            p, opt
        ))),
        _ => Ok(()),
    }
}

fn check_input_directory(dir: &Path) -> Result<(), QcError> {
    if dir.is_dir() {
        Ok(())
    } else if dir.exists() {
        Err(QcError::validation(format!(
            "input directory {} is not a directory",
            dir.display()
        )))
    } else {
        Err(QcError::validation(format!(
            "input directory {} does not exist",
            dir.display()
        )))
    }
}

fn check_kraken_databases(dbs: &[PathBuf], skip: bool) -> Result<(), QcError> {
    if let Some(db) = dbs.iter().find(|p| !p.exists()) {
        return Err(QcError::validation(format!(
            "kraken database {} does not exist",
            db.display()
        )));
    }
    if !skip && dbs.is_empty() {
        return Err(QcError::validation(
            "no kraken database given; use --kraken-databases or --skip-kraken",
        ));
    }
    Ok(())
}

impl Options {
    /// Build and validate the options record.
    ///
    /// Only reads the filesystem; every check that can fail is done here so
    /// that nothing is written for an invalid command line.
    pub fn from_matches(m: &ArgMatches) -> anyhow::Result<Self> {
        let input_directory = get_value::<PathBuf>(m, "input_directory")?;
        check_input_directory(&input_directory)?;

        let input_pattern = get_str(m, "input_pattern")?;
        if input_pattern.is_empty() {
            return Err(QcError::validation("--input-pattern may not be empty").into());
        }
        let input_readtag = get_str(m, "input_readtag")?;
        if !(input_readtag.is_empty() || input_readtag.contains("[12]")) {
            return Err(QcError::validation(format!(
                "--input-readtag must contain [12] (got '{}')",
                input_readtag
            ))
            .into());
        }

        let trimming_software = get_value::<TrimmingSoftware>(m, "trimming_software_choice")?;
        let trimming_quality = get_value::<i64>(m, "trimming_quality")?;
        let minimum_length = get_value::<u32>(m, "trimming_minimum_length")?;
        let cutadapt_mode = get_value::<CutadaptMode>(m, "trimming_cutadapt_mode")?;
        let cutadapt_options = get_str(m, "trimming_cutadapt_options")?;
        let adapter_read1 = get_str(m, "trimming_adapter_read1")?;
        check_adapter(&adapter_read1, "trimming-adapter-read1")?;
        let adapter_read2 = get_str(m, "trimming_adapter_read2")?;
        check_adapter(&adapter_read2, "trimming-adapter-read2")?;

        let skip_kraken = m.get_flag("skip_kraken");
        let kraken_databases: Vec<PathBuf> = m
            .get_many::<PathBuf>("kraken_databases")
            .map(|v| v.cloned().collect())
            .unwrap_or_default();
        check_kraken_databases(&kraken_databases, skip_kraken)?;
        debug!("{} kraken database(s) checked", kraken_databases.len());

        let execution = Execution::from_matches(m)?;

        Ok(Self {
            input_directory,
            input_pattern,
            input_readtag,
            trimming_software,
            trimming_quality,
            adapter_read1,
            adapter_read2,
            minimum_length,
            cutadapt_mode,
            cutadapt_options,
            kraken_databases,
            disable_trimming: m.get_flag("disable_trimming"),
            skip_phix_removal: m.get_flag("skip_phix_removal"),
            skip_fastqc_raw: m.get_flag("skip_fastqc_raw"),
            skip_fastqc_cleaned: m.get_flag("skip_fastqc_cleaned"),
            skip_kraken,
            execution,
        })
    }
}

impl Execution {
    fn from_matches(m: &ArgMatches) -> anyhow::Result<Self> {
        let run_mode = match m.try_get_one::<RunMode>("run_mode")? {
            Some(r) => *r,
            None => {
                let r = if find_in_path("sbatch").is_some() {
                    RunMode::Slurm
                } else {
                    RunMode::Local
                };
                debug!("No run mode given, using {}", r);
                r
            }
        };

        let slurm_memory = get_str(m, "slurm_memory")?;
        if !RE_MEMORY.is_match(&slurm_memory) {
            return Err(QcError::validation(format!(
                "--slurm-memory must look like 4G or 500M (got '{}')",
                slurm_memory
            ))
            .into());
        }

        Ok(Self {
            working_directory: get_value::<PathBuf>(m, "working_directory")?,
            data_directory: m.try_get_one::<PathBuf>("data_directory")?.cloned(),
            apptainer_prefix: m.try_get_one::<PathBuf>("apptainer_prefix")?.cloned(),
            slurm_queue: get_str(m, "slurm_queue")?,
            slurm_memory,
            run_mode,
            jobs: get_value::<u32>(m, "jobs")?,
            force: m.get_flag("force"),
            use_apptainer: m.get_flag("use_apptainer"),
            dry_run: m.get_flag("dry_run"),
            execute: m.get_flag("execute"),
        })
    }
}
