use std::path::PathBuf;

use super::choices::{CutadaptMode, RunMode, TrimmingSoftware};

mod getters;
mod mk_options;

/// Validated user options, read-only once built
#[derive(Debug, Clone)]
pub struct Options {
    input_directory: PathBuf,
    input_pattern: Box<str>,
    input_readtag: Box<str>,
    trimming_software: TrimmingSoftware,
    trimming_quality: i64,
    adapter_read1: Box<str>,
    adapter_read2: Box<str>,
    minimum_length: u32,
    cutadapt_mode: CutadaptMode,
    cutadapt_options: Box<str>,
    kraken_databases: Vec<PathBuf>,
    disable_trimming: bool,
    skip_phix_removal: bool,
    skip_fastqc_raw: bool,
    skip_fastqc_cleaned: bool,
    skip_kraken: bool,
    execution: Execution,
}

/// Options that only concern how the workflow engine is invoked
#[derive(Debug, Clone)]
pub struct Execution {
    working_directory: PathBuf,
    data_directory: Option<PathBuf>,
    apptainer_prefix: Option<PathBuf>,
    slurm_queue: Box<str>,
    slurm_memory: Box<str>,
    run_mode: RunMode,
    jobs: u32,
    force: bool,
    use_apptainer: bool,
    dry_run: bool,
    execute: bool,
}
