use std::path::{Path, PathBuf};

use super::{
    super::choices::{CutadaptMode, RunMode, TrimmingSoftware},
    Execution, Options,
};

impl Options {
    pub fn input_directory(&self) -> &Path {
        &self.input_directory
    }

    pub fn input_pattern(&self) -> &str {
        &self.input_pattern
    }

    pub fn input_readtag(&self) -> &str {
        &self.input_readtag
    }

    pub fn trimming_software(&self) -> TrimmingSoftware {
        self.trimming_software
    }

    pub fn disable_trimming(&self) -> bool {
        self.disable_trimming
    }

    /// Raw value, including the -1 sentinel
    pub fn trimming_quality(&self) -> i64 {
        self.trimming_quality
    }

    pub fn adapter_read1(&self) -> &str {
        &self.adapter_read1
    }

    pub fn adapter_read2(&self) -> &str {
        &self.adapter_read2
    }

    pub fn minimum_length(&self) -> u32 {
        self.minimum_length
    }

    pub fn cutadapt_mode(&self) -> CutadaptMode {
        self.cutadapt_mode
    }

    pub fn cutadapt_options(&self) -> &str {
        &self.cutadapt_options
    }

    pub fn skip_phix_removal(&self) -> bool {
        self.skip_phix_removal
    }

    pub fn skip_fastqc_raw(&self) -> bool {
        self.skip_fastqc_raw
    }

    pub fn skip_fastqc_cleaned(&self) -> bool {
        self.skip_fastqc_cleaned
    }

    pub fn skip_kraken(&self) -> bool {
        self.skip_kraken
    }

    pub fn kraken_databases(&self) -> &[PathBuf] {
        &self.kraken_databases
    }

    pub fn execution(&self) -> &Execution {
        &self.execution
    }
}

impl Execution {
    pub fn working_directory(&self) -> &Path {
        &self.working_directory
    }

    pub fn data_directory(&self) -> Option<&Path> {
        self.data_directory.as_deref()
    }

    pub fn force(&self) -> bool {
        self.force
    }

    pub fn run_mode(&self) -> RunMode {
        self.run_mode
    }

    pub fn jobs(&self) -> u32 {
        self.jobs
    }

    pub fn use_apptainer(&self) -> bool {
        self.use_apptainer
    }

    pub fn apptainer_prefix(&self) -> Option<&Path> {
        self.apptainer_prefix.as_deref()
    }

    pub fn dry_run(&self) -> bool {
        self.dry_run
    }

    pub fn execute(&self) -> bool {
        self.execute
    }

    pub fn slurm_queue(&self) -> &str {
        &self.slurm_queue
    }

    pub fn slurm_memory(&self) -> &str {
        &self.slurm_memory
    }
}
