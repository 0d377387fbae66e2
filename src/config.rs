use std::path::PathBuf;

use serde::Serialize;

use crate::cli::{CutadaptMode, TrimmingSoftware};

mod mapper;

pub const CONFIG_FILE: &str = "config.yaml";
pub const PHIX_REFERENCE: &str = "phiX174.fa";

/// Quality threshold used when the user leaves the -1 sentinel in place
pub const DEFAULT_TRIMMING_QUALITY: i64 = 30;

/// Workflow configuration as read by the pipeline rules.
///
/// Field order is the serialization order, so the written file is
/// reproducible for identical options.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ConfigRecord {
    pub input_directory: PathBuf,
    pub input_pattern: String,
    pub input_readtag: String,
    pub trimming: Trimming,
    pub cutadapt: Cutadapt,
    pub bwa_mem_phix: BwaMemPhix,
    pub kraken: Kraken,
    pub fastqc: Fastqc,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Trimming {
    pub software_choice: TrimmingSoftware,
    #[serde(rename = "do")]
    pub do_: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Cutadapt {
    pub tool_choice: TrimmingSoftware,
    pub fwd: String,
    pub rev: String,
    pub m: u32,
    pub mode: CutadaptMode,
    pub options: String,
    pub quality: i64,
    pub threads: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BwaMemPhix {
    #[serde(rename = "do")]
    pub do_: bool,
    pub reference_file: String,
    pub threads: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Kraken {
    #[serde(rename = "do")]
    pub do_: bool,
    pub databases: Vec<PathBuf>,
    pub threads: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Fastqc {
    pub do_raw: bool,
    pub do_after_adapter_removal: bool,
    pub options: String,
    pub threads: u32,
}

impl ConfigRecord {
    /// Text written to the working directory.
    ///
    /// JSON is a subset of YAML, so snakemake reads this through
    /// `--configfile` like any YAML config.
    pub fn to_text(&self) -> anyhow::Result<String> {
        let mut s = serde_json::to_string_pretty(self)?;
        s.push('\n');
        Ok(s)
    }
}
