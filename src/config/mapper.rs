use std::path::{self, Path, PathBuf};

use anyhow::Context;

use crate::cli::Options;

use super::{
    BwaMemPhix, ConfigRecord, Cutadapt, Fastqc, Kraken, Trimming, DEFAULT_TRIMMING_QUALITY,
    PHIX_REFERENCE,
};

fn absolute(p: &Path) -> anyhow::Result<PathBuf> {
    path::absolute(p).with_context(|| format!("Could not resolve path {}", p.display()))
}

/// Adapter as passed to the trimmer; the path of a `file:PATH` reference
/// is made absolute
pub fn adapter(a: &str) -> anyhow::Result<String> {
    match a.strip_prefix("file:") {
        Some(p) if !p.is_empty() => Ok(format!("file:{}", absolute(Path::new(p))?.display())),
        _ => Ok(a.to_string()),
    }
}

/// Quality threshold written to the config; -1 selects the default
pub fn trimming_quality(q: i64) -> i64 {
    if q == -1 {
        DEFAULT_TRIMMING_QUALITY
    } else {
        q
    }
}

impl ConfigRecord {
    /// Map validated options onto the workflow configuration.
    ///
    /// Relative paths are resolved against the current directory; nothing
    /// is checked for existence here.
    pub fn from_options(o: &Options) -> anyhow::Result<Self> {
        let input_directory = absolute(o.input_directory())?;

        let software = o.trimming_software();
        let trimming = Trimming {
            software_choice: software,
            do_: !o.disable_trimming(),
        };

        // Both trimming tools take the same parameters
        let cutadapt = Cutadapt {
            tool_choice: software,
            fwd: adapter(o.adapter_read1())?,
            rev: adapter(o.adapter_read2())?,
            m: o.minimum_length(),
            mode: o.cutadapt_mode(),
            options: o.cutadapt_options().to_string(),
            quality: trimming_quality(o.trimming_quality()),
            threads: 4,
        };

        let kraken_do = !o.skip_kraken();
        let databases = if kraken_do {
            o.kraken_databases()
                .iter()
                .map(|p| absolute(p))
                .collect::<anyhow::Result<Vec<_>>>()?
        } else {
            Vec::new()
        };

        Ok(Self {
            input_directory,
            input_pattern: o.input_pattern().to_string(),
            input_readtag: o.input_readtag().to_string(),
            trimming,
            cutadapt,
            bwa_mem_phix: BwaMemPhix {
                do_: !o.skip_phix_removal(),
                reference_file: PHIX_REFERENCE.to_string(),
                threads: 4,
            },
            kraken: Kraken {
                do_: kraken_do,
                databases,
                threads: 8,
            },
            fastqc: Fastqc {
                do_raw: !o.skip_fastqc_raw(),
                do_after_adapter_removal: !o.skip_fastqc_cleaned(),
                options: "--nogroup".to_string(),
                threads: 4,
            },
        })
    }
}
