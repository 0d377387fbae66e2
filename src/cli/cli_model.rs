use std::path::PathBuf;

use clap::{command, value_parser, Arg, ArgAction, Command};

use super::choices::{CutadaptMode, RunMode, TrimmingSoftware};
use crate::log_utils::LogLevel;

pub(crate) const NAME: &str = "quality_control";

type OptionGroup = (&'static str, fn() -> Vec<Arg>);

/// Option groups in the order they are shown in the help text
const OPTION_GROUPS: &[OptionGroup] = &[
    ("Input", input_options),
    ("Trimming", trimming_options),
    ("Pipeline Specific", pipeline_options),
    ("Kraken", kraken_options),
    ("Snakemake", snakemake_options),
    ("Slurm", slurm_options),
    ("General", general_options),
];

pub(super) fn cli_model() -> Command {
    OPTION_GROUPS.iter().fold(
        command!().about("Prepare (and optionally run) the quality_control workflow"),
        |cmd, (heading, group)| cmd.next_help_heading(*heading).args(group()),
    )
}

fn input_options() -> Vec<Arg> {
    vec![
        Arg::new("input_directory")
            .long("input-directory")
            .value_parser(value_parser!(PathBuf))
            .value_name("DIR")
            .required_unless_present("deps")
            .help("Directory containing the input sequencing files"),
        Arg::new("input_pattern")
            .long("input-pattern")
            .value_parser(value_parser!(String))
            .value_name("PATTERN")
            .default_value("*fastq.gz")
            .help("Glob pattern selecting input files"),
        Arg::new("input_readtag")
            .long("input-readtag")
            .value_parser(value_parser!(String))
            .value_name("TAG")
            .default_value("_R[12]_")
            .help("Tag identifying read 1 and read 2 of paired data"),
    ]
}

fn trimming_options() -> Vec<Arg> {
    vec![
        Arg::new("trimming_software_choice")
            .long("trimming-software-choice")
            .value_parser(value_parser!(TrimmingSoftware))
            .value_name("SOFTWARE")
            .default_value("cutadapt")
            .help("Software used for adapter and quality trimming"),
        Arg::new("disable_trimming")
            .long("disable-trimming")
            .action(ArgAction::SetTrue)
            .help("Do not trim reads"),
        Arg::new("trimming_quality")
            .long("trimming-quality")
            .value_parser(value_parser!(i64).range(-1..))
            .allow_negative_numbers(true)
            .value_name("QUAL")
            .default_value("-1")
            .help("Quality trimming threshold; -1 selects the default of 30"),
        Arg::new("trimming_adapter_read1")
            .long("trimming-adapter-read1")
            .value_parser(value_parser!(String))
            .value_name("ADAPTER")
            .default_value("")
            .help("Adapter for read 1 (sequence or file:PATH)"),
        Arg::new("trimming_adapter_read2")
            .long("trimming-adapter-read2")
            .value_parser(value_parser!(String))
            .value_name("ADAPTER")
            .default_value("")
            .help("Adapter for read 2 (sequence or file:PATH)"),
        Arg::new("trimming_minimum_length")
            .long("trimming-minimum-length")
            .value_parser(value_parser!(u32))
            .value_name("LEN")
            .default_value("20")
            .help("Reads shorter than this after trimming are discarded"),
        Arg::new("trimming_cutadapt_mode")
            .long("trimming-cutadapt-mode")
            .value_parser(value_parser!(CutadaptMode))
            .value_name("MODE")
            .default_value("b")
            .help("Adapter position: g (5'), a (3') or b (both)"),
        Arg::new("trimming_cutadapt_options")
            .long("trimming-cutadapt-options")
            .value_parser(value_parser!(String))
            .allow_hyphen_values(true)
            .value_name("OPTIONS")
            .default_value(" -O 6 --trim-n")
            .help("Extra options passed verbatim to cutadapt/atropos"),
    ]
}

fn pipeline_options() -> Vec<Arg> {
    vec![
        Arg::new("skip_phix_removal")
            .long("skip-phix-removal")
            .action(ArgAction::SetTrue)
            .help("Do not remove the Phix"),
        Arg::new("skip_fastqc_raw")
            .long("skip-fastqc-raw")
            .action(ArgAction::SetTrue)
            .help("Do not perform fastqc on raw data"),
        Arg::new("skip_fastqc_cleaned")
            .long("skip-fastqc-cleaned")
            .action(ArgAction::SetTrue)
            .help("Do not perform fastqc on cleaned data"),
    ]
}

fn kraken_options() -> Vec<Arg> {
    vec![
        Arg::new("skip_kraken")
            .long("skip-kraken")
            .action(ArgAction::SetTrue)
            .help("Do not run the kraken taxonomic classification"),
        Arg::new("kraken_databases")
            .long("kraken-databases")
            .value_parser(value_parser!(PathBuf))
            .num_args(1..)
            .action(ArgAction::Append)
            .value_name("DB")
            .help("Kraken database(s); each must exist"),
    ]
}

fn snakemake_options() -> Vec<Arg> {
    vec![
        Arg::new("working_directory")
            .short('w')
            .long("working-directory")
            .value_parser(value_parser!(PathBuf))
            .value_name("DIR")
            .default_value(NAME)
            .help("Directory where the pipeline is set up"),
        Arg::new("force")
            .long("force")
            .action(ArgAction::SetTrue)
            .help("Overwrite an existing working directory"),
        Arg::new("run_mode")
            .long("run-mode")
            .value_parser(value_parser!(RunMode))
            .value_name("MODE")
            .help("Run locally or on slurm [default: slurm if sbatch is on PATH]"),
        Arg::new("jobs")
            .short('j')
            .long("jobs")
            .value_parser(value_parser!(u32).range(1..))
            .value_name("INT")
            .default_value("40")
            .help("Maximum number of concurrent jobs"),
        Arg::new("use_apptainer")
            .long("use-apptainer")
            .action(ArgAction::SetTrue)
            .help("Run tools inside apptainer containers"),
        Arg::new("apptainer_prefix")
            .long("apptainer-prefix")
            .value_parser(value_parser!(PathBuf))
            .value_name("DIR")
            .requires("use_apptainer")
            .help("Directory where apptainer images are stored"),
        Arg::new("dry_run")
            .long("dry-run")
            .action(ArgAction::SetTrue)
            .help("Make the launcher perform a snakemake dry run"),
        Arg::new("execute")
            .long("execute")
            .action(ArgAction::SetTrue)
            .help("Run the launcher once the working directory is ready"),
        Arg::new("data_directory")
            .long("data-directory")
            .value_parser(value_parser!(PathBuf))
            .value_name("DIR")
            .help("Directory holding the pipeline rules and the phiX174 reference"),
    ]
}

fn slurm_options() -> Vec<Arg> {
    vec![
        Arg::new("slurm_queue")
            .long("slurm-queue")
            .value_parser(value_parser!(String))
            .value_name("QUEUE")
            .default_value("common")
            .help("Slurm partition used for submitted jobs"),
        Arg::new("slurm_memory")
            .long("slurm-memory")
            .value_parser(value_parser!(String))
            .value_name("MEM")
            .default_value("4G")
            .help("Default memory requested per job"),
    ]
}

fn general_options() -> Vec<Arg> {
    vec![
        Arg::new("level")
            .short('l')
            .long("level")
            .value_name("LOGLEVEL")
            .value_parser(value_parser!(LogLevel))
            .ignore_case(true)
            .default_value("info")
            .help("Set log level"),
        Arg::new("deps")
            .long("deps")
            .action(ArgAction::SetTrue)
            .help("Show the external tools required by the pipeline and exit"),
    ]
}
