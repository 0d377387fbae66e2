use std::fmt;

use clap::{builder::PossibleValue, ValueEnum};

/// Minimum level of messages written to stderr
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
    None,
}

impl ValueEnum for LogLevel {
    fn value_variants<'a>() -> &'a [Self] {
        &[
            Self::Error,
            Self::Warn,
            Self::Info,
            Self::Debug,
            Self::Trace,
            Self::None,
        ]
    }

    fn to_possible_value(&self) -> Option<PossibleValue> {
        Some(match self {
            Self::Error => PossibleValue::new("error"),
            Self::Warn => PossibleValue::new("warn").alias("warning"),
            Self::Info => PossibleValue::new("info"),
            Self::Debug => PossibleValue::new("debug"),
            Self::Trace => PossibleValue::new("trace"),
            Self::None => PossibleValue::new("none"),
        })
    }
}

impl LogLevel {
    /// stderrlog verbosity, or `None` when logging is switched off
    fn verbosity(self) -> Option<usize> {
        match self {
            Self::Error => Some(0),
            Self::Warn => Some(1),
            Self::Info => Some(2),
            Self::Debug => Some(3),
            Self::Trace => Some(4),
            Self::None => None,
        }
    }
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self.to_possible_value() {
            Some(v) => f.write_str(v.get_name()),
            None => Ok(()),
        }
    }
}

/// Initialize logging at the level chosen on the command line
pub fn init_log(level: LogLevel) -> anyhow::Result<()> {
    let v = level.verbosity();
    stderrlog::new()
        .quiet(v.is_none())
        .verbosity(v.unwrap_or(0))
        .init()
        .map_err(|e| anyhow!("Could not initialize logging: {}", e))
}
