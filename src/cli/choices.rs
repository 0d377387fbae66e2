use std::fmt;

use clap::{builder::PossibleValue, ValueEnum};
use serde::Serialize;

#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TrimmingSoftware {
    Cutadapt,
    Atropos,
}

impl TrimmingSoftware {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Cutadapt => "cutadapt",
            Self::Atropos => "atropos",
        }
    }
}

impl ValueEnum for TrimmingSoftware {
    fn value_variants<'a>() -> &'a [Self] {
        &[Self::Cutadapt, Self::Atropos]
    }

    fn to_possible_value(&self) -> Option<PossibleValue> {
        Some(PossibleValue::new(self.name()))
    }
}

impl fmt::Display for TrimmingSoftware {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Where cutadapt looks for the adapter: 5' (g), 3' (a) or both ends (b)
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum CutadaptMode {
    G,
    A,
    B,
}

impl CutadaptMode {
    pub fn name(&self) -> &'static str {
        match self {
            Self::G => "g",
            Self::A => "a",
            Self::B => "b",
        }
    }
}

impl ValueEnum for CutadaptMode {
    fn value_variants<'a>() -> &'a [Self] {
        &[Self::G, Self::A, Self::B]
    }

    fn to_possible_value(&self) -> Option<PossibleValue> {
        Some(PossibleValue::new(self.name()))
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum RunMode {
    Local,
    Slurm,
}

impl RunMode {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Local => "local",
            Self::Slurm => "slurm",
        }
    }
}

impl ValueEnum for RunMode {
    fn value_variants<'a>() -> &'a [Self] {
        &[Self::Local, Self::Slurm]
    }

    fn to_possible_value(&self) -> Option<PossibleValue> {
        Some(PossibleValue::new(self.name()))
    }
}

impl fmt::Display for RunMode {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.name())
    }
}
