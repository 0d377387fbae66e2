use std::{fs, path::Path};

use regex::Regex;

use crate::error::QcError;

/// Anchored regex equivalent to a shell glob (`*` and `?` only)
pub fn glob_to_regex(pattern: &str) -> Result<Regex, regex::Error> {
    let mut s = String::with_capacity(pattern.len() + 8);
    s.push('^');
    for c in pattern.chars() {
        match c {
            '*' => s.push_str("[^/]*"),
            '?' => s.push_str("[^/]"),
            _ => s.push_str(&regex::escape(c.encode_utf8(&mut [0; 4]))),
        }
    }
    s.push('$');
    Regex::new(&s)
}

#[derive(Debug, Default, PartialEq, Eq)]
pub struct InputSummary {
    pub files: usize,
    pub read1: usize,
    pub read2: usize,
}

/// Count files in `dir` matching `pattern`, and how many carry each read tag.
///
/// Zero matching files is an error since the workflow would have nothing to
/// do.
pub fn discover(dir: &Path, pattern: &str, readtag: &str) -> Result<InputSummary, QcError> {
    let re = glob_to_regex(pattern)
        .map_err(|e| QcError::validation(format!("bad input pattern '{}': {}", pattern, e)))?;
    let tags = if readtag.is_empty() {
        None
    } else {
        Some((readtag.replace("[12]", "1"), readtag.replace("[12]", "2")))
    };

    let rd = fs::read_dir(dir).map_err(|e| QcError::io_path("Could not read", dir, e))?;
    let mut summary = InputSummary::default();
    for entry in rd {
        let entry = entry.map_err(|e| QcError::io_path("Could not read", dir, e))?;
        if !entry.path().is_file() {
            continue;
        }
        let name = entry.file_name();
        let name = name.to_string_lossy();
        if !re.is_match(&name) {
            continue;
        }
        trace!("Input file {}", name);
        summary.files += 1;
        if let Some((t1, t2)) = &tags {
            if name.contains(t1.as_str()) {
                summary.read1 += 1;
            } else if name.contains(t2.as_str()) {
                summary.read2 += 1;
            }
        }
    }

    if summary.files == 0 {
        return Err(QcError::validation(format!(
            "no file matching {} found in {}",
            pattern,
            dir.display()
        )));
    }
    info!("Found {} input file(s) in {}", summary.files, dir.display());
    if tags.is_some() && summary.read1 != summary.read2 {
        warn!(
            "Uneven paired data: {} read 1 file(s) and {} read 2 file(s)",
            summary.read1, summary.read2
        );
    }
    Ok(summary)
}
