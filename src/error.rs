use std::{fmt, io, path::Path, process::ExitStatus};

/// Failures that decide the exit code of the command
#[derive(Debug)]
pub enum QcError {
    /// Bad or missing option, detected before anything is written
    Validation(String),
    Io { context: String, source: io::Error },
    /// Launcher ran but did not succeed
    Delegate(ExitStatus),
}

impl QcError {
    pub fn validation<S: Into<String>>(msg: S) -> Self {
        Self::Validation(msg.into())
    }

    pub fn io<S: Into<String>>(context: S, source: io::Error) -> Self {
        Self::Io {
            context: context.into(),
            source,
        }
    }

    pub fn io_path(what: &str, path: &Path, source: io::Error) -> Self {
        Self::io(format!("{} {}", what, path.display()), source)
    }

    /// Process exit code for this failure.
    ///
    /// A delegated failure hands back the launcher's own code, or 128 plus
    /// the signal number when the launcher was killed.
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::Validation(_) | Self::Io { .. } => 1,
            Self::Delegate(status) => status_code(status),
        }
    }
}

#[cfg(unix)]
fn status_code(status: &ExitStatus) -> i32 {
    use std::os::unix::process::ExitStatusExt;
    status
        .code()
        .or_else(|| status.signal().map(|s| 128 + s))
        .unwrap_or(1)
}

#[cfg(not(unix))]
fn status_code(status: &ExitStatus) -> i32 {
    status.code().unwrap_or(1)
}

impl fmt::Display for QcError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Self::Validation(s) => write!(f, "Invalid configuration: {}", s),
            Self::Io { context, source } => write!(f, "{}: {}", context, source),
            Self::Delegate(status) => write!(f, "Launcher failed ({})", status),
        }
    }
}

impl std::error::Error for QcError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io { source, .. } => Some(source),
            _ => None,
        }
    }
}

/// Exit code for any error reaching `main`
pub fn exit_code(e: &anyhow::Error) -> i32 {
    e.chain()
        .find_map(|c| c.downcast_ref::<QcError>())
        .map(|q| q.exit_code())
        .unwrap_or(1)
}
