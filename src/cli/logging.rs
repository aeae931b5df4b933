//! Console output levels
//!
//! Results go to stdout through [`status`]; diagnostics go through `tracing`
//! on stderr, filtered by [`LogLevel::filter`] unless `RUST_LOG` is set.

/// Output level selected by `--quiet` / `--verbose`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogLevel {
    Quiet,
    Normal,
    /// Also show dataset details and `debug` events
    Verbose,
}

impl LogLevel {
    /// `--quiet` wins over `--verbose`
    #[must_use]
    pub fn from_flags(verbose: bool, quiet: bool) -> Self {
        match (verbose, quiet) {
            (_, true) => Self::Quiet,
            (true, false) => Self::Verbose,
            (false, false) => Self::Normal,
        }
    }

    /// Default `tracing` filter directive for this level
    #[must_use]
    pub fn filter(self) -> &'static str {
        match self {
            Self::Quiet => "error",
            Self::Normal => "info",
            Self::Verbose => "debug",
        }
    }
}

/// Print a result line unless output is quiet
pub fn status(level: LogLevel, msg: &str) {
    if level != LogLevel::Quiet {
        println!("{msg}");
    }
}
