//! Test-execution engine contract for suiterun.
//!
//! The entry point never discovers, runs or reports tests itself. It hands a list of targets and an
//! explicit [`EngineOptions`] record to a [`TestEngine`] and gets back a single integer status.
//!
//! ## Notes
//!
//! - All engine configuration is explicit. Nothing here reads environment variables or config files.
//! - [`CommandEngine`] is the process-backed implementation (pytest by default). Tests substitute
//!   their own engine by implementing the trait.
//! - This crate has no CLI dependencies; the `suiterun` binary owns argument parsing.

pub mod command;
pub mod status;

use std::io;
use std::path::PathBuf;

use thiserror::Error;

pub use command::{CommandEngine, EngineCommand, EngineInvocation};
pub use status::EngineStatus;

/// How much per-test detail the engine should report.
///
/// There is deliberately no quiet level: the entry point always asks for detailed output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Verbosity {
    /// One line per test.
    #[default]
    Verbose,
    /// One line per test plus the engine's extra diagnostics.
    ExtraVerbose,
}

/// Output format hint passed through to the engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    /// Let the engine decide (usually based on whether stdout is a terminal).
    #[default]
    Auto,
    /// Force colored output.
    Color,
    /// Force plain output.
    Plain,
}

/// Explicit engine configuration for a single run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct EngineOptions {
    pub verbosity: Verbosity,
    pub output_format: OutputFormat,
}

impl EngineOptions {
    /// Create options with the default (verbose, auto) settings
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the verbosity level
    pub fn with_verbosity(mut self, verbosity: Verbosity) -> Self {
        self.verbosity = verbosity;
        self
    }

    /// Set the output format
    pub fn with_output_format(mut self, format: OutputFormat) -> Self {
        self.output_format = format;
        self
    }
}

/// Errors raised when the engine never produced a status of its own.
///
/// Test failures are *not* errors: they come back as a non-zero [`EngineStatus`].
#[derive(Debug, Error)]
pub enum EngineError {
    #[error("failed to start test engine `{program}`: {source}")]
    Launch {
        program: String,
        #[source]
        source: io::Error,
    },

    #[error("test engine was terminated by signal {signal}")]
    Terminated { signal: i32 },

    #[error("test engine exited without a status code")]
    NoStatus,
}

/// The external test-execution engine.
///
/// `execute` blocks until the engine has finished all of its work. There is no timeout and no
/// cancellation; the only way to stop a run early is to kill the process from outside.
pub trait TestEngine {
    fn execute(&self, targets: &[PathBuf], options: &EngineOptions) -> Result<EngineStatus, EngineError>;
}

impl<T: TestEngine + ?Sized> TestEngine for &T {
    fn execute(&self, targets: &[PathBuf], options: &EngineOptions) -> Result<EngineStatus, EngineError> {
        (**self).execute(targets, options)
    }
}
