//! CLI module for suiterun
//!
//! `suiterun` with no arguments runs the test suite located next to the executable with verbose
//! reporting and exits with the engine's status.
//!
//! ## Flags
//!
//! All flags are optional and only make the run configuration explicit:
//!
//! - `--suite-dir <DIR>` - Target this directory instead of the executable's own
//! - `--engine <PROGRAM>` - Engine program (default: `python3 -m pytest`)
//! - `--engine-arg <ARG>` - Extra argument placed before the target (repeatable)
//! - `--verbose-flag <FLAG>` - How the engine spells "verbose" (default: `-v`)
//! - `-v` - Ask the engine for extra detail
//! - `--color <WHEN>` - Output format hint for the engine
//!
//! ## Design
//!
//! The CLI uses clap for argument parsing with derive macros.
//! Command functions return `CliResult<T>` instead of calling `process::exit`.
//! Only the top-level `run()` function handles errors and exits.

// Enforce explicit error handling - no panicking in production code
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]

use std::fmt;
use std::path::PathBuf;
use std::process;

use clap::builder::{NonEmptyStringValueParser, TypedValueParser};
use clap::{ArgAction, Parser, ValueEnum};
use suiterun_engine::{CommandEngine, EngineCommand, EngineOptions, EngineStatus, OutputFormat, Verbosity};

use crate::adapter::{AdapterConfig, EntryPointAdapter};
use crate::version::SUITERUN_VERSION;

// ============================================================================
// CLI Error handling
// ============================================================================

/// Exit code for CLI operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExitCode(pub i32);

impl ExitCode {
    pub const FAILURE: ExitCode = ExitCode(1);
}

impl From<EngineStatus> for ExitCode {
    fn from(status: EngineStatus) -> Self {
        ExitCode(status.code())
    }
}

/// Error type for CLI operations.
///
/// Contains a user-facing message and an exit code. The CLI entry point
/// catches these errors, prints the message, and exits with the code.
#[derive(Debug)]
pub struct CliError {
    /// User-facing error message (already formatted for display)
    pub message: String,
    /// Exit code to return to the shell
    pub exit_code: ExitCode,
}

impl CliError {
    /// Create a new CLI error with a message and exit code.
    pub fn new(message: impl Into<String>, exit_code: ExitCode) -> Self {
        Self {
            message: message.into(),
            exit_code,
        }
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for CliError {}

/// Result type for CLI operations.
pub type CliResult<T> = Result<T, CliError>;

// ============================================================================
// Clap CLI definition
// ============================================================================

/// Run the test suite located next to this executable
#[derive(Parser, Debug)]
#[command(name = "suiterun")]
#[command(version = SUITERUN_VERSION)]
#[command(about = "Run the test suite located next to this executable and exit with its status", long_about = None)]
pub struct Cli {
    /// Suite directory (default: the directory containing this executable)
    #[arg(
        long = "suite-dir",
        value_name = "DIR",
        value_parser = NonEmptyStringValueParser::new().map(PathBuf::from)
    )]
    pub suite_dir: Option<PathBuf>,

    /// Test engine program (default: python3 -m pytest)
    #[arg(long, value_name = "PROGRAM", value_parser = NonEmptyStringValueParser::new())]
    pub engine: Option<String>,

    /// Argument passed to the engine before the suite directory (repeatable)
    #[arg(
        long = "engine-arg",
        value_name = "ARG",
        allow_hyphen_values = true,
        value_parser = NonEmptyStringValueParser::new()
    )]
    pub engine_args: Vec<String>,

    /// Flag the engine uses for verbose output
    #[arg(
        long = "verbose-flag",
        value_name = "FLAG",
        allow_hyphen_values = true,
        value_parser = NonEmptyStringValueParser::new()
    )]
    pub verbose_flag: Option<String>,

    /// Ask the engine for extra detail
    #[arg(short, action = ArgAction::Count)]
    pub verbose: u8,

    /// Color output from the engine
    #[arg(long, value_name = "WHEN", value_enum, default_value_t = ColorChoice::Auto)]
    pub color: ColorChoice,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ColorChoice {
    Auto,
    Always,
    Never,
}

impl From<ColorChoice> for OutputFormat {
    fn from(choice: ColorChoice) -> Self {
        match choice {
            ColorChoice::Auto => OutputFormat::Auto,
            ColorChoice::Always => OutputFormat::Color,
            ColorChoice::Never => OutputFormat::Plain,
        }
    }
}

impl Cli {
    /// Engine argument spelling selected on the command line.
    pub fn engine_command(&self) -> EngineCommand {
        let base = match &self.engine {
            Some(program) => EngineCommand::custom(program.clone()),
            None => EngineCommand::pytest(),
        };
        let mut command = self
            .engine_args
            .iter()
            .fold(base, |command, arg| command.with_leading_arg(arg.clone()));
        if let Some(flag) = &self.verbose_flag {
            command = command.with_verbose_flag(flag.clone());
        }
        command
    }

    /// Adapter configuration selected on the command line.
    pub fn adapter_config(&self) -> AdapterConfig {
        let verbosity = if self.verbose > 0 {
            Verbosity::ExtraVerbose
        } else {
            Verbosity::Verbose
        };
        let options = EngineOptions::new()
            .with_verbosity(verbosity)
            .with_output_format(self.color.into());

        let config = AdapterConfig::new().with_options(options);
        match &self.suite_dir {
            Some(dir) => config.with_suite_dir(dir.clone()),
            None => config,
        }
    }
}

// ============================================================================
// CLI entry point
// ============================================================================

/// Main CLI entry point.
///
/// This is the only place where `process::exit` is called. All command
/// implementations return `CliResult` and errors are handled here.
pub fn run() -> ! {
    let cli = Cli::parse();

    match execute(cli) {
        Ok(exit_code) => process::exit(exit_code.0),
        Err(e) => {
            if !e.message.is_empty() {
                eprintln!("{}", e.message);
            }
            process::exit(e.exit_code.0);
        }
    }
}

/// Execute the CLI command and return result.
pub fn execute(cli: Cli) -> CliResult<ExitCode> {
    let engine = CommandEngine::new(cli.engine_command());
    let adapter = EntryPointAdapter::new(engine, cli.adapter_config());
    adapter.run()
}

// ============================================================================
// Tests
// ============================================================================
