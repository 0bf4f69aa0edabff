//! Process-backed test engine.
//!
//! [`CommandEngine`] runs an external test tool as a child process, waits for it, and returns its
//! exit code. The child inherits stdin, stdout and stderr, so everything the tool prints goes
//! straight to the terminal (or CI log) without being buffered here.
//!
//! How a tool spells its arguments is described by an [`EngineCommand`]. The default preset is
//! pytest, invoked through the interpreter (`python3 -m pytest`) so it works without a `pytest`
//! console script on `PATH`.

use std::ffi::OsString;
use std::fmt;
use std::path::PathBuf;
use std::process::Command;

use crate::{EngineError, EngineOptions, EngineStatus, OutputFormat, TestEngine, Verbosity};

/// Argument spelling for a process-based engine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EngineCommand {
    /// Program to spawn, looked up on `PATH` when not a path
    pub program: String,
    /// Arguments placed before the targets (e.g. `-m pytest`)
    pub leading_args: Vec<String>,
    /// Flag requesting one line per test
    pub verbose_flag: String,
    /// Flag requesting extra detail; falls back to `verbose_flag` when unset
    pub extra_verbose_flag: Option<String>,
    /// Option taking `yes`/`no` to force color on or off (e.g. `--color`)
    pub color_flag: Option<String>,
}

impl EngineCommand {
    /// pytest, run as a module of the system Python.
    pub fn pytest() -> Self {
        Self {
            program: "python3".to_string(),
            leading_args: vec!["-m".to_string(), "pytest".to_string()],
            verbose_flag: "-v".to_string(),
            extra_verbose_flag: Some("-vv".to_string()),
            color_flag: Some("--color".to_string()),
        }
    }

    /// An arbitrary program that accepts `<targets...> -v`.
    pub fn custom(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            leading_args: Vec::new(),
            verbose_flag: "-v".to_string(),
            extra_verbose_flag: None,
            color_flag: None,
        }
    }

    /// Append an argument placed before the targets
    pub fn with_leading_arg(mut self, arg: impl Into<String>) -> Self {
        self.leading_args.push(arg.into());
        self
    }

    /// Set the flag used to request verbose output
    pub fn with_verbose_flag(mut self, flag: impl Into<String>) -> Self {
        self.verbose_flag = flag.into();
        self
    }

    fn verbosity_flag(&self, verbosity: Verbosity) -> &str {
        match verbosity {
            Verbosity::Verbose => self.verbose_flag.as_str(),
            Verbosity::ExtraVerbose => self.extra_verbose_flag.as_deref().unwrap_or(&self.verbose_flag),
        }
    }

    fn format_arg(&self, format: OutputFormat) -> Option<String> {
        let flag = self.color_flag.as_deref()?;
        match format {
            OutputFormat::Auto => None,
            OutputFormat::Color => Some(format!("{flag}=yes")),
            OutputFormat::Plain => Some(format!("{flag}=no")),
        }
    }
}

impl Default for EngineCommand {
    fn default() -> Self {
        Self::pytest()
    }
}

/// A fully rendered engine command line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EngineInvocation {
    pub program: String,
    pub args: Vec<OsString>,
}

impl EngineInvocation {
    fn to_command(&self) -> Command {
        let mut command = Command::new(&self.program);
        command.args(&self.args);
        command
    }
}

impl fmt::Display for EngineInvocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.program)?;
        for arg in &self.args {
            write!(f, " {}", arg.to_string_lossy())?;
        }
        Ok(())
    }
}

/// Engine that spawns an external program and waits for it.
#[derive(Debug, Clone, Default)]
pub struct CommandEngine {
    command: EngineCommand,
}

impl CommandEngine {
    pub fn new(command: EngineCommand) -> Self {
        Self { command }
    }

    /// Render the command line for one run.
    ///
    /// Order is `<program> <leading args> <targets> <verbosity flag> [format flag]`, and the
    /// verbosity flag is always present.
    pub fn invocation(&self, targets: &[PathBuf], options: &EngineOptions) -> EngineInvocation {
        let mut args: Vec<OsString> = self.command.leading_args.iter().map(OsString::from).collect();
        args.extend(targets.iter().map(|t| t.as_os_str().to_os_string()));
        args.push(OsString::from(self.command.verbosity_flag(options.verbosity)));
        if let Some(format_arg) = self.command.format_arg(options.output_format) {
            args.push(OsString::from(format_arg));
        }

        EngineInvocation {
            program: self.command.program.clone(),
            args,
        }
    }
}

impl TestEngine for CommandEngine {
    #[tracing::instrument(skip_all, fields(program = %self.command.program, target_count = targets.len()))]
    fn execute(&self, targets: &[PathBuf], options: &EngineOptions) -> Result<EngineStatus, EngineError> {
        let invocation = self.invocation(targets, options);
        tracing::debug!(command = %invocation, "spawning test engine");

        let status = invocation
            .to_command()
            .status()
            .map_err(|source| EngineError::Launch {
                program: invocation.program.clone(),
                source,
            })?;

        let status = EngineStatus::from_exit_status(status)?;
        tracing::debug!(code = %status, success = status.is_success(), "test engine finished");
        Ok(status)
    }
}
