//! The entry-point adapter.
//!
//! One linear sequence: resolve the target directory, make exactly one blocking call to the test
//! engine, and turn the engine's status into the process exit code. The adapter never inspects,
//! retries or reinterprets what the engine reports.

use std::io;
use std::path::PathBuf;

use suiterun_engine::{EngineError, EngineOptions, EngineStatus, TestEngine};
use thiserror::Error;

use crate::cli::{CliError, CliResult, ExitCode};
use crate::location::{LocationError, SelfLocation};

/// Exit code when the engine program cannot be found (shell convention).
pub const ENGINE_NOT_FOUND: i32 = 127;
/// Exit code when the engine program exists but cannot be executed (shell convention).
pub const ENGINE_NOT_EXECUTABLE: i32 = 126;
/// Base added to a terminating signal number (shell convention).
pub const SIGNAL_EXIT_BASE: i32 = 128;

/// Failures on the adapter's side of the boundary.
///
/// Anything that happens inside a running engine (failed tests, collection errors) is reported
/// through its status instead and never shows up here.
#[derive(Debug, Error)]
pub enum AdapterError {
    #[error(transparent)]
    Location(#[from] LocationError),

    #[error(transparent)]
    Engine(#[from] EngineError),
}

impl AdapterError {
    /// Exit code used when the engine never produced a status.
    pub fn exit_code(&self) -> ExitCode {
        match self {
            AdapterError::Engine(EngineError::Launch { source, .. }) => match source.kind() {
                io::ErrorKind::NotFound => ExitCode(ENGINE_NOT_FOUND),
                io::ErrorKind::PermissionDenied => ExitCode(ENGINE_NOT_EXECUTABLE),
                _ => ExitCode::FAILURE,
            },
            AdapterError::Engine(EngineError::Terminated { signal }) => ExitCode(SIGNAL_EXIT_BASE + signal),
            AdapterError::Engine(EngineError::NoStatus) | AdapterError::Location(_) => ExitCode::FAILURE,
        }
    }
}

impl From<AdapterError> for CliError {
    fn from(err: AdapterError) -> Self {
        CliError::new(format!("Error: {err}"), err.exit_code())
    }
}

/// Explicit inputs to a run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AdapterConfig {
    /// Suite directory override; `None` means the directory containing the executable
    pub suite_dir: Option<PathBuf>,
    /// Options forwarded to the engine
    pub options: EngineOptions,
}

impl AdapterConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Target this directory instead of the executable's own
    pub fn with_suite_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.suite_dir = Some(dir.into());
        self
    }

    /// Set the engine options
    pub fn with_options(mut self, options: EngineOptions) -> Self {
        self.options = options;
        self
    }
}

/// Binds a test engine to an explicit configuration.
pub struct EntryPointAdapter<E> {
    engine: E,
    config: AdapterConfig,
}

impl<E: TestEngine> EntryPointAdapter<E> {
    pub fn new(engine: E, config: AdapterConfig) -> Self {
        Self { engine, config }
    }

    /// Resolve the single target directory for this invocation.
    pub fn target(&self) -> Result<SelfLocation, LocationError> {
        match &self.config.suite_dir {
            Some(dir) => Ok(SelfLocation::explicit(dir.clone())),
            None => SelfLocation::resolve(),
        }
    }

    /// Run the engine once against the target and return its status.
    ///
    /// Blocks until the engine finishes.
    #[tracing::instrument(skip_all)]
    pub fn execute(&self) -> Result<EngineStatus, AdapterError> {
        let target = self.target()?;
        tracing::debug!(suite_dir = %target.as_path().display(), "resolved suite directory");

        let targets = [target.into_path_buf()];
        let status = self.engine.execute(&targets, &self.config.options)?;
        Ok(status)
    }

    /// [`execute`](Self::execute), mapped onto a CLI exit code.
    ///
    /// The engine's status is passed through unmodified, zero or not.
    pub fn run(&self) -> CliResult<ExitCode> {
        let status = self.execute()?;
        Ok(ExitCode::from(status))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    use std::cell::RefCell;
    use std::path::Path;

    struct FixedEngine {
        code: i32,
        seen: RefCell<Vec<(Vec<PathBuf>, EngineOptions)>>,
    }

    impl FixedEngine {
        fn new(code: i32) -> Self {
            Self {
                code,
                seen: RefCell::new(Vec::new()),
            }
        }
    }

    impl TestEngine for FixedEngine {
        fn execute(&self, targets: &[PathBuf], options: &EngineOptions) -> Result<EngineStatus, EngineError> {
            self.seen.borrow_mut().push((targets.to_vec(), *options));
            Ok(EngineStatus::new(self.code))
        }
    }

    struct FailingEngine(io::ErrorKind);

    impl TestEngine for FailingEngine {
        fn execute(&self, _targets: &[PathBuf], _options: &EngineOptions) -> Result<EngineStatus, EngineError> {
            Err(EngineError::Launch {
                program: "pytest".to_string(),
                source: io::Error::from(self.0),
            })
        }
    }

    #[test]
    fn test_explicit_suite_dir_is_sole_target() {
        let engine = FixedEngine::new(0);
        let adapter = EntryPointAdapter::new(&engine, AdapterConfig::new().with_suite_dir("/srv/suite"));

        adapter.execute().unwrap();

        let seen = engine.seen.borrow();
        assert_eq!(seen.len(), 1);
        assert_eq!(seen[0].0, vec![PathBuf::from("/srv/suite")]);
    }

    #[test]
    fn test_default_target_is_executable_dir() {
        let adapter = EntryPointAdapter::new(FixedEngine::new(0), AdapterConfig::new());
        let target = adapter.target().unwrap();
        let exe = std::env::current_exe().unwrap();
        assert_eq!(Some(target.as_path()), exe.parent());
    }

    #[test]
    fn test_run_passes_status_through() {
        for code in [0, 1, 2, 5, 42] {
            let adapter = EntryPointAdapter::new(FixedEngine::new(code), AdapterConfig::new().with_suite_dir("."));
            let exit = adapter.run().unwrap();
            assert_eq!(exit, ExitCode(code));
        }
    }

    #[test]
    fn test_missing_engine_maps_to_127() {
        let adapter = EntryPointAdapter::new(
            FailingEngine(io::ErrorKind::NotFound),
            AdapterConfig::new().with_suite_dir(Path::new(".")),
        );
        let err = adapter.run().unwrap_err();
        assert_eq!(err.exit_code, ExitCode(ENGINE_NOT_FOUND));
        assert!(err.message.contains("failed to start test engine `pytest`"));
    }

    #[test]
    fn test_non_executable_engine_maps_to_126() {
        let adapter = EntryPointAdapter::new(
            FailingEngine(io::ErrorKind::PermissionDenied),
            AdapterConfig::new().with_suite_dir("."),
        );
        assert_eq!(adapter.run().unwrap_err().exit_code, ExitCode(ENGINE_NOT_EXECUTABLE));
    }

    #[test]
    fn test_signal_maps_to_128_plus_signal() {
        let err = AdapterError::Engine(EngineError::Terminated { signal: 15 });
        assert_eq!(err.exit_code(), ExitCode(143));
    }

    #[test]
    fn test_location_failure_is_generic_failure() {
        let err = AdapterError::Location(LocationError::NoParent(PathBuf::from("suiterun")));
        assert_eq!(err.exit_code(), ExitCode::FAILURE);
    }
}
