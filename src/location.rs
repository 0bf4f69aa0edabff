//! Self-location: the directory containing the running program.
//!
//! The suite lives next to the entry point, so the target handed to the engine is derived from the
//! executable's own path and never from the working directory of the shell that launched it.

use std::env;
use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum LocationError {
    #[error("cannot determine the path of the running executable: {0}")]
    CurrentExe(#[from] io::Error),

    #[error("executable path `{}` has no parent directory", .0.display())]
    NoParent(PathBuf),
}

/// Directory the suite is resolved against.
///
/// Computed once per invocation and never mutated. Whether the directory exists or is readable is
/// not checked here; the engine reports that.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelfLocation {
    dir: PathBuf,
}

impl SelfLocation {
    /// Resolve from the running executable.
    pub fn resolve() -> Result<Self, LocationError> {
        let exe = env::current_exe()?;
        Self::from_executable(&exe)
    }

    /// Resolve from an explicit executable path.
    pub fn from_executable(exe: &Path) -> Result<Self, LocationError> {
        match exe.parent() {
            Some(dir) if !dir.as_os_str().is_empty() => Ok(Self { dir: dir.to_path_buf() }),
            _ => Err(LocationError::NoParent(exe.to_path_buf())),
        }
    }

    /// Use a caller-provided directory as-is.
    pub fn explicit(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn as_path(&self) -> &Path {
        &self.dir
    }

    pub fn into_path_buf(self) -> PathBuf {
        self.dir
    }
}
