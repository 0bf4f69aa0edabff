//! Engine status codes.

use std::fmt;
use std::process::ExitStatus;

use crate::EngineError;

/// Integer status reported by a test engine.
///
/// The value is opaque to suiterun: it is produced once by the engine and consumed once as the
/// process exit code. Only `0` has a fixed meaning (every test passed).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct EngineStatus(i32);

impl EngineStatus {
    pub const SUCCESS: EngineStatus = EngineStatus(0);

    pub fn new(code: i32) -> Self {
        Self(code)
    }

    pub fn code(self) -> i32 {
        self.0
    }

    pub fn is_success(self) -> bool {
        self.0 == 0
    }

    /// Convert the exit status of a finished engine process.
    ///
    /// A process killed by a signal has no exit code; that is reported as
    /// [`EngineError::Terminated`] so the caller can decide how to surface it.
    pub fn from_exit_status(status: ExitStatus) -> Result<Self, EngineError> {
        if let Some(code) = status.code() {
            return Ok(Self(code));
        }

        #[cfg(unix)]
        {
            use std::os::unix::process::ExitStatusExt;
            if let Some(signal) = status.signal() {
                return Err(EngineError::Terminated { signal });
            }
        }

        Err(EngineError::NoStatus)
    }
}

impl fmt::Display for EngineStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_success_constant() {
        assert!(EngineStatus::SUCCESS.is_success());
        assert_eq!(EngineStatus::SUCCESS.code(), 0);
    }

    #[test]
    fn test_nonzero_is_not_success() {
        assert!(!EngineStatus::new(1).is_success());
        assert!(!EngineStatus::new(-1).is_success());
    }

    #[cfg(unix)]
    #[test]
    fn test_from_exit_status_keeps_code() {
        use std::os::unix::process::ExitStatusExt;

        // Raw wait status: exit code lives in the high byte.
        let status = ExitStatus::from_raw(5 << 8);
        assert_eq!(EngineStatus::from_exit_status(status).unwrap(), EngineStatus::new(5));
    }

    #[cfg(unix)]
    #[test]
    fn test_from_exit_status_reports_signal() {
        use std::os::unix::process::ExitStatusExt;

        let status = ExitStatus::from_raw(9);
        assert!(matches!(
            EngineStatus::from_exit_status(status),
            Err(EngineError::Terminated { signal: 9 })
        ));
    }
}
