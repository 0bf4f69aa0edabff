//! suiterun version information.
//!
//! The value is taken from Cargo metadata (`CARGO_PKG_VERSION`) at compile time so the CLI and any
//! embedding program report the same version.

/// The suiterun version string (for example, `0.1.0`).
pub const SUITERUN_VERSION: &str = env!("CARGO_PKG_VERSION");
