#![forbid(unsafe_code)]
//! suiterun: a test-suite entry point
//!
//! Resolves the directory containing the running executable, hands it to an external test engine
//! (pytest by default) with verbose reporting, and exits with exactly the engine's status. Test
//! discovery, execution and reporting all belong to the engine.
//!
//! ## Panic Policy
//!
//! This codebase follows explicit error handling:
//!
//! - **Production code**: Use `Result` or `Option` with `?` / `ok_or` / `map_err`. The `cli` module
//!   enforces `#![deny(clippy::unwrap_used)]`.
//!
//! - **Test code**: `.unwrap()` and `.expect()` are acceptable in tests.
//!
//! ## Embedding
//!
//! Another binary can reuse the entry point as its own `main`:
//!
//! ```no_run
//! fn main() {
//!     suiterun::cli::run();
//! }
//! ```

pub mod adapter;
pub mod cli;
pub mod location;
pub mod version;

pub use adapter::{AdapterConfig, AdapterError, EntryPointAdapter};
pub use location::{LocationError, SelfLocation};
pub use suiterun_engine::{
    CommandEngine, EngineCommand, EngineError, EngineOptions, EngineStatus, OutputFormat, TestEngine, Verbosity,
};
