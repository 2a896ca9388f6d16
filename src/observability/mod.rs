//! Structured logging to a rotating file.
//!
//! # Architecture
//!
//! ```text
//! tracing macros → EnvFilter → fmt layer → FileWriter → cinesearch.log (+ backups)
//! ```
//!
//! # Features
//!
//! - **File Output**: `<data_dir>/cinesearch.log`
//! - **Automatic Rotation**: files rotate at 10MB with 3-backup retention
//!
//! # Configuration
//!
//! Level is controlled via:
//! 1. `RUST_LOG` environment variable (highest priority)
//! 2. `trace_level` config option
//! 3. Default: `"info"`
//!
//! # Modules
//!
//! - `init`: subscriber setup
//! - `file_writer`: rotating file writer implementing `MakeWriter`

mod file_writer;
mod init;

pub use file_writer::FileWriter;
pub use init::init_tracing;
