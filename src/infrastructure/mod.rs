//! Infrastructure layer for filesystem and environment interactions.
//!
//! This module resolves platform directories for configuration, storage and
//! logs.

pub mod paths;

pub use paths::{default_config_file, default_data_dir, expand_tilde, store_file};
