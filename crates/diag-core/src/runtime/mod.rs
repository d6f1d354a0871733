//! External runtime discovery
//!
//! This module provides:
//! - Resolution of the runtime command, with an environment override
//! - The `-version` query and its not-found fallback
//! - Minimum version checks against the query output

pub mod config;
pub mod version;

pub use config::RuntimeConfig;
pub use version::{
    check_runtime_requirement, not_found_message, parse_runtime_version, runtime_version,
};
