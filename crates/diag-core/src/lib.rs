//! Diag Core - Shared library for tools that wrap an external runtime
//!
//! This library provides the plumbing a product needs around a separately
//! installed runtime (e.g. the JVM behind tabula): finding the runtime,
//! asking it for its version, flagging deprecated entry points, and
//! producing an environment report users can paste into bug reports.
//!
//! # Architecture
//!
//! - **Runtime** - Command resolution and the `-version` query
//! - **Deprecation** - Warning wrappers for functions and options
//! - **Report** - Toolchain, runtime, package and OS information
//! - **Product** - `ProductConfig` trait each binary implements
//!
//! # Feature Flags
//!
//! - `yaml` (default): Enables YAML output for the environment report
//!
//! # Example Usage
//!
//! ```ignore
//! use diag_core::{environment_info, ProductConfig, RuntimeConfig};
//!
//! let runtime = RuntimeConfig::from_env(&MyConfig);
//! environment_info(&MyConfig, &runtime)?;
//! ```

pub mod deprecation;
pub mod error;
pub mod platform;
pub mod product;
pub mod report;
pub mod runtime;

#[cfg(all(test, unix))]
mod testing;

// Re-export main types for convenience
pub use deprecation::{
    deprecated, deprecated_option, warn_if_set, Deprecated, FunctionMeta, IgnoreSink,
    RecordingSink, StderrSink, Warning, WarningCategory, WarningSink,
};
pub use error::{DiagError, Result};
pub use product::ProductConfig;
pub use report::{environment_info, write_report, EnvironmentReport, ReportFormat};
pub use runtime::{not_found_message, runtime_version, RuntimeConfig};
