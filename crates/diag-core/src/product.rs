//! Product configuration trait for diagnostic binaries
//!
//! Each product wrapping an external runtime implements this trait to tell
//! the core which runtime it shells out to and how to describe itself in
//! environment reports.

/// Configuration trait for different products
///
/// Each product implements this trait to define:
/// - Product identity (name, display name, version)
/// - The external runtime it depends on
/// - The environment variable that overrides the runtime command
/// - Where users should file bug reports
pub trait ProductConfig: Clone + Send + Sync + 'static {
    /// Internal product name
    fn name(&self) -> &'static str;

    /// Human-readable display name, used as the "<name> version" report label
    fn display_name(&self) -> &'static str;

    /// Product version, usually `env!("CARGO_PKG_VERSION")` of the binary
    fn version(&self) -> &'static str;

    /// Name of the runtime executable (e.g., "java")
    fn runtime_name(&self) -> &'static str;

    /// Human-readable runtime name (e.g., "Java")
    fn runtime_display_name(&self) -> &'static str;

    /// Environment variable name for overriding the runtime command
    fn runtime_path_env(&self) -> &'static str;

    /// Command used when the override variable is not set
    fn default_runtime_command(&self) -> &'static str {
        self.runtime_name()
    }

    /// Oldest runtime version the product works with
    fn minimum_runtime_version(&self) -> Option<&'static str> {
        None
    }

    /// URL for filing bug reports
    fn issues_url(&self) -> &'static str;
}
