//! Resolution of the command used to invoke the external runtime

use crate::product::ProductConfig;
use std::path::Path;

/// The command used to launch the external runtime
///
/// Built once at the program boundary and passed down explicitly, so nothing
/// below `main` reads the process environment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuntimeConfig {
    command: String,
    runtime_name: String,
}

impl RuntimeConfig {
    /// Use an explicit command, named after its file stem
    pub fn new(command: impl Into<String>) -> Self {
        let command = command.into();
        let runtime_name = Path::new(&command)
            .file_stem()
            .map(|stem| stem.to_string_lossy().into_owned())
            .unwrap_or_else(|| command.clone());
        Self {
            command,
            runtime_name,
        }
    }

    /// Name used for the runtime in user-facing messages
    pub fn with_runtime_name(mut self, name: impl Into<String>) -> Self {
        self.runtime_name = name.into();
        self
    }

    /// The product's default command, ignoring any override
    pub fn default_for<C: ProductConfig>(config: &C) -> Self {
        Self::new(config.default_runtime_command()).with_runtime_name(config.runtime_name())
    }

    /// Resolve the command through `lookup`, which maps a variable name to
    /// its value. An unset variable falls back to the product default.
    pub fn from_lookup<C, F>(config: &C, lookup: F) -> Self
    where
        C: ProductConfig,
        F: FnOnce(&str) -> Option<String>,
    {
        match lookup(config.runtime_path_env()) {
            Some(command) => Self::new(command).with_runtime_name(config.runtime_name()),
            None => Self::default_for(config),
        }
    }

    /// Resolve the command from the process environment
    pub fn from_env<C: ProductConfig>(config: &C) -> Self {
        Self::from_lookup(config, |key| std::env::var(key).ok())
    }

    /// The resolved command, not checked for existence
    pub fn command(&self) -> &str {
        &self.command
    }

    pub fn runtime_name(&self) -> &str {
        &self.runtime_name
    }
}
