//! Error types for runtime queries and report output

use std::process::ExitStatus;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum DiagError {
    /// The runtime command exists but could not be started
    #[error("Failed to run `{command} -version`: {source}")]
    Spawn {
        command: String,
        #[source]
        source: std::io::Error,
    },

    /// The pipe carrying the runtime's output failed
    #[error("Failed to capture output of `{command} -version`: {source}")]
    Capture {
        command: String,
        #[source]
        source: std::io::Error,
    },

    #[error("`{command} -version` exited with {status}:\n{output}")]
    NonZeroExit {
        command: String,
        status: ExitStatus,
        output: String,
    },

    #[error("`{command} -version` produced output that is not valid UTF-8")]
    Decode {
        command: String,
        #[source]
        source: std::string::FromUtf8Error,
    },

    #[error("Failed to write environment report: {0}")]
    Io(#[from] std::io::Error),

    #[cfg(feature = "yaml")]
    #[error("Failed to serialize environment report: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

pub type Result<T> = std::result::Result<T, DiagError>;
