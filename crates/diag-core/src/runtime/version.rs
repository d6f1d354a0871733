//! Version query for the external runtime

use super::config::RuntimeConfig;
use crate::error::{DiagError, Result};
use semver::Version;
use std::io::{ErrorKind, Read};
use std::process::Command;

/// Message returned instead of an error when `runtime_name` cannot be found
pub fn not_found_message(runtime_name: &str) -> String {
    format!(
        "`{name} -version` failed. `{name}` command is not found from this process.\n\
         Please ensure {name} is installed and PATH is set for `{name}`.",
        name = runtime_name
    )
}

/// Run `<command> -version` and return everything it printed
///
/// stdout and stderr share one pipe, so the text keeps the order the runtime
/// wrote it in, trailing newline included.
///
/// A missing executable yields [`not_found_message`] for the configured
/// runtime. Every other failure propagates.
pub fn runtime_version(config: &RuntimeConfig) -> Result<String> {
    let command = config.command();
    let capture_err = |source| DiagError::Capture {
        command: command.to_string(),
        source,
    };

    let (mut reader, writer) = std::io::pipe().map_err(capture_err)?;

    let mut cmd = Command::new(command);
    cmd.arg("-version")
        .stdout(writer.try_clone().map_err(capture_err)?)
        .stderr(writer);

    let mut child = match cmd.spawn() {
        Ok(child) => child,
        Err(e) if e.kind() == ErrorKind::NotFound => {
            return Ok(not_found_message(config.runtime_name()));
        }
        Err(e) => {
            return Err(DiagError::Spawn {
                command: command.to_string(),
                source: e,
            });
        }
    };

    // The command still owns our copies of the write end; reading would
    // never see EOF while they are open
    drop(cmd);

    let mut combined = Vec::new();
    reader.read_to_end(&mut combined).map_err(capture_err)?;
    let status = child.wait().map_err(capture_err)?;

    if !status.success() {
        return Err(DiagError::NonZeroExit {
            command: command.to_string(),
            status,
            output: String::from_utf8_lossy(&combined).into_owned(),
        });
    }

    String::from_utf8(combined).map_err(|e| DiagError::Decode {
        command: command.to_string(),
        source: e,
    })
}

/// Extract a semantic version from `java -version` style output
///
/// Legacy `1.x` numbering is folded into the modern scheme, so `1.8.0_292`
/// becomes `8.0.292`.
pub fn parse_runtime_version(text: &str) -> Option<Version> {
    let raw = quoted_version(text).or_else(|| bare_version(text))?;

    // Drop pre-release and build suffixes: 17-ea, 21+35
    let core = raw.split(['-', '+']).next().unwrap_or(raw);

    let mut parts: Vec<u64> = core
        .split(['.', '_'])
        .map(|p| p.parse::<u64>())
        .collect::<std::result::Result<_, _>>()
        .ok()?;

    if parts.is_empty() {
        return None;
    }
    if parts[0] == 1 && parts.len() >= 2 {
        parts.remove(0);
    }
    parts.resize(3, 0);

    Some(Version::new(parts[0], parts[1], parts[2]))
}

/// First double-quoted token on a line mentioning "version"
fn quoted_version(text: &str) -> Option<&str> {
    text.lines()
        .filter(|line| line.contains("version"))
        .find_map(|line| {
            let start = line.find('"')? + 1;
            let len = line[start..].find('"')?;
            Some(&line[start..start + len])
        })
}

fn bare_version(text: &str) -> Option<&str> {
    text.split_whitespace()
        .find(|token| token.starts_with(|c: char| c.is_ascii_digit()))
}

/// Compare the runtime's reported version against a minimum
/// Returns a warning message if the runtime is older than required
pub fn check_runtime_requirement(
    version_output: &str,
    minimum: &str,
    runtime_display_name: &str,
) -> Option<String> {
    let minimum_ver = match Version::parse(minimum) {
        Ok(v) => v,
        Err(_) => return None, // Can't compare, skip warning
    };

    let detected = parse_runtime_version(version_output)?;

    if detected < minimum_ver {
        Some(format!(
            "Warning: {} {} or newer is required.\n\
             Detected version {}.",
            runtime_display_name, minimum_ver.major, detected
        ))
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const MISSING: &str = "diag-core-test-no-such-runtime";

    #[test]
    fn test_missing_executable_returns_fallback() {
        let config = RuntimeConfig::new(MISSING);
        let text = runtime_version(&config).unwrap();
        assert_eq!(text, not_found_message(MISSING));
        assert!(text.lines().count() > 1);
    }

    #[test]
    fn test_missing_executable_is_idempotent() {
        let config = RuntimeConfig::new(MISSING);
        let first = runtime_version(&config).unwrap();
        let second = runtime_version(&config).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_fallback_names_configured_runtime() {
        let config = RuntimeConfig::new(MISSING).with_runtime_name("node");
        let text = runtime_version(&config).unwrap();
        assert!(text.starts_with("`node -version` failed."));
        assert!(text.contains("PATH is set for `node`"));
        assert!(!text.contains("java"));
    }

    #[cfg(unix)]
    mod stub {
        use crate::error::DiagError;
        use crate::runtime::{runtime_version, RuntimeConfig};
        use crate::testing::{retry_busy, write_stub};

        #[test]
        fn test_output_is_returned_verbatim() {
            let dir = tempfile::tempdir().unwrap();
            let stub = write_stub(&dir, r#"echo 'openjdk version "17.0.2" 2022-01-18' >&2"#);
            let config = RuntimeConfig::new(stub.to_string_lossy());

            let text = retry_busy(|| runtime_version(&config)).unwrap();
            assert_eq!(text, "openjdk version \"17.0.2\" 2022-01-18\n");
        }

        #[test]
        fn test_streams_keep_write_order() {
            let dir = tempfile::tempdir().unwrap();
            let stub = write_stub(&dir, "echo first-err >&2\necho second-out\necho third-err >&2");
            let config = RuntimeConfig::new(stub.to_string_lossy());

            assert_eq!(
                retry_busy(|| runtime_version(&config)).unwrap(),
                "first-err\nsecond-out\nthird-err\n"
            );
        }

        #[test]
        fn test_non_zero_exit_propagates() {
            let dir = tempfile::tempdir().unwrap();
            let stub = write_stub(&dir, "echo broken install >&2\nexit 3");
            let config = RuntimeConfig::new(stub.to_string_lossy());

            match retry_busy(|| runtime_version(&config)) {
                Err(DiagError::NonZeroExit { status, output, .. }) => {
                    assert_eq!(status.code(), Some(3));
                    assert!(output.contains("broken install"));
                }
                other => panic!("expected NonZeroExit, got {:?}", other),
            }
        }
    }

    #[test]
    fn test_parse_modern_version() {
        let text = "openjdk version \"17.0.2\" 2022-01-18\nOpenJDK Runtime Environment";
        assert_eq!(parse_runtime_version(text), Some(Version::new(17, 0, 2)));
    }

    #[test]
    fn test_parse_legacy_version() {
        let text = "java version \"1.8.0_292\"\nJava(TM) SE Runtime Environment";
        assert_eq!(parse_runtime_version(text), Some(Version::new(8, 0, 292)));
    }

    #[test]
    fn test_parse_short_and_long_versions() {
        assert_eq!(
            parse_runtime_version("openjdk version \"21\" 2023-09-19"),
            Some(Version::new(21, 0, 0))
        );
        assert_eq!(
            parse_runtime_version("openjdk version \"11.0.20.1\" 2023-08-24"),
            Some(Version::new(11, 0, 20))
        );
        assert_eq!(
            parse_runtime_version("openjdk version \"22-ea\" 2024-03-19"),
            Some(Version::new(22, 0, 0))
        );
    }

    #[test]
    fn test_parse_fallback_message() {
        assert_eq!(parse_runtime_version(&not_found_message("java")), None);
    }

    #[test]
    fn test_runtime_older_than_required() {
        let warning = check_runtime_requirement("java version \"1.7.0_80\"", "8.0.0", "Java");
        assert!(warning.is_some());
        assert!(warning.unwrap().contains("Java 8 or newer"));
    }

    #[test]
    fn test_runtime_meets_requirement() {
        let warning = check_runtime_requirement("java version \"1.8.0_292\"", "8.0.0", "Java");
        assert!(warning.is_none());
    }

    #[test]
    fn test_invalid_minimum() {
        // Should return None (no warning) for an invalid minimum
        let warning = check_runtime_requirement("openjdk version \"17\"", "eight", "Java");
        assert!(warning.is_none());
    }
}
