//! Environment report for bug reports
//!
//! Everything is queried again on each call; nothing is cached.

use crate::error::Result;
use crate::platform::{self, LinuxDistribution, MacVersion, Uname};
use crate::product::ProductConfig;
use crate::runtime::{runtime_version, RuntimeConfig};
use serde::Serialize;
use std::fmt;
use std::io::Write;

/// Version of the compiler this crate was built with
pub fn toolchain_version() -> &'static str {
    option_env!("DIAG_RUSTC_VERSION").unwrap_or("unknown")
}

/// Output format for the environment report
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ReportFormat {
    #[default]
    Text,
    #[cfg(feature = "yaml")]
    Yaml,
}

/// Snapshot of the environment a product is running in
#[derive(Debug, Clone, Serialize)]
pub struct EnvironmentReport {
    pub toolchain_version: String,
    pub runtime_display_name: String,
    pub runtime_version: String,
    pub package_name: String,
    pub package_version: String,
    pub platform: String,
    pub uname: Uname,
    pub linux_distribution: LinuxDistribution,
    pub mac_ver: MacVersion,
}

impl EnvironmentReport {
    /// Gather every field from the live environment
    ///
    /// A missing runtime shows up as the not-found message; any other
    /// runtime failure is returned as an error.
    pub fn gather<C: ProductConfig>(config: &C, runtime: &RuntimeConfig) -> Result<Self> {
        let runtime_version = runtime_version(runtime)?;
        let uname = platform::uname();

        Ok(Self {
            toolchain_version: toolchain_version().to_string(),
            runtime_display_name: config.runtime_display_name().to_string(),
            runtime_version: runtime_version.trim().to_string(),
            package_name: config.display_name().to_string(),
            package_version: config.version().to_string(),
            platform: platform::platform_string_from(&uname),
            uname,
            linux_distribution: platform::linux_distribution(),
            mac_ver: platform::mac_ver(),
        })
    }

    /// Write the report in the requested format
    pub fn write_to<W: Write>(&self, writer: &mut W, format: ReportFormat) -> Result<()> {
        match format {
            ReportFormat::Text => writeln!(writer, "{}", self)?,
            #[cfg(feature = "yaml")]
            ReportFormat::Yaml => {
                let yaml = serde_yaml::to_string(self)?;
                writer.write_all(yaml.as_bytes())?;
            }
        }
        Ok(())
    }
}

impl fmt::Display for EnvironmentReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Rust version:")?;
        writeln!(f, "    {}", self.toolchain_version)?;
        writeln!(f, "{} version:", self.runtime_display_name)?;
        for line in self.runtime_version.lines() {
            writeln!(f, "    {}", line)?;
        }
        writeln!(f, "{} version: {}", self.package_name, self.package_version)?;
        writeln!(f, "platform: {}", self.platform)?;
        writeln!(f, "uname:")?;
        writeln!(f, "    {}", self.uname)?;
        writeln!(f, "linux_distribution: {}", self.linux_distribution)?;
        write!(f, "mac_ver: {}", self.mac_ver)
    }
}

/// Gather the report and write it to `writer`
pub fn write_report<C, W>(
    writer: &mut W,
    config: &C,
    runtime: &RuntimeConfig,
    format: ReportFormat,
) -> Result<()>
where
    C: ProductConfig,
    W: Write,
{
    EnvironmentReport::gather(config, runtime)?.write_to(writer, format)
}

/// Print the environment report to stdout
pub fn environment_info<C: ProductConfig>(config: &C, runtime: &RuntimeConfig) -> Result<()> {
    let stdout = std::io::stdout();
    let mut handle = stdout.lock();
    write_report(&mut handle, config, runtime, ReportFormat::Text)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::product::testing::TestProduct;
    use crate::runtime::not_found_message;

    fn missing_runtime() -> RuntimeConfig {
        RuntimeConfig::new("diag-core-test-no-such-runtime")
    }

    fn render(format: ReportFormat) -> String {
        let mut out = Vec::new();
        write_report(&mut out, &TestProduct, &missing_runtime(), format).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn test_text_report_contains_each_section() {
        let text = render(ReportFormat::Text);

        assert!(text.contains("Rust version:"));
        assert!(text.contains(toolchain_version()));
        assert!(text.contains("Java version:"));
        assert!(text.contains("demo-tool version: 9.8.7"));
        assert!(text.contains(&format!("platform: {}", platform::platform_string())));
        assert!(text.contains("uname:"));
        assert!(text.contains("linux_distribution: ("));
        assert!(text.contains("mac_ver: ("));
    }

    #[test]
    fn test_missing_runtime_is_reported_not_raised() {
        let report = EnvironmentReport::gather(&TestProduct, &missing_runtime()).unwrap();
        let expected = not_found_message("diag-core-test-no-such-runtime");
        assert_eq!(report.runtime_version, expected);

        let text = report.to_string();
        for line in expected.lines() {
            assert!(text.contains(&format!("    {}", line)));
        }
    }

    #[test]
    fn test_platform_matches_uname() {
        let report = EnvironmentReport::gather(&TestProduct, &missing_runtime()).unwrap();
        assert_eq!(report.platform, platform::platform_string_from(&report.uname));
    }

    #[cfg(unix)]
    #[test]
    fn test_runtime_version_is_trimmed() {
        use crate::testing::{retry_busy, write_stub};

        let dir = tempfile::tempdir().unwrap();
        let stub = write_stub(&dir, r#"echo 'openjdk version "17.0.2"' >&2"#);
        let runtime = RuntimeConfig::new(stub.to_string_lossy());

        let report = retry_busy(|| EnvironmentReport::gather(&TestProduct, &runtime)).unwrap();
        assert_eq!(report.runtime_version, "openjdk version \"17.0.2\"");

        let text = report.to_string();
        assert!(text.contains("Java version:\n    openjdk version \"17.0.2\"\ndemo-tool version: 9.8.7"));
        assert!(!text.contains("\n\n"));
    }

    #[cfg(feature = "yaml")]
    #[test]
    fn test_yaml_report() {
        let yaml = render(ReportFormat::Yaml);
        assert!(yaml.contains("package_version:"));
        assert!(yaml.contains("9.8.7"));
        assert!(yaml.contains("uname:"));
    }

    #[test]
    fn test_environment_info_prints() {
        environment_info(&TestProduct, &missing_runtime()).unwrap();
    }
}
