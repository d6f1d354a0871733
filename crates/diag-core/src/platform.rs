//! Operating system identification for environment reports

use serde::Serialize;
use std::fmt;
use std::process::Command;

/// Kernel and machine identification, as reported by `uname`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Uname {
    pub system: String,
    pub node: String,
    pub release: String,
    pub version: String,
    pub machine: String,
}

impl fmt::Display for Uname {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "system='{}', node='{}', release='{}', version='{}', machine='{}'",
            self.system, self.node, self.release, self.version, self.machine
        )
    }
}

/// Linux distribution identification; empty off Linux
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct LinuxDistribution {
    pub name: String,
    pub version: String,
    pub codename: String,
}

impl fmt::Display for LinuxDistribution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "('{}', '{}', '{}')",
            self.name, self.version, self.codename
        )
    }
}

/// macOS product version; empty off macOS
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct MacVersion {
    pub release: String,
    pub machine: String,
}

impl fmt::Display for MacVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "('{}', '{}')", self.release, self.machine)
    }
}

/// Run `program args...` and return its trimmed stdout, if it succeeded
fn command_output(program: &str, args: &[&str]) -> Option<String> {
    Command::new(program)
        .args(args)
        .output()
        .ok()
        .filter(|out| out.status.success())
        .and_then(|out| String::from_utf8(out.stdout).ok())
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
}

/// System name in `uname -s` spelling
fn fallback_system() -> String {
    match std::env::consts::OS {
        "linux" => "Linux".to_string(),
        "macos" => "Darwin".to_string(),
        "windows" => "Windows".to_string(),
        "freebsd" => "FreeBSD".to_string(),
        other => other.to_string(),
    }
}

/// Query kernel identification
///
/// Each field falls back independently, to `std::env::consts` where there
/// is an equivalent and to an empty string otherwise.
pub fn uname() -> Uname {
    let field = |flag: &str| {
        if cfg!(unix) {
            command_output("uname", &[flag])
        } else {
            None
        }
    };

    Uname {
        system: field("-s").unwrap_or_else(fallback_system),
        node: field("-n")
            .or_else(|| std::env::var("COMPUTERNAME").ok())
            .or_else(|| std::env::var("HOSTNAME").ok())
            .unwrap_or_default(),
        release: field("-r").unwrap_or_default(),
        version: field("-v").unwrap_or_default(),
        machine: field("-m").unwrap_or_else(|| std::env::consts::ARCH.to_string()),
    }
}

/// Short platform descriptor such as `Linux-6.1.0-x86_64`
pub fn platform_string() -> String {
    platform_string_from(&uname())
}

/// Platform descriptor for an already queried [`Uname`]
pub fn platform_string_from(uname: &Uname) -> String {
    [&uname.system, &uname.release, &uname.machine]
        .iter()
        .filter(|part| !part.is_empty())
        .map(|part| part.as_str())
        .collect::<Vec<_>>()
        .join("-")
}

/// Files consulted for distribution info, in order
const OS_RELEASE_PATHS: &[&str] = &["/etc/os-release", "/usr/lib/os-release"];

/// Identify the running Linux distribution
pub fn linux_distribution() -> LinuxDistribution {
    if !cfg!(target_os = "linux") {
        return LinuxDistribution::default();
    }

    OS_RELEASE_PATHS
        .iter()
        .find_map(|path| std::fs::read_to_string(path).ok())
        .map(|content| parse_os_release(&content))
        .unwrap_or_default()
}

/// Parse the `KEY=value` lines of an os-release file
pub fn parse_os_release(content: &str) -> LinuxDistribution {
    let mut dist = LinuxDistribution::default();
    let mut version_fallback = String::new();

    for line in content.lines() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        let Some((key, value)) = line.split_once('=') else {
            continue;
        };
        let value = unquote(value.trim());

        match key.trim() {
            "NAME" => dist.name = value,
            "VERSION_ID" => dist.version = value,
            "VERSION_CODENAME" => dist.codename = value,
            "VERSION" => version_fallback = value,
            _ => {}
        }
    }

    if dist.version.is_empty() {
        dist.version = version_fallback;
    }

    dist
}

fn unquote(value: &str) -> String {
    let stripped = value
        .strip_prefix('"')
        .and_then(|v| v.strip_suffix('"'))
        .or_else(|| value.strip_prefix('\'').and_then(|v| v.strip_suffix('\'')))
        .unwrap_or(value);
    stripped.replace("\\\"", "\"")
}

/// Identify the running macOS release
pub fn mac_ver() -> MacVersion {
    if !cfg!(target_os = "macos") {
        return MacVersion::default();
    }

    match command_output("sw_vers", &["-productVersion"]) {
        Some(release) => MacVersion {
            release,
            machine: command_output("uname", &["-m"])
                .unwrap_or_else(|| std::env::consts::ARCH.to_string()),
        },
        None => MacVersion::default(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_os_release() {
        let content = r#"
PRETTY_NAME="Ubuntu 22.04.3 LTS"
NAME="Ubuntu"
VERSION_ID="22.04"
VERSION="22.04.3 LTS (Jammy Jellyfish)"
VERSION_CODENAME=jammy
ID=ubuntu
"#;
        let dist = parse_os_release(content);
        assert_eq!(dist.name, "Ubuntu");
        assert_eq!(dist.version, "22.04");
        assert_eq!(dist.codename, "jammy");
    }

    #[test]
    fn test_parse_os_release_without_version_id() {
        let content = "# rolling release\nNAME='Arch Linux'\nVERSION=rolling\n";
        let dist = parse_os_release(content);
        assert_eq!(dist.name, "Arch Linux");
        assert_eq!(dist.version, "rolling");
        assert_eq!(dist.codename, "");
    }

    #[test]
    fn test_parse_empty_os_release() {
        assert_eq!(parse_os_release(""), LinuxDistribution::default());
    }

    #[test]
    fn test_platform_string_skips_empty_parts() {
        let uname = Uname {
            system: "Windows".to_string(),
            machine: "x86_64".to_string(),
            ..Default::default()
        };
        assert_eq!(platform_string_from(&uname), "Windows-x86_64");
    }

    #[test]
    fn test_uname_has_system_and_machine() {
        let uname = uname();
        assert!(!uname.system.is_empty());
        assert!(!uname.machine.is_empty());
        assert!(platform_string().starts_with(&uname.system));
    }

    #[test]
    fn test_display_formats() {
        let dist = LinuxDistribution {
            name: "Debian GNU/Linux".to_string(),
            version: "12".to_string(),
            codename: "bookworm".to_string(),
        };
        assert_eq!(dist.to_string(), "('Debian GNU/Linux', '12', 'bookworm')");
        assert_eq!(MacVersion::default().to_string(), "('', '')");
    }
}
