//! tabula-diag - Environment diagnostics for tabula bug reports

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use colored::Colorize;
use diag_core::runtime::{check_runtime_requirement, parse_runtime_version};
use diag_core::{
    deprecated_option, environment_info, not_found_message, runtime_version, write_report,
    ProductConfig, ReportFormat, RuntimeConfig, StderrSink,
};
use semver::Version;

/// CLI version
pub const CLI_VERSION: &str = env!("CARGO_PKG_VERSION");

/// tabula product configuration
#[derive(Clone)]
pub struct TabulaConfig;

impl ProductConfig for TabulaConfig {
    fn name(&self) -> &'static str {
        "tabula"
    }

    fn display_name(&self) -> &'static str {
        "tabula-diag"
    }

    fn version(&self) -> &'static str {
        CLI_VERSION
    }

    fn runtime_name(&self) -> &'static str {
        "java"
    }

    fn runtime_display_name(&self) -> &'static str {
        "Java"
    }

    fn runtime_path_env(&self) -> &'static str {
        "JAVA_PATH"
    }

    fn minimum_runtime_version(&self) -> Option<&'static str> {
        Some("8.0.0")
    }

    fn issues_url(&self) -> &'static str {
        "https://github.com/chezou/tabula-py/issues"
    }
}

#[derive(Parser, Debug)]
#[command(name = "tabula-diag")]
#[command(about = "Environment diagnostics for tabula bug reports")]
#[command(version)]
pub struct Args {
    /// Command used to launch Java (overrides JAVA_PATH)
    #[arg(long = "java-path", global = true)]
    pub java_path: Option<String>,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Print the environment report
    Env(EnvArgs),
    /// Print the raw output of `java -version`
    JavaVersion,
    /// Print the command used to launch Java
    JavaPath,
    /// Check that the installed Java is recent enough
    Check,
}

#[derive(Parser, Debug, Default)]
pub struct EnvArgs {
    /// Output format
    #[arg(short, long, value_enum, default_value_t = Format::Text)]
    pub format: Format,

    /// Deprecated: use `--format yaml`
    #[arg(long, hide = true)]
    pub yaml: bool,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum)]
pub enum Format {
    #[default]
    Text,
    Yaml,
}

impl From<Format> for ReportFormat {
    fn from(format: Format) -> Self {
        match format {
            Format::Text => ReportFormat::Text,
            Format::Yaml => ReportFormat::Yaml,
        }
    }
}

fn resolve_runtime<C: ProductConfig>(config: &C, java_path: Option<String>) -> RuntimeConfig {
    match java_path {
        Some(path) => RuntimeConfig::new(path).with_runtime_name(config.runtime_name()),
        None => RuntimeConfig::from_env(config),
    }
}

fn run_env<C: ProductConfig>(config: &C, runtime: &RuntimeConfig, args: EnvArgs) -> Result<()> {
    let mut format = args.format;
    if args.yaml {
        deprecated_option(&StderrSink, "yaml");
        format = Format::Yaml;
    }

    match format {
        Format::Text => environment_info(config, runtime),
        Format::Yaml => {
            let stdout = std::io::stdout();
            write_report(&mut stdout.lock(), config, runtime, format.into())
        }
    }
    .context("Failed to generate environment report")?;

    eprintln!();
    eprintln!("{} {}", issue_hint(config).dimmed(), config.issues_url());
    Ok(())
}

fn issue_hint<C: ProductConfig>(config: &C) -> String {
    format!("Include this output when filing a {} issue:", config.name())
}

/// Result of inspecting `-version` output
#[derive(Debug, PartialEq, Eq)]
enum RuntimeStatus {
    Missing(String),
    TooOld(String),
    Unknown(String),
    Available(Version),
}

fn assess_runtime<C: ProductConfig>(
    config: &C,
    runtime: &RuntimeConfig,
    output: &str,
) -> RuntimeStatus {
    if output == not_found_message(runtime.runtime_name()) {
        return RuntimeStatus::Missing(output.to_string());
    }

    let Some(detected) = parse_runtime_version(output) else {
        let first_line = output.lines().next().unwrap_or("").trim();
        return RuntimeStatus::Unknown(first_line.to_string());
    };

    if let Some(minimum) = config.minimum_runtime_version() {
        if let Some(warning) =
            check_runtime_requirement(output, minimum, config.runtime_display_name())
        {
            return RuntimeStatus::TooOld(warning);
        }
    }

    RuntimeStatus::Available(detected)
}

fn run_check<C: ProductConfig>(config: &C, runtime: &RuntimeConfig) -> Result<()> {
    let output = runtime_version(runtime)
        .with_context(|| format!("Failed to query {} version", config.runtime_display_name()))?;

    match assess_runtime(config, runtime, &output) {
        RuntimeStatus::Missing(message) | RuntimeStatus::TooOld(message) => {
            anyhow::bail!("{}", message)
        }
        RuntimeStatus::Unknown(first_line) => {
            eprintln!(
                "{} Could not determine the {} version from: {}",
                "Warning:".yellow(),
                config.runtime_display_name(),
                first_line
            );
        }
        RuntimeStatus::Available(version) => {
            println!(
                "{} {}",
                "✓".green(),
                format!("{} {} is available", config.runtime_display_name(), version).green()
            );
        }
    }
    Ok(())
}

fn main() -> Result<()> {
    let args = Args::parse();
    let config = TabulaConfig;

    // The environment is read once here and passed down explicitly
    let runtime = resolve_runtime(&config, args.java_path);

    match args.command {
        Some(Command::Env(env_args)) => run_env(&config, &runtime, env_args),
        Some(Command::JavaVersion) => {
            let output = runtime_version(&runtime).context("Failed to query Java version")?;
            print!("{}", output);
            if !output.ends_with('\n') {
                println!();
            }
            Ok(())
        }
        Some(Command::JavaPath) => {
            println!("{}", runtime.command());
            Ok(())
        }
        Some(Command::Check) => run_check(&config, &runtime),
        // No subcommand provided, default to the environment report
        None => run_env(&config, &runtime, EnvArgs::default()),
    }
}
