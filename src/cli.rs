use clap::{Parser, Subcommand};
use osv_reachability::adapters::outbound::govulncheck::GovulncheckConfig;
use osv_reachability::application::dto::InvocationStrategy;
use osv_reachability::config::ConfigFile;
use std::path::PathBuf;
use std::time::Duration;

/// Build offline Go vulnerability databases and annotate scan reports with
/// govulncheck reachability verdicts
#[derive(Parser, Debug)]
#[command(name = "osv-reachability")]
#[command(version)]
#[command(about = "Build offline Go vulnerability databases and annotate scan reports with govulncheck reachability verdicts", long_about = None)]
pub struct Args {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Write a directory of OSV advisories as a govulncheck database
    BuildDb(BuildDbArgs),
    /// Annotate a scan report with reachability verdicts
    Analyze(AnalyzeArgs),
}

#[derive(clap::Args, Debug)]
pub struct BuildDbArgs {
    /// Directory holding one OSV advisory per *.json file
    #[arg(short, long, value_name = "DIR")]
    pub advisories: PathBuf,

    /// Directory receiving index/db.json, index/modules.json and ID/
    #[arg(short, long, value_name = "DIR")]
    pub output: PathBuf,
}

#[derive(clap::Args, Debug)]
pub struct AnalyzeArgs {
    /// Scan report (package source JSON) to annotate
    #[arg(short, long, value_name = "FILE")]
    pub report: PathBuf,

    /// govulncheck invocation: legacy or streaming
    #[arg(short, long)]
    pub invocation: Option<InvocationStrategy>,

    /// Directory under which the temporary advisory cache is created
    #[arg(long, value_name = "DIR")]
    pub cache_root: Option<PathBuf>,

    /// Path to the govulncheck executable
    #[arg(long, value_name = "PATH")]
    pub govulncheck: Option<String>,

    /// Path to the go executable
    #[arg(long, value_name = "PATH")]
    pub go: Option<String>,

    /// Seconds after which govulncheck is killed
    #[arg(long, value_name = "SECS", value_parser = clap::value_parser!(u64).range(1..))]
    pub timeout: Option<u64>,

    /// Config file path (defaults to ./osv-reachability.config.yml when present)
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Output file path (if not specified, outputs to stdout)
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,
}

/// Analysis options after merging command-line flags over the config file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnalysisSettings {
    pub invocation: InvocationStrategy,
    pub cache_root: Option<PathBuf>,
    pub govulncheck: GovulncheckConfig,
}

impl AnalyzeArgs {
    /// Merges the flags over `config`; a flag always wins over the file.
    pub fn settings(&self, config: &ConfigFile) -> AnalysisSettings {
        let mut govulncheck = GovulncheckConfig::default();
        if let Some(executable) = self.govulncheck.as_ref().or(config.govulncheck_path.as_ref()) {
            govulncheck = govulncheck.with_executable(executable.clone());
        }
        if let Some(go) = self.go.as_ref().or(config.go_path.as_ref()) {
            govulncheck = govulncheck.with_go_executable(go.clone());
        }
        if let Some(secs) = self.timeout.or(config.timeout_secs) {
            govulncheck = govulncheck.with_timeout(Duration::from_secs(secs));
        }

        AnalysisSettings {
            invocation: self.invocation.or(config.invocation).unwrap_or_default(),
            cache_root: self.cache_root.clone().or_else(|| config.cache_root.clone()),
            govulncheck,
        }
    }
}

impl Args {
    pub fn parse_args() -> Self {
        Self::parse()
    }
}
