mod cli;

use cli::{AnalyzeArgs, Args, BuildDbArgs, Command};
use osv_reachability::adapters::outbound::console::StderrProgressReporter;
use osv_reachability::adapters::outbound::filesystem::{
    FileSystemReader, FileSystemVulnDbWriter, FileSystemWriter, StdoutPresenter,
};
use osv_reachability::application::dto::{AnalysisRequest, BuildDatabaseRequest};
use osv_reachability::adapters::outbound::govulncheck::{
    LegacyGovulncheckProducer, StreamingGovulncheckProducer,
};
use osv_reachability::application::use_cases::{AnalyzeReachabilityUseCase, BuildDatabaseUseCase};
use osv_reachability::config::{discover_config, load_config_from_path, ConfigFile};
use osv_reachability::ports::inbound::SourceAnalysisPort;
use osv_reachability::ports::outbound::{OutputPresenter, PackageSourceReader};
use osv_reachability::shared::error::ExitCode;
use osv_reachability::shared::Result;
use std::path::Path;
use std::process;
use tracing::debug;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    init_tracing();

    // clap exits with code 2 on invalid arguments
    let args = Args::parse_args();

    let exit_code = match run(args).await {
        Ok(()) => ExitCode::Success,
        Err(e) => {
            eprintln!("\n❌ An error occurred:\n");
            eprintln!("{}", e);

            // Display error chain
            let mut source = e.source();
            while let Some(err) = source {
                eprintln!("\nCaused by: {}", err);
                source = err.source();
            }

            eprintln!();
            ExitCode::ApplicationError
        }
    };

    process::exit(exit_code.as_i32());
}

/// Diagnostic logs go to stderr, filtered by `RUST_LOG` (warnings by default).
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

async fn run(args: Args) -> Result<()> {
    match args.command {
        Command::BuildDb(build) => build_db(build),
        Command::Analyze(analyze) => analyze_report(analyze).await,
    }
}

fn build_db(args: BuildDbArgs) -> Result<()> {
    let use_case = BuildDatabaseUseCase::new(
        FileSystemReader::new(),
        FileSystemVulnDbWriter::new(),
        StderrProgressReporter::new(),
    );
    use_case.execute(BuildDatabaseRequest::new(args.advisories, args.output))?;
    Ok(())
}

async fn analyze_report(args: AnalyzeArgs) -> Result<()> {
    let config = load_config(args.config.as_deref())?;
    let settings = args.settings(&config);
    debug!(?settings, "resolved analysis settings");

    let package_source = FileSystemReader::new().read_package_source(&args.report)?;

    // Create adapters (Dependency Injection)
    let use_case = AnalyzeReachabilityUseCase::new(
        FileSystemVulnDbWriter::new(),
        LegacyGovulncheckProducer::new(settings.govulncheck.clone()),
        StreamingGovulncheckProducer::new(settings.govulncheck),
        StderrProgressReporter::new(),
    );

    let mut request = AnalysisRequest::new(package_source, settings.invocation);
    if let Some(cache_root) = settings.cache_root {
        request = request.with_cache_root(cache_root);
    }
    let response = use_case.analyze(request).await?;

    let output = serde_json::to_string_pretty(&response.package_source)?;
    let presenter: Box<dyn OutputPresenter> = match args.output {
        Some(path) => Box::new(FileSystemWriter::new(path)),
        None => Box::new(StdoutPresenter::new()),
    };
    presenter.present(&format!("{}\n", output))
}

/// Explicit `--config` must exist; otherwise the working directory is
/// searched and a missing file means defaults.
fn load_config(explicit: Option<&Path>) -> Result<ConfigFile> {
    match explicit {
        Some(path) => load_config_from_path(path),
        None => {
            let cwd = std::env::current_dir()?;
            Ok(discover_config(&cwd)?.unwrap_or_default())
        }
    }
}
