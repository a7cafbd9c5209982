//! osv-reachability - Go vulnerability reachability analysis for OSV scan results
//!
//! This library builds an offline, govulncheck-readable vulnerability
//! database from OSV advisories and annotates scanned Go packages with
//! whether their vulnerable code is actually called, following hexagonal
//! architecture and Domain-Driven Design principles.
//!
//! # Architecture
//!
//! The library is organized into the following layers:
//!
//! - **Domain Layer** (`source_analysis`): advisories, the vulnerability
//!   database, the fixed-version policy and the reachability matcher
//! - **Application Layer** (`application`): Use cases and DTOs
//! - **Ports** (`ports`): Interface definitions for infrastructure
//! - **Adapters** (`adapters`): Filesystem, console and govulncheck implementations
//! - **Shared** (`shared`): Common utilities and error types
//!
//! # Example
//!
//! ```no_run
//! use osv_reachability::prelude::*;
//! use std::path::Path;
//!
//! # async fn run() -> Result<()> {
//! let config = GovulncheckConfig::default();
//! let use_case = AnalyzeReachabilityUseCase::new(
//!     FileSystemVulnDbWriter::new(),
//!     LegacyGovulncheckProducer::new(config.clone()),
//!     StreamingGovulncheckProducer::new(config),
//!     StderrProgressReporter::new(),
//! );
//!
//! let source = FileSystemReader::new().read_package_source(Path::new("report.json"))?;
//! let response = use_case
//!     .execute(AnalysisRequest::new(source, InvocationStrategy::Streaming))
//!     .await?;
//! println!("{}", serde_json::to_string_pretty(&response.package_source)?);
//! # Ok(())
//! # }
//! ```

pub mod adapters;
pub mod application;
pub mod config;
pub mod ports;
pub mod shared;
pub mod source_analysis;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::adapters::outbound::console::StderrProgressReporter;
    pub use crate::adapters::outbound::filesystem::{
        FileSystemReader, FileSystemVulnDbWriter, FileSystemWriter, StdoutPresenter,
    };
    pub use crate::adapters::outbound::govulncheck::{
        GovulncheckConfig, LegacyGovulncheckProducer, StreamingGovulncheckProducer,
    };
    pub use crate::application::dto::{
        AnalysisRequest, AnalysisResponse, BuildDatabaseRequest, BuildDatabaseResponse,
        InvocationStrategy,
    };
    pub use crate::application::use_cases::{AnalyzeReachabilityUseCase, BuildDatabaseUseCase};
    pub use crate::ports::inbound::SourceAnalysisPort;
    pub use crate::ports::outbound::{
        AdvisoryCacheWriter, AdvisoryReader, FindingStreamProducer, OutputPresenter,
        PackageSourceReader, ProgressReporter,
    };
    pub use crate::shared::error::SourceAnalysisError;
    pub use crate::source_analysis::domain::{
        Database, Finding, PackageSource, PackageVulns, Vulnerability,
    };
    pub use crate::source_analysis::policies::latest_fixed_version;
    pub use crate::source_analysis::services::{MatchSummary, ReachabilityMatcher};
    pub use crate::shared::Result;
}
