pub mod advisory;
pub mod database;
pub mod package_vulns;
pub mod reachability;
pub mod version;

pub use advisory::{
    Affected, AffectedPackage, Event, Range, Reference, SeverityScore, Vulnerability,
};
pub use database::{Database, DbMeta, Module, ModuleVuln, ModulesIndex};
pub use package_vulns::{
    AnalysisInfo, GroupInfo, PackageInfo, PackageSource, PackageVulns, SourceInfo,
};
pub use reachability::{
    results_by_vuln_id, Finding, FindingModule, FindingPackage, ReachabilityResult,
};
pub use version::Version;
