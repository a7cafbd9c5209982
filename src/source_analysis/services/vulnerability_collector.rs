use crate::source_analysis::domain::{PackageVulns, Vulnerability};
use std::collections::BTreeMap;

/// VulnerabilityCollector service flattening package groups into the set of
/// distinct advisories they reference.
pub struct VulnerabilityCollector;

impl VulnerabilityCollector {
    /// Returns every distinct advisory attached to `packages`, keyed by ID.
    ///
    /// When an ID appears under several packages the last occurrence wins;
    /// the records are expected to be identical.
    pub fn collect(packages: &[PackageVulns]) -> BTreeMap<String, Vulnerability> {
        packages
            .iter()
            .flat_map(|package| &package.vulnerabilities)
            .map(|vuln| (vuln.id.clone(), vuln.clone()))
            .collect()
    }

    /// The advisories of `collect` as a list, ordered by ID.
    pub fn flatten(vulns_by_id: &BTreeMap<String, Vulnerability>) -> Vec<Vulnerability> {
        vulns_by_id.values().cloned().collect()
    }
}
