use crate::source_analysis::domain::{
    Affected, AnalysisInfo, PackageVulns, ReachabilityResult, Vulnerability,
};
use std::collections::{BTreeMap, HashMap};

/// Counts of the verdicts recorded by one matching pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MatchSummary {
    pub called: usize,
    pub not_called: usize,
    pub unknown: usize,
}

/// ReachabilityMatcher service merging analyzer results back onto package
/// vulnerability groups.
///
/// Matching is best-effort enrichment: it never fails, and a pair it cannot
/// decide is left without a verdict.
pub struct ReachabilityMatcher;

impl ReachabilityMatcher {
    /// Records a `called` verdict for every (package, vulnerability ID) pair.
    ///
    /// - result present, package module not in its module list: `false`,
    ///   the code does not import the module at all
    /// - result present, module listed: the result's `affected` flag
    /// - no result, but the advisory lists the affected imports for this
    ///   package: `false`, the analyzer would have reported a use
    /// - otherwise nothing is recorded
    ///
    /// # Arguments
    /// * `packages` - Package groups to annotate in place
    /// * `results` - Analyzer results keyed by vulnerability ID
    /// * `vulns_by_id` - Advisory entries keyed by ID, for the fallback
    pub fn apply(
        packages: &mut [PackageVulns],
        results: &HashMap<String, ReachabilityResult>,
        vulns_by_id: &BTreeMap<String, Vulnerability>,
    ) -> MatchSummary {
        let mut summary = MatchSummary::default();

        for package_vulns in packages.iter_mut() {
            let package_name = package_vulns.package.name.as_str();

            for group in package_vulns.groups.iter_mut() {
                let analysis = group
                    .experimental_analysis
                    .get_or_insert_with(BTreeMap::new);

                for id in &group.ids {
                    match Self::verdict(package_name, id, results, vulns_by_id) {
                        Some(called) => {
                            if called {
                                summary.called += 1;
                            } else {
                                summary.not_called += 1;
                            }
                            analysis.insert(id.clone(), AnalysisInfo { called });
                        }
                        None => summary.unknown += 1,
                    }
                }
            }
        }

        summary
    }

    fn verdict(
        package_name: &str,
        id: &str,
        results: &HashMap<String, ReachabilityResult>,
        vulns_by_id: &BTreeMap<String, Vulnerability>,
    ) -> Option<bool> {
        match results.get(id) {
            // Module list is small, linear search is fine
            Some(result) if !result.contains_module(package_name) => Some(false),
            Some(result) => Some(result.affected),
            None => vulns_by_id
                .get(id)
                .filter(|vuln| vuln.affected_for(package_name).any(Affected::has_import_info))
                .map(|_| false),
        }
    }
}
