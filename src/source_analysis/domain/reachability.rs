use std::collections::HashMap;

/// One finding reported by the reachability analyzer.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Finding {
    pub osv_id: String,
    pub modules: Vec<FindingModule>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FindingModule {
    pub path: String,
    pub packages: Vec<FindingPackage>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FindingPackage {
    pub path: String,
    /// Whether at least one call stack reaches a vulnerable symbol through
    /// this package.
    pub called: bool,
}

impl Finding {
    pub fn is_called(&self) -> bool {
        self.modules
            .iter()
            .flat_map(|module| &module.packages)
            .any(|package| package.called)
    }
}

/// Analysis outcome for one vulnerability ID.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReachabilityResult {
    /// A vulnerable symbol is reachable from the analysed code.
    pub affected: bool,
    /// Modules imported by the analysed code that the vulnerability affects.
    pub modules: Vec<String>,
}

impl ReachabilityResult {
    pub fn contains_module(&self, path: &str) -> bool {
        self.modules.iter().any(|module| module == path)
    }

    fn merge(&mut self, finding: &Finding) {
        self.affected |= finding.is_called();
        for module in &finding.modules {
            if !self.contains_module(&module.path) {
                self.modules.push(module.path.clone());
            }
        }
    }
}

/// Folds findings into one result per vulnerability ID.
///
/// The analyzer may report the same ID several times (for example once per
/// module, or at increasing levels of precision); those are merged.
pub fn results_by_vuln_id(findings: &[Finding]) -> HashMap<String, ReachabilityResult> {
    let mut results: HashMap<String, ReachabilityResult> = HashMap::new();
    for finding in findings {
        results
            .entry(finding.osv_id.clone())
            .or_default()
            .merge(finding);
    }
    results
}
