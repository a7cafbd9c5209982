use crate::source_analysis::domain::Vulnerability;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;

/// Source type of packages read from a lockfile or manifest.
pub const SOURCE_TYPE_LOCKFILE: &str = "lockfile";

const GO_MODULE_FILE: &str = "go.mod";

/// Where a set of scanned packages came from.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceInfo {
    pub path: String,
    #[serde(rename = "type")]
    pub source_type: String,
}

impl SourceInfo {
    pub fn new(path: impl Into<String>, source_type: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            source_type: source_type.into(),
        }
    }

    /// Whether this source is a Go module whose code can be analysed.
    pub fn is_go_module(&self) -> bool {
        self.source_type == SOURCE_TYPE_LOCKFILE
            && Path::new(&self.path)
                .file_name()
                .is_some_and(|name| name == GO_MODULE_FILE)
    }

    /// Directory holding the source file, i.e. the module root to analyse.
    pub fn module_root(&self) -> &Path {
        match Path::new(&self.path).parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        }
    }
}

/// A scanned package as reported by the lockfile.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PackageInfo {
    pub name: String,
    pub version: String,
    pub ecosystem: String,
}

/// Reachability verdict for one vulnerability of one package.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalysisInfo {
    pub called: bool,
}

/// Vulnerability IDs describing the same issue (aliases), plus the
/// reachability verdicts recorded for them.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GroupInfo {
    pub ids: Vec<String>,
    /// Absent until analysis ran; a missing key means "unknown".
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub experimental_analysis: Option<BTreeMap<String, AnalysisInfo>>,
}

impl GroupInfo {
    pub fn new(ids: Vec<String>) -> Self {
        Self {
            ids,
            experimental_analysis: None,
        }
    }

    /// The recorded verdict for `id`, if any.
    pub fn called(&self, id: &str) -> Option<bool> {
        self.experimental_analysis
            .as_ref()
            .and_then(|analysis| analysis.get(id))
            .map(|info| info.called)
    }
}

/// A scanned package with the vulnerabilities found for it.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PackageVulns {
    pub package: PackageInfo,
    #[serde(default)]
    pub vulnerabilities: Vec<Vulnerability>,
    #[serde(default)]
    pub groups: Vec<GroupInfo>,
}

/// Packages grouped by the source they were read from.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PackageSource {
    pub source: SourceInfo,
    #[serde(default)]
    pub packages: Vec<PackageVulns>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_go_module() {
        assert!(SourceInfo::new("/src/app/go.mod", "lockfile").is_go_module());
        assert!(SourceInfo::new("go.mod", "lockfile").is_go_module());
        assert!(!SourceInfo::new("/src/app/go.sum", "lockfile").is_go_module());
        assert!(!SourceInfo::new("/src/app/go.mod", "sbom").is_go_module());
        assert!(!SourceInfo::new("/src/app/package-lock.json", "lockfile").is_go_module());
    }

    #[test]
    fn test_module_root() {
        assert_eq!(
            SourceInfo::new("/src/app/go.mod", "lockfile").module_root(),
            Path::new("/src/app")
        );
        assert_eq!(
            SourceInfo::new("go.mod", "lockfile").module_root(),
            Path::new(".")
        );
    }

    #[test]
    fn test_group_called_unknown_by_default() {
        let group = GroupInfo::new(vec!["GO-2000-0002".to_string()]);
        assert_eq!(group.called("GO-2000-0002"), None);
    }

    #[test]
    fn test_package_source_json_shape() {
        let raw = r#"{
            "source": {"path": "/src/app/go.mod", "type": "lockfile"},
            "packages": [{
                "package": {"name": "example.com/module", "version": "1.0.0", "ecosystem": "Go"},
                "groups": [{"ids": ["GO-2000-0002"], "experimental_analysis": {"GO-2000-0002": {"called": true}}}]
            }]
        }"#;

        let source: PackageSource = serde_json::from_str(raw).unwrap();
        assert!(source.source.is_go_module());
        assert_eq!(source.packages[0].package.name, "example.com/module");
        assert!(source.packages[0].vulnerabilities.is_empty());
        assert_eq!(source.packages[0].groups[0].called("GO-2000-0002"), Some(true));
    }
}
