use crate::source_analysis::domain::{Finding, FindingModule, FindingPackage};
use serde::Deserialize;
use serde_json::Value;

/// A vulnerability as reported by govulncheck.
///
/// Both output formats share this shape. The legacy document spells field
/// names in PascalCase, the message stream in snake_case; Go encodes nil
/// slices as `null`, hence the `Option<Vec<_>>` fields.
#[derive(Debug, Deserialize)]
pub(super) struct ReportVuln {
    #[serde(alias = "OSV")]
    osv: ReportOsv,
    #[serde(default, alias = "Modules")]
    modules: Option<Vec<ReportModule>>,
}

#[derive(Debug, Deserialize)]
struct ReportOsv {
    id: String,
}

#[derive(Debug, Deserialize)]
struct ReportModule {
    #[serde(alias = "Path")]
    path: String,
    #[serde(default, alias = "Packages")]
    packages: Option<Vec<ReportPackage>>,
}

#[derive(Debug, Deserialize)]
struct ReportPackage {
    #[serde(alias = "Path")]
    path: String,
    #[serde(default, alias = "CallStacks")]
    call_stacks: Option<Vec<Value>>,
}

impl From<ReportVuln> for Finding {
    fn from(vuln: ReportVuln) -> Self {
        Finding {
            osv_id: vuln.osv.id,
            modules: vuln
                .modules
                .unwrap_or_default()
                .into_iter()
                .map(FindingModule::from)
                .collect(),
        }
    }
}

impl From<ReportModule> for FindingModule {
    fn from(module: ReportModule) -> Self {
        FindingModule {
            path: module.path,
            packages: module
                .packages
                .unwrap_or_default()
                .into_iter()
                .map(|package| FindingPackage {
                    path: package.path,
                    called: package.call_stacks.is_some_and(|stacks| !stacks.is_empty()),
                })
                .collect(),
        }
    }
}
