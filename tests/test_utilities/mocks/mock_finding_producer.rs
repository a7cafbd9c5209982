use async_trait::async_trait;
use osv_reachability::prelude::*;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

/// How a MockFindingProducer fails
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MockFailure {
    ToolUnavailable,
    AnalysisFailed,
}

/// One recorded `produce` call
#[derive(Debug, Clone)]
pub struct ProducerCall {
    pub module_root: PathBuf,
    pub db_dir: PathBuf,
    /// Whether the cache index existed when the producer ran
    pub index_present: bool,
}

/// Mock FindingStreamProducer returning canned findings
#[derive(Clone)]
pub struct MockFindingProducer {
    pub name: String,
    pub findings: Vec<Finding>,
    pub failure: Option<MockFailure>,
    pub calls: Arc<Mutex<Vec<ProducerCall>>>,
}

impl MockFindingProducer {
    pub fn new(name: &str, findings: Vec<Finding>) -> Self {
        Self {
            name: name.to_string(),
            findings,
            failure: None,
            calls: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub fn failing(name: &str, failure: MockFailure) -> Self {
        Self {
            failure: Some(failure),
            ..Self::new(name, vec![])
        }
    }

    pub fn calls(&self) -> Vec<ProducerCall> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl FindingStreamProducer for MockFindingProducer {
    fn name(&self) -> &str {
        &self.name
    }

    async fn produce(&self, module_root: &Path, db_dir: &Path) -> Result<Vec<Finding>> {
        self.calls.lock().unwrap().push(ProducerCall {
            module_root: module_root.to_path_buf(),
            db_dir: db_dir.to_path_buf(),
            index_present: db_dir.join("index/modules.json").is_file(),
        });

        match self.failure {
            Some(MockFailure::ToolUnavailable) => Err(SourceAnalysisError::ToolUnavailable {
                tool: "govulncheck".to_string(),
                details: "mock: not found".to_string(),
            }
            .into()),
            Some(MockFailure::AnalysisFailed) => Err(SourceAnalysisError::AnalysisFailed {
                details: "mock: exit status 1".to_string(),
            }
            .into()),
            None => Ok(self.findings.clone()),
        }
    }
}
