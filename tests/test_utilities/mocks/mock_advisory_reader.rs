use osv_reachability::prelude::*;
use std::path::Path;

/// Mock AdvisoryReader returning a fixed advisory list
pub struct MockAdvisoryReader {
    pub advisories: Vec<Vulnerability>,
    pub should_fail: bool,
}

impl MockAdvisoryReader {
    pub fn new(advisories: Vec<Vulnerability>) -> Self {
        Self {
            advisories,
            should_fail: false,
        }
    }

    pub fn with_failure() -> Self {
        Self {
            advisories: vec![],
            should_fail: true,
        }
    }
}

impl AdvisoryReader for MockAdvisoryReader {
    fn read_advisories(&self, _dir: &Path) -> Result<Vec<Vulnerability>> {
        if self.should_fail {
            anyhow::bail!("Mock advisory read failure");
        }
        Ok(self.advisories.clone())
    }
}
