use crate::ports::outbound::{AdvisoryReader, PackageSourceReader};
use crate::shared::error::SourceAnalysisError;
use crate::shared::security::{validate_not_symlink, validate_regular_file};
use crate::shared::Result;
use crate::source_analysis::domain::{PackageSource, Vulnerability};
use serde::de::DeserializeOwned;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

/// FileSystemReader adapter for reading advisories and scan reports
///
/// This adapter implements both AdvisoryReader and PackageSourceReader ports.
/// Every file goes through the same checks: no symbolic links, regular files
/// only, bounded size.
pub struct FileSystemReader;

impl FileSystemReader {
    pub fn new() -> Self {
        Self
    }

    fn read_json<T: DeserializeOwned>(&self, path: &Path, file_description: &str) -> Result<T> {
        validate_regular_file(path, file_description)?;
        let content = fs::read_to_string(path).map_err(|e| SourceAnalysisError::io(path, e))?;
        let value =
            serde_json::from_str(&content).map_err(|e| SourceAnalysisError::serialization(path, e))?;
        Ok(value)
    }

    fn advisory_files(&self, dir: &Path) -> Result<Vec<PathBuf>> {
        validate_not_symlink(dir, "read")?;
        if !dir.is_dir() {
            return Err(SourceAnalysisError::InvalidSource {
                path: dir.to_path_buf(),
                reason: "advisory location is not a directory".to_string(),
            }
            .into());
        }

        let mut files = Vec::new();
        for entry in fs::read_dir(dir).map_err(|e| SourceAnalysisError::io(dir, e))? {
            let path = entry.map_err(|e| SourceAnalysisError::io(dir, e))?.path();
            if path.extension().is_some_and(|ext| ext == "json") && !path.is_dir() {
                files.push(path);
            }
        }
        files.sort();
        Ok(files)
    }
}

impl Default for FileSystemReader {
    fn default() -> Self {
        Self::new()
    }
}

impl AdvisoryReader for FileSystemReader {
    fn read_advisories(&self, dir: &Path) -> Result<Vec<Vulnerability>> {
        let files = self.advisory_files(dir)?;
        debug!(dir = %dir.display(), count = files.len(), "reading advisories");

        files
            .iter()
            .map(|path| self.read_json::<Vulnerability>(path, "advisory"))
            .collect()
    }
}

impl PackageSourceReader for FileSystemReader {
    fn read_package_source(&self, path: &Path) -> Result<PackageSource> {
        self.read_json(path, "scan report")
    }
}
