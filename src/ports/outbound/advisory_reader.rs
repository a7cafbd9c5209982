use crate::shared::Result;
use crate::source_analysis::domain::{PackageSource, Vulnerability};
use std::path::Path;

/// AdvisoryReader port for loading OSV advisory entries
pub trait AdvisoryReader {
    /// Reads every `*.json` advisory in `dir`, ordered by file name
    ///
    /// # Errors
    /// Returns an error if the directory cannot be listed or any advisory
    /// cannot be read or decoded.
    fn read_advisories(&self, dir: &Path) -> Result<Vec<Vulnerability>>;
}

/// PackageSourceReader port for loading a scan report to annotate
pub trait PackageSourceReader {
    /// Reads a `PackageSource` JSON document
    fn read_package_source(&self, path: &Path) -> Result<PackageSource>;
}
