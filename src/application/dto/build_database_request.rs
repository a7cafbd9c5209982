use std::path::PathBuf;

/// BuildDatabaseRequest - Internal request DTO for writing an advisory cache
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildDatabaseRequest {
    /// Directory holding one OSV advisory per `*.json` file
    pub advisories_dir: PathBuf,
    /// Directory receiving `index/` and `ID/`
    pub output_dir: PathBuf,
}

impl BuildDatabaseRequest {
    pub fn new(advisories_dir: PathBuf, output_dir: PathBuf) -> Self {
        Self {
            advisories_dir,
            output_dir,
        }
    }
}
