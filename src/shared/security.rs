use crate::shared::error::SourceAnalysisError;
use crate::shared::Result;
use std::fs;
use std::path::Path;

/// Maximum size of an advisory or report file (100 MB)
pub const MAX_FILE_SIZE: u64 = 100 * 1024 * 1024;

/// Validates that a path is not a symbolic link
///
/// # Security
/// Uses `symlink_metadata()` so the link itself is inspected, not its target.
///
/// # Errors
/// Returns an error if the path is a symbolic link or if metadata cannot be read
pub fn validate_not_symlink(path: &Path, operation: &str) -> Result<()> {
    let metadata = fs::symlink_metadata(path).map_err(|e| SourceAnalysisError::io(path, e))?;

    if metadata.is_symlink() {
        return Err(SourceAnalysisError::SecurityError {
            path: path.to_path_buf(),
            reason: format!(
                "{} operations on symbolic links are not allowed",
                operation
            ),
        }
        .into());
    }

    Ok(())
}

/// Validates that a path exists and is a regular file within the size limit
///
/// # Errors
/// Returns an error if:
/// - The path doesn't exist
/// - The path is a symbolic link
/// - The path is not a regular file
/// - The file is larger than `MAX_FILE_SIZE`
pub fn validate_regular_file(path: &Path, file_description: &str) -> Result<()> {
    let metadata = fs::symlink_metadata(path).map_err(|e| SourceAnalysisError::io(path, e))?;

    if metadata.is_symlink() {
        return Err(SourceAnalysisError::SecurityError {
            path: path.to_path_buf(),
            reason: format!("{} is a symbolic link", file_description),
        }
        .into());
    }

    if !metadata.is_file() {
        return Err(SourceAnalysisError::InvalidSource {
            path: path.to_path_buf(),
            reason: format!("{} is not a regular file", file_description),
        }
        .into());
    }

    validate_file_size(metadata.len(), path, MAX_FILE_SIZE)
}

/// Validates file size is within acceptable limits
pub fn validate_file_size(file_size: u64, path: &Path, max_size: u64) -> Result<()> {
    if file_size > max_size {
        return Err(SourceAnalysisError::SecurityError {
            path: path.to_path_buf(),
            reason: format!(
                "file is too large ({} bytes). Maximum allowed size is {} bytes",
                file_size, max_size
            ),
        }
        .into());
    }
    Ok(())
}

/// Validates that an advisory ID can be used verbatim as a file name.
///
/// Entries are written to `ID/<id>.json`, so the ID must stay inside that
/// directory.
pub fn validate_entry_file_name(id: &str) -> Result<()> {
    let escapes = id.is_empty()
        || id == "."
        || id == ".."
        || id.contains('/')
        || id.contains('\\')
        || id.contains('\0');

    if escapes {
        return Err(SourceAnalysisError::SecurityError {
            path: Path::new(id).to_path_buf(),
            reason: "advisory ID cannot be used as an entry file name".to_string(),
        }
        .into());
    }
    Ok(())
}
