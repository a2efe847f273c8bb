use crate::shared::error::ErrataError;
use std::fs;
use std::path::Path;

/// Maximum announcement file size (100 MB)
pub const MAX_INPUT_FILE_SIZE: u64 = 100 * 1024 * 1024;

/// Checks that an announcement input file exists, is a regular file and is
/// not larger than [`MAX_INPUT_FILE_SIZE`].
///
/// Symbolic links are followed here; package mirrors and mail spools are
/// commonly linked into place.
pub fn check_input_file(path: &Path) -> Result<(), ErrataError> {
    let invalid = |reason: String| ErrataError::InputFile {
        path: path.to_path_buf(),
        reason,
    };

    if !path.exists() {
        return Err(invalid("File does not exist".to_string()));
    }

    let metadata =
        fs::metadata(path).map_err(|e| invalid(format!("Failed to read metadata: {}", e)))?;

    if !metadata.is_file() {
        return Err(invalid("Not a regular file".to_string()));
    }

    if metadata.len() > MAX_INPUT_FILE_SIZE {
        return Err(invalid(format!(
            "File is too large ({} bytes). Maximum allowed size is {} bytes.",
            metadata.len(),
            MAX_INPUT_FILE_SIZE
        )));
    }

    fs::File::open(path).map_err(|e| invalid(format!("File is not readable: {}", e)))?;

    Ok(())
}

/// Problem found with a configured package directory
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DirectoryProblem {
    Missing,
    NotADirectory,
    Unreadable,
}

impl std::fmt::Display for DirectoryProblem {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DirectoryProblem::Missing => write!(f, "does not exist"),
            DirectoryProblem::NotADirectory => write!(f, "is not a directory"),
            DirectoryProblem::Unreadable => write!(f, "is not readable"),
        }
    }
}

/// Checks a package directory, returning the first problem found
pub fn check_package_dir(path: &Path) -> Option<DirectoryProblem> {
    if !path.exists() {
        return Some(DirectoryProblem::Missing);
    }
    if !path.is_dir() {
        return Some(DirectoryProblem::NotADirectory);
    }
    if fs::read_dir(path).is_err() {
        return Some(DirectoryProblem::Unreadable);
    }
    None
}
