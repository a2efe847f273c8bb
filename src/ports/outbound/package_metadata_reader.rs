use crate::errata::domain::PackageIdentity;
use crate::shared::Result;
use std::path::Path;

/// PackageMetadataReader port for reading package identity from a local file
pub trait PackageMetadataReader: Send + Sync {
    /// Reads name, version, release, epoch and architecture of the package
    /// file at `path`
    ///
    /// # Errors
    /// Returns an error if the file does not exist or is not a readable
    /// package
    fn read_metadata(&self, path: &Path) -> Result<PackageIdentity>;
}
