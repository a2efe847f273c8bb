use crate::errata::domain::{Advisory, PackageIdentity};
use crate::shared::Result;
use async_trait::async_trait;

/// ErrataPublisher port - what the import pipeline needs from the errata
/// server when publishing
#[async_trait]
pub trait ErrataPublisher: Send + Sync {
    /// Returns true if an advisory with this name already exists remotely
    async fn advisory_exists(&self, advisory_name: &str) -> Result<bool>;

    /// Resolves the server's view of a package by NVREA
    async fn find_package(&self, package: &PackageIdentity) -> Result<Option<PackageIdentity>>;

    /// Creates the advisory on the server
    ///
    /// # Errors
    /// Returns an error if the advisory is not ready to publish or the
    /// server rejects it
    async fn create_advisory(&self, advisory: &Advisory) -> Result<()>;
}

/// PackageCatalog port - checksum based package lookup on the errata server
#[async_trait]
pub trait PackageCatalog: Send + Sync {
    /// Finds the package named `name` whose checksum equals `checksum`
    async fn find_by_checksum(&self, name: &str, checksum: &str)
        -> Result<Option<PackageIdentity>>;
}
