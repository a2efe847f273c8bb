use crate::errata::domain::{PackageIdentity, PackageReference};
use crate::ports::outbound::PackageCatalog;
use crate::shared::Result;
use std::sync::Arc;

/// Resolves packages by asking the errata server for a package of the
/// same name with the announced checksum.
///
/// Deprecated: current servers store a different checksum type than the
/// one announced, so the lookup rarely matches.
pub struct RemoteCatalog {
    catalog: Arc<dyn PackageCatalog>,
}

impl RemoteCatalog {
    pub const NAME: &'static str = "spacewalk";

    pub fn new(catalog: Arc<dyn PackageCatalog>) -> Self {
        Self { catalog }
    }

    pub async fn resolve(&self, reference: &PackageReference) -> Result<Option<PackageIdentity>> {
        let Some(name) = reference.bare_name() else {
            log::warn!("Bad package filename {}", reference.filename());
            return Ok(None);
        };

        log::debug!("Searching for {} {}", name, reference.checksum());
        self.catalog.find_by_checksum(name, reference.checksum()).await
    }
}
