use crate::errata::domain::{Architecture, PackageIdentity, PackageReference};
use crate::shared::Result;
use async_trait::async_trait;

/// Advisory-level facts a resolution strategy may depend on
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolutionContext {
    pub advisory_name: String,
    pub fast_track: bool,
}

impl ResolutionContext {
    pub fn new(advisory_name: impl Into<String>, fast_track: bool) -> Self {
        Self {
            advisory_name: advisory_name.into(),
            fast_track,
        }
    }
}

/// PackageResolver port - maps a package reference to a package identity
#[async_trait]
pub trait PackageResolver: Send + Sync {
    /// Short name of the strategy, as used in the configuration
    fn name(&self) -> &'static str;

    /// Resolves `reference` for `architecture`
    ///
    /// # Returns
    /// `Ok(None)` when the package cannot be found
    ///
    /// # Errors
    /// Only for transport failures of a remote backend
    async fn resolve(
        &self,
        context: &ResolutionContext,
        architecture: &Architecture,
        reference: &PackageReference,
    ) -> Result<Option<PackageIdentity>>;
}
