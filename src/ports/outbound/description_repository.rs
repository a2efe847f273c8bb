use crate::shared::Result;
use async_trait::async_trait;

/// Free-text sections of an upstream advisory page
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AdvisoryText {
    pub description: Option<String>,
    pub solution: Option<String>,
}

/// DescriptionRepository port for enriching advisories with upstream text
///
/// Failures are never fatal to an import; callers fall back to the
/// placeholder description and solution.
#[async_trait]
pub trait DescriptionRepository: Send + Sync {
    /// Fetches the description and solution published at `url`
    ///
    /// # Arguments
    /// * `url` - Canonical URL of the upstream advisory
    ///
    /// # Errors
    /// Returns an error if the page cannot be downloaded
    async fn fetch_description(&self, url: &str) -> Result<AdvisoryText>;
}
