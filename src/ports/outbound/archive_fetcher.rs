use crate::shared::Result;
use async_trait::async_trait;

/// ArchiveFetcher port for downloading mailing list archive pages
///
/// Used by the mail archive parser for both the index page and the
/// individual message pages.
#[async_trait]
pub trait ArchiveFetcher: Send + Sync {
    /// Fetches the document at `url` and returns it as text
    ///
    /// # Errors
    /// Returns an error if the document cannot be retrieved
    async fn fetch(&self, url: &str) -> Result<String>;
}
