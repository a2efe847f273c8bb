//! Package resolution strategies.
//!
//! Strategies form a closed set; the federated chain composes the others and
//! is what the import pipeline is normally handed.

mod local_directory;
mod remote_catalog;

pub use local_directory::{ArchDirectories, LocalDirectory};
pub use remote_catalog::RemoteCatalog;

use crate::errata::domain::{Architecture, PackageIdentity, PackageReference};
use crate::ports::outbound::{PackageResolver, ResolutionContext};
use crate::shared::Result;
use async_trait::async_trait;

/// A package resolution strategy
pub enum SearchStrategy {
    LocalDirectory(LocalDirectory),
    RemoteCatalog(RemoteCatalog),
    /// Tries each member in order; the first one that finds the package wins
    Federated(Vec<SearchStrategy>),
}

impl SearchStrategy {
    pub const FEDERATED_NAME: &'static str = "federated";

    /// Strategies that may no longer be selected in configuration
    pub const DEPRECATED_NAMES: &'static [&'static str] = &[RemoteCatalog::NAME, "satellitedir"];

    pub fn is_deprecated(name: &str) -> bool {
        Self::DEPRECATED_NAMES.contains(&name)
    }
}

#[async_trait]
impl PackageResolver for SearchStrategy {
    fn name(&self) -> &'static str {
        match self {
            SearchStrategy::LocalDirectory(_) => LocalDirectory::NAME,
            SearchStrategy::RemoteCatalog(_) => RemoteCatalog::NAME,
            SearchStrategy::Federated(_) => Self::FEDERATED_NAME,
        }
    }

    async fn resolve(
        &self,
        context: &ResolutionContext,
        architecture: &Architecture,
        reference: &PackageReference,
    ) -> Result<Option<PackageIdentity>> {
        match self {
            SearchStrategy::LocalDirectory(strategy) => {
                Ok(strategy.resolve(context, architecture, reference))
            }
            SearchStrategy::RemoteCatalog(strategy) => strategy.resolve(reference).await,
            SearchStrategy::Federated(members) => {
                for member in members {
                    if let Some(identity) = member.resolve(context, architecture, reference).await? {
                        return Ok(Some(identity));
                    }
                    log::info!(
                        "Searching for {} using strategy '{}' failed",
                        reference.filename(),
                        member.name()
                    );
                }
                log::info!("No strategy resolved {}", reference.filename());
                Ok(None)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ports::outbound::{PackageCatalog, PackageMetadataReader};
    use std::collections::HashMap;
    use std::path::{Path, PathBuf};
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    struct CountingReader {
        found: Option<PackageIdentity>,
        calls: AtomicUsize,
    }

    impl CountingReader {
        fn new(found: Option<PackageIdentity>) -> Arc<Self> {
            Arc::new(Self {
                found,
                calls: AtomicUsize::new(0),
            })
        }

        fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    impl PackageMetadataReader for CountingReader {
        fn read_metadata(&self, path: &Path) -> Result<PackageIdentity> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.found
                .clone()
                .ok_or_else(|| anyhow::anyhow!("{} not found", path.display()))
        }
    }

    struct FailingCatalog;

    #[async_trait]
    impl PackageCatalog for FailingCatalog {
        async fn find_by_checksum(&self, _: &str, _: &str) -> Result<Option<PackageIdentity>> {
            anyhow::bail!("connection refused")
        }
    }

    fn local(dir: &str, reader: Arc<CountingReader>) -> SearchStrategy {
        let mut directories = HashMap::new();
        directories.insert(
            Architecture::new("x86_64"),
            ArchDirectories::new(Some(PathBuf::from(dir)), None),
        );
        SearchStrategy::LocalDirectory(LocalDirectory::new(directories, reader))
    }

    fn identity(release: &str) -> PackageIdentity {
        PackageIdentity::new("foo", "1.0", release, None, "x86_64")
    }

    fn reference() -> PackageReference {
        PackageReference::new("abc", "foo-1.0-1.x86_64.rpm")
    }

    #[tokio::test]
    async fn test_federated_first_success_wins() {
        let first = CountingReader::new(Some(identity("1")));
        let second = CountingReader::new(Some(identity("2")));
        let chain = SearchStrategy::Federated(vec![
            local("/a", first.clone()),
            local("/b", second.clone()),
        ]);
        let context = ResolutionContext::new("CESA-2024:0001", false);

        let found = chain
            .resolve(&context, &Architecture::new("x86_64"), &reference())
            .await
            .unwrap()
            .unwrap();

        assert_eq!(found.release, "1");
        assert_eq!(first.calls(), 1);
        assert_eq!(second.calls(), 0);
    }

    #[tokio::test]
    async fn test_federated_falls_through_to_next() {
        let first = CountingReader::new(None);
        let second = CountingReader::new(Some(identity("2")));
        let chain = SearchStrategy::Federated(vec![
            local("/a", first.clone()),
            local("/b", second.clone()),
        ]);
        let context = ResolutionContext::new("CESA-2024:0001", false);

        let found = chain
            .resolve(&context, &Architecture::new("x86_64"), &reference())
            .await
            .unwrap()
            .unwrap();

        assert_eq!(found.release, "2");
        assert_eq!(found.path.as_deref(), Some("/b/foo-1.0-1.x86_64.rpm"));
        assert_eq!(first.calls(), 1);
        assert_eq!(second.calls(), 1);
    }

    #[tokio::test]
    async fn test_federated_stops_at_first_success() {
        let first = CountingReader::new(None);
        let second = CountingReader::new(Some(identity("2")));
        let third = CountingReader::new(Some(identity("3")));
        let chain = SearchStrategy::Federated(vec![
            local("/a", first.clone()),
            local("/b", second.clone()),
            local("/c", third.clone()),
        ]);
        let context = ResolutionContext::new("CESA-2024:0001", false);

        let found = chain
            .resolve(&context, &Architecture::new("x86_64"), &reference())
            .await
            .unwrap()
            .unwrap();

        assert_eq!(
            (first.calls(), second.calls(), third.calls()),
            (1, 1, 0)
        );
        assert_eq!(found.release, "2");
        assert_eq!(found.provider.as_deref(), Some("dir"));
        assert_eq!(found.path.as_deref(), Some("/b/foo-1.0-1.x86_64.rpm"));
    }

    #[tokio::test]
    async fn test_federated_not_found_anywhere() {
        let chain = SearchStrategy::Federated(vec![
            local("/a", CountingReader::new(None)),
            local("/b", CountingReader::new(None)),
        ]);
        let context = ResolutionContext::new("CESA-2024:0001", false);

        let found = chain
            .resolve(&context, &Architecture::new("x86_64"), &reference())
            .await
            .unwrap();

        assert!(found.is_none());
    }

    #[tokio::test]
    async fn test_federated_propagates_transport_errors() {
        let after = CountingReader::new(Some(identity("1")));
        let chain = SearchStrategy::Federated(vec![
            SearchStrategy::RemoteCatalog(RemoteCatalog::new(Arc::new(FailingCatalog))),
            local("/a", after.clone()),
        ]);
        let context = ResolutionContext::new("CESA-2024:0001", false);

        let result = chain
            .resolve(&context, &Architecture::new("x86_64"), &reference())
            .await;

        assert!(result.is_err());
        assert_eq!(after.calls(), 0);
    }

    #[test]
    fn test_strategy_names() {
        let chain = SearchStrategy::Federated(vec![local("/a", CountingReader::new(None))]);

        assert_eq!(chain.name(), "federated");
        if let SearchStrategy::Federated(members) = &chain {
            assert_eq!(members[0].name(), "dir");
        }
        assert!(SearchStrategy::is_deprecated("spacewalk"));
        assert!(SearchStrategy::is_deprecated("satellitedir"));
        assert!(!SearchStrategy::is_deprecated("dir"));
    }
}
