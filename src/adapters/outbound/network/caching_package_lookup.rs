use crate::errata::domain::{Advisory, PackageIdentity};
use crate::ports::outbound::ErrataPublisher;
use crate::shared::Result;
use async_trait::async_trait;
use dashmap::DashMap;
use std::sync::Arc;

/// CachingPackageLookup wraps an ErrataPublisher and remembers the packages
/// it has already found by NVREA.
///
/// The same binary package (e.g. a `noarch` build) often appears in several
/// architectures and advisories of one run; each is looked up once. Misses
/// are not cached.
pub struct CachingPackageLookup<P: ErrataPublisher> {
    inner: P,
    cache: Arc<DashMap<String, PackageIdentity>>,
}

impl<P: ErrataPublisher> CachingPackageLookup<P> {
    pub fn new(inner: P) -> Self {
        Self {
            inner,
            cache: Arc::new(DashMap::new()),
        }
    }

    /// Returns the current cache size (for testing/monitoring)
    #[cfg(test)]
    pub fn cache_size(&self) -> usize {
        self.cache.len()
    }
}

#[async_trait]
impl<P: ErrataPublisher> ErrataPublisher for CachingPackageLookup<P> {
    async fn advisory_exists(&self, advisory_name: &str) -> Result<bool> {
        self.inner.advisory_exists(advisory_name).await
    }

    async fn find_package(&self, package: &PackageIdentity) -> Result<Option<PackageIdentity>> {
        let key = package.nvra();

        if let Some(cached) = self.cache.get(&key) {
            return Ok(Some(cached.clone()));
        }

        let found = self.inner.find_package(package).await?;
        if let Some(found) = &found {
            self.cache.insert(key, found.clone());
        }

        Ok(found)
    }

    async fn create_advisory(&self, advisory: &Advisory) -> Result<()> {
        self.inner.create_advisory(advisory).await
    }
}
