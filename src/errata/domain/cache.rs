use super::{Advisory, Architecture};
use crate::shared::error::ErrataError;
use std::collections::{BTreeMap, HashMap};

/// In-memory store of the advisories assembled during one run.
///
/// Templates are keyed by advisory name; complete advisories by
/// architecture and advisory name. A complete advisory can only be added
/// once its template exists.
#[derive(Debug, Default)]
pub struct AdvisoryCache {
    templates: HashMap<String, Advisory>,
    complete: HashMap<Architecture, BTreeMap<String, Advisory>>,
    architectures: Vec<Architecture>,
}

impl AdvisoryCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores (or replaces) the template for the advisory's name
    pub fn add_template(&mut self, advisory: Advisory) {
        self.templates.insert(advisory.name.clone(), advisory);
    }

    /// Stores a complete advisory, replacing any previous one for the same
    /// architecture and name.
    ///
    /// Every package must carry a name, version, release and architecture.
    pub fn add_complete(
        &mut self,
        architecture: Architecture,
        advisory: Advisory,
    ) -> Result<(), ErrataError> {
        if !self.has_template(&advisory.name) {
            return Err(ErrataError::MissingTemplate {
                advisory: advisory.name,
                architecture: architecture.to_string(),
            });
        }
        if let Some(package) = advisory.packages.iter().find(|p| !p.is_complete()) {
            return Err(ErrataError::IncompletePackage {
                advisory: advisory.name,
                architecture: architecture.to_string(),
                package: package.nvra(),
            });
        }

        if !self.architectures.contains(&architecture) {
            self.architectures.push(architecture.clone());
        }
        self.complete
            .entry(architecture)
            .or_default()
            .insert(advisory.name.clone(), advisory);
        Ok(())
    }

    pub fn has_template(&self, name: &str) -> bool {
        self.templates.contains_key(name)
    }

    pub fn template(&self, name: &str) -> Option<&Advisory> {
        self.templates.get(name)
    }

    #[cfg(test)]
    pub fn has_complete(&self, architecture: &Architecture, name: &str) -> bool {
        self.complete
            .get(architecture)
            .is_some_and(|advisories| advisories.contains_key(name))
    }

    /// Architectures with at least one complete advisory, in the order they
    /// received their first one
    pub fn active_architectures(&self) -> &[Architecture] {
        &self.architectures
    }

    pub fn complete_for_architecture(&self, architecture: &Architecture) -> Vec<&Advisory> {
        self.complete
            .get(architecture)
            .map(|advisories| advisories.values().collect())
            .unwrap_or_default()
    }

    pub fn complete_count(&self) -> usize {
        self.complete.values().map(BTreeMap::len).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errata::domain::{AdvisoryType, PackageIdentity};

    fn advisory(name: &str) -> Advisory {
        Advisory::new(name, AdvisoryType::Security)
    }

    #[test]
    fn test_add_complete_without_template_is_rejected() {
        let mut cache = AdvisoryCache::new();
        let result = cache.add_complete(Architecture::new("x86_64"), advisory("CESA-2024:0001"));

        let err = result.unwrap_err().to_string();
        assert!(err.contains("CESA-2024:0001"));
        assert!(err.contains("x86_64"));
        assert!(cache.active_architectures().is_empty());
        assert_eq!(cache.complete_count(), 0);
    }

    #[test]
    fn test_add_complete_rejects_incomplete_package() {
        let mut cache = AdvisoryCache::new();
        let x86_64 = Architecture::new("x86_64");
        cache.add_template(advisory("CESA-2024:0001"));

        let mut with_empty = advisory("CESA-2024:0001");
        with_empty.packages = vec![
            PackageIdentity::new("foo", "1.0", "1", None, "x86_64"),
            PackageIdentity::new("", "", "", None, ""),
        ];
        let result = cache.add_complete(x86_64.clone(), with_empty);

        assert!(matches!(result, Err(ErrataError::IncompletePackage { .. })));
        assert!(!cache.has_complete(&x86_64, "CESA-2024:0001"));
        assert!(cache.active_architectures().is_empty());
        assert_eq!(cache.complete_count(), 0);
    }

    #[test]
    fn test_add_complete_rejects_empty_release() {
        let mut cache = AdvisoryCache::new();
        cache.add_template(advisory("CESA-2024:0001"));

        let mut with_empty = advisory("CESA-2024:0001");
        with_empty.packages = vec![PackageIdentity::new("foo", "1.0", "", None, "x86_64")];

        let err = cache
            .add_complete(Architecture::new("x86_64"), with_empty)
            .unwrap_err()
            .to_string();
        assert!(err.contains("CESA-2024:0001"));
        assert!(err.contains("incomplete"));
    }

    #[test]
    fn test_add_complete_twice_overwrites() {
        let mut cache = AdvisoryCache::new();
        let x86_64 = Architecture::new("x86_64");
        cache.add_template(advisory("CESA-2024:0001"));

        cache
            .add_complete(x86_64.clone(), advisory("CESA-2024:0001"))
            .unwrap();

        let mut second = advisory("CESA-2024:0001");
        second
            .packages
            .push(PackageIdentity::new("foo", "1.0", "1", None, "x86_64"));
        cache.add_complete(x86_64.clone(), second).unwrap();

        let complete = cache.complete_for_architecture(&x86_64);
        assert_eq!(complete.len(), 1);
        assert_eq!(complete[0].packages.len(), 1);
        assert_eq!(cache.active_architectures(), &[x86_64]);
    }

    #[test]
    fn test_same_advisory_under_several_architectures() {
        let mut cache = AdvisoryCache::new();
        let x86_64 = Architecture::new("x86_64");
        let i386 = Architecture::new("i386");
        cache.add_template(advisory("CESA-2024:0001"));

        cache
            .add_complete(x86_64.clone(), advisory("CESA-2024:0001"))
            .unwrap();
        cache
            .add_complete(i386.clone(), advisory("CESA-2024:0001"))
            .unwrap();

        assert!(cache.has_complete(&x86_64, "CESA-2024:0001"));
        assert!(cache.has_complete(&i386, "CESA-2024:0001"));
        assert_eq!(cache.active_architectures(), &[x86_64, i386]);
        assert_eq!(cache.complete_count(), 2);
    }

    #[test]
    fn test_lookups_on_empty_cache() {
        let cache = AdvisoryCache::new();
        let arch = Architecture::new("ppc");
        assert!(!cache.has_template("CESA-2024:0001"));
        assert!(!cache.has_complete(&arch, "CESA-2024:0001"));
        assert!(cache.complete_for_architecture(&arch).is_empty());
        assert!(cache.template("CESA-2024:0001").is_none());
    }
}
