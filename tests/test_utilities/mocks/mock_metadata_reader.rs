use errata_import::prelude::*;
use std::collections::HashMap;
use std::path::{Path, PathBuf};

/// Mock PackageMetadataReader returning identities for known paths
#[derive(Default, Clone)]
pub struct MockMetadataReader {
    packages: HashMap<PathBuf, PackageIdentity>,
}

#[allow(dead_code)]
impl MockMetadataReader {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_package(mut self, path: impl Into<PathBuf>, package: PackageIdentity) -> Self {
        self.packages.insert(path.into(), package);
        self
    }
}

impl PackageMetadataReader for MockMetadataReader {
    fn read_metadata(&self, path: &Path) -> Result<PackageIdentity> {
        self.packages
            .get(path)
            .cloned()
            .ok_or_else(|| anyhow::anyhow!("{}: No such file or directory", path.display()))
    }
}
