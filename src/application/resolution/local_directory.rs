use crate::errata::domain::{Architecture, PackageIdentity, PackageReference};
use crate::ports::outbound::{PackageMetadataReader, ResolutionContext};
use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::Arc;

/// Package directories configured for one architecture
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ArchDirectories {
    pub package_dir: Option<PathBuf>,
    pub fasttrack_dir: Option<PathBuf>,
}

impl ArchDirectories {
    pub fn new(package_dir: Option<PathBuf>, fasttrack_dir: Option<PathBuf>) -> Self {
        Self {
            package_dir,
            fasttrack_dir,
        }
    }

    fn for_context(&self, context: &ResolutionContext) -> Option<&PathBuf> {
        if context.fast_track {
            self.fasttrack_dir.as_ref()
        } else {
            self.package_dir.as_ref()
        }
    }
}

/// Resolves packages by reading their headers from local package
/// directories, one per architecture (and one per fast-track architecture).
pub struct LocalDirectory {
    directories: HashMap<Architecture, ArchDirectories>,
    reader: Arc<dyn PackageMetadataReader>,
}

impl LocalDirectory {
    pub const NAME: &'static str = "dir";

    pub fn new(
        directories: HashMap<Architecture, ArchDirectories>,
        reader: Arc<dyn PackageMetadataReader>,
    ) -> Self {
        Self {
            directories,
            reader,
        }
    }

    pub fn resolve(
        &self,
        context: &ResolutionContext,
        architecture: &Architecture,
        reference: &PackageReference,
    ) -> Option<PackageIdentity> {
        let Some(dir) = self
            .directories
            .get(architecture)
            .and_then(|dirs| dirs.for_context(context))
        else {
            log::warn!(
                "No {}package directory configured for {} ({})",
                if context.fast_track { "fast-track " } else { "" },
                architecture,
                context.advisory_name
            );
            return None;
        };

        let path = dir.join(reference.filename());
        match self.reader.read_metadata(&path) {
            Ok(mut identity) => {
                identity.path = Some(path.display().to_string());
                identity.provider = Some(Self::NAME.to_string());
                Some(identity)
            }
            Err(e) => {
                log::warn!(
                    "Package {} does not exist or cannot be read: {}",
                    path.display(),
                    e
                );
                None
            }
        }
    }
}
