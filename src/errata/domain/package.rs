use once_cell::sync::Lazy;
use regex::Regex;

/// Suffix a filename must carry to be considered a package
pub const PACKAGE_SUFFIX: &str = ".rpm";

/// Suffix of source packages, which are never resolved or published
pub const SOURCE_PACKAGE_SUFFIX: &str = ".src.rpm";

/// Strips the trailing `-version-release.arch.rpm` part of a filename
static BARE_NAME: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(?P<name>.*?)-\d+\.([.\w-]+\.rpm)$").unwrap());

/// A package file referenced by an announcement: checksum plus filename.
///
/// The architecture is the header the reference was listed under and is
/// carried by the surrounding map.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PackageReference {
    checksum: String,
    filename: String,
}

impl PackageReference {
    pub fn new(checksum: impl Into<String>, filename: impl Into<String>) -> Self {
        Self {
            checksum: checksum.into(),
            filename: filename.into(),
        }
    }

    pub fn checksum(&self) -> &str {
        &self.checksum
    }

    pub fn filename(&self) -> &str {
        &self.filename
    }

    pub fn is_source_package(&self) -> bool {
        self.filename.ends_with(SOURCE_PACKAGE_SUFFIX)
    }

    /// True for binary package files, the only references that get resolved
    pub fn is_resolvable(&self) -> bool {
        self.filename.ends_with(PACKAGE_SUFFIX) && !self.is_source_package()
    }

    /// Derives the bare package name, e.g. `foo-devel` from
    /// `foo-devel-1.0-1.el9.x86_64.rpm`
    pub fn bare_name(&self) -> Option<&str> {
        BARE_NAME
            .captures(&self.filename)
            .and_then(|caps| caps.name("name"))
            .map(|m| m.as_str())
            .filter(|name| !name.is_empty())
    }
}

/// Canonical identity of a package as known to a resolution backend.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PackageIdentity {
    pub name: String,
    pub version: String,
    pub release: String,
    pub epoch: Option<String>,
    pub architecture: String,
    /// Identifier on the errata server, once known
    pub remote_id: Option<i64>,
    pub path: Option<String>,
    pub provider: Option<String>,
}

impl PackageIdentity {
    pub fn new(
        name: impl Into<String>,
        version: impl Into<String>,
        release: impl Into<String>,
        epoch: Option<String>,
        architecture: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            version: version.into(),
            release: release.into(),
            epoch: epoch.map(|e| e.trim().to_string()).filter(|e| !e.is_empty()),
            architecture: architecture.into(),
            remote_id: None,
            path: None,
            provider: None,
        }
    }

    pub fn with_remote_id(mut self, remote_id: i64) -> Self {
        self.remote_id = Some(remote_id);
        self
    }

    /// `name-version-release.arch`, with `epoch:` before the version when set
    pub fn nvra(&self) -> String {
        match &self.epoch {
            Some(epoch) => format!(
                "{}-{}:{}-{}.{}",
                self.name, epoch, self.version, self.release, self.architecture
            ),
            None => format!(
                "{}-{}-{}.{}",
                self.name, self.version, self.release, self.architecture
            ),
        }
    }

    /// All fields the server needs to identify the package are present
    pub fn is_complete(&self) -> bool {
        !self.name.is_empty()
            && !self.version.is_empty()
            && !self.release.is_empty()
            && !self.architecture.is_empty()
    }
}
