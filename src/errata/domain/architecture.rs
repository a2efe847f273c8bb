use crate::shared::error::ErrataError;

/// CPU architectures that may carry a channel or package directory in the
/// configuration.
pub const KNOWN_ARCHITECTURES: &[&str] = &[
    "i386", "i686", "x86_64", "ia64", "ppc", "ppc64", "ppc64le", "aarch64", "alpha", "sparc",
    "s390", "s390x",
];

/// Architecture label as it appears in an announcement or the configuration.
///
/// Announcement bodies may contain headers that are not CPU architectures
/// (`Source:` for instance). Those still become an `Architecture` so the
/// package list scanner stays format-agnostic; [`Architecture::is_known`]
/// tells them apart.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Architecture(String);

impl Architecture {
    pub fn new(label: impl Into<String>) -> Self {
        Self(label.into())
    }

    /// Parses a label that must be one of [`KNOWN_ARCHITECTURES`]
    pub fn known(label: &str) -> Result<Self, ErrataError> {
        let arch = Self::new(label.trim());
        if !arch.is_known() {
            return Err(ErrataError::Validation {
                message: format!(
                    "Unknown architecture '{}'. Valid architectures are: {}",
                    label,
                    KNOWN_ARCHITECTURES.join(", ")
                ),
            });
        }
        Ok(arch)
    }

    pub fn is_known(&self) -> bool {
        KNOWN_ARCHITECTURES.contains(&self.0.as_str())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for Architecture {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
