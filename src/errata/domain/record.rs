use super::{Architecture, PackageReference};
use std::collections::BTreeMap;

/// Marker in the synopsis of announcements for the fast-track channel set
const FAST_TRACK_MARKER: &str = "FASTTRACK";

/// Base URL of the upstream advisory pages used as the advisory topic
const UPSTREAM_ERRATA_URL: &str = "https://rhn.redhat.com/errata";

/// Kind of advisory, as understood by the errata server
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AdvisoryType {
    Security,
    BugFix,
    Enhancement,
}

impl AdvisoryType {
    pub const SECURITY_TAG: &'static str = "CESA";
    pub const BUG_FIX_TAG: &'static str = "CEBA";
    pub const ENHANCEMENT_TAG: &'static str = "CEEA";

    /// Maps a four letter subject tag to its type; `None` for unknown tags
    pub fn from_tag(tag: &str) -> Option<Self> {
        match tag {
            Self::SECURITY_TAG => Some(AdvisoryType::Security),
            Self::BUG_FIX_TAG => Some(AdvisoryType::BugFix),
            Self::ENHANCEMENT_TAG => Some(AdvisoryType::Enhancement),
            _ => None,
        }
    }

    pub fn tag(&self) -> &'static str {
        match self {
            AdvisoryType::Security => Self::SECURITY_TAG,
            AdvisoryType::BugFix => Self::BUG_FIX_TAG,
            AdvisoryType::Enhancement => Self::ENHANCEMENT_TAG,
        }
    }

    /// Label used by the errata server's `advisory_type` field
    pub fn server_label(&self) -> &'static str {
        match self {
            AdvisoryType::Security => "Security Advisory",
            AdvisoryType::BugFix => "Bug Fix Advisory",
            AdvisoryType::Enhancement => "Product Enhancement Advisory",
        }
    }

    pub fn from_server_label(label: &str) -> Option<Self> {
        [
            AdvisoryType::Security,
            AdvisoryType::BugFix,
            AdvisoryType::Enhancement,
        ]
        .into_iter()
        .find(|t| t.server_label() == label)
    }
}

impl std::fmt::Display for AdvisoryType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.server_label())
    }
}

/// Packages of an announcement, bucketed by architecture header
pub type PackagesByArch = BTreeMap<Architecture, Vec<PackageReference>>;

/// Raw advisory data extracted from one announcement, before any package
/// resolution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AdvisoryRecord {
    pub advisory_type: AdvisoryType,
    pub id: String,
    pub year: String,
    pub target_version: String,
    pub severity: Option<String>,
    pub synopsis: String,
    pub date: Option<String>,
    pub subject: String,
    pub packages: PackagesByArch,
}

impl AdvisoryRecord {
    /// Advisory name as used by the errata server, e.g. `CESA-2024:0001`
    pub fn advisory_name(&self) -> String {
        format!("{}-{}:{}", self.advisory_type.tag(), self.year, self.id)
    }

    /// Public URL of the upstream advisory this announcement rebuilds
    pub fn canonical_url(&self) -> String {
        let tag = self.advisory_type.tag().replacen("CE", "RH", 1);
        format!("{}/{}-{}-{}.html", UPSTREAM_ERRATA_URL, tag, self.year, self.id)
    }

    pub fn is_fast_track(&self) -> bool {
        self.synopsis.contains(FAST_TRACK_MARKER)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(advisory_type: AdvisoryType, synopsis: &str) -> AdvisoryRecord {
        AdvisoryRecord {
            advisory_type,
            id: "0001".to_string(),
            year: "2024".to_string(),
            target_version: "9".to_string(),
            severity: None,
            synopsis: synopsis.to_string(),
            date: None,
            subject: String::new(),
            packages: PackagesByArch::new(),
        }
    }

    #[test]
    fn test_advisory_type_from_tag() {
        assert_eq!(AdvisoryType::from_tag("CESA"), Some(AdvisoryType::Security));
        assert_eq!(AdvisoryType::from_tag("CEBA"), Some(AdvisoryType::BugFix));
        assert_eq!(AdvisoryType::from_tag("CEEA"), Some(AdvisoryType::Enhancement));
        assert_eq!(AdvisoryType::from_tag("XXXX"), None);
    }

    #[test]
    fn test_server_labels() {
        assert_eq!(AdvisoryType::Security.server_label(), "Security Advisory");
        assert_eq!(AdvisoryType::BugFix.server_label(), "Bug Fix Advisory");
        assert_eq!(
            AdvisoryType::Enhancement.server_label(),
            "Product Enhancement Advisory"
        );
        assert_eq!(
            AdvisoryType::from_server_label("Bug Fix Advisory"),
            Some(AdvisoryType::BugFix)
        );
        assert_eq!(AdvisoryType::from_server_label("Errata"), None);
    }

    #[test]
    fn test_advisory_name() {
        let record = record(AdvisoryType::Security, "foo security update");
        assert_eq!(record.advisory_name(), "CESA-2024:0001");
    }

    #[test]
    fn test_canonical_url_uses_upstream_prefix() {
        let record = record(AdvisoryType::Security, "foo security update");
        assert_eq!(
            record.canonical_url(),
            "https://rhn.redhat.com/errata/RHSA-2024-0001.html"
        );

        let record = self::record(AdvisoryType::BugFix, "foo bugfix update");
        assert_eq!(
            record.canonical_url(),
            "https://rhn.redhat.com/errata/RHBA-2024-0001.html"
        );
    }

    #[test]
    fn test_fast_track_detection() {
        assert!(record(AdvisoryType::BugFix, "FASTTRACK foo update").is_fast_track());
        assert!(!record(AdvisoryType::BugFix, "foo update").is_fast_track());
    }
}
