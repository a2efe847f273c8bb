use super::MailMessage;
use crate::errata::domain::{
    AdvisoryRecord, AdvisoryType, Architecture, PackageReference, PackagesByArch,
};
use once_cell::sync::Lazy;
use regex::Regex;

/// Mailing list tag prefixed to announcement subjects
pub const DEFAULT_LIST_TAG: &str = "CentOS-announce";

static ADVISORY_SUBJECT: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"^\[(?P<list>[^\]]+)\] (?P<tag>\w{4})-(?P<year>\d{4})[:-](?P<id>\d{4,})\s+(?P<info>.*)$",
    )
    .unwrap()
});
static SECURITY_INFO: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(?P<severity>\w+) CentOS\s+(?P<version>\d+)\s+(?P<synopsis>.*)$").unwrap()
});
static UPDATE_INFO: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^CentOS\s+(?P<version>\d+)\s+(?P<synopsis>.*)$").unwrap());
static ARCH_HEADER: Lazy<Regex> = Lazy::new(|| Regex::new(r"^(?P<arch>\w+):\s*$").unwrap());
static PACKAGE_LINE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(?P<checksum>\S+)\s+(?P<filename>[.\w-]+\.rpm)").unwrap()
});

/// Extraction steps shared by every announcement format: subject analysis,
/// package list scanning and whole-message parsing.
#[derive(Debug, Clone)]
pub struct MessageParser {
    target_version: String,
    list_tag: String,
}

impl MessageParser {
    pub fn new(target_version: impl Into<String>) -> Self {
        Self::with_list_tag(target_version, DEFAULT_LIST_TAG)
    }

    pub fn with_list_tag(target_version: impl Into<String>, list_tag: impl Into<String>) -> Self {
        Self {
            target_version: target_version.into(),
            list_tag: list_tag.into(),
        }
    }

    /// Builds a record from an announcement subject.
    ///
    /// Returns `None` for subjects that are not advisories, do not match the
    /// per-type info pattern, or target another distribution version.
    pub fn parse_subject(&self, subject: &str) -> Option<AdvisoryRecord> {
        let subject = subject.split_whitespace().collect::<Vec<_>>().join(" ");

        let Some(caps) = ADVISORY_SUBJECT
            .captures(&subject)
            .filter(|caps| caps["list"] == self.list_tag)
        else {
            log::info!("Message with subject '{}' doesn't appear to be an errata", subject);
            return None;
        };

        let tag = &caps["tag"];
        let advisory_type = AdvisoryType::from_tag(tag).unwrap_or_else(|| {
            log::warn!(
                "Unknown errata type {} in '{}', assuming {}",
                tag,
                subject,
                AdvisoryType::BugFix.tag()
            );
            AdvisoryType::BugFix
        });

        let info_re = match advisory_type {
            AdvisoryType::Security => &*SECURITY_INFO,
            AdvisoryType::BugFix | AdvisoryType::Enhancement => &*UPDATE_INFO,
        };

        let Some(info) = info_re.captures(&caps["info"]) else {
            log::warn!("Errata '{}' doesn't match any of the known types", subject);
            return None;
        };

        let target_version = info["version"].to_string();
        if target_version != self.target_version {
            log::info!(
                "Message '{}' is inapplicable to the targeted release {}",
                subject,
                self.target_version
            );
            return None;
        }

        Some(AdvisoryRecord {
            advisory_type,
            id: caps["id"].to_string(),
            year: caps["year"].to_string(),
            target_version,
            severity: info.name("severity").map(|m| m.as_str().to_string()),
            synopsis: info["synopsis"].replace('\t', " "),
            date: None,
            subject: subject.clone(),
            packages: PackagesByArch::new(),
        })
    }

    /// Scans a message body for architecture headers and checksum/filename
    /// lines.
    ///
    /// A header opens (or reopens, clearing) the bucket for its architecture;
    /// package lines go to the open bucket and are dropped while none is open.
    pub fn parse_package_list(&self, body: &str) -> PackagesByArch {
        let mut packages = PackagesByArch::new();
        let mut current: Option<Architecture> = None;

        for line in body.lines() {
            if let Some(caps) = ARCH_HEADER.captures(line) {
                let arch = Architecture::new(&caps["arch"]);
                packages.insert(arch.clone(), Vec::new());
                current = Some(arch);
            } else if let (Some(arch), Some(caps)) = (&current, PACKAGE_LINE.captures(line)) {
                if let Some(bucket) = packages.get_mut(arch) {
                    bucket.push(PackageReference::new(&caps["checksum"], &caps["filename"]));
                }
            }
        }

        packages
    }

    /// Parses one complete mail message into a record
    pub fn parse_message(&self, text: &str) -> Option<AdvisoryRecord> {
        let message = MailMessage::parse(text);
        let subject = message.subject()?;

        let mut record = self.parse_subject(subject)?;
        record.date = message.date().map(str::to_string);
        record.packages = self.parse_package_list(message.body());
        Some(record)
    }
}
