use super::{AdvisoryType, PackageIdentity};

/// Description used when no upstream description could be obtained
pub const DEFAULT_DESCRIPTION: &str = "Automatically imported CentOS erratum";

/// Solution used when no upstream solution could be obtained
pub const DEFAULT_SOLUTION: &str = "Install these packages to correct the erratum";

/// Publishable advisory for one architecture.
///
/// The architecture-independent template and the per-architecture complete
/// advisories share this type; a complete advisory is a template clone with
/// channels and resolved packages filled in.
#[derive(Debug, Clone, PartialEq)]
pub struct Advisory {
    pub name: String,
    pub release: u32,
    pub advisory_type: AdvisoryType,
    pub synopsis: Option<String>,
    pub product: Option<String>,
    pub topic: Option<String>,
    pub description: Option<String>,
    pub solution: Option<String>,
    pub references: String,
    pub notes: String,
    pub publish: bool,
    pub fast_track: bool,
    pub keywords: Vec<String>,
    pub bugs: Vec<String>,
    pub packages: Vec<PackageIdentity>,
    channels: Vec<String>,
}

impl Advisory {
    pub fn new(name: impl Into<String>, advisory_type: AdvisoryType) -> Self {
        Self {
            name: name.into(),
            release: 1,
            advisory_type,
            synopsis: None,
            product: None,
            topic: None,
            description: None,
            solution: None,
            references: String::new(),
            notes: String::new(),
            publish: false,
            fast_track: false,
            keywords: Vec::new(),
            bugs: Vec::new(),
            packages: Vec::new(),
            channels: Vec::new(),
        }
    }

    /// Adds a publish channel. Returns `false` if the label was already present.
    pub fn add_channel(&mut self, label: &str) -> bool {
        let label = label.trim();
        if label.is_empty() || self.channels.iter().any(|c| c == label) {
            return false;
        }
        self.channels.push(label.to_string());
        true
    }

    pub fn channels(&self) -> &[String] {
        &self.channels
    }

    /// Names of the required fields that are still unset
    pub fn missing_fields(&self) -> Vec<&'static str> {
        let mut missing = Vec::new();
        if self.name.is_empty() {
            missing.push("advisory_name");
        }
        if self.release == 0 {
            missing.push("advisory_release");
        }
        let optional = [
            ("synopsis", &self.synopsis),
            ("product", &self.product),
            ("topic", &self.topic),
            ("description", &self.description),
            ("solution", &self.solution),
        ];
        for (field, value) in optional {
            if value.is_none() {
                missing.push(field);
            }
        }
        missing
    }

    pub fn is_ready_to_publish(&self) -> bool {
        self.missing_fields().is_empty()
    }

    pub fn package_ids(&self) -> Vec<i64> {
        self.packages.iter().filter_map(|p| p.remote_id).collect()
    }
}
