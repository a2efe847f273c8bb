/// Outcome counts of one import run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ImportSummary {
    /// Advisories created on the server
    pub published: usize,
    /// Advisories skipped because they already exist
    pub skipped_existing: usize,
    /// Advisories skipped because a package is unknown to the server
    pub skipped_missing_packages: usize,
    /// Advisories the server refused or that failed in transit
    pub failed: usize,
}

impl ImportSummary {
    pub fn total(&self) -> usize {
        self.published + self.skipped_existing + self.skipped_missing_packages + self.failed
    }
}

impl std::fmt::Display for ImportSummary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} published, {} already present, {} skipped for missing packages, {} failed",
            self.published, self.skipped_existing, self.skipped_missing_packages, self.failed
        )
    }
}
