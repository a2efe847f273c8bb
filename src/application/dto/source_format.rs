/// Format of the announcement input
///
/// Selects which parser turns the input into advisory records.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SourceFormat {
    /// A single digest message from the announcement list (default)
    #[default]
    Digest,
    /// An mbox style monthly archive file
    Archive,
    /// The public web archive of the list
    MailArchive,
}

impl SourceFormat {
    /// Formats that read a local input file
    pub fn requires_input_file(self) -> bool {
        matches!(self, SourceFormat::Digest | SourceFormat::Archive)
    }
}

impl std::str::FromStr for SourceFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "digest" => Ok(SourceFormat::Digest),
            "archive" => Ok(SourceFormat::Archive),
            "mail-archive" | "mail-archive.com" => Ok(SourceFormat::MailArchive),
            _ => Err(format!(
                "Invalid format: {}. Please specify 'digest', 'archive' or 'mail-archive'",
                s
            )),
        }
    }
}

impl std::fmt::Display for SourceFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SourceFormat::Digest => write!(f, "digest"),
            SourceFormat::Archive => write!(f, "archive"),
            SourceFormat::MailArchive => write!(f, "mail-archive"),
        }
    }
}
