//! Announcement parsers, one per supported source format.

mod archive_file;
mod digest;
mod mail_archive;

pub use archive_file::ArchiveFileParser;
pub use digest::{DigestParser, DIGEST_BEGIN, DIGEST_SEPARATOR};
pub use mail_archive::{
    MailArchiveParser, DEFAULT_MAIL_ARCHIVE_URL, DEFAULT_MAX_ERRATA, INDEX_PAGE,
};

use crate::errata::domain::AdvisoryRecord;
use crate::shared::error::ErrataError;
use crate::shared::paths::check_input_file;
use std::path::{Path, PathBuf};

/// One input source together with the parser for its format
pub enum MessageSource {
    Digest { path: PathBuf, parser: DigestParser },
    ArchiveFile { path: PathBuf, parser: ArchiveFileParser },
    MailArchive(MailArchiveParser),
}

impl MessageSource {
    /// Human readable name of the source for diagnostics
    pub fn describe(&self) -> String {
        match self {
            MessageSource::Digest { path, .. } => format!("digest {}", path.display()),
            MessageSource::ArchiveFile { path, .. } => format!("archive {}", path.display()),
            MessageSource::MailArchive(parser) => format!("mail archive {}", parser.base_url()),
        }
    }

    /// Parses the whole source into advisory records, in source order.
    ///
    /// # Errors
    /// Returns an error if the input file cannot be read or the source is
    /// structurally invalid
    pub async fn parse(&self) -> Result<Vec<AdvisoryRecord>, ErrataError> {
        match self {
            MessageSource::Digest { path, parser } => {
                let text = read_input(path).await?;
                parser.parse(&path.display().to_string(), &text)
            }
            MessageSource::ArchiveFile { path, parser } => {
                let text = read_input(path).await?;
                Ok(parser.parse(&path.display().to_string(), &text))
            }
            MessageSource::MailArchive(parser) => parser.parse().await,
        }
    }
}

async fn read_input(path: &Path) -> Result<String, ErrataError> {
    check_input_file(path)?;
    let bytes = tokio::fs::read(path)
        .await
        .map_err(|e| ErrataError::InputFile {
            path: path.to_path_buf(),
            reason: format!("Failed to read file: {}", e),
        })?;
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errata::services::MessageParser;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[tokio::test]
    async fn test_digest_source_reads_file() {
        let mut file = NamedTempFile::new().unwrap();
        write!(
            file,
            "Subject: Digest\n\n{}Subject: [CentOS-announce] CEBA-2024:0002 CentOS 9 bar Update\n\nx86_64:\nabc  bar-1-1.x86_64.rpm\n",
            DIGEST_BEGIN
        )
        .unwrap();

        let source = MessageSource::Digest {
            path: file.path().to_path_buf(),
            parser: DigestParser::new(MessageParser::new("9")),
        };
        let records = source.parse().await.unwrap();

        assert_eq!(records.len(), 1);
        assert_eq!(records[0].advisory_name(), "CEBA-2024:0002");
    }

    #[tokio::test]
    async fn test_missing_input_file() {
        let source = MessageSource::ArchiveFile {
            path: PathBuf::from("/nonexistent/archive.txt"),
            parser: ArchiveFileParser::new(MessageParser::new("9")),
        };

        let result = source.parse().await;

        assert!(matches!(result, Err(ErrataError::InputFile { .. })));
        assert!(source.describe().starts_with("archive "));
    }
}
