use crate::application::dto::SourceFormat;
use crate::errata::parsers::{ArchiveFileParser, DigestParser, MailArchiveParser, MessageSource};
use crate::errata::services::MessageParser;
use crate::ports::outbound::ArchiveFetcher;
use crate::shared::error::ErrataError;
use std::path::PathBuf;
use std::sync::Arc;

/// Options for building a message source
#[derive(Debug, Clone)]
pub struct SourceOptions {
    pub format: SourceFormat,
    pub input: Option<PathBuf>,
    pub mail_archive_url: String,
    pub max_errata: usize,
}

/// Factory for creating the message source of a run
pub struct SourceFactory;

impl SourceFactory {
    /// Creates the message source for the configured format
    ///
    /// # Errors
    /// Returns `ErrataError::Configuration` if a file based format is
    /// selected without an input file
    pub fn create(
        options: SourceOptions,
        parser: MessageParser,
        fetcher: Arc<dyn ArchiveFetcher>,
    ) -> Result<MessageSource, ErrataError> {
        let input = match (options.format.requires_input_file(), options.input) {
            (true, None) => {
                return Err(ErrataError::configuration(
                    format!("The {} format requires an input file", options.format),
                    "Pass the announcement file as the INPUT argument",
                ))
            }
            (false, Some(path)) => {
                log::warn!(
                    "Input file {} is ignored for the {} format",
                    path.display(),
                    options.format
                );
                None
            }
            (_, input) => input,
        };

        Ok(match (options.format, input) {
            (SourceFormat::Digest, Some(path)) => MessageSource::Digest {
                path,
                parser: DigestParser::new(parser),
            },
            (SourceFormat::Archive, Some(path)) => MessageSource::ArchiveFile {
                path,
                parser: ArchiveFileParser::new(parser),
            },
            _ => MessageSource::MailArchive(MailArchiveParser::new(
                parser,
                fetcher,
                options.mail_archive_url,
                options.max_errata,
            )),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errata::parsers::{DEFAULT_MAIL_ARCHIVE_URL, DEFAULT_MAX_ERRATA};
    use async_trait::async_trait;

    struct NoFetch;

    #[async_trait]
    impl ArchiveFetcher for NoFetch {
        async fn fetch(&self, url: &str) -> crate::shared::Result<String> {
            anyhow::bail!("unexpected fetch of {}", url)
        }
    }

    fn options(format: SourceFormat, input: Option<&str>) -> SourceOptions {
        SourceOptions {
            format,
            input: input.map(PathBuf::from),
            mail_archive_url: DEFAULT_MAIL_ARCHIVE_URL.to_string(),
            max_errata: DEFAULT_MAX_ERRATA,
        }
    }

    fn create(options: SourceOptions) -> Result<MessageSource, ErrataError> {
        SourceFactory::create(options, MessageParser::new("9"), Arc::new(NoFetch))
    }

    #[test]
    fn test_create_digest_source() {
        let source = create(options(SourceFormat::Digest, Some("digest.txt"))).unwrap();
        assert!(matches!(source, MessageSource::Digest { .. }));
        assert_eq!(source.describe(), "digest digest.txt");
    }

    #[test]
    fn test_create_archive_source() {
        let source = create(options(SourceFormat::Archive, Some("2024-January.txt"))).unwrap();
        assert!(matches!(source, MessageSource::ArchiveFile { .. }));
    }

    #[test]
    fn test_file_formats_require_input() {
        let result = create(options(SourceFormat::Archive, None));
        assert!(matches!(result, Err(ErrataError::Configuration { .. })));
    }

    #[test]
    fn test_mail_archive_ignores_input() {
        let source = create(options(SourceFormat::MailArchive, Some("ignored.txt"))).unwrap();
        assert!(matches!(source, MessageSource::MailArchive(_)));
        assert!(source.describe().contains("mail-archive.com"));
    }
}
