use crate::errata::domain::AdvisoryRecord;
use crate::errata::services::{MailMessage, MessageParser};
use crate::shared::error::ErrataError;

/// Banner that separates the digest preamble from the first message
pub const DIGEST_BEGIN: &str =
    "----------------------------------------------------------------------\n\n";

/// Separator between two messages of a digest
pub const DIGEST_SEPARATOR: &str = "------------------------------\n\n";

/// Parser for a single mailing list digest message
#[derive(Debug, Clone)]
pub struct DigestParser {
    parser: MessageParser,
}

impl DigestParser {
    pub fn new(parser: MessageParser) -> Self {
        Self { parser }
    }

    /// Splits the digest into its messages and parses each of them.
    ///
    /// # Errors
    /// Returns `ErrataError::StructuralParse` for multipart digests and for
    /// input without the digest banner.
    pub fn parse(&self, source_name: &str, text: &str) -> Result<Vec<AdvisoryRecord>, ErrataError> {
        let digest = MailMessage::parse(text);

        if digest.is_multipart() {
            return Err(ErrataError::StructuralParse {
                source_name: source_name.to_string(),
                details: "Don't know how to handle multipart messages".to_string(),
            });
        }

        let Some((_, payload)) = digest.body().split_once(DIGEST_BEGIN) else {
            return Err(ErrataError::StructuralParse {
                source_name: source_name.to_string(),
                details: "The file does not appear to be a digest from the announcement list"
                    .to_string(),
            });
        };

        // Messages end at the next banner, if there is one
        let payload = payload.split(DIGEST_BEGIN).next().unwrap_or_default();

        let records = payload
            .split(DIGEST_SEPARATOR)
            .filter_map(|message| self.parser.parse_message(message))
            .collect::<Vec<_>>();

        log::debug!("Parsed {} advisories from digest {}", records.len(), source_name);
        Ok(records)
    }
}
