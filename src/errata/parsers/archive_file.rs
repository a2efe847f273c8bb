use crate::errata::domain::AdvisoryRecord;
use crate::errata::services::MessageParser;
use once_cell::sync::Lazy;
use regex::Regex;

// e.g. "From kbsingh at centos.org  Thu Jan  8 16:25:09 2009"
static MESSAGE_SEPARATOR: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"From .*[A-Za-z]{3} [A-Za-z]{3} [ 0-9]{2} \d{2}:\d{2}:\d{2} \d{4}\n").unwrap()
});

/// Parser for mbox style monthly archive files
#[derive(Debug, Clone)]
pub struct ArchiveFileParser {
    parser: MessageParser,
}

impl ArchiveFileParser {
    pub fn new(parser: MessageParser) -> Self {
        Self { parser }
    }

    /// Splits the archive on its `From ` separator lines and parses each
    /// message. Segments that are not announcements are skipped.
    pub fn parse(&self, source_name: &str, text: &str) -> Vec<AdvisoryRecord> {
        let text = text.replace("\r\n", "\n");
        let records = MESSAGE_SEPARATOR
            .split(&text)
            .filter_map(|message| self.parser.parse_message(message))
            .collect::<Vec<_>>();

        log::debug!("Parsed {} advisories from archive {}", records.len(), source_name);
        records
    }
}
