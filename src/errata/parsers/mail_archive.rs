use crate::errata::domain::AdvisoryRecord;
use crate::errata::services::MessageParser;
use crate::ports::outbound::ArchiveFetcher;
use crate::shared::error::ErrataError;
use once_cell::sync::Lazy;
use regex::Regex;
use std::sync::Arc;

/// Public web archive of the announcement list
pub const DEFAULT_MAIL_ARCHIVE_URL: &str =
    "http://www.mail-archive.com/centos-announce@centos.org/";

/// Index page listing the archived messages
pub const INDEX_PAGE: &str = "maillist.html";

/// Default cap on the number of records taken from the archive
pub const DEFAULT_MAX_ERRATA: usize = 10000;

static SUBJECT: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r#"^<span class="subject"><a name="(?P<msgid>\d+)" href="(?P<relurl>[\w.]+)">(?P<subject>\[[^\]]*\]\s+[^<]+)</a></span>"#,
    )
    .unwrap()
});
static DATE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"<span class="date">(?P<datestr>[^<]*)</span>"#).unwrap());
static BODY_START: Lazy<Regex> = Lazy::new(|| Regex::new(r"^<pre>").unwrap());
static BODY_END: Lazy<Regex> = Lazy::new(|| Regex::new(r"^</pre>").unwrap());
static CHECKSUM: Lazy<Regex> = Lazy::new(|| Regex::new(r"^(?P<checksum>\S{64,})").unwrap());
static RPM_FILE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(?P<filename>[.\w-]+\.rpm)").unwrap());
static MARKUP: Lazy<Regex> = Lazy::new(|| Regex::new(r"<[^>]*>").unwrap());

/// Parser for the web archive of the announcement list.
///
/// Reads the index page, keeps the entries whose subject is a relevant
/// advisory and downloads each of those messages.
pub struct MailArchiveParser {
    parser: MessageParser,
    fetcher: Arc<dyn ArchiveFetcher>,
    base_url: String,
    max_errata: usize,
}

impl MailArchiveParser {
    pub fn new(
        parser: MessageParser,
        fetcher: Arc<dyn ArchiveFetcher>,
        base_url: impl Into<String>,
        max_errata: usize,
    ) -> Self {
        let mut base_url = base_url.into();
        if !base_url.ends_with('/') {
            base_url.push('/');
        }
        Self {
            parser,
            fetcher,
            base_url,
            max_errata,
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// # Errors
    /// Returns `ErrataError::StructuralParse` if the index page cannot be
    /// fetched. Failures on individual messages are logged and skipped.
    pub async fn parse(&self) -> Result<Vec<AdvisoryRecord>, ErrataError> {
        let index_url = format!("{}{}", self.base_url, INDEX_PAGE);
        let index = self
            .fetcher
            .fetch(&index_url)
            .await
            .map_err(|e| ErrataError::StructuralParse {
                source_name: index_url.clone(),
                details: format!("Failed to open URL: {}", e),
            })?;

        let mut records = Vec::new();

        for line in index.lines() {
            if records.len() >= self.max_errata {
                log::warn!(
                    "Max errata count {} exceeded. Processing no more errata",
                    self.max_errata
                );
                break;
            }

            let Some(caps) = SUBJECT.captures(line) else {
                continue;
            };

            let subject = MARKUP.replace_all(&caps["subject"], "");
            let Some(mut record) = self.parser.parse_subject(&subject) else {
                log::debug!("Skipping archive entry {} ({})", &caps["msgid"], subject);
                continue;
            };

            let message_url = format!("{}{}", self.base_url, &caps["relurl"]);
            log::info!("Downloading errata data from {}", message_url);

            match self.fetcher.fetch(&message_url).await {
                Ok(page) => {
                    record.date = DATE.captures(&page).map(|c| c["datestr"].to_string());
                    record.packages = self.parser.parse_package_list(&message_body(&page));
                    records.push(record);
                }
                Err(e) => {
                    log::warn!(
                        "Failed to process message {} at {}: {}",
                        record.advisory_name(),
                        message_url,
                        e
                    );
                }
            }
        }

        Ok(records)
    }
}

/// Rebuilds a package list from the `<pre>` block of an archived message,
/// where checksum and filename sit on separate lines.
fn message_body(page: &str) -> String {
    let mut body = String::new();
    let mut accumulate = false;
    let mut checksum: Option<&str> = None;
    let mut filename: Option<&str> = None;

    for line in page.lines() {
        if BODY_START.is_match(line) {
            accumulate = true;
        }
        if BODY_END.is_match(line) {
            accumulate = false;
        }
        if !accumulate {
            continue;
        }

        let checksum_match = CHECKSUM.captures(line).and_then(|c| c.name("checksum"));
        let filename_match = RPM_FILE.captures(line).and_then(|c| c.name("filename"));

        if let Some(m) = checksum_match {
            checksum = Some(m.as_str());
        }
        if let Some(m) = filename_match {
            filename = Some(m.as_str());
        }

        match (checksum, filename) {
            (Some(sum), Some(file)) => {
                body.push_str(sum);
                body.push(' ');
                body.push_str(file);
                body.push('\n');
                checksum = None;
                filename = None;
            }
            _ if checksum_match.is_none() && filename_match.is_none() => {
                body.push_str(line);
                body.push('\n');
            }
            _ => {}
        }
    }

    body
}
