use crate::ports::outbound::{AdvisoryText, ArchiveFetcher, DescriptionRepository};
use crate::shared::Result;
use async_trait::async_trait;
use once_cell::sync::Lazy;
use regex::Regex;
use std::sync::Arc;

static DETAILS: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r#"<h2>Details</h2>\s+<div class="page-summary">(?P<details>[\s\S]+)</div>\s+<br />\s+<h2>Solution</h2>"#,
    )
    .unwrap()
});
static SOLUTION: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r#"<h2>Solution</h2>\s+<div class="page-summary">(?P<solution>[\s\S]+)</div>\s+<br />\s+<h2>Updated packages</h2>"#,
    )
    .unwrap()
});
static PARAGRAPH: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)</?p(\s[^>]*)?>").unwrap());
static TAG: Lazy<Regex> = Lazy::new(|| Regex::new(r"<[^>]*>").unwrap());

const UPSTREAM_PRODUCT: &str = "Red Hat Enterprise Linux";
const PRODUCT: &str = "CentOS";

/// RhnDescriptionClient adapter scraping description and solution text from
/// upstream advisory pages
///
/// This adapter implements the DescriptionRepository port on top of any
/// ArchiveFetcher.
pub struct RhnDescriptionClient {
    fetcher: Arc<dyn ArchiveFetcher>,
}

impl RhnDescriptionClient {
    pub fn new(fetcher: Arc<dyn ArchiveFetcher>) -> Self {
        Self { fetcher }
    }

    /// Extracts the advisory sections from a downloaded page
    pub fn extract(page: &str) -> AdvisoryText {
        AdvisoryText {
            description: DETAILS
                .captures(page)
                .map(|caps| html_to_text(&caps["details"])),
            solution: SOLUTION
                .captures(page)
                .map(|caps| html_to_text(&caps["solution"])),
        }
    }
}

#[async_trait]
impl DescriptionRepository for RhnDescriptionClient {
    async fn fetch_description(&self, url: &str) -> Result<AdvisoryText> {
        let page = self.fetcher.fetch(url).await?;
        Ok(Self::extract(&page))
    }
}

/// Converts an HTML fragment to plain text, renaming the upstream product
fn html_to_text(fragment: &str) -> String {
    let text = fragment.replace("<br />", "\n");
    let text = PARAGRAPH.replace_all(&text, "\n");
    let text = TAG.replace_all(&text, "");
    html_escape::decode_html_entities(&text).replace(UPSTREAM_PRODUCT, PRODUCT)
}
