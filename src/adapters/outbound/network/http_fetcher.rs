use crate::ports::outbound::ArchiveFetcher;
use crate::shared::Result;
use anyhow::Context;
use async_trait::async_trait;
use std::time::Duration;

const FILE_SCHEME: &str = "file://";

/// HttpArchiveFetcher adapter for downloading archive pages
///
/// `file://` URLs are read from the local file system, which lets a
/// mirrored copy of the archive stand in for the live site.
pub struct HttpArchiveFetcher {
    client: reqwest::Client,
    max_retries: u32,
}

impl HttpArchiveFetcher {
    pub fn new() -> Result<Self> {
        let version = env!("CARGO_PKG_VERSION");
        let user_agent = format!("errata-import/{}", version);
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(30))
            .user_agent(user_agent)
            .build()?;

        Ok(Self {
            client,
            max_retries: 3,
        })
    }

    async fn fetch_with_retry(&self, url: &str) -> Result<String> {
        let mut last_error = None;

        for attempt in 1..=self.max_retries {
            match self.fetch_once(url).await {
                Ok(page) => return Ok(page),
                Err(e) => {
                    log::debug!("Attempt {} to fetch {} failed: {}", attempt, url, e);
                    last_error = Some(e);
                    if attempt < self.max_retries {
                        tokio::time::sleep(Duration::from_millis(100 * attempt as u64)).await;
                    }
                }
            }
        }

        Err(last_error.unwrap_or_else(|| anyhow::anyhow!("No attempt made to fetch {}", url)))
    }

    async fn fetch_once(&self, url: &str) -> Result<String> {
        let response = self.client.get(url).send().await?;

        if !response.status().is_success() {
            anyhow::bail!("HTTP {} for {}", response.status(), url);
        }

        Ok(response.text().await?)
    }
}

#[async_trait]
impl ArchiveFetcher for HttpArchiveFetcher {
    async fn fetch(&self, url: &str) -> Result<String> {
        if let Some(path) = url.strip_prefix(FILE_SCHEME) {
            let bytes = tokio::fs::read(path)
                .await
                .with_context(|| format!("Failed to read {}", path))?;
            return Ok(String::from_utf8_lossy(&bytes).into_owned());
        }

        self.fetch_with_retry(url).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_fetch_file_url() {
        let dir = TempDir::new().unwrap();
        let page = dir.path().join("maillist.html");
        fs::write(&page, "<html>index</html>").unwrap();

        let fetcher = HttpArchiveFetcher::new().unwrap();
        let text = fetcher
            .fetch(&format!("file://{}", page.display()))
            .await
            .unwrap();

        assert_eq!(text, "<html>index</html>");
    }

    #[tokio::test]
    async fn test_fetch_missing_file_url() {
        let fetcher = HttpArchiveFetcher::new().unwrap();

        let result = fetcher.fetch("file:///nonexistent/maillist.html").await;

        assert!(result.is_err());
        assert!(result
            .unwrap_err()
            .to_string()
            .contains("/nonexistent/maillist.html"));
    }
}
