use async_trait::async_trait;
use errata_import::prelude::*;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

/// Mock ArchiveFetcher serving pages from memory
#[derive(Default, Clone)]
pub struct MockArchiveFetcher {
    pages: HashMap<String, String>,
    pub requested: Arc<Mutex<Vec<String>>>,
}

#[allow(dead_code)]
impl MockArchiveFetcher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_page(mut self, url: &str, body: impl Into<String>) -> Self {
        self.pages.insert(url.to_string(), body.into());
        self
    }

    pub fn requested(&self) -> Vec<String> {
        self.requested.lock().unwrap().clone()
    }
}

#[async_trait]
impl ArchiveFetcher for MockArchiveFetcher {
    async fn fetch(&self, url: &str) -> Result<String> {
        self.requested.lock().unwrap().push(url.to_string());
        self.pages
            .get(url)
            .cloned()
            .ok_or_else(|| anyhow::anyhow!("404 Not Found: {}", url))
    }
}
