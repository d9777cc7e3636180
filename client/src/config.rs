use anyhow::{Context, Result};
use reqwest::Url;
use std::env;

pub const DEFAULT_INDEX_URL: &str = "http://localhost:5001";
pub const INDEX_URL_VAR: &str = "RAG_INDEX_URL";

#[derive(Debug, Clone)]
pub struct ClientConfig {
    pub base_url: String,
}

impl ClientConfig {
    pub fn new(base_url: &str) -> Result<Self> {
        let trimmed = base_url.trim().trim_end_matches('/');
        let url = Url::parse(trimmed)
            .with_context(|| format!("invalid index service URL: {}", base_url))?;

        if !matches!(url.scheme(), "http" | "https") {
            return Err(anyhow::anyhow!(
                "index service URL must be http or https, got {}",
                url.scheme()
            ));
        }

        Ok(Self {
            base_url: trimmed.to_string(),
        })
    }

    /// Reads `RAG_INDEX_URL`, falling back to the local development server.
    pub fn from_env() -> Result<Self> {
        match env::var(INDEX_URL_VAR) {
            Ok(url) if !url.trim().is_empty() => Self::new(&url),
            _ => Self::new(DEFAULT_INDEX_URL),
        }
    }

    pub fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_INDEX_URL.to_string(),
        }
    }
}
