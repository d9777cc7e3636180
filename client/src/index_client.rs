use crate::config::ClientConfig;
use crate::models::*;
use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::multipart::{Form, Part};
use reqwest::{Client, Response};

/// The two calls the shell makes against the index service.
#[async_trait]
pub trait IndexApi: Send + Sync {
    async fn submit_query(&self, text: &str) -> Result<QueryAnswer>;

    async fn upload_document(&self, file: &SelectedFile) -> Result<serde_json::Value>;
}

pub struct IndexClient {
    client: Client,
    config: ClientConfig,
}

impl IndexClient {
    pub fn new(config: ClientConfig) -> Self {
        Self {
            client: Client::new(),
            config,
        }
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Hits the service root, which answers with a plain greeting.
    pub async fn ping(&self) -> Result<String> {
        let response = self.client.get(self.config.endpoint("/")).send().await?;
        let response = check_status(response, "ping").await?;
        Ok(response.text().await?)
    }
}

#[async_trait]
impl IndexApi for IndexClient {
    async fn submit_query(&self, text: &str) -> Result<QueryAnswer> {
        log::debug!("Querying index: {}", text);

        let response = self
            .client
            .get(self.config.endpoint("/query"))
            .query(&[("text", text)])
            .send()
            .await?;

        let response = check_status(response, "query").await?;
        let answer: QueryAnswer = response
            .json()
            .await
            .context("query response did not contain an answer")?;

        Ok(answer)
    }

    async fn upload_document(&self, file: &SelectedFile) -> Result<serde_json::Value> {
        let data = tokio::fs::read(file.path())
            .await
            .with_context(|| format!("failed to read {}", file.path().display()))?;

        log::info!("Uploading {} ({} bytes)", file.name, data.len());

        let form = Form::new().part("file", Part::bytes(data).file_name(file.name.clone()));

        let response = self
            .client
            .post(self.config.endpoint("/uploadFile"))
            .multipart(form)
            .send()
            .await?;

        // The ack is passed through as-is; only a body that isn't JSON fails.
        let status = response.status();
        let ack: serde_json::Value = response
            .json()
            .await
            .context("upload response was not JSON")?;

        if !status.is_success() {
            log::warn!(
                "Index service answered upload of {} with {}: {}",
                file.name,
                status,
                ack.get("error").and_then(|e| e.as_str()).unwrap_or("no error detail")
            );
        }

        Ok(ack)
    }
}

async fn check_status(response: Response, action: &str) -> Result<Response> {
    if response.status().is_success() {
        return Ok(response);
    }

    let status = response.status();
    let body = response.text().await.unwrap_or_default();
    let detail = serde_json::from_str::<ErrorResponse>(&body)
        .map(|e| e.error)
        .unwrap_or(body);

    Err(anyhow::anyhow!("Index service {} error ({}): {}", action, status, detail))
}
