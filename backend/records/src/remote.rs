use anyhow::Error;
use reqwest::Client;

use crate::payloads::{HealthPayload, ResponsesPayload, YesRequest, YesResponse};

/// HTTP client for a running recorder.
#[derive(Clone, Debug)]
pub struct RecorderClient {
    http: Client,
    base_url: String,
}

impl RecorderClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            http: Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub async fn record_yes(&self, message: Option<&str>) -> Result<YesResponse, Error> {
        let payload = YesRequest {
            message: message.map(str::to_string),
        };

        let response = self
            .http
            .post(format!("{}/yes", self.base_url))
            .json(&payload)
            .send()
            .await?
            .error_for_status()?;

        Ok(response.json().await?)
    }

    pub async fn responses(&self) -> Result<ResponsesPayload, Error> {
        self.get_json("/responses").await
    }

    pub async fn health(&self) -> Result<HealthPayload, Error> {
        self.get_json("/health").await
    }

    async fn get_json<T: serde::de::DeserializeOwned>(&self, path: &str) -> Result<T, Error> {
        let response = self
            .http
            .get(format!("{}{path}", self.base_url))
            .send()
            .await?
            .error_for_status()?;

        Ok(response.json().await?)
    }
}
