use anyhow::Result;
use async_trait::async_trait;
use records::{payloads::YesResponse, remote::RecorderClient};

/// Network capability used by the page to record a YES.
#[async_trait]
pub trait ProposalApi: Send + Sync {
    async fn record_yes(&self, message: &str) -> Result<YesResponse>;
}

#[async_trait]
impl ProposalApi for RecorderClient {
    async fn record_yes(&self, message: &str) -> Result<YesResponse> {
        RecorderClient::record_yes(self, Some(message)).await
    }
}
