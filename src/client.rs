use crate::models::{ContributionRecord, SaveResponse};
use async_trait::async_trait;
use reqwest::Client;
use thiserror::Error;

pub const CONTRIBUTION_PATH: &str = "/api/contribution";

#[derive(Debug, Error)]
pub enum ClientError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("backend rejected request: {0}")]
    Rejected(String),
}

/// Backend that owns the contribution record.
#[async_trait]
pub trait ContributionApi: Send + Sync {
    async fn fetch(&self) -> Result<ContributionRecord, ClientError>;

    /// Persists `record` and returns what the backend actually stored.
    async fn save(&self, record: &ContributionRecord) -> Result<ContributionRecord, ClientError>;
}

#[derive(Debug, Clone)]
pub struct HttpContributionApi {
    client: Client,
    base_url: String,
}

impl HttpContributionApi {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_client(Client::new(), base_url)
    }

    pub fn with_client(client: Client, base_url: impl Into<String>) -> Self {
        Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    fn endpoint(&self) -> String {
        format!("{}{CONTRIBUTION_PATH}", self.base_url)
    }
}

#[async_trait]
impl ContributionApi for HttpContributionApi {
    async fn fetch(&self) -> Result<ContributionRecord, ClientError> {
        let record = self
            .client
            .get(self.endpoint())
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;
        Ok(record)
    }

    async fn save(&self, record: &ContributionRecord) -> Result<ContributionRecord, ClientError> {
        let response: SaveResponse = self
            .client
            .post(self.endpoint())
            .json(record)
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        match response.data {
            Some(data) if response.status == "success" => Ok(data),
            _ => Err(ClientError::Rejected(
                response
                    .message
                    .unwrap_or_else(|| format!("unexpected status '{}'", response.status)),
            )),
        }
    }
}
