use crate::models::{
    CreateInsuredRequest, InsuredResponse, MessageResponse, PagedResponse, SearchResponse,
    UpdateInsuredRequest,
};
use serde::Deserialize;
use std::fmt;
use std::time::Duration;

/// Error envelope the API returns for every failure
/// (`{success: false, message, errors?}`).
#[derive(Debug, Clone, Deserialize)]
struct ApiErrorBody {
    #[allow(dead_code)]
    success: bool,
    message: String,
    #[serde(default)]
    errors: Option<Vec<String>>,
}

/// Failures the typed client can report, mirroring the server taxonomy.
#[derive(Debug)]
pub enum ClientError {
    /// Transport-level failure (connection, timeout, decode).
    Transport(String),
    /// The server answered with an error envelope.
    Api {
        status: u16,
        message: String,
        /// Per-field messages, present only for validation failures.
        errors: Vec<String>,
    },
}

impl fmt::Display for ClientError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ClientError::Transport(msg) => write!(f, "Transport error: {}", msg),
            ClientError::Api {
                status, message, ..
            } => write!(f, "API error ({}): {}", status, message),
        }
    }
}

impl std::error::Error for ClientError {}

impl From<reqwest::Error> for ClientError {
    fn from(err: reqwest::Error) -> Self {
        ClientError::Transport(err.to_string())
    }
}

/// Typed client mirroring the insureds REST surface; the Rust counterpart
/// of the browser-side data service.
#[derive(Clone)]
pub struct InsuredsClient {
    client: reqwest::Client,
    base_url: String,
}

impl InsuredsClient {
    /// Creates a client for `base_url` (e.g. "http://localhost:3000").
    pub fn new(base_url: impl Into<String>) -> Result<Self, ClientError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(30))
            .build()
            .map_err(|e| ClientError::Transport(format!("Failed to create client: {}", e)))?;

        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    /// GET /api/insureds?pageNumber=&pageSize=
    pub async fn list(
        &self,
        page_number: i64,
        page_size: i64,
    ) -> Result<PagedResponse<InsuredResponse>, ClientError> {
        let url = format!("{}/api/insureds", self.base_url);
        let response = self
            .client
            .get(&url)
            .query(&[
                ("pageNumber", page_number.to_string()),
                ("pageSize", page_size.to_string()),
            ])
            .send()
            .await?;

        Self::decode(response).await
    }

    /// GET /api/insureds/:id
    pub async fn get_by_id(&self, id: i64) -> Result<InsuredResponse, ClientError> {
        let url = format!("{}/api/insureds/{}", self.base_url, id);
        let response = self.client.get(&url).send().await?;

        Self::decode(response).await
    }

    /// GET /api/insureds/search/:fragment
    pub async fn search(
        &self,
        fragment: &str,
    ) -> Result<SearchResponse<InsuredResponse>, ClientError> {
        let url = format!("{}/api/insureds/search/{}", self.base_url, fragment);
        let response = self.client.get(&url).send().await?;

        Self::decode(response).await
    }

    /// POST /api/insureds
    pub async fn create(
        &self,
        request: &CreateInsuredRequest,
    ) -> Result<InsuredResponse, ClientError> {
        let url = format!("{}/api/insureds", self.base_url);
        let response = self.client.post(&url).json(request).send().await?;

        Self::decode(response).await
    }

    /// PUT /api/insureds/:id
    pub async fn update(
        &self,
        id: i64,
        request: &UpdateInsuredRequest,
    ) -> Result<InsuredResponse, ClientError> {
        let url = format!("{}/api/insureds/{}", self.base_url, id);
        let response = self.client.put(&url).json(request).send().await?;

        Self::decode(response).await
    }

    /// DELETE /api/insureds/:id
    pub async fn delete(&self, id: i64) -> Result<MessageResponse, ClientError> {
        let url = format!("{}/api/insureds/{}", self.base_url, id);
        let response = self.client.delete(&url).send().await?;

        Self::decode(response).await
    }

    /// Decodes a success body, or turns a non-2xx response into a
    /// `ClientError::Api` by reading the server's error envelope.
    async fn decode<T: serde::de::DeserializeOwned>(
        response: reqwest::Response,
    ) -> Result<T, ClientError> {
        let status = response.status();
        if status.is_success() {
            return response
                .json::<T>()
                .await
                .map_err(|e| ClientError::Transport(format!("Failed to parse response: {}", e)));
        }

        let message = match response.json::<ApiErrorBody>().await {
            Ok(body) => {
                return Err(ClientError::Api {
                    status: status.as_u16(),
                    message: body.message,
                    errors: body.errors.unwrap_or_default(),
                });
            }
            Err(_) => "Unknown error".to_string(),
        };

        Err(ClientError::Api {
            status: status.as_u16(),
            message,
            errors: Vec::new(),
        })
    }
}
