// ABOUTME: HTTP client for server provisioning and chat creation
// ABOUTME: Bearer-authenticated round trips; failures propagate to the caller

use reqwest::{Client, Response, StatusCode};
use serde::de::DeserializeOwned;
use tracing::debug;

use crate::api::{
    ChatAck, CreateChatRequest, CreateServerRequest, DeleteServerResponse, ListServersResponse,
    ServerDetails, ServerIdRequest, ServerSummary, ServerType,
};
use crate::error::{ProvisionerError, ProvisionerResult};

/// Configuration for [`ProvisionerClient`]
#[derive(Debug, Clone)]
pub struct ProvisionerConfig {
    /// Base path of the backend API, e.g. `https://host/api`
    pub base_url: String,
}

impl ProvisionerConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
        }
    }
}

/// Client for the server provisioning API
///
/// Each operation is a single request/response round trip. Non-2xx statuses
/// and undecodable bodies are errors; nothing is retried.
#[derive(Clone)]
pub struct ProvisionerClient {
    http: Client,
    base_url: String,
}

impl ProvisionerClient {
    pub fn new(config: ProvisionerConfig) -> Self {
        Self {
            http: Client::new(),
            base_url: config.base_url.trim_end_matches('/').to_string(),
        }
    }

    /// Provision a server bundling the given agents
    pub async fn create_server(
        &self,
        api_key: &str,
        server_type: ServerType,
        agent_ids: &[String],
    ) -> ProvisionerResult<ServerSummary> {
        let url = format!("{}/servers", self.base_url);
        debug!("Creating {:?} server with {} agents", server_type, agent_ids.len());

        let request = CreateServerRequest {
            server_type,
            agents: agent_ids.to_vec(),
        };

        let response = self
            .http
            .post(&url)
            .header("Authorization", bearer(api_key))
            .json(&request)
            .send()
            .await
            .map_err(|e| ProvisionerError::Network(e.to_string()))?;

        Self::decode(response).await
    }

    /// List the caller's active servers
    pub async fn list_servers(&self, api_key: &str) -> ProvisionerResult<ListServersResponse> {
        let url = format!("{}/servers", self.base_url);

        let response = self
            .http
            .get(&url)
            .header("Authorization", bearer(api_key))
            .send()
            .await
            .map_err(|e| ProvisionerError::Network(e.to_string()))?;

        Self::decode(response).await
    }

    /// Fetch deployment detail for one server
    pub async fn server_details(
        &self,
        api_key: &str,
        server_id: &str,
    ) -> ProvisionerResult<ServerDetails> {
        let url = format!("{}/servers/details", self.base_url);

        let response = self
            .http
            .post(&url)
            .header("Authorization", bearer(api_key))
            .json(&ServerIdRequest {
                server_id: server_id.to_string(),
            })
            .send()
            .await
            .map_err(|e| ProvisionerError::Network(e.to_string()))?;

        Self::decode(response).await
    }

    /// Delete a provisioned server
    pub async fn delete_server(
        &self,
        api_key: &str,
        server_id: &str,
    ) -> ProvisionerResult<DeleteServerResponse> {
        let url = format!("{}/servers/delete", self.base_url);
        debug!("Deleting server {}", server_id);

        let response = self
            .http
            .post(&url)
            .header("Authorization", bearer(api_key))
            .json(&ServerIdRequest {
                server_id: server_id.to_string(),
            })
            .send()
            .await
            .map_err(|e| ProvisionerError::Network(e.to_string()))?;

        Self::decode(response).await
    }

    /// Create a chat tied to an agent
    ///
    /// Chat routes sit on the unauthenticated surface; session handling is
    /// owned by the caller, so no bearer key is sent here.
    pub async fn create_chat(&self, request: &CreateChatRequest) -> ProvisionerResult<ChatAck> {
        let url = format!("{}/chat/create", self.base_url);

        let response = self
            .http
            .post(&url)
            .json(request)
            .send()
            .await
            .map_err(|e| ProvisionerError::Network(e.to_string()))?;

        Self::decode(response).await
    }

    async fn decode<T: DeserializeOwned>(response: Response) -> ProvisionerResult<T> {
        match response.status() {
            status if status.is_success() => response
                .json::<T>()
                .await
                .map_err(|e| ProvisionerError::InvalidResponse(e.to_string())),
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => Err(
                ProvisionerError::Authentication("Invalid or expired API key".to_string()),
            ),
            status => {
                let message = response
                    .text()
                    .await
                    .unwrap_or_else(|_| status.to_string());
                Err(ProvisionerError::Api {
                    status: status.as_u16(),
                    message,
                })
            }
        }
    }
}

fn bearer(api_key: &str) -> String {
    format!("Bearer {}", api_key)
}
