use std::time::Duration;

use bytes::Bytes;
use futures::StreamExt;
use futures::stream::BoxStream;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::instrument;

use crate::domain::common::AgentConfig;
use crate::domain::common::entities::app_errors::CoreError;
use crate::domain::recipe::ports::{AgentHandle, RecipeAgentClient};

const REQUEST_TIMEOUT: Duration = Duration::from_secs(60);

#[derive(Debug, Clone)]
pub struct HttpAgentClient {
    endpoint: String,
    agent_id: String,
    api_key: String,
    client: Client,
}

#[derive(Debug, Deserialize)]
struct AgentStatusResponse {
    status: String,
}

#[derive(Debug, Deserialize)]
struct AliasListResponse {
    aliases: Vec<AliasEntry>,
}

#[derive(Debug, Deserialize)]
struct AliasEntry {
    alias_id: String,
    status: String,
}

#[derive(Debug, Serialize)]
struct InvokeRequest {
    session_id: String,
    input_text: String,
}

impl HttpAgentClient {
    pub fn new(config: AgentConfig) -> Self {
        Self {
            endpoint: config.endpoint.trim_end_matches('/').to_string(),
            agent_id: config.agent_id,
            api_key: config.api_key,
            client: Client::builder()
                .timeout(REQUEST_TIMEOUT)
                .build()
                .unwrap_or_default(),
        }
    }

    async fn fetch_json<T: for<'de> Deserialize<'de>>(&self, url: &str) -> Result<T, CoreError> {
        let response = self
            .client
            .get(url)
            .header("x-api-key", &self.api_key)
            .send()
            .await
            .map_err(|e| {
                tracing::error!("Agent API request failed: {}", e);
                CoreError::ExternalServiceError(format!("Agent API error: {}", e))
            })?;

        if !response.status().is_success() {
            let status = response.status();
            tracing::error!("Agent API error: {}", status);
            return Err(CoreError::ExternalServiceError(format!(
                "Agent API returned error: {}",
                status
            )));
        }

        response.json().await.map_err(|e| {
            tracing::error!("Failed to parse agent response: {}", e);
            CoreError::ExternalServiceError(format!("Failed to parse agent response: {}", e))
        })
    }
}

impl RecipeAgentClient for HttpAgentClient {
    #[instrument(skip(self))]
    async fn resolve_agent(&self) -> Result<AgentHandle, CoreError> {
        let status_url = format!("{}/agents/{}", self.endpoint, self.agent_id);
        let status: AgentStatusResponse = self.fetch_json(&status_url).await?;

        if !status.status.eq_ignore_ascii_case("ready") {
            return Err(CoreError::ExternalServiceError(format!(
                "Agent is not ready: {}",
                status.status
            )));
        }

        let alias_url = format!("{}/agents/{}/aliases", self.endpoint, self.agent_id);
        let aliases: AliasListResponse = self.fetch_json(&alias_url).await?;

        // Prefer a live alias; a draft one still works for invocation.
        let alias = aliases
            .aliases
            .iter()
            .find(|a| a.status.eq_ignore_ascii_case("live"))
            .or_else(|| aliases.aliases.first())
            .map(|a| a.alias_id.clone())
            .ok_or_else(|| {
                CoreError::ExternalServiceError("Agent has no invokable alias".to_string())
            })?;

        Ok(AgentHandle {
            agent_id: self.agent_id.clone(),
            alias,
        })
    }

    #[instrument(skip(self, input), fields(agent_id = %handle.agent_id, alias = %handle.alias))]
    async fn invoke(
        &self,
        handle: AgentHandle,
        session_id: String,
        input: String,
    ) -> Result<BoxStream<'static, Result<Bytes, CoreError>>, CoreError> {
        let url = format!(
            "{}/agents/{}/aliases/{}/invoke",
            self.endpoint, handle.agent_id, handle.alias
        );

        let response = self
            .client
            .post(&url)
            .header("x-api-key", &self.api_key)
            .json(&InvokeRequest {
                session_id,
                input_text: input,
            })
            .send()
            .await
            .map_err(|e| {
                tracing::error!("Agent invocation failed: {}", e);
                CoreError::ExternalServiceError(format!("Agent invocation failed: {}", e))
            })?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response.text().await.unwrap_or_default();
            tracing::error!("Agent invocation error: {} - {}", status, error_text);
            return Err(CoreError::ExternalServiceError(format!(
                "Agent invocation returned error: {} - {}",
                status, error_text
            )));
        }

        let stream = response
            .bytes_stream()
            .map(|chunk| {
                chunk.map_err(|e| {
                    CoreError::ExternalServiceError(format!("Agent stream error: {}", e))
                })
            })
            .boxed();

        Ok(stream)
    }
}
