#[cfg(test)]
#[path = "chatbot_test.rs"]
mod tests;

use std::time::Duration;

use anyhow::bail;
use anyhow::Result;
use async_trait::async_trait;
use reqwest::header::ACCEPT;
use reqwest::header::CONTENT_TYPE;

use crate::configuration::Config;
use crate::configuration::ConfigKey;
use crate::domain::models::Backend;
use crate::domain::models::HealthReport;
use crate::domain::models::RequestEnvelope;
use crate::domain::models::RequestError;
use crate::domain::models::RequestKind;
use crate::domain::models::RequestOutcome;
use crate::domain::models::ResponseEnvelope;

pub const CONNECT_TIMEOUT: Duration = Duration::from_secs(30);
pub const WRITE_TIMEOUT: Duration = Duration::from_secs(30);
pub const READ_TIMEOUT: Duration = Duration::from_secs(60);

/// Only transport failures are connectivity problems. A request that can't be
/// built, such as a server address missing its scheme, never left the client.
fn convert_err(err: reqwest::Error) -> RequestError {
    if err.is_builder() {
        return RequestError::Unexpected(err.to_string());
    }

    return RequestError::Connectivity(err.to_string());
}

pub fn endpoint(base_url: &str, path: &str) -> String {
    return format!("{}{path}", base_url.trim().trim_end_matches('/'));
}

pub struct ChatbotServer {
    client: reqwest::Client,
    timeout: String,
}

impl ChatbotServer {
    pub fn new(timeout: String) -> Result<ChatbotServer> {
        // reqwest has no separate write and read timeouts, so they share the
        // whole request budget.
        let client = reqwest::Client::builder()
            .connect_timeout(CONNECT_TIMEOUT)
            .timeout(WRITE_TIMEOUT + READ_TIMEOUT)
            .build()?;

        return Ok(ChatbotServer { client, timeout });
    }

    pub fn from_config() -> Result<ChatbotServer> {
        return ChatbotServer::new(Config::get(ConfigKey::HealthCheckTimeout));
    }
}

#[async_trait]
impl Backend for ChatbotServer {
    #[allow(clippy::implicit_return)]
    async fn health_check(&self, base_url: &str) -> Result<HealthReport> {
        if base_url.trim().is_empty() {
            bail!("Server URL is not defined");
        }

        let res = self
            .client
            .get(endpoint(base_url, "/health"))
            .header(ACCEPT, "application/json")
            .timeout(Duration::from_millis(self.timeout.parse::<u64>()?))
            .send()
            .await;

        let res = match res {
            Ok(res) => res,
            Err(err) => {
                tracing::error!(error = ?err, base_url, "Chatbot server is not reachable");
                bail!("Chatbot server is not reachable");
            }
        };

        if !res.status().is_success() {
            tracing::error!(
                status = res.status().as_u16(),
                "Chatbot server health check failed"
            );
            bail!("Chatbot server health check failed");
        }

        let report = res.json::<HealthReport>().await?;
        tracing::debug!(body = ?report, "Health check response");
        if report.model_loaded == Some(false) {
            tracing::warn!(base_url, "Chatbot server is running without a model");
        }

        return Ok(report);
    }

    #[allow(clippy::implicit_return)]
    async fn send(
        &self,
        base_url: &str,
        kind: RequestKind,
        envelope: &RequestEnvelope,
    ) -> RequestOutcome {
        let url = endpoint(base_url, kind.path());
        let body = serde_json::to_string(envelope)
            .map_err(|err| return RequestError::Unexpected(err.to_string()))?;

        tracing::debug!(url = %url, kind = %kind, "Sending request to chatbot server");

        let res = self
            .client
            .post(&url)
            .header(CONTENT_TYPE, "application/json; charset=utf-8")
            .header(ACCEPT, "application/json")
            .body(body)
            .send()
            .await
            .map_err(convert_err)?;

        let status = res.status();
        if !status.is_success() {
            let error_body = res.text().await.unwrap_or_default();
            let server_error = serde_json::from_str::<ResponseEnvelope>(&error_body)
                .ok()
                .and_then(|envelope| return envelope.error);

            tracing::error!(
                status = status.as_u16(),
                error = ?server_error,
                "Chatbot server returned an error"
            );
            return Err(RequestError::Server(status.as_u16()));
        }

        let text = res.text().await.map_err(convert_err)?;
        let envelope = serde_json::from_str::<ResponseEnvelope>(&text)
            .map_err(|err| return RequestError::Unexpected(err.to_string()))?;

        tracing::debug!(
            status = ?envelope.status,
            response_type = ?envelope.response_type,
            original_text = ?envelope.original_text,
            "Chatbot server response"
        );

        return Ok(envelope);
    }
}
