use std::sync::Arc;

use anyhow::Result;
use async_trait::async_trait;

use super::HealthReport;
use super::RequestEnvelope;
use super::RequestError;
use super::RequestKind;
use super::ResponseEnvelope;

pub type RequestOutcome = std::result::Result<ResponseEnvelope, RequestError>;

#[async_trait]
pub trait Backend {
    /// Used at startup to verify the server at `base_url` is reachable and has
    /// its model loaded.
    async fn health_check(&self, base_url: &str) -> Result<HealthReport>;

    /// Posts the envelope to the endpoint for `kind`. Transport failures are
    /// reported as `RequestError::Connectivity`; callers that cancelled the
    /// request are expected to reclassify them.
    async fn send(
        &self,
        base_url: &str,
        kind: RequestKind,
        envelope: &RequestEnvelope,
    ) -> RequestOutcome;
}

pub type SharedBackend = Arc<dyn Backend + Send + Sync>;
