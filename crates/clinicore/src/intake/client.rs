use std::time::Duration;

use async_trait::async_trait;
use reqwest::StatusCode;
use thiserror::Error;
use url::Url;

use super::payload::{IntakeReply, OutboundPayload};

/// Errors talking to the intake endpoint.
///
/// None of these carry a message meant for the visitor.
#[derive(Debug, Error)]
pub enum IntakeError {
    /// Connection, TLS, timeout or body read failure
    #[error("intake request failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// Endpoint answered with a non-success status and no usable reply
    #[error("intake endpoint answered with status: {0}")]
    Status(StatusCode),

    /// Body is not `{success: bool, error?: string}`
    #[error("unexpected intake reply (status {status}): {source}")]
    UnexpectedShape {
        status: StatusCode,
        #[source]
        source: serde_json::Error,
    },
}

impl IntakeError {
    pub fn is_timeout(&self) -> bool {
        matches!(self, IntakeError::Transport(e) if e.is_timeout())
    }
}

/// The external intake endpoint.
#[async_trait]
pub trait IntakeGateway: Send + Sync {
    /// Delivers one payload. Exactly one attempt; the outcome is final.
    async fn submit(&self, endpoint: &Url, payload: &OutboundPayload) -> Result<IntakeReply, IntakeError>;
}

/// Intake over HTTP: one JSON POST per submission.
///
/// Redirects are followed the way browsers do, which is what script hosts
/// that answer POSTs with a redirect to the result page expect.
#[derive(Debug, Clone)]
pub struct ScriptIntake {
    client: reqwest::Client,
}

impl ScriptIntake {
    pub fn new(timeout: Duration) -> Result<Self, IntakeError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .user_agent(concat!("clinicore/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(Self { client })
    }

    pub fn with_client(client: reqwest::Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl IntakeGateway for ScriptIntake {
    async fn submit(&self, endpoint: &Url, payload: &OutboundPayload) -> Result<IntakeReply, IntakeError> {
        let response = self.client.post(endpoint.clone()).json(payload).send().await?;
        let status = response.status();
        let body = response.bytes().await?;

        tracing::debug!(status = status.as_u16(), bytes = body.len(), "intake endpoint answered");

        interpret_reply(status, &body)
    }
}

/// Validates the intake answer, failing closed.
///
/// A parsable reply is honoured even on an error status so the upstream
/// message can reach the visitor, but an error status never counts as
/// success.
pub fn interpret_reply(status: StatusCode, body: &[u8]) -> Result<IntakeReply, IntakeError> {
    match serde_json::from_slice::<IntakeReply>(body) {
        Ok(reply) if status.is_success() => Ok(reply),
        Ok(reply) if !reply.success => Ok(reply),
        Ok(_) => Err(IntakeError::Status(status)),
        Err(_) if !status.is_success() => Err(IntakeError::Status(status)),
        Err(source) => Err(IntakeError::UnexpectedShape { status, source }),
    }
}
