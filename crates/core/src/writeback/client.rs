use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;
use tracing::{info, warn};

use crate::errors::DashboardError;

use super::action::{WriteAction, WriteReceipt};

/// Trait abstraction over the POST to the remote write endpoint, so
/// tests can swap in a canned transport.
#[async_trait]
pub trait WriteTransport: Send + Sync {
    /// Submit one action and return the endpoint's receipt.
    async fn submit(
        &self,
        url: &str,
        action: &WriteAction,
    ) -> Result<WriteReceipt, DashboardError>;
}

/// Posts actions as JSON to the remote write endpoint.
pub struct HttpWriteTransport {
    client: Client,
}

impl HttpWriteTransport {
    pub fn new() -> Self {
        let builder = Client::builder().timeout(Duration::from_secs(30));
        Self {
            client: builder.build().unwrap_or_else(|_| Client::new()),
        }
    }
}

impl Default for HttpWriteTransport {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl WriteTransport for HttpWriteTransport {
    async fn submit(
        &self,
        url: &str,
        action: &WriteAction,
    ) -> Result<WriteReceipt, DashboardError> {
        let receipt: WriteReceipt = self
            .client
            .post(url)
            .json(action)
            .send()
            .await?
            .error_for_status()?
            .json()
            .await
            .map_err(|e| {
                DashboardError::Serialization(format!(
                    "write endpoint returned a malformed receipt: {e}"
                ))
            })?;
        Ok(receipt)
    }
}

/// Submits write actions and enforces the endpoint's verdict: a failure
/// receipt comes back as an error carrying the endpoint's message, so a
/// rejected write is never silently dropped.
pub struct WriteClient {
    transport: Box<dyn WriteTransport>,
    endpoint_url: String,
}

impl WriteClient {
    pub fn new(transport: Box<dyn WriteTransport>, endpoint_url: impl Into<String>) -> Self {
        Self {
            transport,
            endpoint_url: endpoint_url.into(),
        }
    }

    /// Submit one action.
    pub async fn submit(&self, action: WriteAction) -> Result<WriteReceipt, DashboardError> {
        let receipt = self.transport.submit(&self.endpoint_url, &action).await?;

        if receipt.is_success() {
            info!(action = action.label(), "write accepted");
            Ok(receipt)
        } else {
            warn!(action = action.label(), status = %receipt.status, "write rejected");
            Err(DashboardError::WriteRejected {
                action: action.label().into(),
                message: if receipt.message.is_empty() {
                    receipt.status.clone()
                } else {
                    receipt.message.clone()
                },
            })
        }
    }
}
