//! Collector notification.
//!
//! After an unpack transfer settles, the collector service is told which
//! wallet handed in a token. The ledger state is authoritative; this call is
//! best effort and never undoes a confirmed transfer.

use async_trait::async_trait;
#[cfg(test)]
use mockall::automock;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use thiserror::Error;
use tracing::debug;

use crate::constants::COLLECTOR_REQUEST_TIMEOUT_SECONDS;

#[derive(Error, Debug, Serialize, Clone, PartialEq)]
pub enum NotificationError {
    #[error("Notification endpoint is not configured")]
    NotConfigured,

    #[error("Failed to build HTTP client: {0}")]
    ClientError(String),

    #[error("Failed to send notification: {0}")]
    SendError(String),

    #[error("Collector rejected notification (HTTP {status_code}): {error}")]
    RequestError { error: String, status_code: u16 },
}

/// Body posted to the collector.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CollectorPayload {
    pub address: String,
}

#[async_trait]
#[cfg_attr(test, automock)]
pub trait CollectorNotifier: Send + Sync {
    /// Reports `address` to the collector.
    async fn notify(&self, address: &str) -> Result<(), NotificationError>;
}

/// Posts `{ "address": ... }` as JSON to a fixed collector URL.
#[derive(Debug, Clone)]
pub struct HttpCollectorNotifier {
    client: Client,
    url: Option<String>,
}

impl HttpCollectorNotifier {
    /// Creates a notifier. Without a URL every notification fails with
    /// `NotificationError::NotConfigured`.
    pub fn new(url: Option<String>) -> Result<Self, NotificationError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(COLLECTOR_REQUEST_TIMEOUT_SECONDS))
            .build()
            .map_err(|e| NotificationError::ClientError(e.to_string()))?;

        Ok(Self { client, url })
    }
}

#[async_trait]
impl CollectorNotifier for HttpCollectorNotifier {
    async fn notify(&self, address: &str) -> Result<(), NotificationError> {
        let url = self.url.as_deref().ok_or(NotificationError::NotConfigured)?;

        let payload = CollectorPayload {
            address: address.to_string(),
        };

        let response = self
            .client
            .post(url)
            .json(&payload)
            .send()
            .await
            .map_err(|e| NotificationError::SendError(e.to_string()))?;

        if !response.status().is_success() {
            let status_code = response.status().as_u16();
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(NotificationError::RequestError {
                error: error_text,
                status_code,
            });
        }

        debug!(url = %url, address = %address, "collector notified");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::matchers::{body_json, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[tokio::test]
    async fn test_notify_posts_address() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/unpack"))
            .and(body_json(json!({
                "address": "B4myR9PeyU6p1pgppEQPkHEfaMjw6MuKFFwQueXy59M"
            })))
            .respond_with(ResponseTemplate::new(200))
            .expect(1)
            .mount(&mock_server)
            .await;

        let notifier =
            HttpCollectorNotifier::new(Some(format!("{}/unpack", mock_server.uri()))).unwrap();
        let result = notifier
            .notify("B4myR9PeyU6p1pgppEQPkHEfaMjw6MuKFFwQueXy59M")
            .await;

        assert!(result.is_ok());
    }

    #[tokio::test]
    async fn test_notify_reports_http_errors() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/unpack"))
            .respond_with(ResponseTemplate::new(503).set_body_string("maintenance"))
            .mount(&mock_server)
            .await;

        let notifier =
            HttpCollectorNotifier::new(Some(format!("{}/unpack", mock_server.uri()))).unwrap();
        let result = notifier.notify("address").await;

        assert_eq!(
            result,
            Err(NotificationError::RequestError {
                error: "maintenance".to_string(),
                status_code: 503,
            })
        );
    }

    #[tokio::test]
    async fn test_notify_without_url() {
        let notifier = HttpCollectorNotifier::new(None).unwrap();
        assert_eq!(
            notifier.notify("address").await,
            Err(NotificationError::NotConfigured)
        );
    }

    #[tokio::test]
    async fn test_notify_unreachable_endpoint() {
        let notifier =
            HttpCollectorNotifier::new(Some("http://127.0.0.1:1/unpack".to_string())).unwrap();
        assert!(matches!(
            notifier.notify("address").await,
            Err(NotificationError::SendError(_))
        ));
    }
}
