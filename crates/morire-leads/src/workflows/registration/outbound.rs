//! HTTP adapters for the hosted record store and email-delivery service.
//!
//! Neither client sets a request timeout: a submission waits for the remote
//! side to answer or drop the connection.

use async_trait::async_trait;
use serde::Serialize;
use tracing::debug;

use super::domain::{LeadNotification, RegistrationRecord};
use super::repository::{
    LeadNotifier, NotificationError, NotificationReceipt, RegistrationStore, StoreError,
};
use crate::config::{NotifierConfig, StoreConfig};

/// Supabase table accessed through its PostgREST endpoint.
pub struct SupabaseStore {
    http: reqwest::Client,
    endpoint: String,
    api_key: String,
}

impl SupabaseStore {
    pub fn new(config: &StoreConfig) -> Result<Self, StoreError> {
        let http = reqwest::Client::builder()
            .build()
            .map_err(|err| StoreError::Unavailable(err.to_string()))?;
        let endpoint = format!(
            "{}/rest/v1/{}",
            config.base_url.trim_end_matches('/'),
            config.table
        );

        Ok(Self {
            http,
            endpoint,
            api_key: config.api_key.clone(),
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[async_trait]
impl RegistrationStore for SupabaseStore {
    async fn insert(&self, record: &RegistrationRecord) -> Result<(), StoreError> {
        let response = self
            .http
            .post(&self.endpoint)
            .header("apikey", &self.api_key)
            .bearer_auth(&self.api_key)
            .header("Prefer", "return=minimal")
            .json(&[record])
            .send()
            .await
            .map_err(|err| StoreError::Unavailable(err.to_string()))?;

        let status = response.status();
        if status.is_success() {
            debug!(status = status.as_u16(), "record store accepted insert");
            return Ok(());
        }

        let body = response.text().await.unwrap_or_default();
        Err(StoreError::Rejected {
            status: status.as_u16(),
            body,
        })
    }
}

/// EmailJS REST send. The account must allow API calls from non-browser
/// applications, and `private_key` is required when strict mode is enabled.
pub struct EmailJsNotifier {
    http: reqwest::Client,
    api_url: String,
    service_id: String,
    template_id: String,
    public_key: String,
    private_key: Option<String>,
}

#[derive(Serialize)]
struct SendRequest<'a> {
    service_id: &'a str,
    template_id: &'a str,
    user_id: &'a str,
    template_params: &'a LeadNotification,
    #[serde(rename = "accessToken", skip_serializing_if = "Option::is_none")]
    access_token: Option<&'a str>,
}

impl EmailJsNotifier {
    pub fn new(config: &NotifierConfig) -> Result<Self, NotificationError> {
        let http = reqwest::Client::builder()
            .build()
            .map_err(|err| NotificationError::Transport(err.to_string()))?;

        Ok(Self {
            http,
            api_url: config.api_url.clone(),
            service_id: config.service_id.clone(),
            template_id: config.template_id.clone(),
            public_key: config.public_key.clone(),
            private_key: config.private_key.clone(),
        })
    }
}

#[async_trait]
impl LeadNotifier for EmailJsNotifier {
    async fn send(
        &self,
        notification: &LeadNotification,
    ) -> Result<NotificationReceipt, NotificationError> {
        let body = SendRequest {
            service_id: &self.service_id,
            template_id: &self.template_id,
            user_id: &self.public_key,
            template_params: notification,
            access_token: self.private_key.as_deref(),
        };

        let response = self
            .http
            .post(&self.api_url)
            .json(&body)
            .send()
            .await
            .map_err(|err| NotificationError::Transport(err.to_string()))?;

        let status = response.status().as_u16();
        let text = response
            .text()
            .await
            .map_err(|err| NotificationError::Transport(err.to_string()))?;

        if !(200..300).contains(&status) {
            return Err(NotificationError::Rejected { status, body: text });
        }

        Ok(NotificationReceipt { status, text })
    }
}
