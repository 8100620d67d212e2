use std::collections::BTreeMap;

use async_trait::async_trait;
use serde_json::json;
use tracing::info;
use uuid::Uuid;

use caseport_application::NotificationSender;
use caseport_core::AppResult;

use crate::{status_error, transport_error};

const COLLABORATOR: &str = "notification service";

/// HTTP adapter for the templated email notification service.
///
/// Sends are single-shot: a failed send is reported to the caller, which
/// decides whether it is fatal.
pub struct HttpNotificationClient {
    http_client: reqwest::Client,
    base_url: String,
    api_key: String,
}

impl HttpNotificationClient {
    /// Creates a new notification client.
    #[must_use]
    pub fn new(
        http_client: reqwest::Client,
        base_url: impl Into<String>,
        api_key: impl Into<String>,
    ) -> Self {
        Self {
            http_client,
            base_url: base_url.into().trim_end_matches('/').to_owned(),
            api_key: api_key.into(),
        }
    }
}

#[async_trait]
impl NotificationSender for HttpNotificationClient {
    async fn send_email(
        &self,
        template_id: &str,
        recipient: &str,
        personalisation: BTreeMap<String, String>,
    ) -> AppResult<()> {
        let url = format!("{}/v2/notifications/email", self.base_url);
        let reference = Uuid::new_v4().to_string();
        let response = self
            .http_client
            .post(url)
            .header("Authorization", format!("Bearer {}", self.api_key))
            .json(&json!({
                "template_id": template_id,
                "email_address": recipient,
                "personalisation": personalisation,
                "reference": reference,
            }))
            .send()
            .await
            .map_err(|error| transport_error(COLLABORATOR, &error))?;

        if !response.status().is_success() {
            return Err(status_error(COLLABORATOR, response).await);
        }

        info!(template_id, reference = %reference, "notification accepted");
        Ok(())
    }
}
