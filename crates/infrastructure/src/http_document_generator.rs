use async_trait::async_trait;
use serde_json::Value;

use caseport_application::DocumentGenerator;
use caseport_core::{AppError, AppResult};

use crate::{status_error, transport_error};

const COLLABORATOR: &str = "document generator";

/// HTTP adapter for the document rendering service.
pub struct HttpDocumentGenerator {
    http_client: reqwest::Client,
    base_url: String,
    access_key: String,
}

impl HttpDocumentGenerator {
    /// Creates a new document generator client.
    #[must_use]
    pub fn new(
        http_client: reqwest::Client,
        base_url: impl Into<String>,
        access_key: impl Into<String>,
    ) -> Self {
        Self {
            http_client,
            base_url: base_url.into().trim_end_matches('/').to_owned(),
            access_key: access_key.into(),
        }
    }
}

#[async_trait]
impl DocumentGenerator for HttpDocumentGenerator {
    async fn generate(&self, payload: Value, output_format: &str) -> AppResult<Vec<u8>> {
        let mut body = payload.as_object().cloned().ok_or_else(|| {
            AppError::Validation("document payload must be a JSON object".to_owned())
        })?;
        body.insert(
            "accessKey".to_owned(),
            Value::String(self.access_key.clone()),
        );
        body.insert(
            "outputFormat".to_owned(),
            Value::String(output_format.to_owned()),
        );

        let url = format!("{}/rs/render", self.base_url);
        let response = self
            .http_client
            .post(url)
            .json(&Value::Object(body))
            .send()
            .await
            .map_err(|error| transport_error(COLLABORATOR, &error))?;

        if !response.status().is_success() {
            return Err(status_error(COLLABORATOR, response).await);
        }

        let bytes = response
            .bytes()
            .await
            .map_err(|error| transport_error(COLLABORATOR, &error))?;

        Ok(bytes.to_vec())
    }
}
