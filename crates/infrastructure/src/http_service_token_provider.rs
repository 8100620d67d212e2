use async_trait::async_trait;
use serde_json::json;
use tracing::debug;

use caseport_application::ServiceTokenProvider;
use caseport_core::AppResult;

use crate::{status_error, transport_error};

const COLLABORATOR: &str = "service token issuer";

/// HTTP adapter leasing service-to-service tokens.
pub struct HttpServiceTokenProvider {
    http_client: reqwest::Client,
    base_url: String,
    microservice: String,
}

impl HttpServiceTokenProvider {
    /// Creates a token provider identifying this deployment by name.
    #[must_use]
    pub fn new(
        http_client: reqwest::Client,
        base_url: impl Into<String>,
        microservice: impl Into<String>,
    ) -> Self {
        Self {
            http_client,
            base_url: base_url.into().trim_end_matches('/').to_owned(),
            microservice: microservice.into(),
        }
    }
}

#[async_trait]
impl ServiceTokenProvider for HttpServiceTokenProvider {
    async fn lease(&self) -> AppResult<String> {
        let url = format!("{}/lease", self.base_url);
        let response = self
            .http_client
            .post(url)
            .json(&json!({ "microservice": self.microservice }))
            .send()
            .await
            .map_err(|error| transport_error(COLLABORATOR, &error))?;

        if !response.status().is_success() {
            return Err(status_error(COLLABORATOR, response).await);
        }

        let token = response
            .text()
            .await
            .map_err(|error| transport_error(COLLABORATOR, &error))?;
        debug!(microservice = %self.microservice, "service token leased");

        Ok(token)
    }
}
