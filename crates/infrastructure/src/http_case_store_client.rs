use async_trait::async_trait;
use serde::Deserialize;
use serde_json::{Value, json};

use caseport_application::{CaseSearchIndex, CaseStoreClient};
use caseport_core::{AppError, AppResult, AuthTokens};
use caseport_domain::{CaseSummary, SearchQuery};

use crate::{SERVICE_AUTHORIZATION_HEADER, status_error, transport_error};

const COLLABORATOR: &str = "case store";

/// HTTP client for the external case data store and its search index.
pub struct HttpCaseStoreClient {
    http_client: reqwest::Client,
    base_url: String,
}

impl HttpCaseStoreClient {
    /// Creates a new case store client.
    #[must_use]
    pub fn new(http_client: reqwest::Client, base_url: impl Into<String>) -> Self {
        Self {
            http_client,
            base_url: trimmed(base_url.into()),
        }
    }

    fn authorised(&self, builder: reqwest::RequestBuilder, tokens: &AuthTokens) -> reqwest::RequestBuilder {
        builder
            .header("Authorization", format!("Bearer {}", tokens.bearer()))
            .header(SERVICE_AUTHORIZATION_HEADER, tokens.service())
    }

    async fn read_case_body(&self, response: reqwest::Response) -> AppResult<CaseSummary> {
        let body = response
            .json::<CaseDetailsBody>()
            .await
            .map_err(|error| transport_error(COLLABORATOR, &error))?;
        body.into_summary()
    }
}

#[async_trait]
impl CaseStoreClient for HttpCaseStoreClient {
    async fn get_case_by_id(
        &self,
        tokens: &AuthTokens,
        case_id: i64,
    ) -> AppResult<Option<CaseSummary>> {
        let url = format!("{}/cases/{case_id}", self.base_url);
        let response = self
            .authorised(self.http_client.get(url), tokens)
            .send()
            .await
            .map_err(|error| transport_error(COLLABORATOR, &error))?;

        if response.status() == reqwest::StatusCode::NOT_FOUND {
            return Ok(None);
        }
        if !response.status().is_success() {
            return Err(status_error(COLLABORATOR, response).await);
        }

        Ok(Some(self.read_case_body(response).await?))
    }

    async fn create_case(
        &self,
        tokens: &AuthTokens,
        case_type_id: &str,
        jurisdiction: &str,
        data: Value,
    ) -> AppResult<CaseSummary> {
        let url = format!("{}/case-types/{case_type_id}/cases", self.base_url);
        let response = self
            .authorised(self.http_client.post(url), tokens)
            .json(&json!({
                "jurisdiction": jurisdiction,
                "data": data,
            }))
            .send()
            .await
            .map_err(|error| transport_error(COLLABORATOR, &error))?;

        if !response.status().is_success() {
            return Err(status_error(COLLABORATOR, response).await);
        }

        self.read_case_body(response).await
    }

    async fn start_event_for_citizen(
        &self,
        tokens: &AuthTokens,
        case_id: i64,
        event_id: &str,
    ) -> AppResult<String> {
        let url = format!(
            "{}/cases/{case_id}/event-triggers/{event_id}/token",
            self.base_url
        );
        let response = self
            .authorised(self.http_client.get(url), tokens)
            .send()
            .await
            .map_err(|error| transport_error(COLLABORATOR, &error))?;

        if !response.status().is_success() {
            return Err(status_error(COLLABORATOR, response).await);
        }

        let body = response
            .json::<EventStartBody>()
            .await
            .map_err(|error| transport_error(COLLABORATOR, &error))?;

        Ok(body.token)
    }

    async fn submit_event_for_citizen(
        &self,
        tokens: &AuthTokens,
        case_id: i64,
        event_id: &str,
        event_token: &str,
        data: Value,
    ) -> AppResult<CaseSummary> {
        let url = format!("{}/cases/{case_id}/events", self.base_url);
        let response = self
            .authorised(self.http_client.post(url), tokens)
            .json(&json!({
                "event": { "id": event_id },
                "event_token": event_token,
                "data": data,
            }))
            .send()
            .await
            .map_err(|error| transport_error(COLLABORATOR, &error))?;

        if !response.status().is_success() {
            return Err(status_error(COLLABORATOR, response).await);
        }

        self.read_case_body(response).await
    }
}

#[async_trait]
impl CaseSearchIndex for HttpCaseStoreClient {
    async fn search(
        &self,
        tokens: &AuthTokens,
        case_type_id: &str,
        query: &SearchQuery,
    ) -> AppResult<Vec<CaseSummary>> {
        let url = format!("{}/searchCases?ctid={case_type_id}", self.base_url);
        let response = self
            .authorised(self.http_client.post(url), tokens)
            .json(&query.to_value())
            .send()
            .await
            .map_err(|error| transport_error(COLLABORATOR, &error))?;

        if !response.status().is_success() {
            return Err(status_error(COLLABORATOR, response).await);
        }

        let body = response
            .json::<SearchResponseBody>()
            .await
            .map_err(|error| transport_error(COLLABORATOR, &error))?;

        body.cases
            .into_iter()
            .map(CaseDetailsBody::into_summary)
            .collect()
    }
}

fn trimmed(base_url: String) -> String {
    base_url.trim_end_matches('/').to_owned()
}

/// Case document as the store serializes it.
#[derive(Debug, Deserialize)]
struct CaseDetailsBody {
    id: i64,
    jurisdiction: String,
    case_type_id: String,
    security_classification: String,
    reference: Option<String>,
    #[serde(default)]
    case_data: Value,
}

impl CaseDetailsBody {
    fn into_summary(self) -> AppResult<CaseSummary> {
        let classification = self
            .security_classification
            .parse()
            .map_err(|error: AppError| {
                AppError::Upstream(format!("case store returned malformed document: {error}"))
            })?;
        // Older documents omit the citizen reference; the store id doubles
        // as the reference for those.
        let reference = self.reference.unwrap_or_else(|| self.id.to_string());

        CaseSummary::new(
            self.id,
            reference,
            self.case_type_id,
            self.jurisdiction,
            classification,
            self.case_data,
        )
    }
}

#[derive(Debug, Deserialize)]
struct EventStartBody {
    token: String,
}

#[derive(Debug, Deserialize)]
struct SearchResponseBody {
    #[allow(dead_code)]
    total: u64,
    cases: Vec<CaseDetailsBody>,
}
