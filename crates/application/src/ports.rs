use std::collections::BTreeMap;

use async_trait::async_trait;

use caseport_core::{AppResult, AuthTokens, UserInfo};
use caseport_domain::{CaseSummary, SearchQuery};
use serde_json::Value;

/// Client port for the external case store.
///
/// Every call carries the end-user bearer token and the service token; the
/// store enforces its own access control and optimistic concurrency.
#[async_trait]
pub trait CaseStoreClient: Send + Sync {
    /// Fetches one case by its store id.
    async fn get_case_by_id(
        &self,
        tokens: &AuthTokens,
        case_id: i64,
    ) -> AppResult<Option<CaseSummary>>;

    /// Creates a new case from citizen-submitted data.
    async fn create_case(
        &self,
        tokens: &AuthTokens,
        case_type_id: &str,
        jurisdiction: &str,
        data: Value,
    ) -> AppResult<CaseSummary>;

    /// Starts a citizen event on a case and returns the store's event token.
    async fn start_event_for_citizen(
        &self,
        tokens: &AuthTokens,
        case_id: i64,
        event_id: &str,
    ) -> AppResult<String>;

    /// Submits a citizen event carrying the event token and updated data.
    async fn submit_event_for_citizen(
        &self,
        tokens: &AuthTokens,
        case_id: i64,
        event_id: &str,
        event_token: &str,
        data: Value,
    ) -> AppResult<CaseSummary>;
}

/// Port executing structured queries against the case index.
#[async_trait]
pub trait CaseSearchIndex: Send + Sync {
    /// Runs a query for one case type and returns the matching cases.
    async fn search(
        &self,
        tokens: &AuthTokens,
        case_type_id: &str,
        query: &SearchQuery,
    ) -> AppResult<Vec<CaseSummary>>;
}

/// Port resolving a bearer token to the user it identifies.
#[async_trait]
pub trait UserInfoProvider: Send + Sync {
    /// Resolves the bearer token; an invalid token is `AppError::Unauthorized`.
    async fn user_info(&self, bearer_token: &str) -> AppResult<UserInfo>;
}

/// Port sending templated email notifications.
#[async_trait]
pub trait NotificationSender: Send + Sync {
    /// Sends one templated email. Failures are surfaced, never retried here.
    async fn send_email(
        &self,
        template_id: &str,
        recipient: &str,
        personalisation: BTreeMap<String, String>,
    ) -> AppResult<()>;
}

/// Port rendering binary documents from structured payloads.
#[async_trait]
pub trait DocumentGenerator: Send + Sync {
    /// Renders the payload into a document of the requested output format.
    async fn generate(&self, payload: Value, output_format: &str) -> AppResult<Vec<u8>>;
}

/// Port leasing the service-to-service token for outbound calls.
#[async_trait]
pub trait ServiceTokenProvider: Send + Sync {
    /// Leases a token identifying this microservice to the platform.
    async fn lease(&self) -> AppResult<String>;
}
