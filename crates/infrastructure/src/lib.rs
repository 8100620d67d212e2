//! HTTP adapters for the external case-management collaborators.

#![forbid(unsafe_code)]

mod http_case_store_client;
mod http_document_generator;
mod http_notification_client;
mod http_service_token_provider;
mod http_user_info_provider;

pub use http_case_store_client::HttpCaseStoreClient;
pub use http_document_generator::HttpDocumentGenerator;
pub use http_notification_client::HttpNotificationClient;
pub use http_service_token_provider::HttpServiceTokenProvider;
pub use http_user_info_provider::HttpUserInfoProvider;

use caseport_core::AppError;

/// Header carrying the service-to-service token on platform calls.
const SERVICE_AUTHORIZATION_HEADER: &str = "ServiceAuthorization";

fn transport_error(collaborator: &str, error: &reqwest::Error) -> AppError {
    AppError::Upstream(format!("{collaborator} transport error: {error}"))
}

async fn status_error(collaborator: &str, response: reqwest::Response) -> AppError {
    let status = response.status();
    let body = response
        .text()
        .await
        .unwrap_or_else(|_| "<response body unavailable>".to_owned());

    AppError::Upstream(format!("{collaborator} returned status {status}: {body}"))
}
