//! Caseport API composition root.

#![forbid(unsafe_code)]

mod api_config;
mod dto;
mod error;
mod handlers;
mod middleware;
mod state;

use std::sync::Arc;

use axum::Router;
use axum::http::header::{AUTHORIZATION, CONTENT_TYPE};
use axum::http::{HeaderValue, Method};
use axum::middleware::from_fn_with_state;
use axum::routing::{get, post};
use caseport_application::{
    CaseLookupService, CaseRoleService, CaseSearchIndex, CaseStoreClient, CaseSubmissionService,
    DocumentGenerator, NotificationSender, ServiceTokenProvider, UserInfoProvider,
};
use caseport_core::AppError;
use caseport_infrastructure::{
    HttpCaseStoreClient, HttpDocumentGenerator, HttpNotificationClient, HttpServiceTokenProvider,
    HttpUserInfoProvider,
};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::info;

use crate::api_config::ApiConfig;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<(), AppError> {
    dotenvy::dotenv().ok();
    api_config::init_tracing();

    let config = ApiConfig::load()?;
    let http_client = reqwest::Client::new();

    let case_store_adapter = Arc::new(HttpCaseStoreClient::new(
        http_client.clone(),
        config.case_store_url.clone(),
    ));
    let search_index: Arc<dyn CaseSearchIndex> = case_store_adapter.clone();
    let case_store: Arc<dyn CaseStoreClient> = case_store_adapter;

    let user_info_provider: Arc<dyn UserInfoProvider> = Arc::new(HttpUserInfoProvider::new(
        http_client.clone(),
        config.idam_url.clone(),
    ));
    let service_token_provider: Arc<dyn ServiceTokenProvider> =
        Arc::new(HttpServiceTokenProvider::new(
            http_client.clone(),
            config.s2s_url.clone(),
            config.s2s_microservice.clone(),
        ));
    let notification_sender: Arc<dyn NotificationSender> = Arc::new(HttpNotificationClient::new(
        http_client.clone(),
        config.notify_url.clone(),
        config.notify_api_key.clone(),
    ));
    let document_generator: Arc<dyn DocumentGenerator> = Arc::new(HttpDocumentGenerator::new(
        http_client,
        config.document_generator_url.clone(),
        config.document_generator_access_key.clone(),
    ));

    let case_lookup_service =
        CaseLookupService::new(search_index, config.case_type_id.clone());
    let case_role_service = CaseRoleService::new(
        case_lookup_service.clone(),
        case_store.clone(),
        notification_sender,
        config.role_notification_template_id.clone(),
    );
    let case_submission_service = CaseSubmissionService::new(
        case_store,
        document_generator,
        config.case_type_id.clone(),
        config.jurisdiction.clone(),
        config.case_document_template.clone(),
    );

    let app_state = AppState {
        case_role_service,
        case_lookup_service,
        case_submission_service,
        user_info_provider,
        service_token_provider,
        frontend_url: config.frontend_url.clone(),
    };

    let protected_routes = Router::new()
        .route(
            "/api/case-role/modify",
            post(handlers::roles::modify_role_handler),
        )
        .route("/api/cases", post(handlers::cases::submit_case_handler))
        .route(
            "/api/cases/reference/{reference}",
            get(handlers::cases::find_by_reference_handler),
        )
        .route(
            "/api/cases/external/{reference}",
            get(handlers::cases::find_by_external_reference_handler),
        )
        .route(
            "/api/cases/{case_id}/document",
            get(handlers::cases::case_document_handler),
        )
        .route_layer(from_fn_with_state(
            app_state.clone(),
            middleware::require_auth,
        ));

    let cors_layer = CorsLayer::new()
        .allow_origin(
            HeaderValue::from_str(&config.frontend_url)
                .map_err(|error| AppError::Internal(format!("invalid FRONTEND_URL: {error}")))?,
        )
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([CONTENT_TYPE, AUTHORIZATION]);

    let app = Router::new()
        .route("/health", get(handlers::health::health_handler))
        .merge(protected_routes)
        .layer(TraceLayer::new_for_http())
        .layer(cors_layer)
        .with_state(app_state);

    let address = config.socket_address()?;
    let listener = tokio::net::TcpListener::bind(address)
        .await
        .map_err(|error| AppError::Internal(format!("failed to bind listener: {error}")))?;

    info!(%address, "caseport-api listening");

    axum::serve(listener, app)
        .await
        .map_err(|error| AppError::Internal(format!("api server error: {error}")))
}
