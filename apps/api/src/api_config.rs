use std::env;
use std::net::{IpAddr, SocketAddr};
use std::str::FromStr;

use caseport_core::AppError;
use tracing_subscriber::EnvFilter;
use url::Url;

/// Runtime configuration for the API, loaded from the environment.
#[derive(Debug, Clone)]
pub struct ApiConfig {
    pub api_host: String,
    pub api_port: u16,
    pub frontend_url: String,
    pub case_store_url: String,
    pub idam_url: String,
    pub s2s_url: String,
    pub s2s_microservice: String,
    pub notify_url: String,
    pub notify_api_key: String,
    pub role_notification_template_id: String,
    pub document_generator_url: String,
    pub document_generator_access_key: String,
    pub case_type_id: String,
    pub jurisdiction: String,
    pub case_document_template: String,
}

impl ApiConfig {
    pub fn load() -> Result<Self, AppError> {
        let api_host = env::var("API_HOST").unwrap_or_else(|_| "127.0.0.1".to_owned());
        let api_port = env::var("API_PORT")
            .ok()
            .and_then(|value| value.parse::<u16>().ok())
            .unwrap_or(3001);

        let frontend_url =
            env::var("FRONTEND_URL").unwrap_or_else(|_| "http://localhost:3000".to_owned());
        Url::parse(&frontend_url)
            .map_err(|error| AppError::Validation(format!("invalid FRONTEND_URL: {error}")))?;

        Ok(Self {
            api_host,
            api_port,
            frontend_url,
            case_store_url: required_non_empty_env("CASE_STORE_URL")?,
            idam_url: required_non_empty_env("IDAM_API_URL")?,
            s2s_url: required_non_empty_env("S2S_URL")?,
            s2s_microservice: env::var("S2S_MICROSERVICE")
                .unwrap_or_else(|_| "caseport_api".to_owned()),
            notify_url: required_non_empty_env("NOTIFY_API_URL")?,
            notify_api_key: required_non_empty_env("NOTIFY_API_KEY")?,
            role_notification_template_id: required_non_empty_env(
                "ROLE_NOTIFICATION_TEMPLATE_ID",
            )?,
            document_generator_url: required_non_empty_env("DOC_GENERATOR_URL")?,
            document_generator_access_key: required_non_empty_env("DOC_GENERATOR_ACCESS_KEY")?,
            case_type_id: env::var("CASE_TYPE_ID").unwrap_or_else(|_| "CIVIL_CLAIM".to_owned()),
            jurisdiction: env::var("CASE_JURISDICTION").unwrap_or_else(|_| "CIVIL".to_owned()),
            case_document_template: env::var("CASE_DOCUMENT_TEMPLATE")
                .unwrap_or_else(|_| "claim-form".to_owned()),
        })
    }

    pub fn socket_address(&self) -> Result<SocketAddr, AppError> {
        let host = IpAddr::from_str(&self.api_host).map_err(|error| {
            AppError::Internal(format!("invalid API_HOST '{}': {error}", self.api_host))
        })?;
        Ok(SocketAddr::from((host, self.api_port)))
    }
}

pub fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .compact()
        .init();
}

fn required_env(name: &str) -> Result<String, AppError> {
    env::var(name).map_err(|_| AppError::Validation(format!("{name} is required")))
}

fn required_non_empty_env(name: &str) -> Result<String, AppError> {
    let value = required_env(name)?;
    if value.trim().is_empty() {
        return Err(AppError::Validation(format!("{name} must not be empty")));
    }

    Ok(value)
}
