use async_trait::async_trait;
use serde::Deserialize;

use caseport_application::UserInfoProvider;
use caseport_core::{AppError, AppResult, UserInfo};

use crate::{status_error, transport_error};

const COLLABORATOR: &str = "identity provider";

/// HTTP adapter resolving bearer tokens against the identity provider.
pub struct HttpUserInfoProvider {
    http_client: reqwest::Client,
    base_url: String,
}

impl HttpUserInfoProvider {
    /// Creates a new user-info provider.
    #[must_use]
    pub fn new(http_client: reqwest::Client, base_url: impl Into<String>) -> Self {
        Self {
            http_client,
            base_url: base_url.into().trim_end_matches('/').to_owned(),
        }
    }
}

#[async_trait]
impl UserInfoProvider for HttpUserInfoProvider {
    async fn user_info(&self, bearer_token: &str) -> AppResult<UserInfo> {
        let url = format!("{}/o/userinfo", self.base_url);
        let response = self
            .http_client
            .get(url)
            .header("Authorization", format!("Bearer {bearer_token}"))
            .send()
            .await
            .map_err(|error| transport_error(COLLABORATOR, &error))?;

        let status = response.status();
        if status == reqwest::StatusCode::UNAUTHORIZED || status == reqwest::StatusCode::FORBIDDEN {
            return Err(AppError::Unauthorized(
                "bearer token rejected by identity provider".to_owned(),
            ));
        }
        if !status.is_success() {
            return Err(status_error(COLLABORATOR, response).await);
        }

        let body = response
            .json::<UserInfoBody>()
            .await
            .map_err(|error| transport_error(COLLABORATOR, &error))?;

        Ok(body.into_user_info())
    }
}

/// Claims as the identity provider serializes them.
#[derive(Debug, Deserialize)]
struct UserInfoBody {
    uid: String,
    sub: String,
    #[serde(default)]
    given_name: String,
    #[serde(default)]
    family_name: String,
    email: Option<String>,
    #[serde(default)]
    roles: Vec<String>,
}

impl UserInfoBody {
    fn into_user_info(self) -> UserInfo {
        UserInfo::new(
            self.uid,
            self.sub,
            self.given_name,
            self.family_name,
            self.email,
            self.roles,
        )
    }
}
