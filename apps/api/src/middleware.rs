use axum::extract::{Request, State};
use axum::http::header;
use axum::middleware::Next;
use axum::response::Response;
use caseport_core::{AppError, AuthTokens};

use crate::error::ApiResult;
use crate::state::AppState;

/// Resolves the inbound bearer token before any business logic runs.
///
/// The resolved identity and the leased service token are stored in the
/// request extensions for handlers to pick up. A token the identity
/// provider rejects never reaches a handler.
pub async fn require_auth(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> ApiResult<Response> {
    let header_value = request
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .ok_or_else(|| AppError::Unauthorized("missing bearer token".to_owned()))?;
    let bearer = header_value
        .strip_prefix("Bearer ")
        .unwrap_or(header_value)
        .to_owned();

    let user = state.user_info_provider.user_info(bearer.as_str()).await?;
    let service_token = state.service_token_provider.lease().await?;

    request.extensions_mut().insert(user);
    request
        .extensions_mut()
        .insert(AuthTokens::new(bearer, service_token));

    Ok(next.run(request).await)
}
