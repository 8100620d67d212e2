use axum::Extension;
use axum::Json;
use axum::extract::{Path, State};
use axum::http::{StatusCode, header};
use axum::response::IntoResponse;
use caseport_core::{AppError, AuthTokens, UserInfo};

use crate::dto::{CaseSummaryResponse, SubmitCaseRequest};
use crate::error::ApiResult;
use crate::state::AppState;

pub async fn find_by_reference_handler(
    State(state): State<AppState>,
    Extension(tokens): Extension<AuthTokens>,
    Path(reference): Path<String>,
) -> ApiResult<Json<CaseSummaryResponse>> {
    let case = state
        .case_lookup_service
        .find_by_submission_reference(&tokens, reference.as_str())
        .await?
        .ok_or_else(|| AppError::NotFound(format!("no case with reference '{reference}'")))?;

    Ok(Json(CaseSummaryResponse::from(case)))
}

pub async fn find_by_external_reference_handler(
    State(state): State<AppState>,
    Extension(tokens): Extension<AuthTokens>,
    Path(reference): Path<String>,
) -> ApiResult<Json<CaseSummaryResponse>> {
    let case = state
        .case_lookup_service
        .find_by_external_reference(&tokens, reference.as_str())
        .await?
        .ok_or_else(|| AppError::NotFound(format!("no case with reference '{reference}'")))?;

    Ok(Json(CaseSummaryResponse::from(case)))
}

pub async fn submit_case_handler(
    State(state): State<AppState>,
    Extension(user): Extension<UserInfo>,
    Extension(tokens): Extension<AuthTokens>,
    Json(payload): Json<SubmitCaseRequest>,
) -> ApiResult<(StatusCode, Json<CaseSummaryResponse>)> {
    let case = state
        .case_submission_service
        .submit_application(&tokens, &user, payload.data)
        .await?;

    Ok((StatusCode::CREATED, Json(CaseSummaryResponse::from(case))))
}

pub async fn case_document_handler(
    State(state): State<AppState>,
    Extension(tokens): Extension<AuthTokens>,
    Path(case_id): Path<i64>,
) -> ApiResult<impl IntoResponse> {
    let document = state
        .case_submission_service
        .submission_document(&tokens, case_id)
        .await?;

    Ok(([(header::CONTENT_TYPE, "application/pdf")], document))
}
