use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Extension;
use caseport_core::{AuthTokens, UserInfo};
use caseport_domain::RoleModificationOutcome;

use crate::dto::{RoleModificationRequestBody, RoleModificationResponse};
use crate::error::ApiResult;
use crate::state::AppState;

pub async fn modify_role_handler(
    State(state): State<AppState>,
    Extension(user): Extension<UserInfo>,
    Extension(tokens): Extension<AuthTokens>,
    Json(payload): Json<RoleModificationRequestBody>,
) -> ApiResult<impl IntoResponse> {
    let request = payload.into();
    let outcome = state
        .case_role_service
        .modify_role(&tokens, &user, &request)
        .await?;

    Ok(outcome_response(outcome))
}

/// Translates a business outcome into its HTTP representation.
///
/// No-match and ambiguous-match are distinct non-5xx statuses so callers can
/// tell "not found" from "refine your input"; a rejected professional user is
/// a successful response pointing at the representative channel.
fn outcome_response(
    outcome: RoleModificationOutcome,
) -> (StatusCode, Json<RoleModificationResponse>) {
    let (status, body) = match outcome {
        RoleModificationOutcome::Applied {
            notification_failure,
        } => (
            StatusCode::OK,
            RoleModificationResponse {
                status: "applied",
                message: None,
                notification_failure,
            },
        ),
        RoleModificationOutcome::NoMatchingCase => (
            StatusCode::NOT_FOUND,
            RoleModificationResponse {
                status: "no_matching_case",
                message: Some("no case matched the provided details"),
                notification_failure: None,
            },
        ),
        RoleModificationOutcome::AmbiguousMatch => (
            StatusCode::CONFLICT,
            RoleModificationResponse {
                status: "ambiguous_match",
                message: Some("more than one case matched; refine the provided details"),
                notification_failure: None,
            },
        ),
        RoleModificationOutcome::ProfessionalUserRejected => (
            StatusCode::OK,
            RoleModificationResponse {
                status: "professional_user_rejected",
                message: Some(
                    "professional users must request case access through the representative portal",
                ),
                notification_failure: None,
            },
        ),
    };

    (status, Json(body))
}

#[cfg(test)]
mod tests {
    use axum::http::StatusCode;
    use caseport_domain::RoleModificationOutcome;

    use super::outcome_response;

    #[test]
    fn applied_is_ok() {
        let (status, body) = outcome_response(RoleModificationOutcome::Applied {
            notification_failure: None,
        });
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body.status, "applied");
    }

    #[test]
    fn no_match_and_ambiguous_are_distinct_client_statuses() {
        let (no_match, _) = outcome_response(RoleModificationOutcome::NoMatchingCase);
        let (ambiguous, _) = outcome_response(RoleModificationOutcome::AmbiguousMatch);
        assert_eq!(no_match, StatusCode::NOT_FOUND);
        assert_eq!(ambiguous, StatusCode::CONFLICT);
    }

    #[test]
    fn professional_rejection_is_informational_not_an_auth_failure() {
        let (status, body) = outcome_response(RoleModificationOutcome::ProfessionalUserRejected);
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body.status, "professional_user_rejected");
    }

    #[test]
    fn partial_notification_failure_is_surfaced() {
        let (status, body) = outcome_response(RoleModificationOutcome::Applied {
            notification_failure: Some("notification service returned 500".to_owned()),
        });
        assert_eq!(status, StatusCode::OK);
        assert!(body.notification_failure.is_some());
    }
}
