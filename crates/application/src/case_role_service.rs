use std::collections::BTreeMap;
use std::sync::Arc;

use chrono::Utc;
use serde_json::{Value, json};
use tracing::{info, warn};

use caseport_core::{AppResult, AuthTokens, UserInfo};
use caseport_domain::{
    CaseRole, CaseRoleLookupCriteria, CaseSummary, RoleModificationOutcome, RoleModificationType,
};

use crate::{CaseLookup, CaseLookupService, CaseStoreClient, NotificationSender};

/// A citizen request to change a case-access role.
#[derive(Debug, Clone)]
pub struct RoleModificationRequest {
    /// Criteria locating the target case.
    pub criteria: CaseRoleLookupCriteria,
    /// Role being granted, revoked or acknowledged.
    pub case_role: CaseRole,
    /// Kind of change requested.
    pub modification_type: RoleModificationType,
}

/// Orchestrates the end-to-end role-modification workflow.
///
/// Professional users are rejected before any search is issued so that
/// ineligible callers learn nothing about case matches.
#[derive(Clone)]
pub struct CaseRoleService {
    lookup_service: CaseLookupService,
    case_store: Arc<dyn CaseStoreClient>,
    notification_sender: Arc<dyn NotificationSender>,
    notification_template_id: String,
}

impl CaseRoleService {
    /// Creates a new role-modification service.
    #[must_use]
    pub fn new(
        lookup_service: CaseLookupService,
        case_store: Arc<dyn CaseStoreClient>,
        notification_sender: Arc<dyn NotificationSender>,
        notification_template_id: impl Into<String>,
    ) -> Self {
        Self {
            lookup_service,
            case_store,
            notification_sender,
            notification_template_id: notification_template_id.into(),
        }
    }

    /// Applies a role modification for the requesting user.
    ///
    /// Expected business outcomes come back as `RoleModificationOutcome`
    /// variants; collaborator faults come back as `AppError::Upstream`. A
    /// failed notification after a successful role change is reported inside
    /// `Applied`, never rolled back.
    pub async fn modify_role(
        &self,
        tokens: &AuthTokens,
        user: &UserInfo,
        request: &RoleModificationRequest,
    ) -> AppResult<RoleModificationOutcome> {
        if user.is_professional() {
            info!(
                uid = user.uid(),
                "professional user directed to the representative channel"
            );
            return Ok(RoleModificationOutcome::ProfessionalUserRejected);
        }

        let case = match self
            .lookup_service
            .find_case(tokens, &request.criteria)
            .await?
        {
            CaseLookup::NoMatch => return Ok(RoleModificationOutcome::NoMatchingCase),
            CaseLookup::Ambiguous => return Ok(RoleModificationOutcome::AmbiguousMatch),
            CaseLookup::Unique(case) => case,
        };

        let event_id = request.modification_type.event_id();
        let event_token = self
            .case_store
            .start_event_for_citizen(tokens, case.case_id(), event_id)
            .await?;
        let case = self
            .case_store
            .submit_event_for_citizen(
                tokens,
                case.case_id(),
                event_id,
                event_token.as_str(),
                role_event_data(user, request),
            )
            .await?;

        let notification_failure = match self.notify(user, &case, request).await {
            Ok(()) => None,
            Err(error) => {
                warn!(
                    error = %error,
                    case_id = case.case_id(),
                    "notification send failed after role modification"
                );
                Some(error.to_string())
            }
        };

        Ok(RoleModificationOutcome::Applied {
            notification_failure,
        })
    }

    async fn notify(
        &self,
        user: &UserInfo,
        case: &CaseSummary,
        request: &RoleModificationRequest,
    ) -> AppResult<()> {
        let recipient = user.email().unwrap_or_else(|| user.subject());

        self.notification_sender
            .send_email(
                self.notification_template_id.as_str(),
                recipient,
                personalisation(user, case, request),
            )
            .await
    }
}

fn role_event_data(user: &UserInfo, request: &RoleModificationRequest) -> Value {
    json!({
        "caseRole": request.case_role.as_str(),
        "userId": user.uid(),
        "roleName": request.criteria.case_role_name(),
    })
}

fn personalisation(
    user: &UserInfo,
    case: &CaseSummary,
    request: &RoleModificationRequest,
) -> BTreeMap<String, String> {
    BTreeMap::from([
        (
            "caseNumber".to_owned(),
            case.submission_reference().as_str().to_owned(),
        ),
        ("firstName".to_owned(), user.given_name().to_owned()),
        ("lastName".to_owned(), user.family_name().to_owned()),
        (
            "caseRole".to_owned(),
            request.case_role.as_str().to_owned(),
        ),
        ("date".to_owned(), Utc::now().format("%d %B %Y").to_string()),
    ])
}

#[cfg(test)]
mod tests;
