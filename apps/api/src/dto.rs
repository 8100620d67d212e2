use caseport_application::RoleModificationRequest;
use caseport_domain::{CaseRole, CaseRoleLookupCriteria, CaseSummary, RoleModificationType};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Inbound body for a role-modification request.
#[derive(Debug, Deserialize)]
pub struct RoleModificationRequestBody {
    pub case_submission_reference: String,
    pub respondent_name: Option<String>,
    pub claimant_first_names: Option<String>,
    pub claimant_last_name: Option<String>,
    pub case_role_name: Option<String>,
    pub case_role: CaseRole,
    pub modification_type: RoleModificationType,
}

impl From<RoleModificationRequestBody> for RoleModificationRequest {
    fn from(value: RoleModificationRequestBody) -> Self {
        Self {
            criteria: CaseRoleLookupCriteria::new(
                value.case_submission_reference,
                value.respondent_name,
                value.claimant_first_names,
                value.claimant_last_name,
                value.case_role_name,
            ),
            case_role: value.case_role,
            modification_type: value.modification_type,
        }
    }
}

/// Outbound body describing a role-modification outcome.
#[derive(Debug, Serialize)]
pub struct RoleModificationResponse {
    pub status: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notification_failure: Option<String>,
}

/// Inbound body for a citizen case submission.
#[derive(Debug, Deserialize)]
pub struct SubmitCaseRequest {
    pub data: Value,
}

/// Outbound projection of a case.
#[derive(Debug, Serialize)]
pub struct CaseSummaryResponse {
    pub case_id: i64,
    pub submission_reference: String,
    pub case_type_id: String,
    pub jurisdiction: String,
    pub security_classification: &'static str,
}

impl From<CaseSummary> for CaseSummaryResponse {
    fn from(value: CaseSummary) -> Self {
        Self {
            case_id: value.case_id(),
            submission_reference: value.submission_reference().as_str().to_owned(),
            case_type_id: value.case_type_id().as_str().to_owned(),
            jurisdiction: value.jurisdiction().as_str().to_owned(),
            security_classification: value.security_classification().as_str(),
        }
    }
}
