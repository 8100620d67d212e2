use std::sync::Arc;

use caseport_application::{
    CaseLookupService, CaseRoleService, CaseSubmissionService, ServiceTokenProvider,
    UserInfoProvider,
};

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub case_role_service: CaseRoleService,
    pub case_lookup_service: CaseLookupService,
    pub case_submission_service: CaseSubmissionService,
    pub user_info_provider: Arc<dyn UserInfoProvider>,
    pub service_token_provider: Arc<dyn ServiceTokenProvider>,
    pub frontend_url: String,
}
