//! Application services and collaborator ports.

#![forbid(unsafe_code)]

mod case_lookup_service;
mod case_role_service;
mod case_submission_service;
mod ports;

pub use case_lookup_service::{CaseLookup, CaseLookupService};
pub use case_role_service::{CaseRoleService, RoleModificationRequest};
pub use case_submission_service::CaseSubmissionService;
pub use ports::{
    CaseSearchIndex, CaseStoreClient, DocumentGenerator, NotificationSender, ServiceTokenProvider,
    UserInfoProvider,
};
