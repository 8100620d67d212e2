use std::collections::BTreeMap;
use std::sync::Arc;

use async_trait::async_trait;
use serde_json::{Value, json};
use tokio::sync::Mutex;

use caseport_core::{AppError, AppResult, AuthTokens, UserInfo};
use caseport_domain::{
    CaseRole, CaseRoleLookupCriteria, CaseSummary, RoleModificationOutcome, RoleModificationType,
    SearchQuery, SecurityClassification,
};

use crate::{CaseLookupService, CaseSearchIndex, CaseStoreClient, NotificationSender};

use super::{CaseRoleService, RoleModificationRequest};

fn case_with_id(case_id: i64) -> AppResult<CaseSummary> {
    CaseSummary::new(
        case_id,
        "1234567890123456",
        "CIVIL_CLAIM",
        "CIVIL",
        SecurityClassification::Public,
        json!({}),
    )
}

struct FakeSearchIndex {
    hits: usize,
    calls: Mutex<usize>,
}

impl FakeSearchIndex {
    fn returning(hits: usize) -> Self {
        Self {
            hits,
            calls: Mutex::new(0),
        }
    }
}

#[async_trait]
impl CaseSearchIndex for FakeSearchIndex {
    async fn search(
        &self,
        _tokens: &AuthTokens,
        _case_type_id: &str,
        _query: &SearchQuery,
    ) -> AppResult<Vec<CaseSummary>> {
        let mut calls = self.calls.lock().await;
        *calls += 1;

        (0..self.hits)
            .map(|index| case_with_id(1_645_000_000_000_000 + index as i64))
            .collect()
    }
}

#[derive(Default)]
struct FakeCaseStore {
    started_events: Mutex<Vec<String>>,
    submitted_events: Mutex<Vec<String>>,
    fail_submit: bool,
}

#[async_trait]
impl CaseStoreClient for FakeCaseStore {
    async fn get_case_by_id(
        &self,
        _tokens: &AuthTokens,
        case_id: i64,
    ) -> AppResult<Option<CaseSummary>> {
        Ok(Some(case_with_id(case_id)?))
    }

    async fn create_case(
        &self,
        _tokens: &AuthTokens,
        _case_type_id: &str,
        _jurisdiction: &str,
        _data: Value,
    ) -> AppResult<CaseSummary> {
        case_with_id(1_645_000_000_000_000)
    }

    async fn start_event_for_citizen(
        &self,
        _tokens: &AuthTokens,
        _case_id: i64,
        event_id: &str,
    ) -> AppResult<String> {
        self.started_events.lock().await.push(event_id.to_owned());
        Ok("event-token-1".to_owned())
    }

    async fn submit_event_for_citizen(
        &self,
        _tokens: &AuthTokens,
        case_id: i64,
        event_id: &str,
        _event_token: &str,
        _data: Value,
    ) -> AppResult<CaseSummary> {
        if self.fail_submit {
            return Err(AppError::Upstream("case store returned 503".to_owned()));
        }

        self.submitted_events
            .lock()
            .await
            .push(event_id.to_owned());
        case_with_id(case_id)
    }
}

#[derive(Default)]
struct FakeNotificationSender {
    sends: Mutex<Vec<(String, String)>>,
    fail: bool,
}

#[async_trait]
impl NotificationSender for FakeNotificationSender {
    async fn send_email(
        &self,
        template_id: &str,
        recipient: &str,
        _personalisation: BTreeMap<String, String>,
    ) -> AppResult<()> {
        self.sends
            .lock()
            .await
            .push((template_id.to_owned(), recipient.to_owned()));

        if self.fail {
            return Err(AppError::Upstream(
                "notification service returned 500".to_owned(),
            ));
        }

        Ok(())
    }
}

fn citizen() -> UserInfo {
    UserInfo::new(
        "user-1",
        "jo.bloggs@example.org",
        "Jo",
        "Bloggs",
        Some("jo.bloggs@example.org".to_owned()),
        vec!["citizen".to_owned()],
    )
}

fn professional() -> UserInfo {
    UserInfo::new(
        "user-2",
        "firm@example.org",
        "Sam",
        "Steel",
        Some("firm@example.org".to_owned()),
        vec!["citizen".to_owned(), "pui-case-manager".to_owned()],
    )
}

fn tokens() -> AuthTokens {
    AuthTokens::new("user-token", "service-token")
}

fn request() -> RoleModificationRequest {
    RoleModificationRequest {
        criteria: CaseRoleLookupCriteria::new(
            "1234567890123456",
            Some("Acme Ltd".to_owned()),
            Some("Jo".to_owned()),
            Some("Bloggs".to_owned()),
            Some("respondent".to_owned()),
        ),
        case_role: CaseRole::Respondent,
        modification_type: RoleModificationType::Assignment,
    }
}

fn build_service(
    index: Arc<FakeSearchIndex>,
    store: Arc<FakeCaseStore>,
    sender: Arc<FakeNotificationSender>,
) -> CaseRoleService {
    CaseRoleService::new(
        CaseLookupService::new(index, "CIVIL_CLAIM"),
        store,
        sender,
        "template-role-modified",
    )
}

#[tokio::test]
async fn professional_user_is_rejected_before_any_search() {
    let index = Arc::new(FakeSearchIndex::returning(1));
    let store = Arc::new(FakeCaseStore::default());
    let sender = Arc::new(FakeNotificationSender::default());
    let service = build_service(index.clone(), store.clone(), sender.clone());

    let result = service
        .modify_role(&tokens(), &professional(), &request())
        .await;

    assert!(matches!(
        result,
        Ok(RoleModificationOutcome::ProfessionalUserRejected)
    ));
    assert_eq!(*index.calls.lock().await, 0);
    assert!(store.submitted_events.lock().await.is_empty());
    assert!(sender.sends.lock().await.is_empty());
}

#[tokio::test]
async fn unique_match_applies_role_and_notifies_once() {
    let index = Arc::new(FakeSearchIndex::returning(1));
    let store = Arc::new(FakeCaseStore::default());
    let sender = Arc::new(FakeNotificationSender::default());
    let service = build_service(index, store.clone(), sender.clone());

    let result = service.modify_role(&tokens(), &citizen(), &request()).await;

    assert!(matches!(
        result,
        Ok(RoleModificationOutcome::Applied {
            notification_failure: None
        })
    ));
    assert_eq!(
        *store.started_events.lock().await,
        vec!["assignCaseAccess".to_owned()]
    );
    assert_eq!(
        *store.submitted_events.lock().await,
        vec!["assignCaseAccess".to_owned()]
    );

    let sends = sender.sends.lock().await;
    assert_eq!(sends.len(), 1);
    assert_eq!(sends[0].0, "template-role-modified");
    assert_eq!(sends[0].1, "jo.bloggs@example.org");
}

#[tokio::test]
async fn no_hits_is_no_matching_case() {
    let index = Arc::new(FakeSearchIndex::returning(0));
    let store = Arc::new(FakeCaseStore::default());
    let sender = Arc::new(FakeNotificationSender::default());
    let service = build_service(index, store.clone(), sender.clone());

    let result = service.modify_role(&tokens(), &citizen(), &request()).await;

    assert!(matches!(result, Ok(RoleModificationOutcome::NoMatchingCase)));
    assert!(store.submitted_events.lock().await.is_empty());
    assert!(sender.sends.lock().await.is_empty());
}

#[tokio::test]
async fn two_hits_is_ambiguous_and_applies_nothing() {
    let index = Arc::new(FakeSearchIndex::returning(2));
    let store = Arc::new(FakeCaseStore::default());
    let sender = Arc::new(FakeNotificationSender::default());
    let service = build_service(index, store.clone(), sender.clone());

    let result = service.modify_role(&tokens(), &citizen(), &request()).await;

    assert!(matches!(result, Ok(RoleModificationOutcome::AmbiguousMatch)));
    assert!(store.started_events.lock().await.is_empty());
    assert!(store.submitted_events.lock().await.is_empty());
    assert!(sender.sends.lock().await.is_empty());
}

#[tokio::test]
async fn notification_failure_is_reported_as_partial_success() {
    let index = Arc::new(FakeSearchIndex::returning(1));
    let store = Arc::new(FakeCaseStore::default());
    let sender = Arc::new(FakeNotificationSender {
        fail: true,
        ..FakeNotificationSender::default()
    });
    let service = build_service(index, store.clone(), sender.clone());

    let result = service.modify_role(&tokens(), &citizen(), &request()).await;

    assert!(matches!(
        result,
        Ok(RoleModificationOutcome::Applied {
            notification_failure: Some(_)
        })
    ));
    assert_eq!(store.submitted_events.lock().await.len(), 1);
    assert_eq!(sender.sends.lock().await.len(), 1);
}

#[tokio::test]
async fn store_failure_surfaces_as_upstream_without_notifying() {
    let index = Arc::new(FakeSearchIndex::returning(1));
    let store = Arc::new(FakeCaseStore {
        fail_submit: true,
        ..FakeCaseStore::default()
    });
    let sender = Arc::new(FakeNotificationSender::default());
    let service = build_service(index, store, sender.clone());

    let result = service.modify_role(&tokens(), &citizen(), &request()).await;

    assert!(matches!(result, Err(AppError::Upstream(_))));
    assert!(sender.sends.lock().await.is_empty());
}

#[tokio::test]
async fn revocation_uses_the_revoke_event() {
    let index = Arc::new(FakeSearchIndex::returning(1));
    let store = Arc::new(FakeCaseStore::default());
    let sender = Arc::new(FakeNotificationSender::default());
    let service = build_service(index, store.clone(), sender);

    let revoke = RoleModificationRequest {
        modification_type: RoleModificationType::Revocation,
        ..request()
    };
    let result = service.modify_role(&tokens(), &citizen(), &revoke).await;

    assert!(matches!(result, Ok(RoleModificationOutcome::Applied { .. })));
    assert_eq!(
        *store.submitted_events.lock().await,
        vec!["revokeCaseAccess".to_owned()]
    );
}
