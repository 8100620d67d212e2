use std::sync::Arc;

use serde_json::{Value, json};

use caseport_core::{AppError, AppResult, AuthTokens, UserInfo};
use caseport_domain::CaseSummary;

use crate::{CaseStoreClient, DocumentGenerator};

/// Accepts citizen case submissions and renders confirmation documents.
#[derive(Clone)]
pub struct CaseSubmissionService {
    case_store: Arc<dyn CaseStoreClient>,
    document_generator: Arc<dyn DocumentGenerator>,
    case_type_id: String,
    jurisdiction: String,
    document_template: String,
}

impl CaseSubmissionService {
    /// Creates a submission service bound to one case type and jurisdiction.
    #[must_use]
    pub fn new(
        case_store: Arc<dyn CaseStoreClient>,
        document_generator: Arc<dyn DocumentGenerator>,
        case_type_id: impl Into<String>,
        jurisdiction: impl Into<String>,
        document_template: impl Into<String>,
    ) -> Self {
        Self {
            case_store,
            document_generator,
            case_type_id: case_type_id.into(),
            jurisdiction: jurisdiction.into(),
            document_template: document_template.into(),
        }
    }

    /// Creates a case in the store from citizen-submitted data.
    ///
    /// The submitting user is stamped into the case data so the store can
    /// link the draft to its owner.
    pub async fn submit_application(
        &self,
        tokens: &AuthTokens,
        user: &UserInfo,
        data: Value,
    ) -> AppResult<CaseSummary> {
        let mut fields = data.as_object().cloned().ok_or_else(|| {
            AppError::Validation("case submission payload must be a JSON object".to_owned())
        })?;
        fields.insert("applicantId".to_owned(), Value::String(user.uid().to_owned()));

        self.case_store
            .create_case(
                tokens,
                self.case_type_id.as_str(),
                self.jurisdiction.as_str(),
                Value::Object(fields),
            )
            .await
    }

    /// Renders the submission confirmation document for a case.
    pub async fn submission_document(
        &self,
        tokens: &AuthTokens,
        case_id: i64,
    ) -> AppResult<Vec<u8>> {
        let case = self
            .case_store
            .get_case_by_id(tokens, case_id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("case {case_id} does not exist")))?;

        self.document_generator
            .generate(document_payload(self.document_template.as_str(), &case), "pdf")
            .await
    }
}

fn document_payload(template: &str, case: &CaseSummary) -> Value {
    json!({
        "templateName": template,
        "outputName": format!("case-{}.pdf", case.submission_reference().as_str()),
        "data": {
            "caseNumber": case.submission_reference().as_str(),
            "caseTypeId": case.case_type_id().as_str(),
            "jurisdiction": case.jurisdiction().as_str(),
            "caseData": case.data(),
        },
    })
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use async_trait::async_trait;
    use serde_json::{Value, json};
    use tokio::sync::Mutex;

    use caseport_core::{AppError, AppResult, AuthTokens, UserInfo};
    use caseport_domain::{CaseSummary, SecurityClassification};

    use crate::{CaseStoreClient, DocumentGenerator};

    use super::{CaseSubmissionService, document_payload};

    fn case() -> AppResult<CaseSummary> {
        CaseSummary::new(
            1_645_000_000_000_001,
            "1234567890123456",
            "CIVIL_CLAIM",
            "CIVIL",
            SecurityClassification::Public,
            json!({"claimant": "Jo Bloggs"}),
        )
    }

    #[derive(Default)]
    struct FakeCaseStore {
        created: Mutex<Vec<Value>>,
        has_case: bool,
    }

    #[async_trait]
    impl CaseStoreClient for FakeCaseStore {
        async fn get_case_by_id(
            &self,
            _tokens: &AuthTokens,
            _case_id: i64,
        ) -> AppResult<Option<CaseSummary>> {
            if self.has_case {
                Ok(Some(case()?))
            } else {
                Ok(None)
            }
        }

        async fn create_case(
            &self,
            _tokens: &AuthTokens,
            _case_type_id: &str,
            _jurisdiction: &str,
            data: Value,
        ) -> AppResult<CaseSummary> {
            self.created.lock().await.push(data);
            case()
        }

        async fn start_event_for_citizen(
            &self,
            _tokens: &AuthTokens,
            _case_id: i64,
            _event_id: &str,
        ) -> AppResult<String> {
            Ok("event-token-1".to_owned())
        }

        async fn submit_event_for_citizen(
            &self,
            _tokens: &AuthTokens,
            _case_id: i64,
            _event_id: &str,
            _event_token: &str,
            _data: Value,
        ) -> AppResult<CaseSummary> {
            case()
        }
    }

    #[derive(Default)]
    struct FakeDocumentGenerator {
        payloads: Mutex<Vec<Value>>,
    }

    #[async_trait]
    impl DocumentGenerator for FakeDocumentGenerator {
        async fn generate(&self, payload: Value, _output_format: &str) -> AppResult<Vec<u8>> {
            self.payloads.lock().await.push(payload);
            Ok(b"%PDF-1.7".to_vec())
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

    fn tokens() -> AuthTokens {
        AuthTokens::new("user-token", "service-token")
    }

    fn build_service(
        store: Arc<FakeCaseStore>,
        generator: Arc<FakeDocumentGenerator>,
    ) -> CaseSubmissionService {
        CaseSubmissionService::new(store, generator, "CIVIL_CLAIM", "CIVIL", "claim-form")
    }

    #[tokio::test]
    async fn submission_stamps_the_applicant_id() {
        let store = Arc::new(FakeCaseStore::default());
        let service = build_service(store.clone(), Arc::new(FakeDocumentGenerator::default()));

        let result = service
            .submit_application(&tokens(), &citizen(), json!({"claimant": "Jo Bloggs"}))
            .await;

        assert!(result.is_ok());
        let created = store.created.lock().await;
        assert_eq!(created.len(), 1);
        assert_eq!(created[0]["applicantId"], "user-1");
        assert_eq!(created[0]["claimant"], "Jo Bloggs");
    }

    #[tokio::test]
    async fn non_object_submission_is_rejected_before_the_store() {
        let store = Arc::new(FakeCaseStore::default());
        let service = build_service(store.clone(), Arc::new(FakeDocumentGenerator::default()));

        let result = service
            .submit_application(&tokens(), &citizen(), json!(["not", "an", "object"]))
            .await;

        assert!(matches!(result, Err(AppError::Validation(_))));
        assert!(store.created.lock().await.is_empty());
    }

    #[tokio::test]
    async fn document_for_missing_case_is_not_found() {
        let store = Arc::new(FakeCaseStore::default());
        let service = build_service(store, Arc::new(FakeDocumentGenerator::default()));

        let result = service
            .submission_document(&tokens(), 1_645_000_000_000_001)
            .await;

        assert!(matches!(result, Err(AppError::NotFound(_))));
    }

    #[tokio::test]
    async fn document_payload_carries_template_and_case_fields() {
        let store = Arc::new(FakeCaseStore {
            has_case: true,
            ..FakeCaseStore::default()
        });
        let generator = Arc::new(FakeDocumentGenerator::default());
        let service = build_service(store, generator.clone());

        let result = service
            .submission_document(&tokens(), 1_645_000_000_000_001)
            .await;

        assert!(matches!(result, Ok(bytes) if bytes.starts_with(b"%PDF")));
        let payloads = generator.payloads.lock().await;
        assert_eq!(payloads.len(), 1);
        assert_eq!(payloads[0]["templateName"], "claim-form");
        assert_eq!(payloads[0]["data"]["caseNumber"], "1234567890123456");
    }

    #[test]
    fn payload_output_name_includes_the_reference() -> AppResult<()> {
        let payload = document_payload("claim-form", &case()?);
        assert_eq!(payload["outputName"], "case-1234567890123456.pdf");
        Ok(())
    }
}
