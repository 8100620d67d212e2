use std::sync::Arc;

use caseport_core::{AppError, AppResult, AuthTokens};
use caseport_domain::{
    CaseRoleLookupCriteria, CaseSummary, SearchQuery, build_by_external_reference,
    build_by_submission_reference, build_case_match_query,
};

use crate::CaseSearchIndex;

/// Classified result of a case lookup.
#[derive(Debug, Clone, PartialEq)]
pub enum CaseLookup {
    /// No indexed case matched the criteria.
    NoMatch,
    /// Exactly one case matched.
    Unique(CaseSummary),
    /// More than one case matched. Never resolved by picking a candidate;
    /// the caller must refine the criteria.
    Ambiguous,
}

/// Locates the case a citizen role-modification request refers to.
#[derive(Clone)]
pub struct CaseLookupService {
    search_index: Arc<dyn CaseSearchIndex>,
    case_type_id: String,
}

impl CaseLookupService {
    /// Creates a lookup service bound to one case type.
    #[must_use]
    pub fn new(search_index: Arc<dyn CaseSearchIndex>, case_type_id: impl Into<String>) -> Self {
        Self {
            search_index,
            case_type_id: case_type_id.into(),
        }
    }

    /// Finds the case matching the lookup criteria and classifies the result.
    ///
    /// Collaborator faults propagate as `AppError::Upstream` and are never
    /// retried here.
    pub async fn find_case(
        &self,
        tokens: &AuthTokens,
        criteria: &CaseRoleLookupCriteria,
    ) -> AppResult<CaseLookup> {
        let query = build_case_match_query(criteria)?;
        let mut hits = self.execute(tokens, &query).await?;

        match hits.len() {
            0 => Ok(CaseLookup::NoMatch),
            1 => Ok(CaseLookup::Unique(hits.remove(0))),
            _ => Ok(CaseLookup::Ambiguous),
        }
    }

    /// Finds a case by its submission reference alone.
    pub async fn find_by_submission_reference(
        &self,
        tokens: &AuthTokens,
        reference: &str,
    ) -> AppResult<Option<CaseSummary>> {
        let query = build_by_submission_reference(reference)?;
        self.single_hit(tokens, &query, reference).await
    }

    /// Finds a case by its alternate (ethos) reference.
    pub async fn find_by_external_reference(
        &self,
        tokens: &AuthTokens,
        reference: &str,
    ) -> AppResult<Option<CaseSummary>> {
        let query = build_by_external_reference(reference)?;
        self.single_hit(tokens, &query, reference).await
    }

    async fn single_hit(
        &self,
        tokens: &AuthTokens,
        query: &SearchQuery,
        reference: &str,
    ) -> AppResult<Option<CaseSummary>> {
        let mut hits = self.execute(tokens, query).await?;

        match hits.len() {
            0 => Ok(None),
            1 => Ok(Some(hits.remove(0))),
            _ => Err(AppError::Conflict(format!(
                "multiple cases share reference '{reference}'"
            ))),
        }
    }

    async fn execute(
        &self,
        tokens: &AuthTokens,
        query: &SearchQuery,
    ) -> AppResult<Vec<CaseSummary>> {
        self.search_index
            .search(tokens, self.case_type_id.as_str(), query)
            .await
    }
}
