use caseport_core::{AppError, AppResult};
use serde_json::{Map, Value, json};

use crate::CaseRoleLookupCriteria;

/// Indexed field holding the citizen-facing submission reference.
const SUBMISSION_REFERENCE_FIELD: &str = "reference.keyword";
/// Indexed field holding the alternate (ethos) case reference.
const EXTERNAL_REFERENCE_FIELD: &str = "data.ethosCaseReference.keyword";
/// Respondent organisation name, when the respondent is an organisation.
const RESPONDENT_ORGANISATION_FIELD: &str =
    "data.respondentCollection.value.respondentOrganisation.keyword";
/// Respondent individual name, when the respondent is a person.
const RESPONDENT_NAME_FIELD: &str = "data.respondentCollection.value.respondentName.keyword";
/// Generic respondent display field kept for cases indexed before the
/// person/organisation split.
const RESPONDENT_DISPLAY_FIELD: &str = "data.respondent.keyword";
/// Claimant first names on cases storing the name split.
const CLAIMANT_FIRST_NAMES_FIELD: &str = "data.claimantIndType.claimantFirstNames.keyword";
/// Claimant last name on cases storing the name split.
const CLAIMANT_LAST_NAME_FIELD: &str = "data.claimantIndType.claimantLastName.keyword";
/// Combined claimant full name on cases indexed with a single name field.
const CLAIMANT_FULL_NAME_FIELD: &str = "data.claimant.keyword";

/// Case lookups expect a unique hit; the backend is asked for one result.
const RESULT_SIZE: u32 = 1;

/// A single clause in a search query tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QueryClause {
    /// Exact match of one indexed keyword field against a value.
    Match {
        /// Dotted path of the indexed field.
        field: &'static str,
        /// Value the field must equal, verbatim.
        value: String,
    },
    /// Boolean combination of nested clauses.
    Bool(BoolQuery),
}

impl QueryClause {
    /// Creates an exact-match clause.
    #[must_use]
    pub fn matching(field: &'static str, value: impl Into<String>) -> Self {
        Self::Match {
            field,
            value: value.into(),
        }
    }

    fn to_value(&self) -> Value {
        match self {
            Self::Match { field, value } => {
                let mut body = Map::new();
                body.insert((*field).to_owned(), Value::String(value.clone()));
                json!({ "match": body })
            }
            Self::Bool(bool_query) => bool_query.to_value(),
        }
    }
}

/// Boolean query combining `must`, `should` and `filter` sub-clauses.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct BoolQuery {
    must: Vec<QueryClause>,
    should: Vec<QueryClause>,
    filter: Vec<QueryClause>,
    minimum_should_match: Option<u32>,
}

impl BoolQuery {
    /// Creates an empty boolean query.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a clause every hit must satisfy.
    #[must_use]
    pub fn must(mut self, clause: QueryClause) -> Self {
        self.must.push(clause);
        self
    }

    /// Appends an alternative clause.
    #[must_use]
    pub fn should(mut self, clause: QueryClause) -> Self {
        self.should.push(clause);
        self
    }

    /// Appends a non-scoring clause every hit must satisfy.
    #[must_use]
    pub fn filter(mut self, clause: QueryClause) -> Self {
        self.filter.push(clause);
        self
    }

    /// Requires at least `count` of the `should` alternatives to match.
    #[must_use]
    pub fn minimum_should_match(mut self, count: u32) -> Self {
        self.minimum_should_match = Some(count);
        self
    }

    fn to_value(&self) -> Value {
        let mut body = Map::new();
        if !self.must.is_empty() {
            body.insert(
                "must".to_owned(),
                Value::Array(self.must.iter().map(QueryClause::to_value).collect()),
            );
        }
        if !self.should.is_empty() {
            body.insert(
                "should".to_owned(),
                Value::Array(self.should.iter().map(QueryClause::to_value).collect()),
            );
        }
        if !self.filter.is_empty() {
            body.insert(
                "filter".to_owned(),
                Value::Array(self.filter.iter().map(QueryClause::to_value).collect()),
            );
        }
        if let Some(count) = self.minimum_should_match {
            body.insert("minimum_should_match".to_owned(), json!(count));
        }

        json!({ "bool": body })
    }
}

/// An immutable query document for the case index.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchQuery {
    query: QueryClause,
    size: u32,
}

impl SearchQuery {
    fn new(query: QueryClause, size: u32) -> Self {
        Self { query, size }
    }

    /// Returns the maximum number of hits requested from the backend.
    #[must_use]
    pub fn size(&self) -> u32 {
        self.size
    }

    /// Returns the query as a JSON document tree.
    #[must_use]
    pub fn to_value(&self) -> Value {
        json!({
            "query": self.query.to_value(),
            "size": self.size,
        })
    }

    /// Returns the serialized wire form sent to the search backend.
    #[must_use]
    pub fn to_json(&self) -> String {
        self.to_value().to_string()
    }
}

/// Builds the case-match query for citizen role self-assignment.
///
/// The submission reference must match exactly. When a respondent name is
/// given, at least one of its three indexed representations must match it;
/// when claimant names are given, either the split first/last pair or the
/// combined full-name field must match.
pub fn build_case_match_query(criteria: &CaseRoleLookupCriteria) -> AppResult<SearchQuery> {
    let reference = validated_reference(criteria.case_submission_reference())?;

    let mut root = BoolQuery::new().must(QueryClause::matching(
        SUBMISSION_REFERENCE_FIELD,
        reference,
    ));

    if let Some(clause) = respondent_identity_filter(criteria) {
        root = root.filter(clause);
    }
    if let Some(clause) = claimant_name_filter(criteria) {
        root = root.filter(clause);
    }

    Ok(SearchQuery::new(QueryClause::Bool(root), RESULT_SIZE))
}

/// Builds a direct lookup on the submission reference only.
pub fn build_by_submission_reference(reference: &str) -> AppResult<SearchQuery> {
    let reference = validated_reference(reference)?;

    Ok(SearchQuery::new(
        QueryClause::matching(SUBMISSION_REFERENCE_FIELD, reference),
        RESULT_SIZE,
    ))
}

/// Builds a direct lookup on the alternate (ethos) case reference.
pub fn build_by_external_reference(reference: &str) -> AppResult<SearchQuery> {
    let reference = validated_reference(reference)?;

    Ok(SearchQuery::new(
        QueryClause::matching(EXTERNAL_REFERENCE_FIELD, reference),
        RESULT_SIZE,
    ))
}

fn validated_reference(reference: &str) -> AppResult<&str> {
    if reference.trim().is_empty() {
        return Err(AppError::Validation(
            "case submission reference must not be blank".to_owned(),
        ));
    }

    Ok(reference)
}

/// The respondent may be indexed as an organisation, an individual, or a
/// pre-split display value; any one of the three matching is enough.
fn respondent_identity_filter(criteria: &CaseRoleLookupCriteria) -> Option<QueryClause> {
    let name = criteria.respondent_name()?;

    Some(QueryClause::Bool(
        BoolQuery::new()
            .should(QueryClause::matching(RESPONDENT_ORGANISATION_FIELD, name))
            .should(QueryClause::matching(RESPONDENT_NAME_FIELD, name))
            .should(QueryClause::matching(RESPONDENT_DISPLAY_FIELD, name))
            .minimum_should_match(1),
    ))
}

/// Claimant names may be stored split or combined depending on case vintage.
fn claimant_name_filter(criteria: &CaseRoleLookupCriteria) -> Option<QueryClause> {
    let first_names = criteria.claimant_first_names();
    let last_name = criteria.claimant_last_name();

    let combined = match (first_names, last_name) {
        (None, None) => return None,
        (Some(first), Some(last)) => format!("{first} {last}"),
        (Some(first), None) => first.to_owned(),
        (None, Some(last)) => last.to_owned(),
    };

    let mut alternatives = BoolQuery::new();
    if let (Some(first), Some(last)) = (first_names, last_name) {
        alternatives = alternatives.should(QueryClause::Bool(
            BoolQuery::new()
                .must(QueryClause::matching(CLAIMANT_FIRST_NAMES_FIELD, first))
                .must(QueryClause::matching(CLAIMANT_LAST_NAME_FIELD, last)),
        ));
    } else if let Some(first) = first_names {
        alternatives = alternatives.should(QueryClause::matching(CLAIMANT_FIRST_NAMES_FIELD, first));
    } else if let Some(last) = last_name {
        alternatives = alternatives.should(QueryClause::matching(CLAIMANT_LAST_NAME_FIELD, last));
    }

    Some(QueryClause::Bool(
        alternatives
            .should(QueryClause::matching(CLAIMANT_FULL_NAME_FIELD, combined))
            .minimum_should_match(1),
    ))
}

#[cfg(test)]
mod tests {
    use caseport_core::{AppError, AppResult};
    use serde_json::Value;

    use crate::CaseRoleLookupCriteria;

    use super::{
        build_by_external_reference, build_by_submission_reference, build_case_match_query,
    };

    fn full_criteria() -> CaseRoleLookupCriteria {
        CaseRoleLookupCriteria::new(
            "1234567890123456",
            Some("Acme Ltd".to_owned()),
            Some("Jo".to_owned()),
            Some("Bloggs".to_owned()),
            Some("respondent".to_owned()),
        )
    }

    fn pointer<'a>(value: &'a Value, path: &str) -> &'a Value {
        match value.pointer(path) {
            Some(found) => found,
            None => panic!("missing path {path} in {value}"),
        }
    }

    #[test]
    fn submission_reference_query_has_single_match_clause() -> AppResult<()> {
        let query = build_by_submission_reference("1234567890123456")?;
        assert_eq!(
            query.to_json(),
            r#"{"query":{"match":{"reference.keyword":"1234567890123456"}},"size":1}"#
        );
        Ok(())
    }

    #[test]
    fn external_reference_query_targets_ethos_field() -> AppResult<()> {
        let query = build_by_external_reference("6000001/2026")?;
        assert_eq!(
            query.to_json(),
            r#"{"query":{"match":{"data.ethosCaseReference.keyword":"6000001/2026"}},"size":1}"#
        );
        Ok(())
    }

    #[test]
    fn blank_reference_is_rejected() {
        let criteria = CaseRoleLookupCriteria::new("   ", None, None, None, None);
        assert!(matches!(
            build_case_match_query(&criteria),
            Err(AppError::Validation(_))
        ));
        assert!(matches!(
            build_by_submission_reference(""),
            Err(AppError::Validation(_))
        ));
    }

    #[test]
    fn match_query_requires_reference_and_asks_for_one_hit() -> AppResult<()> {
        let query = build_case_match_query(&full_criteria())?;
        let value = query.to_value();

        assert_eq!(query.size(), 1);
        assert_eq!(
            pointer(&value, "/query/bool/must/0/match/reference.keyword"),
            "1234567890123456"
        );
        Ok(())
    }

    #[test]
    fn match_query_offers_three_respondent_alternatives() -> AppResult<()> {
        let query = build_case_match_query(&full_criteria())?;
        let value = query.to_value();

        let alternatives = pointer(&value, "/query/bool/filter/0/bool/should");
        let Value::Array(alternatives) = alternatives else {
            panic!("respondent alternatives must be an array");
        };
        assert_eq!(alternatives.len(), 3);
        assert_eq!(
            pointer(
                &value,
                "/query/bool/filter/0/bool/should/0/match/data.respondentCollection.value.respondentOrganisation.keyword"
            ),
            "Acme Ltd"
        );
        assert_eq!(
            pointer(
                &value,
                "/query/bool/filter/0/bool/should/1/match/data.respondentCollection.value.respondentName.keyword"
            ),
            "Acme Ltd"
        );
        assert_eq!(
            pointer(
                &value,
                "/query/bool/filter/0/bool/should/2/match/data.respondent.keyword"
            ),
            "Acme Ltd"
        );
        assert_eq!(
            pointer(&value, "/query/bool/filter/0/bool/minimum_should_match"),
            &Value::from(1_u32)
        );
        Ok(())
    }

    #[test]
    fn match_query_accepts_split_or_combined_claimant_name() -> AppResult<()> {
        let query = build_case_match_query(&full_criteria())?;
        let value = query.to_value();

        assert_eq!(
            pointer(
                &value,
                "/query/bool/filter/1/bool/should/0/bool/must/0/match/data.claimantIndType.claimantFirstNames.keyword"
            ),
            "Jo"
        );
        assert_eq!(
            pointer(
                &value,
                "/query/bool/filter/1/bool/should/0/bool/must/1/match/data.claimantIndType.claimantLastName.keyword"
            ),
            "Bloggs"
        );
        assert_eq!(
            pointer(
                &value,
                "/query/bool/filter/1/bool/should/1/match/data.claimant.keyword"
            ),
            "Jo Bloggs"
        );
        Ok(())
    }

    #[test]
    fn names_are_omitted_when_not_provided() -> AppResult<()> {
        let criteria = CaseRoleLookupCriteria::new("1234567890123456", None, None, None, None);
        let query = build_case_match_query(&criteria)?;
        let value = query.to_value();

        assert!(value.pointer("/query/bool/filter").is_none());
        Ok(())
    }

    #[test]
    fn lone_last_name_still_matches_both_vintages() -> AppResult<()> {
        let criteria = CaseRoleLookupCriteria::new(
            "1234567890123456",
            None,
            None,
            Some("Bloggs".to_owned()),
            None,
        );
        let query = build_case_match_query(&criteria)?;
        let value = query.to_value();

        assert_eq!(
            pointer(
                &value,
                "/query/bool/filter/0/bool/should/0/match/data.claimantIndType.claimantLastName.keyword"
            ),
            "Bloggs"
        );
        assert_eq!(
            pointer(
                &value,
                "/query/bool/filter/0/bool/should/1/match/data.claimant.keyword"
            ),
            "Bloggs"
        );
        Ok(())
    }

    #[test]
    fn equal_criteria_serialize_byte_identically() -> AppResult<()> {
        let first = build_case_match_query(&full_criteria())?;
        let second = build_case_match_query(&full_criteria())?;
        assert_eq!(first.to_json(), second.to_json());
        Ok(())
    }
}
