//! Domain entities and invariants.

#![forbid(unsafe_code)]

mod case;
mod lookup;
mod role;
mod search;

pub use case::{CaseSummary, SecurityClassification};
pub use lookup::CaseRoleLookupCriteria;
pub use role::{CaseRole, RoleModificationOutcome, RoleModificationType};
pub use search::{
    BoolQuery, QueryClause, SearchQuery, build_by_external_reference,
    build_by_submission_reference, build_case_match_query,
};
