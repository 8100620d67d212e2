use std::str::FromStr;

use caseport_core::{AppError, AppResult, NonEmptyString};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Security classification assigned to a case by the case store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SecurityClassification {
    /// Visible to all authorised parties.
    Public,
    /// Restricted to case participants.
    Private,
    /// Restricted to vetted staff.
    Restricted,
}

impl SecurityClassification {
    /// Returns the case store's wire value for the classification.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Public => "PUBLIC",
            Self::Private => "PRIVATE",
            Self::Restricted => "RESTRICTED",
        }
    }
}

impl FromStr for SecurityClassification {
    type Err = AppError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "PUBLIC" => Ok(Self::Public),
            "PRIVATE" => Ok(Self::Private),
            "RESTRICTED" => Ok(Self::Restricted),
            _ => Err(AppError::Validation(format!(
                "unknown security classification '{value}'"
            ))),
        }
    }
}

/// Minimal projection of a case returned by a lookup.
///
/// The `data` payload is the opaque case-data map the store returned; it is
/// carried through to role-modification events unchanged.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CaseSummary {
    case_id: i64,
    submission_reference: NonEmptyString,
    case_type_id: NonEmptyString,
    jurisdiction: NonEmptyString,
    security_classification: SecurityClassification,
    data: Value,
}

impl CaseSummary {
    /// Creates a validated case projection.
    pub fn new(
        case_id: i64,
        submission_reference: impl Into<String>,
        case_type_id: impl Into<String>,
        jurisdiction: impl Into<String>,
        security_classification: SecurityClassification,
        data: Value,
    ) -> AppResult<Self> {
        Ok(Self {
            case_id,
            submission_reference: NonEmptyString::new(submission_reference)?,
            case_type_id: NonEmptyString::new(case_type_id)?,
            jurisdiction: NonEmptyString::new(jurisdiction)?,
            security_classification,
            data,
        })
    }

    /// Returns the case store's numeric case id.
    #[must_use]
    pub fn case_id(&self) -> i64 {
        self.case_id
    }

    /// Returns the citizen-facing submission reference.
    #[must_use]
    pub fn submission_reference(&self) -> &NonEmptyString {
        &self.submission_reference
    }

    /// Returns the case type id.
    #[must_use]
    pub fn case_type_id(&self) -> &NonEmptyString {
        &self.case_type_id
    }

    /// Returns the jurisdiction the case belongs to.
    #[must_use]
    pub fn jurisdiction(&self) -> &NonEmptyString {
        &self.jurisdiction
    }

    /// Returns the security classification.
    #[must_use]
    pub fn security_classification(&self) -> SecurityClassification {
        self.security_classification
    }

    /// Returns the opaque case-data payload.
    #[must_use]
    pub fn data(&self) -> &Value {
        &self.data
    }
}
