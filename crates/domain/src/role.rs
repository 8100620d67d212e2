use std::str::FromStr;

use caseport_core::AppError;
use serde::{Deserialize, Serialize};

/// Case-access role a citizen can hold on a case.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CaseRole {
    /// The party who brought the claim.
    Claimant,
    /// The party the claim is brought against.
    Respondent,
}

impl CaseRole {
    /// Returns the case store's bracketed role label.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Claimant => "[CLAIMANT]",
            Self::Respondent => "[RESPONDENT]",
        }
    }
}

impl FromStr for CaseRole {
    type Err = AppError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "claimant" | "[CLAIMANT]" => Ok(Self::Claimant),
            "respondent" | "[RESPONDENT]" => Ok(Self::Respondent),
            _ => Err(AppError::Validation(format!("unknown case role '{value}'"))),
        }
    }
}

/// Kind of role modification requested by the citizen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RoleModificationType {
    /// Grant the role to the requesting user.
    Assignment,
    /// Remove the role from the requesting user.
    Revocation,
    /// Mark a case notification as viewed by the requesting user.
    NotificationAcknowledgement,
}

impl RoleModificationType {
    /// Returns the case store event id that applies this modification.
    #[must_use]
    pub fn event_id(&self) -> &'static str {
        match self {
            Self::Assignment => "assignCaseAccess",
            Self::Revocation => "revokeCaseAccess",
            Self::NotificationAcknowledgement => "acknowledgeNotification",
        }
    }
}

/// Result of a role-modification attempt.
///
/// Expected business outcomes are variants here; transport and collaborator
/// faults are surfaced as `AppError::Upstream` instead.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RoleModificationOutcome {
    /// The role change was applied. If the follow-up notification failed,
    /// the failure reason is carried here rather than rolling back.
    Applied {
        /// Reason the notification send failed, when it did.
        notification_failure: Option<String>,
    },
    /// No indexed case matched the lookup criteria.
    NoMatchingCase,
    /// More than one case matched; the request must be refined.
    AmbiguousMatch,
    /// The requester is a professional or represented user and must use the
    /// professional assignment channel.
    ProfessionalUserRejected,
}
