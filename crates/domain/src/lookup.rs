/// Lookup criteria for locating the case a citizen is claiming a role on.
///
/// The submission reference is required; the name fields are optional
/// because older cases may hold only some of them. Blank references are
/// rejected by the query builders before any search is issued.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CaseRoleLookupCriteria {
    case_submission_reference: String,
    respondent_name: Option<String>,
    claimant_first_names: Option<String>,
    claimant_last_name: Option<String>,
    case_role_name: Option<String>,
}

impl CaseRoleLookupCriteria {
    /// Creates lookup criteria from an inbound request.
    #[must_use]
    pub fn new(
        case_submission_reference: impl Into<String>,
        respondent_name: Option<String>,
        claimant_first_names: Option<String>,
        claimant_last_name: Option<String>,
        case_role_name: Option<String>,
    ) -> Self {
        Self {
            case_submission_reference: case_submission_reference.into(),
            respondent_name,
            claimant_first_names,
            claimant_last_name,
            case_role_name,
        }
    }

    /// Returns the case submission reference.
    #[must_use]
    pub fn case_submission_reference(&self) -> &str {
        self.case_submission_reference.as_str()
    }

    /// Returns the respondent person or organisation name, if provided.
    #[must_use]
    pub fn respondent_name(&self) -> Option<&str> {
        self.respondent_name.as_deref()
    }

    /// Returns the claimant first names, if provided.
    #[must_use]
    pub fn claimant_first_names(&self) -> Option<&str> {
        self.claimant_first_names.as_deref()
    }

    /// Returns the claimant last name, if provided.
    #[must_use]
    pub fn claimant_last_name(&self) -> Option<&str> {
        self.claimant_last_name.as_deref()
    }

    /// Returns the name of the role being claimed, if provided.
    #[must_use]
    pub fn case_role_name(&self) -> Option<&str> {
        self.case_role_name.as_deref()
    }
}
