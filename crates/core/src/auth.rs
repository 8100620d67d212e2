use serde::{Deserialize, Serialize};

/// Roles that mark an account as a professional or represented user.
///
/// Professional users manage cases through a separate portal and must not
/// use the citizen self-assignment flow.
const PROFESSIONAL_ROLES: &[&str] = &["caseworker", "pui-case-manager", "solicitor"];

/// Bearer credentials attached to every outbound collaborator call.
///
/// `bearer` identifies the end user; `service` identifies this microservice
/// to the case-management platform (`ServiceAuthorization` header).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthTokens {
    bearer: String,
    service: String,
}

impl AuthTokens {
    /// Creates a token pair from the inbound bearer and a leased service token.
    #[must_use]
    pub fn new(bearer: impl Into<String>, service: impl Into<String>) -> Self {
        Self {
            bearer: bearer.into(),
            service: service.into(),
        }
    }

    /// Returns the end-user bearer token.
    #[must_use]
    pub fn bearer(&self) -> &str {
        self.bearer.as_str()
    }

    /// Returns the service-to-service token.
    #[must_use]
    pub fn service(&self) -> &str {
        self.service.as_str()
    }
}

/// User identity resolved from the bearer token by the identity provider.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserInfo {
    uid: String,
    subject: String,
    given_name: String,
    family_name: String,
    email: Option<String>,
    roles: Vec<String>,
}

impl UserInfo {
    /// Creates a user identity from identity-provider claims.
    #[must_use]
    pub fn new(
        uid: impl Into<String>,
        subject: impl Into<String>,
        given_name: impl Into<String>,
        family_name: impl Into<String>,
        email: Option<String>,
        roles: Vec<String>,
    ) -> Self {
        Self {
            uid: uid.into(),
            subject: subject.into(),
            given_name: given_name.into(),
            family_name: family_name.into(),
            email,
            roles,
        }
    }

    /// Returns the stable user id assigned by the identity provider.
    #[must_use]
    pub fn uid(&self) -> &str {
        self.uid.as_str()
    }

    /// Returns the subject claim.
    #[must_use]
    pub fn subject(&self) -> &str {
        self.subject.as_str()
    }

    /// Returns the given name.
    #[must_use]
    pub fn given_name(&self) -> &str {
        self.given_name.as_str()
    }

    /// Returns the family name.
    #[must_use]
    pub fn family_name(&self) -> &str {
        self.family_name.as_str()
    }

    /// Returns the email, if the provider returned one.
    #[must_use]
    pub fn email(&self) -> Option<&str> {
        self.email.as_deref()
    }

    /// Returns the role set granted by the identity provider.
    #[must_use]
    pub fn roles(&self) -> &[String] {
        self.roles.as_slice()
    }

    /// Returns whether any granted role marks this user as professional or
    /// represented.
    #[must_use]
    pub fn is_professional(&self) -> bool {
        self.roles
            .iter()
            .any(|role| PROFESSIONAL_ROLES.contains(&role.as_str()))
    }
}
