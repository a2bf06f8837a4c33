use serde::{Deserialize, Serialize};

/// Identity of the signed-in user, as supplied by the session provider.
///
/// Backoffice never persists identities; they live for the duration of a
/// page load or request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserIdentity {
    subject: String,
    email: String,
}

impl UserIdentity {
    /// Creates an identity from the provider's subject id and email.
    #[must_use]
    pub fn new(subject: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            subject: subject.into(),
            email: email.into(),
        }
    }

    /// Returns the stable subject id from the identity provider.
    #[must_use]
    pub fn subject(&self) -> &str {
        self.subject.as_str()
    }

    /// Returns the email address of the signed-in user.
    #[must_use]
    pub fn email(&self) -> &str {
        self.email.as_str()
    }

    /// Returns the local part of the email, used as a fallback display name.
    #[must_use]
    pub fn email_handle(&self) -> &str {
        self.email
            .split_once('@')
            .map_or(self.email.as_str(), |(local, _)| local)
    }
}

#[cfg(test)]
mod tests {
    use super::UserIdentity;

    #[test]
    fn email_handle_strips_domain() {
        let identity = UserIdentity::new("user-1", "maria@example.com");
        assert_eq!(identity.email_handle(), "maria");
    }

    #[test]
    fn email_handle_falls_back_to_full_value() {
        let identity = UserIdentity::new("user-1", "service-account");
        assert_eq!(identity.email_handle(), "service-account");
    }
}
