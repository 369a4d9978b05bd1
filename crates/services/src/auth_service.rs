use std::env;

use tracing::{debug, warn};

/// Shared-password gate.
///
/// Exact string equality against one configured secret. No hashing, no
/// lockout, no sessions. With no secret configured every attempt fails.
#[derive(Clone, Default)]
pub struct CredentialCheck {
    secret: Option<String>,
}

impl CredentialCheck {
    /// A blank secret counts as not configured.
    #[must_use]
    pub fn new(secret: Option<String>) -> Self {
        Self {
            secret: secret.filter(|value| !value.is_empty()),
        }
    }

    /// Read the secret from `STUDY_PASSWORD`.
    #[must_use]
    pub fn from_env() -> Self {
        Self::new(env::var("STUDY_PASSWORD").ok())
    }

    #[must_use]
    pub fn is_configured(&self) -> bool {
        self.secret.is_some()
    }

    #[must_use]
    pub fn verify(&self, password: &str) -> bool {
        let Some(secret) = self.secret.as_deref() else {
            warn!("login attempted but no password is configured");
            return false;
        };
        let authorized = password == secret;
        if !authorized {
            debug!("login rejected");
        }
        authorized
    }
}

impl std::fmt::Debug for CredentialCheck {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CredentialCheck")
            .field("configured", &self.is_configured())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exact_match_only() {
        let check = CredentialCheck::new(Some("Lernen2024".into()));
        assert!(check.verify("Lernen2024"));
        assert!(!check.verify("lernen2024"));
        assert!(!check.verify(" Lernen2024"));
        assert!(!check.verify(""));
    }

    #[test]
    fn unconfigured_rejects_everything() {
        let check = CredentialCheck::new(None);
        assert!(!check.is_configured());
        assert!(!check.verify(""));
        assert!(!CredentialCheck::new(Some(String::new())).verify(""));
    }

    #[test]
    fn debug_does_not_leak_secret() {
        let check = CredentialCheck::new(Some("hunter2".into()));
        assert!(!format!("{check:?}").contains("hunter2"));
    }
}
