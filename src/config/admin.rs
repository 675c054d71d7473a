//! Privileged-identity configuration.
//!
//! The admin capability is granted at join/create time by a credential
//! check against this configuration, read once at startup and passed
//! explicitly to the engine. Promotion is disabled entirely when no shared
//! secret is configured.

use std::env;

use crate::errors::domain::JoinError;

/// Display names allowed to claim the admin capability, plus the shared
/// secret they must present.
#[derive(Debug, Clone, Default)]
pub struct AdminConfig {
    names: Vec<String>,
    secret: Option<String>,
}

impl AdminConfig {
    pub fn new(names: Vec<String>, secret: Option<String>) -> Self {
        Self { names, secret }
    }

    /// Read `ADMIN_NAMES` (comma-separated) and `ADMIN_PASSWORD`.
    /// Empty entries and an empty secret are treated as absent.
    pub fn from_env() -> Self {
        let names = env::var("ADMIN_NAMES")
            .unwrap_or_default()
            .split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(String::from)
            .collect();
        let secret = env::var("ADMIN_PASSWORD").ok().filter(|s| !s.is_empty());
        Self { names, secret }
    }

    fn is_candidate(&self, name: &str) -> bool {
        self.secret.is_some() && self.names.iter().any(|n| n == name)
    }

    /// Resolve the admin capability for a joining identity.
    ///
    /// Non-candidates always resolve to `false`. A candidate must present
    /// the exact shared secret; a wrong or missing credential is a
    /// distinguishable rejection so the client can re-prompt.
    pub fn authenticate(
        &self,
        name: &str,
        credential: Option<&str>,
    ) -> Result<bool, JoinError> {
        if !self.is_candidate(name) {
            return Ok(false);
        }
        match credential {
            Some(given) if Some(given) == self.secret.as_deref() => Ok(true),
            Some(_) => Err(JoinError::BadCredential),
            None => Err(JoinError::CredentialRequired),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> AdminConfig {
        AdminConfig::new(vec!["Overseer".into()], Some("sesame".into()))
    }

    #[test]
    fn unlisted_name_is_never_promoted() {
        assert_eq!(config().authenticate("Ana", None), Ok(false));
        assert_eq!(config().authenticate("Ana", Some("sesame")), Ok(false));
    }

    #[test]
    fn candidate_with_correct_secret_is_promoted() {
        assert_eq!(config().authenticate("Overseer", Some("sesame")), Ok(true));
    }

    #[test]
    fn candidate_with_wrong_secret_is_rejected() {
        assert_eq!(
            config().authenticate("Overseer", Some("nope")),
            Err(JoinError::BadCredential)
        );
    }

    #[test]
    fn candidate_without_secret_is_prompted() {
        assert_eq!(
            config().authenticate("Overseer", None),
            Err(JoinError::CredentialRequired)
        );
    }

    #[test]
    fn promotion_disabled_without_configured_secret() {
        let config = AdminConfig::new(vec!["Overseer".into()], None);
        assert_eq!(config.authenticate("Overseer", Some("sesame")), Ok(false));
    }
}
