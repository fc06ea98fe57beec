//! Shared-secret admin guard.
//!
//! Every privileged call re-supplies the plaintext password; there are no
//! sessions or tokens. An unset secret rejects everything.

use tracing::warn;

use crate::errors::ServiceError;

#[derive(Clone, Default)]
pub struct AdminGuard {
    secret: Option<String>,
}

impl AdminGuard {
    pub fn new(secret: Option<String>) -> Self {
        Self { secret: secret.filter(|s| !s.is_empty()) }
    }

    pub fn is_configured(&self) -> bool {
        self.secret.is_some()
    }

    /// Exact string comparison against the configured secret.
    pub fn verify(&self, supplied: Option<&str>) -> Result<(), ServiceError> {
        match (self.secret.as_deref(), supplied) {
            (Some(secret), Some(given)) if secret == given => Ok(()),
            (None, _) => {
                warn!("admin password not configured; rejecting privileged call");
                Err(ServiceError::Unauthorized)
            }
            _ => {
                warn!(supplied = supplied.is_some(), "admin password rejected");
                Err(ServiceError::Unauthorized)
            }
        }
    }
}

impl std::fmt::Debug for AdminGuard {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AdminGuard").field("configured", &self.is_configured()).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_exact_match_only() {
        let g = AdminGuard::new(Some("s3cret".into()));
        assert!(g.verify(Some("s3cret")).is_ok());
        assert!(matches!(g.verify(Some("S3CRET")), Err(ServiceError::Unauthorized)));
        assert!(matches!(g.verify(Some("s3cret ")), Err(ServiceError::Unauthorized)));
        assert!(matches!(g.verify(None), Err(ServiceError::Unauthorized)));
    }

    #[test]
    fn unset_secret_rejects_everything() {
        let g = AdminGuard::new(None);
        assert!(g.verify(None).is_err());
        assert!(g.verify(Some("")).is_err());
        let empty = AdminGuard::new(Some(String::new()));
        assert!(!empty.is_configured());
        assert!(empty.verify(Some("")).is_err());
    }

    #[test]
    fn debug_hides_secret() {
        let g = AdminGuard::new(Some("s3cret".into()));
        assert!(!format!("{g:?}").contains("s3cret"));
    }
}
