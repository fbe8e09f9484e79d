//! # Credential Check
//!
//! The collaborator consulted by login and signup. The session core never
//! sees it; it only receives its answer.

use async_trait::async_trait;
use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};
use std::time::Duration;
use veridash_core::{AuthFailure, Credentials, Identity, UserId};

/// Something that can tell whether credentials are valid.
#[async_trait]
pub trait CredentialCheck: Send + Sync {
    /// Check `credentials`, yielding the identity they belong to.
    async fn check(&self, credentials: &Credentials) -> Result<Identity, AuthFailure>;
}

/// Stand-in for a real identity backend.
///
/// Waits a fixed delay, then accepts any well-formed email with a non-empty
/// password. The identity is derived from the email, so the same email
/// always maps to the same user id.
#[derive(Debug, Clone)]
pub struct MockCredentialChecker {
    delay: Duration,
}

impl MockCredentialChecker {
    #[must_use]
    pub fn new(delay: Duration) -> Self {
        Self { delay }
    }

    /// A checker that answers immediately.
    #[must_use]
    pub fn instant() -> Self {
        Self::new(Duration::ZERO)
    }
}

#[async_trait]
impl CredentialCheck for MockCredentialChecker {
    async fn check(&self, credentials: &Credentials) -> Result<Identity, AuthFailure> {
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }
        identity_for(credentials)
    }
}

/// Validate credentials and derive the mock identity.
pub fn identity_for(credentials: &Credentials) -> Result<Identity, AuthFailure> {
    let email = credentials.email.trim().to_ascii_lowercase();
    let Some((local, domain)) = email.split_once('@') else {
        return Err(AuthFailure::invalid_credentials());
    };
    if local.is_empty() || !domain.contains('.') || credentials.password.is_empty() {
        return Err(AuthFailure::invalid_credentials());
    }

    let mut hasher = DefaultHasher::new();
    email.hash(&mut hasher);
    let user_id = UserId::new(format!("usr_{:016x}", hasher.finish()));

    let display_name = display_name_from(local);
    Ok(Identity::new(user_id, display_name, email))
}

/// "ada.lovelace" -> "Ada Lovelace"
fn display_name_from(local: &str) -> String {
    local
        .split(['.', '_', '-'])
        .filter(|part| !part.is_empty())
        .map(|part| {
            let mut chars = part.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect::<String>(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}
