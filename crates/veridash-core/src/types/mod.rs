//! # Core Type Definitions
//!
//! This module contains the shared types for the Veridash session core:
//! - Role enumeration (`Role`)
//! - Identity values (`UserId`, `Identity`, `Credentials`)
//! - Collaborator failure (`AuthFailure`)
//! - Error types (`VeridashError`)
//!
//! ## Closed Role Set
//!
//! `Role` is a closed enum. Untyped role strings are parsed exactly once at
//! the boundary (`Role::from_str`); past that point every match on a role is
//! exhaustive.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

// =============================================================================
// ROLE
// =============================================================================

/// The dashboard variant a session is allowed to see.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default,
)]
pub enum Role {
    /// A person verifying their own identity.
    #[default]
    #[serde(rename = "user", alias = "end-user")]
    EndUser,
    /// A verifier processing verification requests.
    #[serde(rename = "verifier")]
    Verifier,
    /// An enterprise consuming verifications.
    #[serde(rename = "enterprise")]
    Enterprise,
    /// A platform administrator.
    #[serde(rename = "admin")]
    Admin,
}

impl Role {
    /// Every role, in declaration order.
    pub const ALL: [Role; 4] = [Role::EndUser, Role::Verifier, Role::Enterprise, Role::Admin];

    /// Wire name of the role.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Role::EndUser => "user",
            Role::Verifier => "verifier",
            Role::Enterprise => "enterprise",
            Role::Admin => "admin",
        }
    }

    /// Human readable name.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Role::EndUser => "End User",
            Role::Verifier => "Verifier",
            Role::Enterprise => "Enterprise",
            Role::Admin => "Administrator",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = VeridashError;

    /// Parse a role name. Unknown names never fall back to a default role.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "user" | "end-user" => Ok(Role::EndUser),
            "verifier" => Ok(Role::Verifier),
            "enterprise" => Ok(Role::Enterprise),
            "admin" => Ok(Role::Admin),
            other => Err(VeridashError::InvalidRole(other.to_string())),
        }
    }
}

// =============================================================================
// IDENTITY
// =============================================================================

/// Opaque user identifier issued by the credential check.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct UserId(pub String);

impl UserId {
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Identity fields produced by a successful credential check.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Identity {
    pub user_id: UserId,
    pub display_name: String,
    pub email: String,
    #[serde(default)]
    pub avatar: Option<String>,
}

impl Identity {
    /// Create an identity without an avatar.
    #[must_use]
    pub fn new(
        user_id: UserId,
        display_name: impl Into<String>,
        email: impl Into<String>,
    ) -> Self {
        Self {
            user_id,
            display_name: display_name.into(),
            email: email.into(),
            avatar: None,
        }
    }

    /// Attach an avatar reference.
    #[must_use]
    pub fn with_avatar(mut self, avatar: impl Into<String>) -> Self {
        self.avatar = Some(avatar.into());
        self
    }
}

/// Input handed to the credential check.
///
/// `Debug` redacts the password.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Credentials {
    pub email: String,
    pub password: String,
    pub role: Role,
}

impl Credentials {
    #[must_use]
    pub fn new(email: impl Into<String>, password: impl Into<String>, role: Role) -> Self {
        Self {
            email: email.into(),
            password: password.into(),
            role,
        }
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("email", &self.email)
            .field("password", &"<redacted>")
            .field("role", &self.role)
            .finish()
    }
}

/// Failure reported by the credential check.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthFailure {
    pub reason: String,
}

impl AuthFailure {
    #[must_use]
    pub fn new(reason: impl Into<String>) -> Self {
        Self {
            reason: reason.into(),
        }
    }

    /// The generic failure surfaced for a credential mismatch.
    #[must_use]
    pub fn invalid_credentials() -> Self {
        Self::new("invalid credentials")
    }
}

impl fmt::Display for AuthFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.reason)
    }
}

// =============================================================================
// ERROR TYPES
// =============================================================================

/// Errors that can occur in Veridash operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum VeridashError {
    /// A role name outside the closed role set.
    #[error("Invalid role: {0:?}")]
    InvalidRole(String),

    /// The credential check rejected the login or signup.
    #[error("Authentication failed: {0}")]
    AuthenticationFailed(String),

    /// A login or signup is already in flight.
    #[error("Login already in progress")]
    ConcurrentLoginRejected,

    /// A login or signup was attempted on an authenticated session.
    #[error("Session is already authenticated")]
    AlreadyAuthenticated,

    /// A completion arrived after its login was superseded by a logout.
    #[error("Login superseded before completion")]
    StaleCompletionDiscarded,

    /// The requested notification does not exist.
    #[error("Notification not found: {0}")]
    NotificationNotFound(u64),

    /// The preference storage backend failed.
    #[error("Storage error: {0}")]
    StorageError(String),

    /// A serialization or deserialization error occurred.
    #[error("Serialization error: {0}")]
    SerializationError(String),

    /// Configuration could not be loaded or is invalid.
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// An I/O error occurred.
    #[error("I/O error: {0}")]
    IoError(String),
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn role_parses_wire_names_and_alias() {
        assert_eq!("user".parse::<Role>(), Ok(Role::EndUser));
        assert_eq!("end-user".parse::<Role>(), Ok(Role::EndUser));
        assert_eq!("verifier".parse::<Role>(), Ok(Role::Verifier));
        assert_eq!("enterprise".parse::<Role>(), Ok(Role::Enterprise));
        assert_eq!(" admin ".parse::<Role>(), Ok(Role::Admin));
    }

    #[test]
    fn unknown_role_never_defaults() {
        assert_eq!(
            "superuser".parse::<Role>(),
            Err(VeridashError::InvalidRole("superuser".to_string()))
        );
        assert!("".parse::<Role>().is_err());
        assert!("Admin".parse::<Role>().is_err());
    }

    #[test]
    fn role_display_round_trips_through_from_str() {
        for role in Role::ALL {
            assert_eq!(role.to_string().parse::<Role>(), Ok(role));
        }
    }

    #[test]
    fn credentials_debug_redacts_password() {
        let creds = Credentials::new("ada@example.com", "hunter2", Role::Admin);
        let rendered = format!("{:?}", creds);
        assert!(!rendered.contains("hunter2"));
        assert!(rendered.contains("<redacted>"));
    }
}
