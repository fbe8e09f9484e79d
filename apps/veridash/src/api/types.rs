//! # API Request/Response Types
//!
//! This module defines the JSON structures for the HTTP API.

use crate::auth::SignedIn;
use serde::{Deserialize, Serialize};
use veridash_core::{GuardDecision, NavigationEntry, Notification, Role, Session};

// =============================================================================
// HEALTH RESPONSE
// =============================================================================

/// Health check response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
}

impl Default for HealthResponse {
    fn default() -> Self {
        Self {
            status: "ok".to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
        }
    }
}

// =============================================================================
// PAYMENT CONFIG
// =============================================================================

/// Public payment configuration for the browser.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaymentConfigResponse {
    #[serde(rename = "paystackPublicKey")]
    pub paystack_public_key: String,
}

// =============================================================================
// SESSION
// =============================================================================

/// Login request. `role` is parsed by the server so unknown roles produce
/// an `invalid_role` error instead of a body rejection.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
    #[serde(default)]
    pub role: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SignupRequest {
    pub email: String,
    pub password: String,
    #[serde(default)]
    pub display_name: Option<String>,
}

/// Session snapshot as sent over the wire.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionResponse {
    pub user_id: Option<String>,
    pub display_name: Option<String>,
    pub email: Option<String>,
    pub role: Option<Role>,
    pub avatar: Option<String>,
    pub authenticated: bool,
    pub pending: bool,
    pub last_failure: Option<String>,
}

impl From<Session> for SessionResponse {
    fn from(session: Session) -> Self {
        Self {
            user_id: session.user_id.map(|id| id.0),
            display_name: session.display_name,
            email: session.email,
            role: session.role,
            avatar: session.avatar,
            authenticated: session.authenticated,
            pending: session.pending,
            last_failure: session.last_failure,
        }
    }
}

/// Successful login or signup.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthResponse {
    /// Where the dashboard should navigate next.
    pub destination: String,
    pub session: SessionResponse,
}

impl From<SignedIn> for AuthResponse {
    fn from(signed_in: SignedIn) -> Self {
        Self {
            destination: signed_in.destination.to_string(),
            session: signed_in.session.into(),
        }
    }
}

// =============================================================================
// NAVIGATION
// =============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NavigationEntryJson {
    pub path: String,
    pub label: String,
    pub icon: String,
}

impl From<&NavigationEntry> for NavigationEntryJson {
    fn from(entry: &NavigationEntry) -> Self {
        Self {
            path: entry.path.to_string(),
            label: entry.label.to_string(),
            icon: entry.icon.to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NavigationResponse {
    pub role: Role,
    pub landing: String,
    pub entries: Vec<NavigationEntryJson>,
}

impl NavigationResponse {
    #[must_use]
    pub fn for_role(role: Role) -> Self {
        Self {
            role,
            landing: veridash_core::landing_path(role).to_string(),
            entries: veridash_core::navigation_for(role)
                .iter()
                .map(NavigationEntryJson::from)
                .collect(),
        }
    }
}

// =============================================================================
// GUARD
// =============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GuardQuery {
    pub path: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GuardResponse {
    /// Normalised requested path.
    pub path: String,
    /// `allow`, `redirect_to_login` or `redirect_to_landing`.
    pub decision: String,
    /// Where the dashboard ends up.
    pub target: String,
    /// Path to return to after login, when redirecting to login.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub return_to: Option<String>,
}

impl GuardResponse {
    #[must_use]
    pub fn new(path: String, decision: &GuardDecision) -> Self {
        let target = decision.target(&path).to_string();
        let (name, return_to) = match decision {
            GuardDecision::Allow => ("allow", None),
            GuardDecision::RedirectToLogin { return_to, .. } => {
                ("redirect_to_login", Some(return_to.clone()))
            }
            GuardDecision::RedirectToLanding { .. } => ("redirect_to_landing", None),
        };
        Self {
            path,
            decision: name.to_string(),
            target,
            return_to,
        }
    }
}

// =============================================================================
// PREFERENCES
// =============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PreferencesResponse {
    pub sidebar_collapsed: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PreferencesUpdate {
    pub sidebar_collapsed: bool,
}

// =============================================================================
// NOTIFICATIONS
// =============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NotificationsResponse {
    pub unread: usize,
    pub items: Vec<Notification>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MarkReadResponse {
    /// Number of notifications whose flag changed.
    pub changed: usize,
    pub unread: usize,
}

// =============================================================================
// ERRORS
// =============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// Stable machine-readable code.
    pub code: String,
    pub error: String,
}
