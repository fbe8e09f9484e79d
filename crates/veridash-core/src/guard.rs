//! # Route Guard
//!
//! Decides whether a requested path is reachable for the current session.
//!
//! Policy, in order:
//! 1. Public paths are always allowed.
//! 2. Protected paths need an authenticated session; otherwise redirect to
//!    login, carrying the requested path so the caller can return to it.
//! 3. Role-scoped paths need a matching role; otherwise redirect to the
//!    session role's landing path.
//! 4. Everything else is allowed.
//!
//! Paths that match no known route fall through to the not-found page, which
//! is public.

use crate::navigation::{landing_path, role_prefix};
use crate::primitives::{AUTHENTICATED_PATHS, LOGIN_PATH, PUBLIC_PATHS};
use crate::session::Session;
use crate::Role;
use serde::Serialize;

/// Access requirement of a route.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "access", content = "role", rename_all = "snake_case")]
pub enum RouteAccess {
    Public,
    Authenticated,
    RoleScoped(Role),
}

/// Guard verdict for one request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "decision", rename_all = "snake_case")]
pub enum GuardDecision {
    Allow,
    RedirectToLogin { login: &'static str, return_to: String },
    RedirectToLanding { path: &'static str },
}

impl GuardDecision {
    /// Path the caller should end up on, given the originally requested one.
    #[must_use]
    pub fn target<'a>(&'a self, requested: &'a str) -> &'a str {
        match self {
            GuardDecision::Allow => requested,
            GuardDecision::RedirectToLogin { login, .. } => login,
            GuardDecision::RedirectToLanding { path } => path,
        }
    }

    #[must_use]
    pub fn is_allowed(&self) -> bool {
        matches!(self, GuardDecision::Allow)
    }
}

/// Canonical form of a requested path: query string and fragment stripped,
/// lowercased, runs of `/` collapsed, leading slash ensured and trailing one
/// dropped. Route matching is case-insensitive.
#[must_use]
pub fn normalize_path(path: &str) -> String {
    let end = path.find(['?', '#']).unwrap_or(path.len());
    let segments: Vec<String> = path[..end]
        .trim()
        .split('/')
        .filter(|segment| !segment.is_empty())
        .map(str::to_lowercase)
        .collect();
    format!("/{}", segments.join("/"))
}

/// True when `path` is `prefix` or a descendant of it, on segment boundaries.
fn under_prefix(path: &str, prefix: &str) -> bool {
    match path.strip_prefix(prefix) {
        Some(rest) => rest.is_empty() || rest.starts_with('/'),
        None => false,
    }
}

/// Access requirement for a normalised path.
#[must_use]
pub fn route_access(path: &str) -> RouteAccess {
    if PUBLIC_PATHS.contains(&path) {
        return RouteAccess::Public;
    }
    if let Some(role) = Role::ALL
        .into_iter()
        .find(|role| under_prefix(path, role_prefix(*role)))
    {
        return RouteAccess::RoleScoped(role);
    }
    if AUTHENTICATED_PATHS
        .iter()
        .any(|protected| under_prefix(path, protected))
    {
        return RouteAccess::Authenticated;
    }
    RouteAccess::Public
}

/// Decide the outcome of navigating to `requested` with `session`.
#[must_use]
pub fn check(requested: &str, session: &Session) -> GuardDecision {
    let path = normalize_path(requested);
    let access = route_access(&path);

    if access == RouteAccess::Public {
        return GuardDecision::Allow;
    }

    let role = match (session.authenticated, session.role) {
        (true, Some(role)) => role,
        _ => {
            return GuardDecision::RedirectToLogin {
                login: LOGIN_PATH,
                return_to: path,
            };
        }
    };

    match access {
        RouteAccess::RoleScoped(required) if required != role => {
            GuardDecision::RedirectToLanding {
                path: landing_path(role),
            }
        }
        _ => GuardDecision::Allow,
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Identity, SessionStore, UserId};

    fn session_as(role: Role) -> Session {
        let mut store = SessionStore::new();
        let ticket = store.begin_login(Some(role)).expect("begin");
        let identity = Identity::new(UserId::new("usr_1"), "Test", "test@example.com");
        store.complete(ticket, Ok(identity));
        store.snapshot()
    }

    fn pending() -> Session {
        let mut store = SessionStore::new();
        let _ticket = store.begin_login(None).expect("begin");
        store.snapshot()
    }

    #[test]
    fn normalize_strips_query_fragment_and_trailing_slash() {
        assert_eq!(normalize_path("/admin/users/?tab=all#top"), "/admin/users");
        assert_eq!(normalize_path(""), "/");
        assert_eq!(normalize_path("/"), "/");
        assert_eq!(normalize_path("admin"), "/admin");
    }

    #[test]
    fn normalize_collapses_slashes_and_case() {
        assert_eq!(normalize_path("//admin/users"), "/admin/users");
        assert_eq!(normalize_path("/dashboard//settings/"), "/dashboard/settings");
        assert_eq!(normalize_path("/ADMIN/Users"), "/admin/users");
        assert_eq!(normalize_path("///"), "/");
    }

    #[test]
    fn non_canonical_spellings_stay_protected() {
        for path in ["/ADMIN/users", "/Admin", "//admin/users", "/admin//users/"] {
            let decision = check(path, &Session::anonymous());
            assert!(
                matches!(decision, GuardDecision::RedirectToLogin { .. }),
                "{path}: {decision:?}"
            );
        }

        let decision = check("/dashboard//settings", &Session::anonymous());
        assert_eq!(
            decision,
            GuardDecision::RedirectToLogin {
                login: LOGIN_PATH,
                return_to: "/dashboard/settings".to_string()
            }
        );

        assert_eq!(
            check("/Admin/Users", &session_as(Role::Verifier)),
            GuardDecision::RedirectToLanding { path: "/verifier" }
        );
        assert!(check("/VERIFIER", &session_as(Role::Verifier)).is_allowed());
    }

    #[test]
    fn public_paths_allowed_in_every_state() {
        let sessions = [Session::anonymous(), pending(), session_as(Role::Admin)];
        for session in &sessions {
            for path in PUBLIC_PATHS {
                assert_eq!(check(path, session), GuardDecision::Allow, "{path}");
            }
        }
    }

    #[test]
    fn anonymous_is_sent_to_login_with_return_path() {
        let decision = check("/admin/users?page=2", &Session::anonymous());
        assert_eq!(
            decision,
            GuardDecision::RedirectToLogin {
                login: LOGIN_PATH,
                return_to: "/admin/users".to_string()
            }
        );
    }

    #[test]
    fn pending_counts_as_unauthenticated() {
        let decision = check("/dashboard", &pending());
        assert!(matches!(decision, GuardDecision::RedirectToLogin { .. }));
    }

    #[test]
    fn role_mismatch_redirects_to_own_landing() {
        let decision = check("/admin/users", &session_as(Role::EndUser));
        assert_eq!(
            decision,
            GuardDecision::RedirectToLanding { path: "/dashboard" }
        );
        assert_eq!(decision.target("/admin/users"), "/dashboard");
    }

    #[test]
    fn matching_role_is_allowed() {
        assert!(check("/admin/users", &session_as(Role::Admin)).is_allowed());
        assert!(check("/verifier", &session_as(Role::Verifier)).is_allowed());
    }

    #[test]
    fn prefix_match_respects_segments() {
        assert_eq!(route_access("/admin"), RouteAccess::RoleScoped(Role::Admin));
        assert_eq!(route_access("/administrator"), RouteAccess::Public);
        assert_eq!(route_access("/dashboards"), RouteAccess::Public);
    }

    #[test]
    fn onboarding_needs_any_authenticated_role() {
        assert_eq!(route_access("/onboarding"), RouteAccess::Authenticated);
        assert!(check("/onboarding", &session_as(Role::Enterprise)).is_allowed());
        assert!(!check("/onboarding", &Session::anonymous()).is_allowed());
    }

    #[test]
    fn unknown_paths_fall_through_to_not_found() {
        assert!(check("/no/such/page", &Session::anonymous()).is_allowed());
    }
}
