//! # Route and Storage Primitives
//!
//! Fixed route identifiers and storage keys compiled into the binary.
//! These are immutable at runtime.

/// Login page. Unauthenticated requests for protected paths land here.
pub const LOGIN_PATH: &str = "/login";

/// Signup page.
pub const SIGNUP_PATH: &str = "/signup";

/// Destination after a successful signup, in place of the role landing page.
pub const ONBOARDING_PATH: &str = "/onboarding";

/// Not-found page. Unknown paths render it.
pub const NOT_FOUND_PATH: &str = "/not-found";

/// Paths reachable in every session state.
pub const PUBLIC_PATHS: &[&str] = &[
    "/",
    LOGIN_PATH,
    SIGNUP_PATH,
    "/terms",
    "/privacy",
    NOT_FOUND_PATH,
];

/// Paths that need an authenticated session of any role.
pub const AUTHENTICATED_PATHS: &[&str] = &[ONBOARDING_PATH, "/profile"];

// =============================================================================
// PREFERENCE KEYS
// =============================================================================

/// Namespace prefix for every persisted preference key.
pub const PREFERENCE_NAMESPACE: &str = "veridash";

/// Key (without namespace) of the sidebar collapsed flag.
pub const SIDEBAR_COLLAPSED_KEY: &str = "sidebar-collapsed";

/// Maximum length of a preference key, namespace included.
pub const MAX_PREFERENCE_KEY_LENGTH: usize = 128;

/// Build the fully namespaced storage key for a preference.
#[must_use]
pub fn namespaced_key(key: &str) -> String {
    format!("{}:{}", PREFERENCE_NAMESPACE, key)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sidebar_key_is_namespaced() {
        assert_eq!(
            namespaced_key(SIDEBAR_COLLAPSED_KEY),
            "veridash:sidebar-collapsed"
        );
    }

    #[test]
    fn onboarding_is_not_public() {
        assert!(!PUBLIC_PATHS.contains(&ONBOARDING_PATH));
        assert!(AUTHENTICATED_PATHS.contains(&ONBOARDING_PATH));
    }
}
