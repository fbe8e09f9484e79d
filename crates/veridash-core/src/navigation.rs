//! # Role Navigation
//!
//! Compile-time navigation tables and the role-to-navigation resolver.
//!
//! Each role owns a fixed, ordered, non-empty sequence of entries. The first
//! entry is the role's landing page. There is no filtering or
//! personalisation: the resolver always returns the full table.

use crate::{Role, VeridashError};
use serde::Serialize;

/// One item of a role's sidebar navigation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct NavigationEntry {
    /// Route identifier.
    pub path: &'static str,
    /// Display label.
    pub label: &'static str,
    /// Symbolic icon key, resolved by the presentation layer.
    pub icon: &'static str,
}

impl NavigationEntry {
    const fn new(path: &'static str, label: &'static str, icon: &'static str) -> Self {
        Self { path, label, icon }
    }
}

// =============================================================================
// TABLES
// =============================================================================

const END_USER_NAV: &[NavigationEntry] = &[
    NavigationEntry::new("/dashboard", "Overview", "layout-dashboard"),
    NavigationEntry::new("/dashboard/verifications", "Verifications", "shield-check"),
    NavigationEntry::new("/dashboard/documents", "Documents", "file-text"),
    NavigationEntry::new("/dashboard/wallet", "Wallet", "wallet"),
    NavigationEntry::new("/dashboard/notifications", "Notifications", "bell"),
    NavigationEntry::new("/dashboard/settings", "Settings", "settings"),
];

const VERIFIER_NAV: &[NavigationEntry] = &[
    NavigationEntry::new("/verifier", "Overview", "layout-dashboard"),
    NavigationEntry::new("/verifier/requests", "Requests", "inbox"),
    NavigationEntry::new("/verifier/history", "History", "history"),
    NavigationEntry::new("/verifier/earnings", "Earnings", "banknote"),
    NavigationEntry::new("/verifier/notifications", "Notifications", "bell"),
    NavigationEntry::new("/verifier/settings", "Settings", "settings"),
];

const ENTERPRISE_NAV: &[NavigationEntry] = &[
    NavigationEntry::new("/enterprise", "Overview", "layout-dashboard"),
    NavigationEntry::new("/enterprise/verifications", "Verifications", "shield-check"),
    NavigationEntry::new("/enterprise/team", "Team", "users"),
    NavigationEntry::new("/enterprise/api-keys", "API Keys", "key-round"),
    NavigationEntry::new("/enterprise/billing", "Billing", "credit-card"),
    NavigationEntry::new("/enterprise/notifications", "Notifications", "bell"),
    NavigationEntry::new("/enterprise/settings", "Settings", "settings"),
];

const ADMIN_NAV: &[NavigationEntry] = &[
    NavigationEntry::new("/admin", "Overview", "layout-dashboard"),
    NavigationEntry::new("/admin/users", "Users", "users"),
    NavigationEntry::new("/admin/verifiers", "Verifiers", "user-check"),
    NavigationEntry::new("/admin/enterprises", "Enterprises", "building-2"),
    NavigationEntry::new("/admin/verifications", "Verifications", "shield-check"),
    NavigationEntry::new("/admin/transactions", "Transactions", "receipt"),
    NavigationEntry::new("/admin/reports", "Reports", "bar-chart-3"),
    NavigationEntry::new("/admin/audit-logs", "Audit Logs", "scroll-text"),
    NavigationEntry::new("/admin/settings", "Settings", "settings"),
];

// =============================================================================
// RESOLVER
// =============================================================================

/// Navigation sequence for a role.
#[must_use]
pub const fn navigation_for(role: Role) -> &'static [NavigationEntry] {
    match role {
        Role::EndUser => END_USER_NAV,
        Role::Verifier => VERIFIER_NAV,
        Role::Enterprise => ENTERPRISE_NAV,
        Role::Admin => ADMIN_NAV,
    }
}

/// Navigation sequence for an untyped role name.
///
/// Unknown names fail with `InvalidRole`; they never resolve to another
/// role's navigation.
pub fn navigation_for_name(name: &str) -> Result<&'static [NavigationEntry], VeridashError> {
    let role: Role = name.parse()?;
    Ok(navigation_for(role))
}

/// Landing path of a role: the path of its first navigation entry.
#[must_use]
pub const fn landing_path(role: Role) -> &'static str {
    navigation_for(role)[0].path
}

/// Root path shared by all of a role's entries (the landing path).
///
/// Every entry of a role's table lives under this prefix.
#[must_use]
pub const fn role_prefix(role: Role) -> &'static str {
    landing_path(role)
}

// =============================================================================
// TESTS
// =============================================================================
