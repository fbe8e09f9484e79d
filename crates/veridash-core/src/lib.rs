//! # veridash-core
//!
//! The session core for the Veridash identity-verification dashboard - THE LOGIC.
//!
//! This crate decides who is logged in, as which role, what navigation that
//! role sees, and which routes it may reach.
//!
//! ## Components
//!
//! - `session` → `SessionStore` state machine (anonymous / pending / authenticated)
//! - `navigation` → role-to-navigation resolver over compile-time tables
//! - `guard` → route guard (allow / redirect to login / redirect to landing)
//! - `notifications` → inbox with read state
//! - `preferences` → namespaced UI preferences, in memory or redb-backed
//!
//! ## Architectural Constraints
//!
//! - NO async, NO network dependencies (pure Rust)
//! - The credential check is a collaborator owned by the app layer; the core
//!   only sees its answer through `SessionStore::complete`
//! - No global state: callers own their `SessionStore`

// =============================================================================
// MODULES
// =============================================================================

pub mod guard;
pub mod navigation;
pub mod notifications;
pub mod preferences;
pub mod primitives;
pub mod session;
pub mod types;

// =============================================================================
// RE-EXPORTS: Core Types (from types module)
// =============================================================================

pub use types::{AuthFailure, Credentials, Identity, Role, UserId, VeridashError};

// =============================================================================
// RE-EXPORTS: Session, Navigation, Guard
// =============================================================================

pub use guard::{GuardDecision, RouteAccess};
pub use navigation::{NavigationEntry, landing_path, navigation_for, navigation_for_name};
pub use notifications::{Inbox, Notification, NotificationKind};
pub use preferences::PreferenceStore;
pub use session::{
    AuthIntent, CompletionOutcome, LoginTicket, Session, SessionPhase, SessionStore,
};
