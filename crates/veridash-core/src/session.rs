//! # Session Module
//!
//! The session store: single source of truth for who is logged in and as
//! which role.
//!
//! ## State Machine
//!
//! ```text
//!             begin_login / begin_signup
//!   Anonymous ─────────────────────────────▶ Pending
//!       ▲  ▲                                   │  │
//!       │  └──────── complete(Err) ────────────┘  │ complete(Ok)
//!       │                                         ▼
//!       └────────────── logout ─────────── Authenticated
//! ```
//!
//! `logout` also leaves `Pending` directly, which supersedes the in-flight
//! login.
//!
//! ## Supersession
//!
//! The store stays synchronous: a login is split into `begin_*`, which hands
//! out a `LoginTicket` stamped with a fresh generation, and `complete`, which
//! applies the collaborator's answer only if the store is still pending on
//! that same generation. A completion arriving after a logout (or after a
//! later login) is discarded without touching state.

use crate::navigation::landing_path;
use crate::primitives::ONBOARDING_PATH;
use crate::{AuthFailure, Identity, Role, UserId, VeridashError};
use serde::Serialize;

// =============================================================================
// TICKETS & OUTCOMES
// =============================================================================

/// What kind of operation put the session into `Pending`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AuthIntent {
    Login,
    Signup,
}

/// Proof of an in-flight login or signup.
///
/// Not `Clone`: each begin hands out exactly one ticket, consumed by
/// `complete`.
#[derive(Debug, PartialEq, Eq)]
pub struct LoginTicket {
    generation: u64,
    intent: AuthIntent,
    role: Role,
}

impl LoginTicket {
    /// Generation stamp captured when the operation began.
    #[must_use]
    pub fn generation(&self) -> u64 {
        self.generation
    }

    #[must_use]
    pub fn intent(&self) -> AuthIntent {
        self.intent
    }

    /// Role the session will carry if the operation succeeds.
    #[must_use]
    pub fn role(&self) -> Role {
        self.role
    }
}

/// Result of applying a credential-check answer to the store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CompletionOutcome {
    /// The session is now authenticated. `destination` is where the caller
    /// should navigate next.
    Authenticated { destination: &'static str },
    /// The check failed; the session is anonymous again.
    Failed { reason: String },
    /// The ticket was superseded; nothing changed.
    Discarded,
}

impl CompletionOutcome {
    /// Collapse the outcome into a `Result` for callers that propagate with `?`.
    pub fn into_result(self) -> Result<&'static str, VeridashError> {
        match self {
            CompletionOutcome::Authenticated { destination } => Ok(destination),
            CompletionOutcome::Failed { reason } => {
                Err(VeridashError::AuthenticationFailed(reason))
            }
            CompletionOutcome::Discarded => Err(VeridashError::StaleCompletionDiscarded),
        }
    }
}

// =============================================================================
// SNAPSHOT
// =============================================================================

/// Coarse phase of the session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionPhase {
    Anonymous,
    Pending,
    Authenticated,
}

/// Read-only view of the session handed to consumers.
///
/// Built from the store's internal state, so `authenticated` is true exactly
/// when `user_id` is set, and `pending` is never true alongside it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Session {
    pub user_id: Option<UserId>,
    pub display_name: Option<String>,
    pub email: Option<String>,
    pub role: Option<Role>,
    pub avatar: Option<String>,
    pub authenticated: bool,
    pub pending: bool,
    /// Reason of the most recent failed login or signup.
    pub last_failure: Option<String>,
}

impl Session {
    /// The empty, unauthenticated session of a freshly started application.
    #[must_use]
    pub fn anonymous() -> Self {
        Self {
            user_id: None,
            display_name: None,
            email: None,
            role: None,
            avatar: None,
            authenticated: false,
            pending: false,
            last_failure: None,
        }
    }

    #[must_use]
    pub fn phase(&self) -> SessionPhase {
        if self.authenticated {
            SessionPhase::Authenticated
        } else if self.pending {
            SessionPhase::Pending
        } else {
            SessionPhase::Anonymous
        }
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::anonymous()
    }
}

// =============================================================================
// STORE
// =============================================================================

#[derive(Debug, Clone, PartialEq, Eq)]
enum SessionState {
    Anonymous,
    Pending {
        generation: u64,
        intent: AuthIntent,
        role: Role,
    },
    Authenticated {
        identity: Identity,
        role: Role,
    },
}

/// Owner of the session state.
///
/// All mutation goes through `begin_login`, `begin_signup`, `complete` and
/// `logout`. There is no global instance; the application creates one and
/// hands out access to it.
#[derive(Debug)]
pub struct SessionStore {
    state: SessionState,
    /// Last generation handed out. Only grows.
    generation: u64,
    last_failure: Option<String>,
}

impl Default for SessionStore {
    fn default() -> Self {
        Self::new()
    }
}

impl SessionStore {
    /// Create an anonymous store.
    #[must_use]
    pub fn new() -> Self {
        Self {
            state: SessionState::Anonymous,
            generation: 0,
            last_failure: None,
        }
    }

    /// Current session snapshot.
    #[must_use]
    pub fn snapshot(&self) -> Session {
        let mut session = Session::anonymous();
        session.last_failure = self.last_failure.clone();
        match &self.state {
            SessionState::Anonymous => {}
            SessionState::Pending { .. } => session.pending = true,
            SessionState::Authenticated { identity, role } => {
                session.user_id = Some(identity.user_id.clone());
                session.display_name = Some(identity.display_name.clone());
                session.email = Some(identity.email.clone());
                session.avatar = identity.avatar.clone();
                session.role = Some(*role);
                session.authenticated = true;
            }
        }
        session
    }

    #[must_use]
    pub fn phase(&self) -> SessionPhase {
        match self.state {
            SessionState::Anonymous => SessionPhase::Anonymous,
            SessionState::Pending { .. } => SessionPhase::Pending,
            SessionState::Authenticated { .. } => SessionPhase::Authenticated,
        }
    }

    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        matches!(self.state, SessionState::Authenticated { .. })
    }

    #[must_use]
    pub fn is_pending(&self) -> bool {
        matches!(self.state, SessionState::Pending { .. })
    }

    /// Role of the authenticated session, if any.
    #[must_use]
    pub fn role(&self) -> Option<Role> {
        match self.state {
            SessionState::Authenticated { role, .. } => Some(role),
            _ => None,
        }
    }

    /// Generation of the most recently started login or signup.
    #[must_use]
    pub fn generation(&self) -> u64 {
        self.generation
    }

    // =========================================================================
    // LOGIN / SIGNUP
    // =========================================================================

    /// Start a login. `None` logs in as an end user.
    ///
    /// # Errors
    ///
    /// - `ConcurrentLoginRejected` while another login or signup is pending.
    /// - `AlreadyAuthenticated` if the session is authenticated.
    ///
    /// Neither error changes the session.
    pub fn begin_login(&mut self, role: Option<Role>) -> Result<LoginTicket, VeridashError> {
        self.begin(AuthIntent::Login, role.unwrap_or_default())
    }

    /// Start a signup. Signups always produce an end-user session.
    pub fn begin_signup(&mut self) -> Result<LoginTicket, VeridashError> {
        self.begin(AuthIntent::Signup, Role::EndUser)
    }

    fn begin(&mut self, intent: AuthIntent, role: Role) -> Result<LoginTicket, VeridashError> {
        match self.state {
            SessionState::Pending { .. } => return Err(VeridashError::ConcurrentLoginRejected),
            SessionState::Authenticated { .. } => return Err(VeridashError::AlreadyAuthenticated),
            SessionState::Anonymous => {}
        }

        self.generation = self.generation.saturating_add(1);
        self.last_failure = None;
        self.state = SessionState::Pending {
            generation: self.generation,
            intent,
            role,
        };

        Ok(LoginTicket {
            generation: self.generation,
            intent,
            role,
        })
    }

    /// Apply the credential check's answer for `ticket`.
    ///
    /// The answer is applied only if the store is still pending on the
    /// ticket's generation; otherwise it is `Discarded` and the state is
    /// left untouched.
    pub fn complete(
        &mut self,
        ticket: LoginTicket,
        outcome: Result<Identity, AuthFailure>,
    ) -> CompletionOutcome {
        let current = match self.state {
            SessionState::Pending { generation, .. } => generation,
            _ => return CompletionOutcome::Discarded,
        };
        if current != ticket.generation {
            return CompletionOutcome::Discarded;
        }

        match outcome {
            Ok(identity) => {
                let destination = match ticket.intent {
                    AuthIntent::Login => landing_path(ticket.role),
                    AuthIntent::Signup => ONBOARDING_PATH,
                };
                self.state = SessionState::Authenticated {
                    identity,
                    role: ticket.role,
                };
                CompletionOutcome::Authenticated { destination }
            }
            Err(failure) => {
                self.state = SessionState::Anonymous;
                self.last_failure = Some(failure.reason.clone());
                CompletionOutcome::Failed {
                    reason: failure.reason,
                }
            }
        }
    }

    // =========================================================================
    // LOGOUT
    // =========================================================================

    /// Clear the session back to its initial state.
    ///
    /// Works from any state and never fails. A pending login is superseded:
    /// its eventual `complete` is discarded. Returns `false` when the session
    /// was already in its initial state.
    pub fn logout(&mut self) -> bool {
        let changed = self.state != SessionState::Anonymous || self.last_failure.is_some();
        self.state = SessionState::Anonymous;
        self.last_failure = None;
        changed
    }
}

// =============================================================================
// TESTS
// =============================================================================
