//! # Session Handle
//!
//! Shared, cloneable access to the application's one `SessionStore`.
//!
//! Login and signup span an await point (the credential check). The store's
//! lock is taken twice, once to begin and once to complete, and is never held
//! across the check. Readers therefore see `pending` while the check runs, and
//! `logout` can take the lock at any moment and supersede the login.
//!
//! The handle also owns the notification inbox of the logged-in role. It is
//! seeded and cleared while the store's write lock is held, so the inbox
//! always belongs to the session the store holds.

use super::checker::CredentialCheck;
use std::sync::Arc;
use tokio::sync::RwLock;
use veridash_core::{
    CompletionOutcome, Credentials, Identity, Inbox, LoginTicket, Role, Session, SessionStore,
    VeridashError,
};

/// A login or signup that authenticated the session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignedIn {
    /// Where the dashboard should navigate next.
    pub destination: &'static str,
    /// Session as it was when the login completed.
    pub session: Session,
}

/// Handle to the session store and its credential check.
#[derive(Clone)]
pub struct SessionHandle {
    store: Arc<RwLock<SessionStore>>,
    inbox: Arc<RwLock<Inbox>>,
    checker: Arc<dyn CredentialCheck>,
}

impl std::fmt::Debug for SessionHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionHandle").finish_non_exhaustive()
    }
}

impl SessionHandle {
    /// Create a handle around a fresh anonymous store.
    pub fn new(checker: Arc<dyn CredentialCheck>) -> Self {
        Self {
            store: Arc::new(RwLock::new(SessionStore::new())),
            inbox: Arc::new(RwLock::new(Inbox::default())),
            checker,
        }
    }

    /// Notification inbox of the logged-in role. Empty while anonymous.
    pub fn inbox(&self) -> &RwLock<Inbox> {
        &self.inbox
    }

    /// Current session snapshot.
    pub async fn snapshot(&self) -> Session {
        self.store.read().await.snapshot()
    }

    /// Log in as `role` (end user when `None`).
    ///
    /// Returns the path to navigate to and the new session on success.
    pub async fn login(
        &self,
        email: String,
        password: String,
        role: Option<Role>,
    ) -> Result<SignedIn, VeridashError> {
        let ticket = self.store.write().await.begin_login(role)?;
        let credentials = Credentials::new(email, password, ticket.role());
        tracing::info!(
            event = "login_started",
            generation = ticket.generation(),
            role = %ticket.role(),
            "Login started"
        );
        self.run_check(ticket, credentials, None).await
    }

    /// Sign up. The session always becomes an end user.
    ///
    /// Returns the onboarding path and the new session on success.
    pub async fn signup(
        &self,
        email: String,
        password: String,
        display_name: Option<String>,
    ) -> Result<SignedIn, VeridashError> {
        let ticket = self.store.write().await.begin_signup()?;
        let credentials = Credentials::new(email, password, ticket.role());
        tracing::info!(
            event = "signup_started",
            generation = ticket.generation(),
            "Signup started"
        );
        self.run_check(ticket, credentials, display_name).await
    }

    /// Clear the session. Supersedes any pending login.
    pub async fn logout(&self) -> Session {
        let mut store = self.store.write().await;
        let was_pending = store.is_pending();
        *self.inbox.write().await = Inbox::default();
        if store.logout() {
            tracing::info!(
                event = "logout",
                superseded_pending = was_pending,
                "Session cleared"
            );
        }
        store.snapshot()
    }

    /// Run the credential check on its own task so the login still resolves
    /// (and the store leaves `pending`) if the caller goes away mid-check.
    async fn run_check(
        &self,
        ticket: LoginTicket,
        credentials: Credentials,
        display_name: Option<String>,
    ) -> Result<SignedIn, VeridashError> {
        let generation = ticket.generation();
        let store = Arc::clone(&self.store);
        let inbox = Arc::clone(&self.inbox);
        let checker = Arc::clone(&self.checker);

        let task = tokio::spawn(async move {
            let answer = checker
                .check(&credentials)
                .await
                .map(|identity| rename(identity, display_name));

            let mut store = store.write().await;
            let outcome = store.complete(ticket, answer);
            if let (CompletionOutcome::Authenticated { .. }, Some(role)) = (&outcome, store.role())
            {
                *inbox.write().await = Inbox::seeded_for(role);
            }
            let session = store.snapshot();
            drop(store);

            log_outcome(generation, &outcome);
            (outcome, session)
        });

        match task.await {
            Ok((outcome, session)) => outcome.into_result().map(|destination| SignedIn {
                destination,
                session,
            }),
            Err(e) => {
                tracing::error!("Credential check task failed: {}", e);
                self.release_stuck(generation, e.to_string()).await;
                Err(VeridashError::AuthenticationFailed(
                    "credential check aborted".to_string(),
                ))
            }
        }
    }

    /// Leave `pending` if it still belongs to `generation`, whose task died
    /// before completing.
    async fn release_stuck(&self, generation: u64, reason: String) {
        let mut store = self.store.write().await;
        if store.is_pending() && store.generation() == generation {
            store.logout();
            tracing::warn!(event = "login_aborted", reason = %reason, "Pending login cleared");
        }
    }
}

fn rename(mut identity: Identity, display_name: Option<String>) -> Identity {
    if let Some(name) = display_name.filter(|n| !n.trim().is_empty()) {
        identity.display_name = name.trim().to_string();
    }
    identity
}

fn log_outcome(generation: u64, outcome: &CompletionOutcome) {
    match outcome {
        CompletionOutcome::Authenticated { destination } => tracing::info!(
            event = "login_succeeded",
            generation,
            destination,
            "Session authenticated"
        ),
        CompletionOutcome::Failed { reason } => tracing::warn!(
            event = "auth_failure",
            generation,
            reason = %reason,
            "Authentication failed"
        ),
        CompletionOutcome::Discarded => tracing::info!(
            event = "login_discarded",
            generation,
            "Login superseded before completion; result dropped"
        ),
    }
}

// =============================================================================
// TESTS
// =============================================================================
