//! Integration tests for the Veridash HTTP API.
//!
//! Uses axum-test to test the API handlers without starting a real server.

// Allow unwrap and panic in tests - these are standard for test code
#![allow(clippy::unwrap_used, clippy::panic)]

use async_trait::async_trait;
use axum::http::{StatusCode, header};
use axum_test::TestServer;
use serde_json::json;
use std::sync::Arc;
use tokio::sync::Notify;
use veridash::api::{
    AppState, AuthResponse, ErrorResponse, GuardResponse, HealthResponse, MarkReadResponse,
    NavigationResponse, NotificationsResponse, PaymentConfigResponse, PreferencesResponse,
    SessionResponse, create_router,
};
use veridash::auth::{CredentialCheck, MockCredentialChecker, identity_for};
use veridash::config::Config;
use veridash_core::{AuthFailure, Credentials, Identity, PreferenceStore, Role};

// =============================================================================
// HELPER FUNCTIONS
// =============================================================================

/// Credential check that answers only when the test opens the gate.
struct GatedChecker {
    gate: Arc<Notify>,
}

#[async_trait]
impl CredentialCheck for GatedChecker {
    async fn check(&self, credentials: &Credentials) -> Result<Identity, AuthFailure> {
        self.gate.notified().await;
        identity_for(credentials)
    }
}

fn test_config() -> Config {
    let mut config = Config::default();
    config.payments.paystack_public_key = "pk_test_123".to_string();
    config.http.rate_limit = 0;
    config
}

/// Create a test server with an instant credential check.
fn create_test_server() -> TestServer {
    let state = AppState::new(
        test_config(),
        Arc::new(MockCredentialChecker::instant()),
        PreferenceStore::in_memory(),
    );
    TestServer::new(create_router(state)).unwrap()
}

/// Create a test server whose credential check waits on the returned gate.
fn create_gated_test_server() -> (TestServer, Arc<Notify>) {
    let gate = Arc::new(Notify::new());
    let checker = GatedChecker {
        gate: Arc::clone(&gate),
    };
    let state = AppState::new(test_config(), Arc::new(checker), PreferenceStore::in_memory());
    (TestServer::new(create_router(state)).unwrap(), gate)
}

async fn login_as(server: &TestServer, role: &str) -> AuthResponse {
    let response = server
        .post("/session/login")
        .json(&json!({ "email": "grace@example.com", "password": "secret", "role": role }))
        .await;
    response.assert_status_ok();
    response.json::<AuthResponse>()
}

async fn wait_until_pending(server: &TestServer) {
    for _ in 0..1000 {
        let session = server.get("/session").await.json::<SessionResponse>();
        if session.pending {
            return;
        }
        tokio::task::yield_now().await;
    }
    panic!("login never became pending");
}

// =============================================================================
// HEALTH & CONFIG
// =============================================================================

#[tokio::test]
async fn test_health_endpoint() {
    let server = create_test_server();

    let response = server.get("/health").await;

    response.assert_status_ok();
    let health: HealthResponse = response.json();
    assert_eq!(health.status, "ok");
}

#[tokio::test]
async fn test_payment_config_is_never_cached() {
    let server = create_test_server();

    let response = server.get("/api/config").await;

    response.assert_status_ok();
    assert_eq!(response.header(header::CACHE_CONTROL), "no-store");
    let body: serde_json::Value = response.json();
    assert_eq!(body, json!({ "paystackPublicKey": "pk_test_123" }));
    let config: PaymentConfigResponse = response.json();
    assert_eq!(config.paystack_public_key, "pk_test_123");
}

// =============================================================================
// SESSION
// =============================================================================

#[tokio::test]
async fn test_fresh_session_is_anonymous() {
    let server = create_test_server();

    let session: SessionResponse = server.get("/session").await.json();

    assert!(!session.authenticated);
    assert!(!session.pending);
    assert_eq!(session.role, None);
    assert_eq!(session.user_id, None);
}

#[tokio::test]
async fn test_admin_login_lands_on_admin() {
    let server = create_test_server();

    let auth = login_as(&server, "admin").await;

    assert_eq!(auth.destination, "/admin");
    assert!(auth.session.authenticated);
    assert_eq!(auth.session.role, Some(Role::Admin));
    assert_eq!(auth.session.email.as_deref(), Some("grace@example.com"));

    let session: SessionResponse = server.get("/session").await.json();
    assert_eq!(session, auth.session);
}

#[tokio::test]
async fn test_login_without_role_is_end_user() {
    let server = create_test_server();

    let response = server
        .post("/session/login")
        .json(&json!({ "email": "ada@example.com", "password": "pw" }))
        .await;

    response.assert_status_ok();
    let auth: AuthResponse = response.json();
    assert_eq!(auth.destination, "/dashboard");
    assert_eq!(auth.session.role, Some(Role::EndUser));
}

#[tokio::test]
async fn test_login_with_invalid_role_is_rejected() {
    let server = create_test_server();

    let response = server
        .post("/session/login")
        .json(&json!({ "email": "ada@example.com", "password": "pw", "role": "superuser" }))
        .await;

    response.assert_status_bad_request();
    let error: ErrorResponse = response.json();
    assert_eq!(error.code, "invalid_role");

    let session: SessionResponse = server.get("/session").await.json();
    assert!(!session.authenticated);
    assert!(!session.pending);
}

#[tokio::test]
async fn test_failed_login_records_failure() {
    let server = create_test_server();

    let response = server
        .post("/session/login")
        .json(&json!({ "email": "not-an-email", "password": "pw" }))
        .await;

    response.assert_status(StatusCode::UNAUTHORIZED);
    let error: ErrorResponse = response.json();
    assert_eq!(error.code, "authentication_failed");

    let session: SessionResponse = server.get("/session").await.json();
    assert!(!session.authenticated);
    assert!(!session.pending);
    assert!(session.last_failure.is_some());
}

#[tokio::test]
async fn test_login_while_authenticated_conflicts() {
    let server = create_test_server();
    login_as(&server, "verifier").await;

    let response = server
        .post("/session/login")
        .json(&json!({ "email": "other@example.com", "password": "pw", "role": "admin" }))
        .await;

    response.assert_status(StatusCode::CONFLICT);
    let error: ErrorResponse = response.json();
    assert_eq!(error.code, "already_authenticated");

    let session: SessionResponse = server.get("/session").await.json();
    assert_eq!(session.role, Some(Role::Verifier));
}

#[tokio::test]
async fn test_signup_lands_on_onboarding_as_end_user() {
    let server = create_test_server();

    let response = server
        .post("/session/signup")
        .json(&json!({
            "email": "new@example.com",
            "password": "pw",
            "display_name": "New Person"
        }))
        .await;

    response.assert_status_ok();
    let auth: AuthResponse = response.json();
    assert_eq!(auth.destination, "/onboarding");
    assert_eq!(auth.session.role, Some(Role::EndUser));
    assert_eq!(auth.session.display_name.as_deref(), Some("New Person"));
}

#[tokio::test]
async fn test_logout_clears_session() {
    let server = create_test_server();
    login_as(&server, "enterprise").await;

    let response = server.post("/session/logout").await;

    response.assert_status_ok();
    let session: SessionResponse = response.json();
    assert!(!session.authenticated);
    assert_eq!(session.role, None);
    assert_eq!(session.user_id, None);

    // Logging out twice is harmless.
    server.post("/session/logout").await.assert_status_ok();
}

// =============================================================================
// SINGLE-FLIGHT & SUPERSESSION
// =============================================================================

#[tokio::test]
async fn test_concurrent_login_is_rejected() {
    let (server, gate) = create_gated_test_server();

    let first = async {
        server
            .post("/session/login")
            .json(&json!({ "email": "a@example.com", "password": "pw", "role": "admin" }))
            .await
    };

    let second = async {
        wait_until_pending(&server).await;
        let response = server
            .post("/session/login")
            .json(&json!({ "email": "b@example.com", "password": "pw", "role": "verifier" }))
            .await;
        gate.notify_one();
        response
    };

    let (first, second) = tokio::join!(first, second);

    second.assert_status(StatusCode::CONFLICT);
    assert_eq!(second.json::<ErrorResponse>().code, "login_in_progress");

    first.assert_status_ok();
    let auth: AuthResponse = first.json();
    assert_eq!(auth.destination, "/admin");
    assert_eq!(auth.session.email.as_deref(), Some("a@example.com"));
}

#[tokio::test]
async fn test_logout_supersedes_pending_login() {
    let (server, gate) = create_gated_test_server();

    let login = async {
        server
            .post("/session/login")
            .json(&json!({ "email": "a@example.com", "password": "pw", "role": "admin" }))
            .await
    };

    let logout = async {
        wait_until_pending(&server).await;
        let response = server.post("/session/logout").await;
        gate.notify_one();
        response
    };

    let (login, logout) = tokio::join!(login, logout);

    logout.assert_status_ok();
    login.assert_status(StatusCode::CONFLICT);
    assert_eq!(login.json::<ErrorResponse>().code, "login_superseded");

    let session: SessionResponse = server.get("/session").await.json();
    assert!(!session.authenticated);
    assert!(!session.pending);
}

// =============================================================================
// NAVIGATION
// =============================================================================

#[tokio::test]
async fn test_navigation_requires_login() {
    let server = create_test_server();

    let response = server.get("/navigation").await;

    response.assert_status(StatusCode::UNAUTHORIZED);
    assert_eq!(response.json::<ErrorResponse>().code, "unauthenticated");
}

#[tokio::test]
async fn test_navigation_follows_session_role() {
    let server = create_test_server();
    login_as(&server, "admin").await;

    let nav: NavigationResponse = server.get("/navigation").await.json();

    assert_eq!(nav.role, Role::Admin);
    assert_eq!(nav.landing, "/admin");
    assert_eq!(nav.entries.len(), 9);
    assert_eq!(nav.entries[0].path, "/admin");
    assert!(nav.entries.iter().all(|e| e.path.starts_with("/admin")));
}

#[tokio::test]
async fn test_role_navigation_by_name() {
    let server = create_test_server();

    let response = server.get("/navigation/verifier").await;
    response.assert_status_ok();
    let nav: NavigationResponse = response.json();
    assert_eq!(nav.role, Role::Verifier);
    assert_eq!(nav.landing, "/verifier");

    let response = server.get("/navigation/superuser").await;
    response.assert_status_bad_request();
    assert_eq!(response.json::<ErrorResponse>().code, "invalid_role");
}

// =============================================================================
// GUARD
// =============================================================================

#[tokio::test]
async fn test_guard_redirects_anonymous_to_login() {
    let server = create_test_server();

    let guard: GuardResponse = server
        .get("/guard")
        .add_query_param("path", "/admin/users")
        .await
        .json();

    assert_eq!(guard.decision, "redirect_to_login");
    assert_eq!(guard.target, "/login");
    assert_eq!(guard.return_to.as_deref(), Some("/admin/users"));
}

#[tokio::test]
async fn test_guard_sends_wrong_role_to_own_landing() {
    let server = create_test_server();
    login_as(&server, "verifier").await;

    let guard: GuardResponse = server
        .get("/guard")
        .add_query_param("path", "/admin/users")
        .await
        .json();
    assert_eq!(guard.decision, "redirect_to_landing");
    assert_eq!(guard.target, "/verifier");

    let guard: GuardResponse = server
        .get("/guard")
        .add_query_param("path", "/verifier")
        .await
        .json();
    assert_eq!(guard.decision, "allow");
    assert_eq!(guard.target, "/verifier");
}

#[tokio::test]
async fn test_guard_allows_public_paths() {
    let server = create_test_server();

    let guard: GuardResponse = server
        .get("/guard")
        .add_query_param("path", "/login")
        .await
        .json();

    assert_eq!(guard.decision, "allow");
    assert_eq!(guard.return_to, None);
}

// =============================================================================
// PREFERENCES
// =============================================================================

#[tokio::test]
async fn test_preferences_default_and_update() {
    let server = create_test_server();

    let prefs: PreferencesResponse = server.get("/preferences").await.json();
    assert!(!prefs.sidebar_collapsed);

    let response = server
        .put("/preferences")
        .json(&json!({ "sidebar_collapsed": true }))
        .await;
    response.assert_status_ok();
    assert!(response.json::<PreferencesResponse>().sidebar_collapsed);

    let prefs: PreferencesResponse = server.get("/preferences").await.json();
    assert!(prefs.sidebar_collapsed);
}

#[tokio::test]
async fn test_preferences_survive_server_restart() {
    let dir = tempfile::tempdir().unwrap();
    let mut config = test_config();
    config.preferences.database = Some(dir.path().join("prefs.redb"));

    {
        let server = TestServer::new(create_router(AppState::from_config(config.clone()).unwrap()))
            .unwrap();
        server
            .put("/preferences")
            .json(&json!({ "sidebar_collapsed": true }))
            .await
            .assert_status_ok();
    }

    let server =
        TestServer::new(create_router(AppState::from_config(config).unwrap())).unwrap();
    let prefs: PreferencesResponse = server.get("/preferences").await.json();
    assert!(prefs.sidebar_collapsed);
}

// =============================================================================
// NOTIFICATIONS
// =============================================================================

#[tokio::test]
async fn test_notifications_require_login() {
    let server = create_test_server();

    server
        .get("/notifications")
        .await
        .assert_status(StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_notifications_mark_read() {
    let server = create_test_server();
    login_as(&server, "admin").await;

    let inbox: NotificationsResponse = server.get("/notifications").await.json();
    assert_eq!(inbox.items.len(), 4);
    assert_eq!(inbox.unread, 4);

    let marked: MarkReadResponse = server.post("/notifications/1/read").await.json();
    assert_eq!(marked.changed, 1);
    assert_eq!(marked.unread, 3);

    let again: MarkReadResponse = server.post("/notifications/1/read").await.json();
    assert_eq!(again.changed, 0);
    assert_eq!(again.unread, 3);

    let missing = server.post("/notifications/99/read").await;
    missing.assert_status_not_found();
    assert_eq!(missing.json::<ErrorResponse>().code, "notification_not_found");

    let all: MarkReadResponse = server.post("/notifications/read-all").await.json();
    assert_eq!(all.changed, 3);
    assert_eq!(all.unread, 0);
}

#[tokio::test]
async fn test_inbox_follows_the_logged_in_role() {
    let server = create_test_server();
    login_as(&server, "verifier").await;
    server.post("/notifications/read-all").await.assert_status_ok();
    server.post("/session/logout").await.assert_status_ok();
    server
        .get("/notifications")
        .await
        .assert_status(StatusCode::UNAUTHORIZED);

    login_as(&server, "admin").await;
    let inbox: NotificationsResponse = server.get("/notifications").await.json();
    assert_eq!(inbox.unread, 4);
}

#[tokio::test]
async fn test_inbox_is_seeded_by_the_session_not_the_request() {
    let state = AppState::new(
        test_config(),
        Arc::new(MockCredentialChecker::instant()),
        PreferenceStore::in_memory(),
    );
    let server = TestServer::new(create_router(state.clone())).unwrap();

    let signed_in = state
        .session
        .login("a@example.com".into(), "pw".into(), Some(Role::Admin))
        .await
        .unwrap();
    assert_eq!(signed_in.destination, "/admin");

    let inbox: NotificationsResponse = server.get("/notifications").await.json();
    assert_eq!(inbox.items.len(), 4);
    assert_eq!(inbox.unread, 4);

    state.session.logout().await;
    server
        .get("/notifications")
        .await
        .assert_status(StatusCode::UNAUTHORIZED);
    assert!(state.session.inbox().read().await.is_empty());
}
