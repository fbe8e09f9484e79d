//! # Veridash HTTP API Module
//!
//! This module implements the HTTP API server using axum.
//!
//! ## Endpoints
//!
//! - `GET  /health` - Health check
//! - `GET  /api/config` - Public payment configuration (`Cache-Control: no-store`)
//! - `GET  /session` - Current session snapshot
//! - `POST /session/login` - Log in (`{email, password, role?}`)
//! - `POST /session/signup` - Sign up (`{email, password, display_name?}`)
//! - `POST /session/logout` - Log out
//! - `GET  /navigation` - Navigation of the logged-in role
//! - `GET  /navigation/{role}` - Navigation of any role
//! - `GET  /guard?path=` - Route guard decision for the current session
//! - `GET|PUT /preferences` - Sidebar preference
//! - `GET  /notifications` - Inbox of the logged-in role
//! - `POST /notifications/{id}/read` - Mark one notification read
//! - `POST /notifications/read-all` - Mark every notification read

mod error;
mod handlers;
mod middleware;
mod types;

pub use error::ApiError;
pub use middleware::{build_cors_layer, create_rate_limiter};
pub use types::{
    AuthResponse, ErrorResponse, GuardQuery, GuardResponse, HealthResponse, LoginRequest,
    MarkReadResponse, NavigationEntryJson, NavigationResponse, NotificationsResponse,
    PaymentConfigResponse, PreferencesResponse, PreferencesUpdate, SessionResponse,
    SignupRequest,
};

use crate::auth::{CredentialCheck, MockCredentialChecker, SessionHandle};
use crate::config::Config;
use axum::{
    Router,
    extract::DefaultBodyLimit,
    middleware as axum_middleware,
    routing::{get, post},
};
use std::sync::Arc;
use tokio::sync::RwLock;
use tower::ServiceBuilder;
use tower_http::trace::TraceLayer;
use veridash_core::{PreferenceStore, VeridashError};

/// Request bodies are small JSON documents.
const MAX_BODY_BYTES: usize = 64 * 1024;

// =============================================================================
// SERVER STATE
// =============================================================================

/// Shared server state.
#[derive(Clone)]
pub struct AppState {
    /// The one session of this dashboard instance, with its inbox.
    pub session: SessionHandle,
    pub preferences: Arc<RwLock<PreferenceStore>>,
    pub config: Arc<Config>,
}

impl AppState {
    /// Create app state from its parts.
    pub fn new(
        config: Config,
        checker: Arc<dyn CredentialCheck>,
        preferences: PreferenceStore,
    ) -> Self {
        Self {
            session: SessionHandle::new(checker),
            preferences: Arc::new(RwLock::new(preferences)),
            config: Arc::new(config),
        }
    }

    /// Build state from configuration: mock credential check with the
    /// configured delay, preferences from the configured redb file (or in
    /// memory).
    pub fn from_config(config: Config) -> Result<Self, VeridashError> {
        let checker = Arc::new(MockCredentialChecker::new(config.auth.login_delay()));
        let preferences = match &config.preferences.database {
            Some(path) => {
                tracing::info!("Preferences: persisted in {:?}", path);
                PreferenceStore::open(path)?
            }
            None => {
                tracing::info!("Preferences: in memory (set VERIDASH_PREFERENCES_DB to persist)");
                PreferenceStore::in_memory()
            }
        };
        Ok(Self::new(config, checker, preferences))
    }
}

// =============================================================================
// ROUTER CREATION
// =============================================================================

/// Create the axum router with all endpoints and middleware.
///
/// Middleware stack (outer to inner):
/// 1. Tracing - logs all requests
/// 2. CORS - handles preflight requests
/// 3. Body limit
/// 4. Rate Limiting - global quota (if enabled)
pub fn create_router(state: AppState) -> Router {
    let cors = build_cors_layer(state.config.http.cors_origins.as_deref());

    let rate_limiter = create_rate_limiter(state.config.http.rate_limit);
    match &rate_limiter {
        Some(_) => tracing::info!(
            "Rate limiting enabled: {} requests/second",
            state.config.http.rate_limit
        ),
        None => tracing::info!("Rate limiting disabled"),
    }

    if state.config.payments.paystack_public_key.is_empty() {
        tracing::warn!(
            "No Paystack public key configured; /api/config will return an empty key. \
             Set VERIDASH_PAYSTACK_PUBLIC_KEY."
        );
    }

    let mut router = Router::new()
        .route("/health", get(handlers::health_handler))
        .route("/api/config", get(handlers::payment_config_handler))
        .route("/session", get(handlers::session_handler))
        .route("/session/login", post(handlers::login_handler))
        .route("/session/signup", post(handlers::signup_handler))
        .route("/session/logout", post(handlers::logout_handler))
        .route("/navigation", get(handlers::current_navigation_handler))
        .route("/navigation/{role}", get(handlers::role_navigation_handler))
        .route("/guard", get(handlers::guard_handler))
        .route(
            "/preferences",
            get(handlers::get_preferences_handler).put(handlers::put_preferences_handler),
        )
        .route("/notifications", get(handlers::notifications_handler))
        .route(
            "/notifications/read-all",
            post(handlers::mark_all_read_handler),
        )
        .route(
            "/notifications/{id}/read",
            post(handlers::mark_read_handler),
        );

    if let Some(limiter) = rate_limiter {
        router = router.layer(axum_middleware::from_fn_with_state(
            limiter,
            middleware::rate_limit_middleware,
        ));
    }

    router
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(cors)
                .layer(DefaultBodyLimit::max(MAX_BODY_BYTES)),
        )
        .with_state(state)
}

// =============================================================================
// SERVER STARTUP
// =============================================================================

/// Start the HTTP server.
pub async fn run_server(config: Config) -> Result<(), VeridashError> {
    let addr = config.bind_addr();
    let state = AppState::from_config(config)?;
    let router = create_router(state);

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|e| VeridashError::IoError(format!("Bind failed: {}", e)))?;

    tracing::info!("Veridash HTTP server listening on {}", addr);

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| VeridashError::IoError(format!("Server error: {}", e)))
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
}
