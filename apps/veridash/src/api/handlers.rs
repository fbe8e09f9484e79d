//! # API Endpoint Handlers
//!
//! This module implements the actual HTTP endpoint handlers.

use super::{
    AppState,
    error::ApiError,
    types::{
        AuthResponse, GuardQuery, GuardResponse, HealthResponse, LoginRequest, MarkReadResponse,
        NavigationResponse, NotificationsResponse, PaymentConfigResponse, PreferencesResponse,
        PreferencesUpdate, SessionResponse, SignupRequest,
    },
};
use axum::{
    Json,
    extract::{Path, Query, State},
    http::header,
    response::IntoResponse,
};
use veridash_core::{Role, guard};

// =============================================================================
// HEALTH HANDLER
// =============================================================================

/// Health check endpoint.
pub async fn health_handler() -> impl IntoResponse {
    Json(HealthResponse::default())
}

// =============================================================================
// PAYMENT CONFIG HANDLER
// =============================================================================

/// Public payment key, never cached.
pub async fn payment_config_handler(State(state): State<AppState>) -> impl IntoResponse {
    let response = PaymentConfigResponse {
        paystack_public_key: state.config.payments.paystack_public_key.clone(),
    };
    ([(header::CACHE_CONTROL, "no-store")], Json(response))
}

// =============================================================================
// SESSION HANDLERS
// =============================================================================

/// Current session snapshot.
pub async fn session_handler(State(state): State<AppState>) -> Json<SessionResponse> {
    Json(state.session.snapshot().await.into())
}

/// Log in. Resolves once the credential check answers.
pub async fn login_handler(
    State(state): State<AppState>,
    Json(request): Json<LoginRequest>,
) -> Result<Json<AuthResponse>, ApiError> {
    let role = request
        .role
        .as_deref()
        .map(str::parse::<Role>)
        .transpose()?;

    let signed_in = state
        .session
        .login(request.email, request.password, role)
        .await?;

    Ok(Json(signed_in.into()))
}

/// Sign up. Always an end user, always lands on onboarding.
pub async fn signup_handler(
    State(state): State<AppState>,
    Json(request): Json<SignupRequest>,
) -> Result<Json<AuthResponse>, ApiError> {
    let signed_in = state
        .session
        .signup(request.email, request.password, request.display_name)
        .await?;

    Ok(Json(signed_in.into()))
}

/// Log out. Always succeeds.
pub async fn logout_handler(State(state): State<AppState>) -> Json<SessionResponse> {
    Json(state.session.logout().await.into())
}

// =============================================================================
// NAVIGATION HANDLERS
// =============================================================================

/// Navigation of the logged-in role.
pub async fn current_navigation_handler(
    State(state): State<AppState>,
) -> Result<Json<NavigationResponse>, ApiError> {
    let role = current_role(&state).await?;
    Ok(Json(NavigationResponse::for_role(role)))
}

/// Navigation of any role, by name.
pub async fn role_navigation_handler(
    Path(name): Path<String>,
) -> Result<Json<NavigationResponse>, ApiError> {
    let role: Role = name.parse()?;
    Ok(Json(NavigationResponse::for_role(role)))
}

async fn current_role(state: &AppState) -> Result<Role, ApiError> {
    let session = state.session.snapshot().await;
    match (session.authenticated, session.role) {
        (true, Some(role)) => Ok(role),
        _ => Err(ApiError::Unauthenticated),
    }
}

// =============================================================================
// GUARD HANDLER
// =============================================================================

/// Decide whether the current session may open `?path=`.
pub async fn guard_handler(
    State(state): State<AppState>,
    Query(query): Query<GuardQuery>,
) -> Json<GuardResponse> {
    let session = state.session.snapshot().await;
    let decision = guard::check(&query.path, &session);
    let path = guard::normalize_path(&query.path);

    if !decision.is_allowed() {
        tracing::debug!(path = %path, ?decision, "Route guard redirect");
    }
    Json(GuardResponse::new(path, &decision))
}

// =============================================================================
// PREFERENCE HANDLERS
// =============================================================================

pub async fn get_preferences_handler(
    State(state): State<AppState>,
) -> Result<Json<PreferencesResponse>, ApiError> {
    let store = state.preferences.read().await;
    Ok(Json(PreferencesResponse {
        sidebar_collapsed: store.sidebar_collapsed()?,
    }))
}

pub async fn put_preferences_handler(
    State(state): State<AppState>,
    Json(update): Json<PreferencesUpdate>,
) -> Result<Json<PreferencesResponse>, ApiError> {
    let mut store = state.preferences.write().await;
    store.set_sidebar_collapsed(update.sidebar_collapsed)?;
    Ok(Json(PreferencesResponse {
        sidebar_collapsed: store.sidebar_collapsed()?,
    }))
}

// =============================================================================
// NOTIFICATION HANDLERS
// =============================================================================

pub async fn notifications_handler(
    State(state): State<AppState>,
) -> Result<Json<NotificationsResponse>, ApiError> {
    current_role(&state).await?;
    let inbox = state.session.inbox().read().await;
    Ok(Json(NotificationsResponse {
        unread: inbox.unread_count(),
        items: inbox.list().to_vec(),
    }))
}

pub async fn mark_read_handler(
    State(state): State<AppState>,
    Path(id): Path<u64>,
) -> Result<Json<MarkReadResponse>, ApiError> {
    current_role(&state).await?;
    let mut inbox = state.session.inbox().write().await;
    let changed = inbox.mark_read(id)?;
    Ok(Json(MarkReadResponse {
        changed: usize::from(changed),
        unread: inbox.unread_count(),
    }))
}

pub async fn mark_all_read_handler(
    State(state): State<AppState>,
) -> Result<Json<MarkReadResponse>, ApiError> {
    current_role(&state).await?;
    let mut inbox = state.session.inbox().write().await;
    let changed = inbox.mark_all_read();
    Ok(Json(MarkReadResponse {
        changed,
        unread: inbox.unread_count(),
    }))
}
