//! # CLI Command Implementations
//!
//! This module contains the actual implementations of CLI commands.

use std::path::PathBuf;
use veridash::{api, config::Config};
use veridash_core::{
    GuardDecision, Identity, PreferenceStore, Role, Session, SessionStore, UserId,
    VeridashError, guard, landing_path, navigation_for,
};

fn print_json(value: &serde_json::Value) {
    println!("{}", serde_json::to_string_pretty(value).unwrap_or_default());
}

// =============================================================================
// SERVER COMMAND
// =============================================================================

/// Start the HTTP server.
pub async fn cmd_server(
    mut config: Config,
    host: Option<String>,
    port: Option<u16>,
) -> Result<(), VeridashError> {
    if let Some(host) = host {
        config.server.host = host;
    }
    if let Some(port) = port {
        config.server.port = port;
    }

    println!("Veridash Session Server Starting...");
    println!();
    println!("Configuration:");
    println!("  Bind:        {}", config.bind_addr());
    println!("  Login delay: {} ms", config.auth.login_delay_ms);
    match &config.preferences.database {
        Some(path) => println!("  Preferences: {:?}", path),
        None => println!("  Preferences: in memory"),
    }
    println!();
    println!("Endpoints:");
    println!("  GET  /api/config      - Payment configuration");
    println!("  GET  /session         - Session snapshot");
    println!("  POST /session/login   - Log in");
    println!("  POST /session/signup  - Sign up");
    println!("  POST /session/logout  - Log out");
    println!("  GET  /navigation      - Navigation of the current role");
    println!("  GET  /guard?path=     - Route guard decision");
    println!("  GET  /health          - Health check");
    println!();
    println!("Press Ctrl+C to stop");
    println!();

    api::run_server(config).await
}

// =============================================================================
// ROLES COMMAND
// =============================================================================

/// List every role with its landing path.
pub fn cmd_roles(json_mode: bool) -> Result<(), VeridashError> {
    if json_mode {
        let roles: Vec<_> = Role::ALL
            .iter()
            .map(|role| {
                serde_json::json!({
                    "role": role.as_str(),
                    "label": role.label(),
                    "landing": landing_path(*role),
                    "entries": navigation_for(*role).len()
                })
            })
            .collect();
        print_json(&serde_json::Value::Array(roles));
        return Ok(());
    }

    println!("Veridash Roles");
    println!("==============");
    for role in Role::ALL {
        println!(
            "  {:<12} {:<20} {} ({} entries)",
            role.as_str(),
            role.label(),
            landing_path(role),
            navigation_for(role).len()
        );
    }
    Ok(())
}

// =============================================================================
// NAV COMMAND
// =============================================================================

/// Show the navigation of a role given by name.
pub fn cmd_nav(role_name: &str, json_mode: bool) -> Result<(), VeridashError> {
    let role: Role = role_name.parse()?;
    let entries = navigation_for(role);

    if json_mode {
        let output = serde_json::json!({
            "role": role.as_str(),
            "landing": landing_path(role),
            "entries": entries
                .iter()
                .map(|e| serde_json::json!({ "path": e.path, "label": e.label, "icon": e.icon }))
                .collect::<Vec<_>>()
        });
        print_json(&output);
        return Ok(());
    }

    println!("Navigation for {} ({})", role.label(), role.as_str());
    println!("==============================");
    for entry in entries {
        println!("  {:<24} {:<16} [{}]", entry.path, entry.label, entry.icon);
    }
    Ok(())
}

// =============================================================================
// GUARD COMMAND
// =============================================================================

/// Preview the guard decision for `path` as an anonymous session or as an
/// authenticated session of `role`.
pub fn cmd_guard(path: &str, role: Option<&str>, json_mode: bool) -> Result<(), VeridashError> {
    let session = match role {
        Some(name) => preview_session(name.parse()?),
        None => Session::anonymous(),
    };
    let decision = guard::check(path, &session);
    let normalized = guard::normalize_path(path);
    let target = decision.target(&normalized).to_string();

    if json_mode {
        let output = serde_json::json!({
            "path": normalized,
            "role": session.role.map(Role::as_str),
            "allowed": decision.is_allowed(),
            "target": target,
        });
        print_json(&output);
        return Ok(());
    }

    let who = session.role.map_or("anonymous", Role::as_str);
    match &decision {
        GuardDecision::Allow => println!("{} may open {}", who, normalized),
        GuardDecision::RedirectToLogin { login, return_to } => {
            println!("{} -> {} (return to {})", normalized, login, return_to)
        }
        GuardDecision::RedirectToLanding { path } => {
            println!("{} -> {} ({} landing)", normalized, path, who)
        }
    }
    Ok(())
}

/// An authenticated session of `role`, driven through the store.
fn preview_session(role: Role) -> Session {
    let mut store = SessionStore::new();
    if let Ok(ticket) = store.begin_login(Some(role)) {
        let identity = Identity::new(
            UserId::new("usr_preview"),
            "Preview",
            "preview@veridash.local",
        );
        store.complete(ticket, Ok(identity));
    }
    store.snapshot()
}

// =============================================================================
// PREFS COMMAND
// =============================================================================

/// Read, set or toggle the sidebar preference.
pub fn cmd_prefs(
    config: &Config,
    database: Option<PathBuf>,
    set: Option<bool>,
    toggle: bool,
    json_mode: bool,
) -> Result<(), VeridashError> {
    let path = database.or_else(|| config.preferences.database.clone());
    let mut store = match &path {
        Some(path) => PreferenceStore::open(path)?,
        None => {
            tracing::warn!("No preference database configured; changes will not persist");
            PreferenceStore::in_memory()
        }
    };

    let collapsed = match (set, toggle) {
        (Some(value), _) => {
            store.set_sidebar_collapsed(value)?;
            value
        }
        (None, true) => store.toggle_sidebar()?,
        (None, false) => store.sidebar_collapsed()?,
    };

    if json_mode {
        print_json(&serde_json::json!({
            "database": path.as_ref().map(|p| p.to_string_lossy().into_owned()),
            "sidebar_collapsed": collapsed
        }));
        return Ok(());
    }

    println!("Sidebar collapsed: {}", collapsed);
    Ok(())
}

// =============================================================================
// CONFIG COMMAND
// =============================================================================

/// Print the effective configuration.
pub fn cmd_config(config: &Config, json_mode: bool) -> Result<(), VeridashError> {
    if json_mode {
        let text = serde_json::to_string_pretty(config)
            .map_err(|e| VeridashError::SerializationError(e.to_string()))?;
        println!("{}", text);
        return Ok(());
    }

    let text = toml::to_string_pretty(config)
        .map_err(|e| VeridashError::SerializationError(e.to_string()))?;
    println!("{}", text);
    Ok(())
}
