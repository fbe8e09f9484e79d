//! # Veridash
//!
//! Session server and CLI for the Veridash identity-verification dashboard.
//!
//! - [`api`]: axum HTTP surface (session, navigation, guard, preferences,
//!   notifications, payment config)
//! - [`auth`]: async credential check and the shared session handle
//! - [`config`]: layered configuration (defaults, TOML file, environment)

pub mod api;
pub mod auth;
pub mod config;
