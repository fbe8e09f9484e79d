//! # Authentication Module
//!
//! The credential-check collaborator and the session handle that drives the
//! core `SessionStore` across it.

mod checker;
mod handle;

pub use checker::{CredentialCheck, MockCredentialChecker, identity_for};
pub use handle::{SessionHandle, SignedIn};
