//! # Notification Inbox
//!
//! Ordered notifications with per-item read state. Every dashboard variant
//! shows the same inbox model; only the seeded content differs per role.

use crate::{Role, VeridashError};
use serde::{Deserialize, Serialize};

/// Visual severity of a notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NotificationKind {
    Info,
    Success,
    Warning,
    Alert,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notification {
    pub id: u64,
    pub title: String,
    pub message: String,
    pub kind: NotificationKind,
    /// Display timestamp, already formatted.
    pub created_at: String,
    #[serde(default)]
    pub read: bool,
}

impl Notification {
    #[must_use]
    pub fn new(
        id: u64,
        kind: NotificationKind,
        title: impl Into<String>,
        message: impl Into<String>,
        created_at: impl Into<String>,
    ) -> Self {
        Self {
            id,
            title: title.into(),
            message: message.into(),
            kind,
            created_at: created_at.into(),
            read: false,
        }
    }
}

/// A list of notifications in insertion order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Inbox {
    items: Vec<Notification>,
}

impl Inbox {
    /// Build an inbox. Later duplicates of an id are dropped.
    #[must_use]
    pub fn new(items: Vec<Notification>) -> Self {
        let mut inbox = Self::default();
        for item in items {
            inbox.push(item);
        }
        inbox
    }

    /// Append a notification. Returns `false` if its id is already present.
    pub fn push(&mut self, item: Notification) -> bool {
        if self.items.iter().any(|n| n.id == item.id) {
            return false;
        }
        self.items.push(item);
        true
    }

    #[must_use]
    pub fn list(&self) -> &[Notification] {
        &self.items
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    #[must_use]
    pub fn unread_count(&self) -> usize {
        self.items.iter().filter(|n| !n.read).count()
    }

    /// Mark one notification read. Returns whether its flag changed.
    pub fn mark_read(&mut self, id: u64) -> Result<bool, VeridashError> {
        let item = self
            .items
            .iter_mut()
            .find(|n| n.id == id)
            .ok_or(VeridashError::NotificationNotFound(id))?;
        let changed = !item.read;
        item.read = true;
        Ok(changed)
    }

    /// Mark everything read. Returns how many flags changed.
    pub fn mark_all_read(&mut self) -> usize {
        let mut changed = 0;
        for item in self.items.iter_mut().filter(|n| !n.read) {
            item.read = true;
            changed += 1;
        }
        changed
    }

    /// Remove a notification.
    pub fn dismiss(&mut self, id: u64) -> Result<Notification, VeridashError> {
        let index = self
            .items
            .iter()
            .position(|n| n.id == id)
            .ok_or(VeridashError::NotificationNotFound(id))?;
        Ok(self.items.remove(index))
    }

    /// Demo content shown to a freshly logged-in role.
    #[must_use]
    pub fn seeded_for(role: Role) -> Self {
        use NotificationKind::{Alert, Info, Success, Warning};

        let items = match role {
            Role::EndUser => vec![
                Notification::new(
                    1,
                    Success,
                    "Verification approved",
                    "Your national ID was verified.",
                    "2 hours ago",
                ),
                Notification::new(
                    2,
                    Info,
                    "Document uploaded",
                    "Proof of address received and queued for review.",
                    "Yesterday",
                ),
                Notification::new(
                    3,
                    Warning,
                    "Wallet top-up pending",
                    "Your last payment is awaiting confirmation.",
                    "3 days ago",
                ),
            ],
            Role::Verifier => vec![
                Notification::new(
                    1,
                    Info,
                    "New request assigned",
                    "A KYC request is waiting in your queue.",
                    "10 minutes ago",
                ),
                Notification::new(
                    2,
                    Success,
                    "Payout sent",
                    "This week's earnings were transferred.",
                    "Yesterday",
                ),
            ],
            Role::Enterprise => vec![
                Notification::new(
                    1,
                    Success,
                    "Batch completed",
                    "48 of 50 verifications passed.",
                    "1 hour ago",
                ),
                Notification::new(
                    2,
                    Warning,
                    "API key expiring",
                    "Rotate your production key within 7 days.",
                    "2 days ago",
                ),
                Notification::new(
                    3,
                    Info,
                    "Invoice available",
                    "Your monthly invoice is ready.",
                    "5 days ago",
                ),
            ],
            Role::Admin => vec![
                Notification::new(
                    1,
                    Alert,
                    "Suspicious activity",
                    "Multiple failed logins on a verifier account.",
                    "5 minutes ago",
                ),
                Notification::new(
                    2,
                    Info,
                    "Verifier application",
                    "A new verifier applied for onboarding.",
                    "3 hours ago",
                ),
                Notification::new(
                    3,
                    Warning,
                    "Report backlog",
                    "12 flagged verifications await review.",
                    "Yesterday",
                ),
                Notification::new(
                    4,
                    Success,
                    "Settlement complete",
                    "Daily settlement reconciled.",
                    "Yesterday",
                ),
            ],
        };
        Self::new(items)
    }
}

// =============================================================================
// TESTS
// =============================================================================
