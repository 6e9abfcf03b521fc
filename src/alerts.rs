//! Single-slot alert and notification channels.
//!
//! Two independent slots: a modal alert the user dismisses, and a
//! transient notification that clears itself after a fixed window. The
//! presentation layer observes both read-only via `watch` receivers.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use tokio::sync::watch;

use crate::accessory::AccessoryId;

/// Modal prompt surfaced to the user.
///
/// At most one is active; a newer alert replaces whatever is showing.
/// Last writer wins, no queue.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum PendingAlert {
    KeyCreationError,
    TokenPasteRequest,
    DeployFailed,
    DeploySucceeded,
    DeletionFailed,
    NoReportsFound,
    DownloadFailed { description: String },
    ActivateHelperPrompt,
    HelperInstallFailed { description: String },
    SelectDeployTarget { accessory: AccessoryId },
}

/// Transient, auto-expiring notification.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notification {
    pub message: String,
}

impl Notification {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Serializes user-facing prompts: one modal slot, one transient slot.
///
/// Cheap to clone; clones share both slots.
#[derive(Debug, Clone)]
pub struct AlertCenter {
    alert_tx: watch::Sender<Option<PendingAlert>>,
    note_tx: watch::Sender<Option<Notification>>,
    note_epoch: Arc<AtomicU64>,
    note_ttl: Duration,
}

impl AlertCenter {
    pub fn new(notification_ttl: Duration) -> Self {
        let (alert_tx, _) = watch::channel(None);
        let (note_tx, _) = watch::channel(None);
        Self {
            alert_tx,
            note_tx,
            note_epoch: Arc::new(AtomicU64::new(0)),
            note_ttl: notification_ttl,
        }
    }

    /// Show a modal alert, replacing any alert currently showing.
    pub fn show_alert(&self, alert: PendingAlert) {
        tracing::debug!(alert = ?alert, "alert shown");
        self.alert_tx.send_replace(Some(alert));
    }

    /// User dismissed the modal slot.
    pub fn dismiss_alert(&self) {
        self.alert_tx.send_replace(None);
    }

    pub fn current_alert(&self) -> Option<PendingAlert> {
        self.alert_tx.borrow().clone()
    }

    /// Read-only view of the modal slot for the presentation layer.
    pub fn watch_alert(&self) -> watch::Receiver<Option<PendingAlert>> {
        self.alert_tx.subscribe()
    }

    /// Show a transient notification. It clears itself after the
    /// configured TTL; a newer notification arriving mid-countdown
    /// replaces the content and restarts the countdown.
    pub fn notify(&self, notification: Notification) {
        let epoch = self.note_epoch.fetch_add(1, Ordering::SeqCst) + 1;
        tracing::debug!(message = %notification.message, "notification shown");
        self.note_tx.send_replace(Some(notification));

        let note_tx = self.note_tx.clone();
        let note_epoch = self.note_epoch.clone();
        // Create the sleep here so its deadline is anchored to the time
        // the notification was shown, not to when the task first polls.
        let expiry = tokio::time::sleep(self.note_ttl);
        tokio::spawn(async move {
            expiry.await;
            // a newer notification restarted the countdown; leave it alone
            if note_epoch.load(Ordering::SeqCst) == epoch {
                note_tx.send_replace(None);
            }
        });
    }

    pub fn current_notification(&self) -> Option<Notification> {
        self.note_tx.borrow().clone()
    }

    /// Read-only view of the transient slot for the presentation layer.
    pub fn watch_notification(&self) -> watch::Receiver<Option<Notification>> {
        self.note_tx.subscribe()
    }
}
