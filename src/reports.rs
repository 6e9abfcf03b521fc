//! Location-report refresh coordination.

use std::sync::Arc;

use async_trait::async_trait;

use crate::accessory::AccessoryRoster;
use crate::alerts::{AlertCenter, Notification, PendingAlert};
use crate::error::DownloadReportsError;
use crate::token::{AuthToken, TokenStore};

/// External capability that downloads location reports for the registered
/// accessories. The wire format and report decryption live behind this
/// seam.
#[async_trait]
pub trait ReportFetcher: Send + Sync {
    async fn fetch_reports(&self, token: &AuthToken) -> Result<(), DownloadReportsError>;
}

/// Triggers report refreshes and maps outcomes to UI signals.
///
/// Cheap to clone; clones share the injected collaborators.
#[derive(Clone)]
pub struct ReportDownloadCoordinator {
    fetcher: Arc<dyn ReportFetcher>,
    store: TokenStore,
    roster: AccessoryRoster,
    alerts: AlertCenter,
}

impl ReportDownloadCoordinator {
    pub fn new(
        fetcher: Arc<dyn ReportFetcher>,
        store: TokenStore,
        roster: AccessoryRoster,
        alerts: AlertCenter,
    ) -> Self {
        Self {
            fetcher,
            store,
            roster,
            alerts,
        }
    }

    /// Refresh reports for the registered accessories.
    ///
    /// Callers guard the non-empty-roster precondition. Success stays
    /// silent; "no reports found" becomes a transient notification; any
    /// other failure becomes a modal alert carrying the description.
    pub async fn refresh(&self) {
        let Some(token) = self.store.current() else {
            tracing::debug!("refresh skipped, no token available");
            return;
        };
        match self.fetcher.fetch_reports(&token).await {
            Ok(()) => {}
            Err(DownloadReportsError::NoReportsFound) => {
                self.alerts.notify(Notification::new("No reports found"));
            }
            Err(err) => {
                tracing::warn!(error = %err, "report download failed");
                self.alerts.show_alert(PendingAlert::DownloadFailed {
                    description: err.to_string(),
                });
            }
        }
    }

    /// Refresh once, automatically, the first time a token becomes
    /// available while at least one accessory is registered. The task
    /// resolves after that single refresh.
    pub fn spawn_auto_refresh(&self) -> tokio::task::JoinHandle<()> {
        let this = self.clone();
        tokio::spawn(async move {
            let mut tokens = this.store.watch();
            loop {
                let ready = tokens.borrow_and_update().is_some() && !this.roster.is_empty();
                if ready {
                    this.refresh().await;
                    return;
                }
                if tokens.changed().await.is_err() {
                    return;
                }
            }
        })
    }
}
