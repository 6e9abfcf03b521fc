//! Token acquisition state machine.
//!
//! One pass: direct probe first (startup only), then the privileged
//! helper. Helper failures schedule a silent retry on a fixed interval
//! that repeats until a token lands; only the first failure (or an
//! explicit non-silent re-check) surfaces a prompt. Helper activation is
//! outside this process's control, so the retry loop is unbounded.

use std::sync::{Arc, Mutex};
use std::time::Duration;

use tokio::task::JoinHandle;

use crate::alerts::{AlertCenter, PendingAlert};
use crate::config::CompanionConfig;
use crate::helper::HelperGateway;
use crate::probe::DirectTokenProbe;
use crate::token::{AuthToken, TokenProvenance, TokenStore};

/// Progress of token acquisition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AcquisitionState {
    Unknown,
    CheckingDirect,
    DirectSucceeded,
    CheckingHelperInstalled,
    HelperNotInstalled,
    HelperInstalledInactive,
    HelperActive,
}

impl AcquisitionState {
    /// A token has landed; no further acquisition is needed.
    pub fn is_settled(self) -> bool {
        matches!(self, Self::DirectSucceeded | Self::HelperActive)
    }
}

/// Drives token acquisition against the probe and the helper gateway.
///
/// Cheap to clone; clones share all state. The state mutex is never held
/// across an await point, so concurrent callers settle to a single
/// progression.
#[derive(Clone)]
pub struct TokenAcquisitionOrchestrator {
    probe: Arc<dyn DirectTokenProbe>,
    gateway: Arc<dyn HelperGateway>,
    store: TokenStore,
    alerts: AlertCenter,
    state: Arc<Mutex<AcquisitionState>>,
    retry_interval: Duration,
    retry_task: Arc<Mutex<Option<JoinHandle<()>>>>,
}

impl TokenAcquisitionOrchestrator {
    pub fn new(
        probe: Arc<dyn DirectTokenProbe>,
        gateway: Arc<dyn HelperGateway>,
        store: TokenStore,
        alerts: AlertCenter,
        config: &CompanionConfig,
    ) -> Self {
        Self {
            probe,
            gateway,
            store,
            alerts,
            state: Arc::new(Mutex::new(AcquisitionState::Unknown)),
            retry_interval: config.retry_interval,
            retry_task: Arc::new(Mutex::new(None)),
        }
    }

    pub fn state(&self) -> AcquisitionState {
        *self.state.lock().unwrap()
    }

    /// Run one acquisition pass.
    ///
    /// `silent` suppresses the helper prompt; self-scheduled retries
    /// always pass `true` so a prompt the user already dismissed (or is
    /// mid-installation for) is not re-surfaced. A no-op once a token has
    /// landed through either path.
    pub async fn acquire(&self, silent: bool) {
        let first_attempt = {
            let mut state = self.state.lock().unwrap();
            if state.is_settled() {
                return;
            }
            let first = *state == AcquisitionState::Unknown;
            *state = if first {
                AcquisitionState::CheckingDirect
            } else {
                AcquisitionState::CheckingHelperInstalled
            };
            first
        };

        // The direct probe is a one-shot startup check; retries go
        // straight to the helper.
        if first_attempt {
            if let Some(raw) = self.probe.probe() {
                if let Some(token) = AuthToken::decode(raw, TokenProvenance::Direct) {
                    tracing::debug!("token acquired via direct probe");
                    self.settle(token, AcquisitionState::DirectSucceeded);
                    return;
                }
            }
            self.set_state(AcquisitionState::CheckingHelperInstalled);
        }

        if !self.gateway.is_installed() {
            self.set_state(AcquisitionState::HelperNotInstalled);
            if !silent {
                self.alerts.show_alert(PendingAlert::ActivateHelperPrompt);
            }
            // Acquisition resumes only on an explicit user trigger.
            return;
        }

        match self.gateway.request_token().await {
            Ok(raw) => match AuthToken::decode(raw, TokenProvenance::Helper) {
                Some(token) => {
                    tracing::debug!("token acquired via helper");
                    self.settle(token, AcquisitionState::HelperActive);
                }
                None => {
                    // Undecodable data is indistinguishable from failure.
                    tracing::debug!("helper returned undecodable token data");
                    self.acquisition_failed(silent);
                }
            },
            Err(err) => {
                // All gateway failure kinds collapse to the same prompt.
                tracing::debug!(error = %err, "helper token request failed");
                self.acquisition_failed(silent);
            }
        }
    }

    /// User-triggered helper installation, then an immediate re-check.
    pub async fn install_helper(&self) {
        match self.gateway.install().await {
            Ok(()) => self.acquire(false).await,
            Err(err) => {
                tracing::warn!(error = %err, "helper install failed");
                self.alerts.show_alert(PendingAlert::HelperInstallFailed {
                    description: err.to_string(),
                });
            }
        }
    }

    /// Manual-download fallback for users who skip installation.
    pub async fn request_manual_download(&self) {
        if let Err(err) = self.gateway.download_only().await {
            tracing::warn!(error = %err, "helper download failed");
            self.alerts.show_alert(PendingAlert::DownloadFailed {
                description: err.to_string(),
            });
        }
    }

    fn settle(&self, token: AuthToken, state: AcquisitionState) {
        self.store.put(token);
        self.set_state(state);
        // A pending retry would no-op against a settled state; abort it
        // instead of letting it wake.
        self.cancel_retry();
    }

    fn acquisition_failed(&self, silent: bool) {
        self.set_state(AcquisitionState::HelperInstalledInactive);
        if !silent {
            self.alerts.show_alert(PendingAlert::ActivateHelperPrompt);
        }
        self.schedule_retry();
    }

    fn set_state(&self, next: AcquisitionState) {
        let mut state = self.state.lock().unwrap();
        tracing::debug!(from = ?*state, to = ?next, "acquisition state");
        *state = next;
    }

    fn schedule_retry(&self) {
        let this = self.clone();
        // Create the sleep here so its deadline is anchored to the time
        // of the failure, not to when the task first polls.
        let delay = tokio::time::sleep(self.retry_interval);
        let handle = tokio::spawn(async move {
            delay.await;
            this.acquire(true).await;
        });
        // Single retry in flight; failures arrive one at a time but a
        // user-triggered re-check can overlap a scheduled one.
        if let Some(previous) = self.retry_task.lock().unwrap().replace(handle) {
            previous.abort();
        }
    }

    fn cancel_retry(&self) {
        if let Some(handle) = self.retry_task.lock().unwrap().take() {
            handle.abort();
        }
    }
}
