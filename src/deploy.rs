//! Two-step tag deployment flow.
//!
//! Select accessory → select hardware target → deploy. The pending
//! request is discarded once deployment resolves, success or failure;
//! this flow never retries on its own.

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::accessory::AccessoryId;
use crate::alerts::{AlertCenter, PendingAlert};
use crate::error::DeployError;

/// Hardware profile a tag can be provisioned as.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HardwareProfile {
    TagA,
    TagB,
}

/// Terminal outcome of a deployment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeployOutcome {
    Success,
    Failure,
}

/// Where the deployment flow currently stands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeployPhase {
    Idle,
    TargetSelectionPending,
    Deploying(HardwareProfile),
    Resolved(DeployOutcome),
}

/// Pending "deploy this accessory" request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeploymentRequest {
    pub accessory: AccessoryId,
    pub profile: Option<HardwareProfile>,
}

/// External provisioning capability; hardware I/O lives behind it.
#[async_trait]
pub trait Deployer: Send + Sync {
    async fn deploy(
        &self,
        accessory: &AccessoryId,
        profile: HardwareProfile,
    ) -> Result<(), DeployError>;
}

/// Drives the two-step deployment sequence and maps outcomes to alerts.
///
/// Cheap to clone; clones share the flow state.
#[derive(Clone)]
pub struct DeploymentFlow {
    deployer: Arc<dyn Deployer>,
    alerts: AlertCenter,
    phase: Arc<Mutex<DeployPhase>>,
    request: Arc<Mutex<Option<DeploymentRequest>>>,
}

impl DeploymentFlow {
    pub fn new(deployer: Arc<dyn Deployer>, alerts: AlertCenter) -> Self {
        Self {
            deployer,
            alerts,
            phase: Arc::new(Mutex::new(DeployPhase::Idle)),
            request: Arc::new(Mutex::new(None)),
        }
    }

    pub fn phase(&self) -> DeployPhase {
        *self.phase.lock().unwrap()
    }

    pub fn pending_request(&self) -> Option<DeploymentRequest> {
        self.request.lock().unwrap().clone()
    }

    /// User picked an accessory to deploy; prompts for the hardware
    /// target. Returns `false` while a deployment is already running.
    pub fn begin(&self, accessory: AccessoryId) -> bool {
        {
            let mut phase = self.phase.lock().unwrap();
            if matches!(*phase, DeployPhase::Deploying(_)) {
                return false;
            }
            *phase = DeployPhase::TargetSelectionPending;
        }
        *self.request.lock().unwrap() = Some(DeploymentRequest {
            accessory: accessory.clone(),
            profile: None,
        });
        self.alerts
            .show_alert(PendingAlert::SelectDeployTarget { accessory });
        true
    }

    /// User picked a hardware profile; runs the deployment to resolution.
    /// Ignored unless a target selection is pending.
    pub async fn choose_target(&self, profile: HardwareProfile) {
        let accessory = {
            let mut phase = self.phase.lock().unwrap();
            if *phase != DeployPhase::TargetSelectionPending {
                return;
            }
            let mut request = self.request.lock().unwrap();
            let Some(pending) = request.as_mut() else {
                return;
            };
            pending.profile = Some(profile);
            *phase = DeployPhase::Deploying(profile);
            pending.accessory.clone()
        };

        let outcome = match self.deployer.deploy(&accessory, profile).await {
            Ok(()) => {
                self.alerts.show_alert(PendingAlert::DeploySucceeded);
                DeployOutcome::Success
            }
            Err(err) => {
                tracing::warn!(accessory = %accessory, error = %err, "deploy failed");
                self.alerts.show_alert(PendingAlert::DeployFailed);
                DeployOutcome::Failure
            }
        };

        // The request is consumed either way; a new deployment starts
        // from a fresh accessory selection.
        *self.request.lock().unwrap() = None;
        *self.phase.lock().unwrap() = DeployPhase::Resolved(outcome);
    }
}
