#![allow(dead_code)]
//! Shared scripted mocks for integration tests.

use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;

use tagtrail::accessory::AccessoryId;
use tagtrail::deploy::{Deployer, HardwareProfile};
use tagtrail::error::{
    AcquisitionError, DeployError, DownloadError, DownloadReportsError, InstallError,
};
use tagtrail::helper::HelperGateway;
use tagtrail::probe::DirectTokenProbe;
use tagtrail::reports::ReportFetcher;
use tagtrail::token::AuthToken;

/// Let spawned tasks run between assertions on a paused clock.
pub async fn drain_tasks() {
    for _ in 0..8 {
        tokio::task::yield_now().await;
    }
}

/// Probe with a fixed outcome; counts invocations.
pub struct ScriptedProbe {
    outcome: Option<Vec<u8>>,
    pub calls: AtomicUsize,
}

impl ScriptedProbe {
    pub fn returning(bytes: &[u8]) -> Self {
        Self {
            outcome: Some(bytes.to_vec()),
            calls: AtomicUsize::new(0),
        }
    }

    pub fn absent() -> Self {
        Self {
            outcome: None,
            calls: AtomicUsize::new(0),
        }
    }
}

impl DirectTokenProbe for ScriptedProbe {
    fn probe(&self) -> Option<Vec<u8>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.outcome.clone()
    }
}

/// Helper gateway scripted with a queue of token outcomes; counts each
/// operation. An exhausted script keeps failing.
pub struct ScriptedGateway {
    installed: bool,
    token_outcomes: Mutex<VecDeque<Result<Vec<u8>, AcquisitionError>>>,
    install_failure: Mutex<Option<String>>,
    download_failure: Mutex<Option<String>>,
    pub token_requests: AtomicUsize,
    pub installs: AtomicUsize,
    pub downloads: AtomicUsize,
}

impl ScriptedGateway {
    pub fn installed() -> Self {
        Self::with_installed(true)
    }

    pub fn not_installed() -> Self {
        Self::with_installed(false)
    }

    fn with_installed(installed: bool) -> Self {
        Self {
            installed,
            token_outcomes: Mutex::new(VecDeque::new()),
            install_failure: Mutex::new(None),
            download_failure: Mutex::new(None),
            token_requests: AtomicUsize::new(0),
            installs: AtomicUsize::new(0),
            downloads: AtomicUsize::new(0),
        }
    }

    pub fn push_token_failure(&self, message: &str) {
        self.token_outcomes
            .lock()
            .unwrap()
            .push_back(Err(AcquisitionError::Helper(message.to_string())));
    }

    pub fn push_token_success(&self, bytes: &[u8]) {
        self.token_outcomes
            .lock()
            .unwrap()
            .push_back(Ok(bytes.to_vec()));
    }

    pub fn set_install_failure(&self, message: &str) {
        *self.install_failure.lock().unwrap() = Some(message.to_string());
    }

    pub fn set_download_failure(&self, message: &str) {
        *self.download_failure.lock().unwrap() = Some(message.to_string());
    }
}

#[async_trait]
impl HelperGateway for ScriptedGateway {
    fn is_installed(&self) -> bool {
        self.installed
    }

    async fn install(&self) -> Result<(), InstallError> {
        self.installs.fetch_add(1, Ordering::SeqCst);
        match self.install_failure.lock().unwrap().clone() {
            Some(message) => Err(InstallError(message)),
            None => Ok(()),
        }
    }

    async fn download_only(&self) -> Result<(), DownloadError> {
        self.downloads.fetch_add(1, Ordering::SeqCst);
        match self.download_failure.lock().unwrap().clone() {
            Some(message) => Err(DownloadError(message)),
            None => Ok(()),
        }
    }

    async fn request_token(&self) -> Result<Vec<u8>, AcquisitionError> {
        self.token_requests.fetch_add(1, Ordering::SeqCst);
        self.token_outcomes
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(AcquisitionError::MechanismNotFound))
    }
}

/// Report fetcher scripted with a queue of outcomes; an exhausted script
/// succeeds. Records the transport form of the token it was handed.
pub struct ScriptedFetcher {
    outcomes: Mutex<VecDeque<Result<(), DownloadReportsError>>>,
    pub calls: AtomicUsize,
    pub seen_tokens: Mutex<Vec<String>>,
}

impl ScriptedFetcher {
    pub fn succeeding() -> Self {
        Self {
            outcomes: Mutex::new(VecDeque::new()),
            calls: AtomicUsize::new(0),
            seen_tokens: Mutex::new(Vec::new()),
        }
    }

    pub fn push_no_reports(&self) {
        self.outcomes
            .lock()
            .unwrap()
            .push_back(Err(DownloadReportsError::NoReportsFound));
    }

    pub fn push_failure(&self, message: &str) {
        self.outcomes
            .lock()
            .unwrap()
            .push_back(Err(DownloadReportsError::Other(message.to_string())));
    }
}

#[async_trait]
impl ReportFetcher for ScriptedFetcher {
    async fn fetch_reports(&self, token: &AuthToken) -> Result<(), DownloadReportsError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.seen_tokens.lock().unwrap().push(token.base64());
        self.outcomes.lock().unwrap().pop_front().unwrap_or(Ok(()))
    }
}

/// Deployer with a fixed outcome; records what it was asked to deploy.
pub struct ScriptedDeployer {
    failure: Mutex<Option<String>>,
    pub calls: AtomicUsize,
    pub deployments: Mutex<Vec<(AccessoryId, HardwareProfile)>>,
}

impl ScriptedDeployer {
    pub fn succeeding() -> Self {
        Self {
            failure: Mutex::new(None),
            calls: AtomicUsize::new(0),
            deployments: Mutex::new(Vec::new()),
        }
    }

    pub fn failing(message: &str) -> Self {
        let deployer = Self::succeeding();
        *deployer.failure.lock().unwrap() = Some(message.to_string());
        deployer
    }
}

#[async_trait]
impl Deployer for ScriptedDeployer {
    async fn deploy(
        &self,
        accessory: &AccessoryId,
        profile: HardwareProfile,
    ) -> Result<(), DeployError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.deployments
            .lock()
            .unwrap()
            .push((accessory.clone(), profile));
        match self.failure.lock().unwrap().clone() {
            Some(message) => Err(DeployError(message)),
            None => Ok(()),
        }
    }
}
