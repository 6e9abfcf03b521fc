//! Privileged helper gateway.

use async_trait::async_trait;

use crate::error::{AcquisitionError, DownloadError, InstallError};

/// Lifecycle and token interface of the privileged helper.
///
/// The core never inspects the helper's internals; it reacts to these
/// four signals only. `request_token` keeps a single request in flight;
/// the orchestrator never issues overlapping ones.
#[async_trait]
pub trait HelperGateway: Send + Sync {
    /// Whether the helper is installed on this machine.
    fn is_installed(&self) -> bool;

    /// Install the helper. Runs only on an explicit user trigger, never
    /// from a timer.
    async fn install(&self) -> Result<(), InstallError>;

    /// Manual-download fallback for users who skip installation.
    async fn download_only(&self) -> Result<(), DownloadError>;

    /// Ask the active helper for the raw token bytes.
    async fn request_token(&self) -> Result<Vec<u8>, AcquisitionError>;
}
