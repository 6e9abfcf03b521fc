//! Error types for tagtrail.
//!
//! Nothing here is fatal to the process: acquisition failures feed the
//! retry loop, download and deployment failures surface once and wait for
//! the user to re-trigger.

use thiserror::Error;

/// Failures while acquiring the tracking-network token through the helper.
#[derive(Debug, Error)]
pub enum AcquisitionError {
    #[error("Helper mechanism not found")]
    MechanismNotFound,
    #[error("Helper request failed: {0}")]
    Helper(String),
    #[error("Helper returned undecodable token data")]
    Undecodable,
}

/// Helper installation could not be completed.
#[derive(Debug, Error)]
#[error("Helper install failed: {0}")]
pub struct InstallError(pub String);

/// The manual-download fallback for the helper failed.
#[derive(Debug, Error)]
#[error("Helper download failed: {0}")]
pub struct DownloadError(pub String);

/// Failures while downloading location reports.
#[derive(Debug, Error)]
pub enum DownloadReportsError {
    /// The report service answered but had nothing for our accessories.
    #[error("No reports found")]
    NoReportsFound,
    #[error("{0}")]
    Other(String),
}

/// Hardware deployment failed; carries a human-readable description.
#[derive(Debug, Error)]
#[error("Deploy failed: {0}")]
pub struct DeployError(pub String);
