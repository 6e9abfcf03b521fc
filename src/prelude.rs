//! Convenience re-exports for common use.

pub use crate::accessory::{Accessory, AccessoryId, AccessoryRoster};
pub use crate::acquisition::{AcquisitionState, TokenAcquisitionOrchestrator};
pub use crate::alerts::{AlertCenter, Notification, PendingAlert};
pub use crate::config::CompanionConfig;
pub use crate::deploy::{
    DeployOutcome, DeployPhase, DeploymentFlow, DeploymentRequest, Deployer, HardwareProfile,
};
pub use crate::error::{
    AcquisitionError, DeployError, DownloadError, DownloadReportsError, InstallError,
};
pub use crate::helper::HelperGateway;
pub use crate::probe::DirectTokenProbe;
pub use crate::reports::{ReportDownloadCoordinator, ReportFetcher};
pub use crate::token::{AuthToken, TokenProvenance, TokenStore};
