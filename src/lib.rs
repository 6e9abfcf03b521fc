//! Tagtrail — companion core for a device-tracking network.
//!
//! Orchestrates the credential needed to query the network's report
//! service: a direct OS probe first, a privileged helper as the fallback,
//! with silent fixed-interval retries until a token lands. Report
//! download and tag deployment outcomes funnel into a single-active-alert
//! model that a presentation layer observes read-only.
//!
//! # Quick Start
//!
//! ```no_run
//! use std::sync::Arc;
//! use tagtrail::prelude::*;
//!
//! # async fn example(
//! #     probe: Arc<dyn tagtrail::probe::DirectTokenProbe>,
//! #     gateway: Arc<dyn tagtrail::helper::HelperGateway>,
//! # ) {
//! let config = CompanionConfig::from_env();
//! let store = TokenStore::new();
//! let alerts = AlertCenter::new(config.notification_ttl);
//! let orchestrator =
//!     TokenAcquisitionOrchestrator::new(probe, gateway, store, alerts, &config);
//! orchestrator.acquire(false).await;
//! # }
//! ```

pub mod accessory;
pub mod acquisition;
pub mod alerts;
pub mod config;
pub mod deploy;
pub mod error;
pub mod helper;
pub mod prelude;
pub mod probe;
pub mod reports;
pub mod token;
