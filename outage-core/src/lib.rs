// Lint configuration for this crate
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]

//! # Outage Core
//!
//! Core types and pure logic for site outage reporting.
//!
//! Nothing in this crate performs I/O. It provides:
//!
//! - Domain models ([`Outage`], [`Device`], [`Site`], [`SiteOutage`])
//! - The site filter ([`filter_for_site`]) joining outages to a site's devices
//! - Date anomaly detection ([`detect_anomalies`]) against an injectable [`Clock`]
//! - Timestamp parsing helpers shared by the renderer
//! - Error types

pub mod anomaly;
pub mod error;
pub mod filter;
pub mod models;

pub use anomaly::{Anomaly, Anomalies, Clock, FixedClock, SystemClock, detect_anomalies};
pub use error::CoreError;
pub use filter::filter_for_site;
pub use models::{Device, Outage, Site, SiteOutage, parse_timestamp};
