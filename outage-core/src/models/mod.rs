//! Domain models for outage reporting.
//!
//! - [`outage`] - Raw outages and the site-scoped [`SiteOutage`]
//! - [`site`] - Sites and their devices

mod outage;
mod site;

pub use outage::{Outage, SiteOutage, parse_timestamp};
pub use site::{Device, Site};
