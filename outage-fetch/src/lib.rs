// Lint configuration for this crate
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]

//! # Outage Fetch
//!
//! Network access to the upstream outage service.
//!
//! - [`client::ApiClient`] - Request executor with HTTP 500 retry and
//!   per-attempt status reporting
//! - [`retry::RetryPolicy`] - Linear backoff schedule
//! - [`status`] - Status line sinks and message text
//! - [`api::OutageApi`] - Typed site/outage endpoints
//! - [`credentials`] - API key loading
//!
//! ## Example
//!
//! ```ignore
//! use outage_fetch::{ApiClient, OutageApi};
//!
//! let client = ApiClient::new("https://api.example.com/v1/")?;
//! let api = OutageApi::new(client, &api_key)?;
//! let site = api.site_info("norwich-pear-tree").await?;
//! ```

pub mod api;
pub mod client;
pub mod credentials;
pub mod error;
pub mod retry;
pub mod status;

pub use api::OutageApi;
pub use client::{ApiClient, ApiResponse, Method};
pub use credentials::{API_KEY_ENV, API_KEY_HEADER, auth_headers, load_api_key, resolve_api_key};
pub use error::FetchError;
pub use retry::RetryPolicy;
pub use status::{RecordingSink, StatusSink, StdoutSink};
