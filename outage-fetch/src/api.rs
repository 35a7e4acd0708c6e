//! Typed wrapper over the upstream outage service.
//!
//! Endpoints:
//! - `GET site-info/{siteId}` → [`Site`]
//! - `GET outages` → list of [`Outage`]
//! - `POST site-outages/{siteId}` with a list of [`SiteOutage`]

use outage_core::{Outage, Site, SiteOutage};
use reqwest::header::HeaderMap;
use serde::de::DeserializeOwned;
use tracing::{info, instrument};

use crate::client::{ApiClient, ApiResponse, Method};
use crate::credentials::auth_headers;
use crate::error::FetchError;

/// Authenticated access to the outage service.
#[derive(Clone)]
pub struct OutageApi {
    client: ApiClient,
    headers: HeaderMap,
}

impl OutageApi {
    /// Wraps `client`, authenticating every request with `api_key`.
    ///
    /// # Errors
    ///
    /// Returns [`FetchError::Credential`] if the key is not a valid header value.
    pub fn new(client: ApiClient, api_key: &str) -> Result<Self, FetchError> {
        Ok(Self {
            client,
            headers: auth_headers(api_key)?,
        })
    }

    /// Fetches a site and its devices.
    ///
    /// # Errors
    ///
    /// Any [`FetchError`] from the executor, or [`FetchError::Decode`] if
    /// the payload is not a site.
    #[instrument(skip(self))]
    pub async fn site_info(&self, site_id: &str) -> Result<Site, FetchError> {
        let site: Site = self.get(&format!("site-info/{site_id}")).await?;
        info!(site = %site.id, devices = site.devices.len(), "Fetched site info");
        Ok(site)
    }

    /// Fetches every outage known to the service.
    ///
    /// # Errors
    ///
    /// Any [`FetchError`] from the executor, or [`FetchError::Decode`] if
    /// the payload is not a list of outages.
    #[instrument(skip(self))]
    pub async fn outages(&self) -> Result<Vec<Outage>, FetchError> {
        let outages: Vec<Outage> = self.get("outages").await?;
        info!(count = outages.len(), "Fetched outages");
        Ok(outages)
    }

    /// Submits the outages for a site. Returns the success status code.
    ///
    /// # Errors
    ///
    /// Any [`FetchError`] from the executor.
    #[instrument(skip(self, outages), fields(count = outages.len()))]
    pub async fn submit_site_outages(
        &self,
        site_id: &str,
        outages: &[SiteOutage],
    ) -> Result<u16, FetchError> {
        let body = serde_json::to_value(outages)?;
        let response = self
            .client
            .send(
                Method::Post,
                &format!("site-outages/{site_id}"),
                &self.headers,
                Some(&body),
            )
            .await?;

        match response {
            ApiResponse::Status(code) => {
                info!(status = code, "Submitted site outages");
                Ok(code)
            }
            ApiResponse::Payload(_) => Err(FetchError::EmptyPayload),
        }
    }

    /// Issues a raw request with this API's credentials.
    ///
    /// # Errors
    ///
    /// See [`ApiClient::execute`].
    pub async fn raw(
        &self,
        method: &str,
        endpoint: &str,
        body: Option<&serde_json::Value>,
    ) -> Result<ApiResponse, FetchError> {
        self.client.execute(method, endpoint, &self.headers, body).await
    }

    async fn get<T: DeserializeOwned>(&self, endpoint: &str) -> Result<T, FetchError> {
        let payload = self
            .client
            .send(Method::Get, endpoint, &self.headers, None)
            .await?
            .into_payload()?;
        Ok(serde_json::from_value(payload)?)
    }
}
