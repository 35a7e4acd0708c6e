//! Request executor.
//!
//! [`ApiClient`] issues one logical request against the upstream service,
//! classifies the response and retries HTTP 500 with a linear backoff.
//! It reports each attempt through a [`StatusSink`] and never terminates
//! the process itself; fatal outcomes come back as [`FetchError`].

use std::fmt;
use std::str::FromStr;
use std::sync::Arc;
use std::time::Duration;

use reqwest::header::HeaderMap;
use reqwest::{Client, StatusCode};
use serde_json::Value;
use tracing::{debug, instrument, warn};
use url::Url;

use crate::error::FetchError;
use crate::retry::RetryPolicy;
use crate::status::{self, StatusSink, StdoutSink};

/// Default request timeout.
const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// User agent string.
const USER_AGENT: &str = concat!("outage-report/", env!("CARGO_PKG_VERSION"));

// ============================================================================
// Method & Response
// ============================================================================

/// The two request shapes the upstream contract uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    /// Fetch one resource.
    Get,
    /// Submit one JSON document.
    Post,
}

impl FromStr for Method {
    type Err = FetchError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.eq_ignore_ascii_case("GET") {
            Ok(Self::Get)
        } else if s.eq_ignore_ascii_case("POST") {
            Ok(Self::Post)
        } else {
            Err(FetchError::InvalidMethod(s.to_string()))
        }
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Get => f.write_str("GET"),
            Self::Post => f.write_str("POST"),
        }
    }
}

impl From<Method> for reqwest::Method {
    fn from(method: Method) -> Self {
        match method {
            Method::Get => reqwest::Method::GET,
            Method::Post => reqwest::Method::POST,
        }
    }
}

/// Successful outcome of [`ApiClient::send`].
#[derive(Debug, Clone, PartialEq)]
pub enum ApiResponse {
    /// Parsed body of a GET.
    Payload(Value),
    /// Status code of a POST.
    Status(u16),
}

impl ApiResponse {
    /// Returns the GET payload.
    ///
    /// # Errors
    ///
    /// Returns [`FetchError::EmptyPayload`] for a POST status response.
    pub fn into_payload(self) -> Result<Value, FetchError> {
        match self {
            Self::Payload(value) => Ok(value),
            Self::Status(_) => Err(FetchError::EmptyPayload),
        }
    }
}

// ============================================================================
// API Client
// ============================================================================

/// HTTP executor bound to one upstream base URL.
#[derive(Clone)]
pub struct ApiClient {
    inner: Client,
    base_url: Url,
    retry: RetryPolicy,
    sink: Arc<dyn StatusSink>,
}

impl ApiClient {
    /// Creates a client with default timeout, retry policy and stdout reporting.
    ///
    /// # Errors
    ///
    /// Fails if `base_url` is not an absolute URL or the TLS backend
    /// cannot be initialised.
    pub fn new(base_url: &str) -> Result<Self, FetchError> {
        Self::with_timeout(base_url, Duration::from_secs(DEFAULT_TIMEOUT_SECS))
    }

    /// Creates a client with a custom timeout.
    ///
    /// # Errors
    ///
    /// See [`ApiClient::new`].
    pub fn with_timeout(base_url: &str, timeout: Duration) -> Result<Self, FetchError> {
        let inner = Client::builder()
            .timeout(timeout)
            .user_agent(USER_AGENT)
            .build()?;

        Ok(Self {
            inner,
            base_url: normalize_base(base_url)?,
            retry: RetryPolicy::default(),
            sink: Arc::new(StdoutSink),
        })
    }

    /// Sets the retry policy.
    pub fn with_retry_policy(mut self, policy: RetryPolicy) -> Self {
        self.retry = policy;
        self
    }

    /// Sets where per-attempt status lines go.
    pub fn with_sink(mut self, sink: Arc<dyn StatusSink>) -> Self {
        self.sink = sink;
        self
    }

    /// The base URL endpoints are resolved against.
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Resolves an endpoint such as `outages` against the base URL.
    ///
    /// # Errors
    ///
    /// Returns [`FetchError::InvalidUrl`] if the result is not a valid URL.
    pub fn endpoint_url(&self, endpoint: &str) -> Result<Url, FetchError> {
        self.base_url
            .join(endpoint.trim_start_matches('/'))
            .map_err(|e| FetchError::InvalidUrl(format!("{endpoint}: {e}")))
    }

    /// Executes a request given its method by name.
    ///
    /// # Errors
    ///
    /// Returns [`FetchError::InvalidMethod`] for anything but GET or POST,
    /// otherwise whatever [`ApiClient::send`] returns.
    pub async fn execute(
        &self,
        method: &str,
        endpoint: &str,
        headers: &HeaderMap,
        body: Option<&Value>,
    ) -> Result<ApiResponse, FetchError> {
        let method = method.parse::<Method>().inspect_err(|e| {
            self.sink.emit(&e.to_string());
        })?;
        self.send(method, endpoint, headers, body).await
    }

    /// Executes a request, retrying HTTP 500 according to the retry policy.
    ///
    /// # Errors
    ///
    /// - [`FetchError::Status`] for any status other than 200 and 500
    /// - [`FetchError::RetriesExhausted`] when 500 outlasts the policy
    /// - [`FetchError::EmptyPayload`] for a GET 200 whose body is absent,
    ///   not JSON, `null`, or an empty array or object
    /// - [`FetchError::Http`] for transport failures, which are not retried
    #[instrument(skip(self, headers, body))]
    pub async fn send(
        &self,
        method: Method,
        endpoint: &str,
        headers: &HeaderMap,
        body: Option<&Value>,
    ) -> Result<ApiResponse, FetchError> {
        let url = self.endpoint_url(endpoint)?;
        let max_retries = self.retry.max_retries;
        let mut retries = 0;

        loop {
            debug!(url = %url, attempt = retries + 1, "Sending request");

            let mut request = self
                .inner
                .request(method.into(), url.clone())
                .headers(headers.clone());
            if let (Method::Post, Some(body)) = (method, body) {
                request = request.json(body);
            }

            let response = request.send().await?;
            let code = response.status();
            debug!(status = %code, "Response received");

            if code == StatusCode::OK {
                self.sink.emit(&status::success_line(code));
                return match method {
                    Method::Get => {
                        let bytes = response.bytes().await?;
                        usable_payload(&bytes).map(ApiResponse::Payload).ok_or_else(|| {
                            let err = FetchError::EmptyPayload;
                            self.sink.emit(&err.to_string());
                            err
                        })
                    }
                    Method::Post => Ok(ApiResponse::Status(code.as_u16())),
                };
            }

            if code == StatusCode::INTERNAL_SERVER_ERROR && retries < max_retries {
                retries += 1;
                self.sink.emit(&status::retry_line(code, retries, max_retries));
                let delay = self.retry.delay_for_retry(retries);
                warn!(
                    retry = retries,
                    max_retries,
                    delay_ms = u64::try_from(delay.as_millis()).unwrap_or(u64::MAX),
                    "Server error, retrying"
                );
                tokio::time::sleep(delay).await;
                continue;
            }

            self.sink.emit(&status::error_line(code));
            let reason = status::reason_phrase(code).to_string();
            return Err(if code == StatusCode::INTERNAL_SERVER_ERROR && retries > 0 {
                FetchError::RetriesExhausted {
                    status: code.as_u16(),
                    reason,
                    retries,
                }
            } else {
                FetchError::Status {
                    status: code.as_u16(),
                    reason,
                }
            });
        }
    }
}

/// Ensures the base URL ends with `/` so endpoints join beneath it.
fn normalize_base(base_url: &str) -> Result<Url, FetchError> {
    let mut base = base_url.to_string();
    if !base.ends_with('/') {
        base.push('/');
    }
    Url::parse(&base).map_err(|e| FetchError::InvalidUrl(format!("{base_url}: {e}")))
}

/// A GET body is usable if it is JSON and neither `null`, `[]` nor `{}`.
fn usable_payload(body: &[u8]) -> Option<Value> {
    match serde_json::from_slice::<Value>(body) {
        Ok(Value::Null) | Err(_) => None,
        Ok(Value::Array(items)) if items.is_empty() => None,
        Ok(Value::Object(fields)) if fields.is_empty() => None,
        Ok(value) => Some(value),
    }
}

// ============================================================================
// Tests
// ============================================================================
