//! # Transport
//!
//! A transport is an HTTP client bound to one idempotence key. It carries
//! basic-auth credentials, a token-bucket rate limiter, the retry policy and
//! optional request/response logging, and normalizes every response into an
//! [`ApiResult`].
//!
//! [`TransportFactory`] builds transports and keeps them in the
//! [`IdempotencyCache`] so retries and page continuations reuse them.

use crate::cache::IdempotencyCache;
use crate::config::ConnectorConfig;
use crate::connector::{Method, RequestDescriptor};
use crate::retry::{RetryHint, RetryPolicy};
use governor::{DefaultDirectRateLimiter, Quota, RateLimiter};
use kassa_core::{ApiError, ApiResult, KassaError, KassaResult};
use reqwest::header::{HeaderMap, HeaderValue, CONTENT_TYPE};
use reqwest::{Client, StatusCode, Url};
use serde::de::DeserializeOwned;
use std::fmt;
use std::num::NonZeroU32;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, error, info, instrument, trace};
use uuid::Uuid;

/// Header carrying the idempotence key on every request
pub const IDEMPOTENCE_HEADER: &str = "Idempotence-Key";

const USER_AGENT: &str = concat!("kassa-rs/", env!("CARGO_PKG_VERSION"));

/// Status and body of one HTTP exchange, before normalization
#[derive(Debug, Clone)]
struct RawResponse {
    status: StatusCode,
    body: String,
}

/// HTTP client bound to one idempotence key
pub struct Transport {
    request_id: String,
    client: Client,
    base_url: Url,
    shop_id: String,
    secret_key: String,
    limiter: DefaultDirectRateLimiter,
    rate: NonZeroU32,
    debug: bool,
    retry: RetryPolicy,
}

impl Transport {
    /// Build a transport for `request_id` from connector config and per-request overrides
    pub fn build(
        config: &ConnectorConfig,
        descriptor: &RequestDescriptor,
        request_id: String,
    ) -> KassaResult<Self> {
        let rps = descriptor
            .max_rps
            .map_or(config.max_rps, |rps| rps.min(config.max_rps));
        let rate = NonZeroU32::new(rps).ok_or_else(|| {
            KassaError::InvalidRequest("max_rps must be at least 1".to_string())
        })?;

        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        headers.insert(
            IDEMPOTENCE_HEADER,
            HeaderValue::from_str(&request_id).map_err(|_| {
                KassaError::InvalidRequest(format!("Invalid idempotence key: {}", request_id))
            })?,
        );

        let client = Client::builder()
            .default_headers(headers)
            .user_agent(USER_AGENT)
            .timeout(config.timeout)
            .build()
            .map_err(|e| {
                KassaError::Configuration(format!("Failed to create HTTP client: {}", e))
            })?;

        Ok(Self {
            request_id,
            client,
            base_url: config.base_url()?,
            shop_id: config.shop_id.clone(),
            secret_key: config.secret_key.clone(),
            limiter: RateLimiter::direct(Quota::per_second(rate)),
            rate,
            debug: config.debug || descriptor.debug,
            retry: config.retry.clone(),
        })
    }

    /// Idempotence key stamped on every request of this transport
    pub fn request_id(&self) -> &str {
        &self.request_id
    }

    /// Requests per second allowed by the limiter
    pub fn rate(&self) -> u32 {
        self.rate.get()
    }

    pub fn is_debug(&self) -> bool {
        self.debug
    }

    fn url_for(&self, path: &str) -> KassaResult<Url> {
        self.base_url
            .join(path.trim_start_matches('/'))
            .map_err(|e| KassaError::InvalidRequest(format!("Invalid path {}: {}", path, e)))
    }

    /// Send the described request, retrying transient failures, and normalize the outcome
    #[instrument(
        skip(self, descriptor),
        fields(request_id = %self.request_id, method = %descriptor.method, path = %descriptor.path)
    )]
    pub async fn execute<T: DeserializeOwned>(
        &self,
        descriptor: &RequestDescriptor,
    ) -> KassaResult<ApiResult<T>> {
        let url = self.url_for(&descriptor.path)?;

        let outcome = self
            .retry
            .run(
                |attempt| self.send_once(&url, descriptor, attempt),
                retry_reason,
            )
            .await;

        self.normalize(outcome?)
    }

    async fn send_once(
        &self,
        url: &Url,
        descriptor: &RequestDescriptor,
        attempt: u32,
    ) -> KassaResult<RawResponse> {
        self.limiter.until_ready().await;

        let mut url = url.clone();
        if !descriptor.query.is_empty() {
            url.query_pairs_mut().extend_pairs(&descriptor.query);
        }

        let mut request = self
            .client
            .request(descriptor.method.to_reqwest(), url.clone())
            .basic_auth(&self.shop_id, Some(&self.secret_key));

        let body = match descriptor.method {
            Method::Post => descriptor.body.as_ref(),
            Method::Get | Method::Delete => None,
        };
        if let Some(body) = body {
            request = request.json(body);
        }

        if self.debug {
            info!(
                attempt,
                body = %body.map(|b| b.to_string()).unwrap_or_default(),
                "{} {}",
                descriptor.method,
                url
            );
        } else {
            trace!(attempt, "{} {}", descriptor.method, url);
        }

        let response = request
            .send()
            .await
            .map_err(|e| KassaError::Network(e.to_string()))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| KassaError::Network(e.to_string()))?;

        if self.debug {
            info!(status = status.as_u16(), body = %body, "Response");
        } else {
            debug!(status = status.as_u16(), "Response");
        }

        Ok(RawResponse { status, body })
    }

    /// Map a raw response onto the success/failure variants.
    ///
    /// A failure status whose body is not a provider error becomes
    /// [`KassaError::Http`].
    fn normalize<T: DeserializeOwned>(&self, raw: RawResponse) -> KassaResult<ApiResult<T>> {
        let request_id = self.request_id.clone();

        if raw.status.is_success() {
            let data = serde_json::from_str(&raw.body).map_err(|e| {
                KassaError::Serialization(format!("Failed to parse API response: {}", e))
            })?;
            return Ok(ApiResult::Success { request_id, data });
        }

        match serde_json::from_str::<ApiError>(&raw.body) {
            Ok(error) => {
                debug!(code = %error.code, "API error: {}", error.description);
                Ok(ApiResult::Failure { request_id, error })
            }
            Err(_) => {
                error!("API error without body: status={}, body={}", raw.status, raw.body);
                Err(KassaError::Http {
                    status: raw.status.as_u16(),
                    body: raw.body,
                })
            }
        }
    }
}

impl fmt::Debug for Transport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Transport")
            .field("request_id", &self.request_id)
            .field("base_url", &self.base_url.as_str())
            .field("shop_id", &self.shop_id)
            .field("rate", &self.rate)
            .field("debug", &self.debug)
            .finish()
    }
}

/// Why an attempt should be repeated, if it should.
///
/// A 429 or 5xx body carrying `retry_after` (milliseconds) sets the wait.
fn retry_reason(outcome: &KassaResult<RawResponse>) -> Option<RetryHint> {
    match outcome {
        Err(e) if e.is_retryable() => Some(RetryHint::new(e.to_string())),
        Err(_) => None,
        Ok(raw) if raw.status == StatusCode::TOO_MANY_REQUESTS || raw.status.is_server_error() => {
            let hint = RetryHint::new(format!("HTTP {}", raw.status));
            let retry_after = serde_json::from_str::<ApiError>(&raw.body)
                .ok()
                .and_then(|api| api.retry_after);
            Some(match retry_after {
                Some(ms) => hint.after(Duration::from_millis(ms)),
                None => hint,
            })
        }
        Ok(_) => None,
    }
}

/// Resolves the transport for a request: cached by idempotence key, or freshly built
#[derive(Debug)]
pub struct TransportFactory {
    config: Arc<ConnectorConfig>,
    cache: IdempotencyCache<Transport>,
}

impl TransportFactory {
    pub fn new(config: Arc<ConnectorConfig>) -> Self {
        Self {
            config,
            cache: IdempotencyCache::new(),
        }
    }

    /// Return the transport cached under the descriptor's key, or build and cache a new one
    pub fn resolve(&self, descriptor: &RequestDescriptor) -> KassaResult<Arc<Transport>> {
        if let Some(request_id) = &descriptor.request_id {
            if let Some(transport) = self.cache.get(request_id) {
                trace!(request_id = %request_id, "Reusing cached transport");
                return Ok(transport);
            }
        }

        let request_id = descriptor
            .request_id
            .clone()
            .unwrap_or_else(|| Uuid::new_v4().to_string());

        let transport = Arc::new(Transport::build(&self.config, descriptor, request_id.clone())?);
        debug!(
            request_id = %request_id,
            rate = transport.rate(),
            debug = transport.is_debug(),
            "Built transport"
        );

        self.cache.insert(request_id, Arc::clone(&transport));
        Ok(transport)
    }

    /// Cached transport for a key, if still within the idempotence window
    pub fn cached(&self, request_id: &str) -> Option<Arc<Transport>> {
        self.cache.get(request_id)
    }
}
