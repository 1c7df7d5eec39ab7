//! # Connector Configuration
//!
//! Credentials and transport settings for the YooKassa API.
//! Values can be given explicitly or loaded from environment variables.

use crate::retry::RetryPolicy;
use kassa_core::{KassaError, KassaResult};
use reqwest::Url;
use std::env;
use std::fmt;
use std::time::Duration;

/// Production API endpoint
pub const DEFAULT_ENDPOINT: &str = "https://api.yookassa.ru/v3/";

/// Requests per second allowed per transport unless configured otherwise
pub const DEFAULT_MAX_RPS: u32 = 5;

/// HTTP timeout applied to every request
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// How long a transport stays reusable under its idempotence key
pub const IDEMPOTENCY_TTL: Duration = Duration::from_secs(90);

/// Connector configuration
#[derive(Clone)]
pub struct ConnectorConfig {
    /// Shop identifier (basic auth user)
    pub shop_id: String,

    /// Secret key (basic auth password), `test_...` or `live_...`
    pub secret_key: String,

    /// API base URL; a missing trailing `/` is added when it is parsed
    pub endpoint: String,

    /// Log every request and response at info level
    pub debug: bool,

    /// Ceiling for requests per second on one transport
    pub max_rps: u32,

    /// Default `return_url` for redirect confirmations
    pub redirect_url: Option<String>,

    pub retry: RetryPolicy,

    pub timeout: Duration,
}

impl ConnectorConfig {
    /// Create config with explicit credentials and defaults for the rest
    pub fn new(shop_id: impl Into<String>, secret_key: impl Into<String>) -> Self {
        Self {
            shop_id: shop_id.into(),
            secret_key: secret_key.into(),
            endpoint: DEFAULT_ENDPOINT.to_string(),
            debug: false,
            max_rps: DEFAULT_MAX_RPS,
            redirect_url: None,
            retry: RetryPolicy::default(),
            timeout: DEFAULT_TIMEOUT,
        }
    }

    /// Load configuration from environment variables.
    ///
    /// Required env vars:
    /// - `YOOKASSA_SHOP_ID`
    /// - `YOOKASSA_SECRET_KEY`
    ///
    /// Optional: `YOOKASSA_ENDPOINT`, `YOOKASSA_DEBUG`, `YOOKASSA_MAX_RPS`,
    /// `YOOKASSA_REDIRECT_URL`.
    pub fn from_env() -> KassaResult<Self> {
        dotenvy::dotenv().ok(); // Load .env file if present

        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build configuration from `YOOKASSA_*` values supplied by `lookup`
    pub fn from_lookup<F>(lookup: F) -> KassaResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let shop_id = lookup("YOOKASSA_SHOP_ID")
            .ok_or_else(|| KassaError::Configuration("YOOKASSA_SHOP_ID not set".to_string()))?;

        let secret_key = lookup("YOOKASSA_SECRET_KEY")
            .ok_or_else(|| KassaError::Configuration("YOOKASSA_SECRET_KEY not set".to_string()))?;

        let mut config = Self::new(shop_id, secret_key);

        if let Some(endpoint) = lookup("YOOKASSA_ENDPOINT") {
            config = config.with_endpoint(endpoint);
        }

        if let Some(debug) = lookup("YOOKASSA_DEBUG") {
            config.debug = matches!(debug.trim(), "1" | "true" | "yes" | "on");
        }

        if let Some(max_rps) = lookup("YOOKASSA_MAX_RPS") {
            config.max_rps = max_rps.trim().parse().map_err(|_| {
                KassaError::Configuration(format!("YOOKASSA_MAX_RPS is not a number: {}", max_rps))
            })?;
        }

        if let Some(url) = lookup("YOOKASSA_REDIRECT_URL") {
            config.redirect_url = Some(url);
        }

        config.validate()?;
        Ok(config)
    }

    /// Check credentials, endpoint and limits
    pub fn validate(&self) -> KassaResult<()> {
        if self.shop_id.trim().is_empty() {
            return Err(KassaError::Configuration("shop id is empty".to_string()));
        }

        if self.secret_key.trim().is_empty() {
            return Err(KassaError::Configuration("secret key is empty".to_string()));
        }

        let url = Url::parse(&self.endpoint).map_err(|e| {
            KassaError::Configuration(format!("invalid endpoint {}: {}", self.endpoint, e))
        })?;
        if !matches!(url.scheme(), "http" | "https") || url.cannot_be_a_base() {
            return Err(KassaError::Configuration(format!(
                "endpoint must be an absolute http(s) URL: {}",
                self.endpoint
            )));
        }

        if self.max_rps == 0 {
            return Err(KassaError::Configuration(
                "max_rps must be at least 1".to_string(),
            ));
        }

        Ok(())
    }

    /// Check if using a test shop key
    pub fn is_test_mode(&self) -> bool {
        self.secret_key.starts_with("test_")
    }

    /// Parsed base URL, with a trailing `/` so relative paths join below it
    pub fn base_url(&self) -> KassaResult<Url> {
        let mut url = Url::parse(&self.endpoint)
            .map_err(|e| KassaError::Configuration(format!("invalid endpoint: {}", e)))?;
        if !url.path().ends_with('/') {
            let path = format!("{}/", url.path());
            url.set_path(&path);
        }
        Ok(url)
    }

    /// Builder: set custom API base URL (for testing)
    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        let mut endpoint = endpoint.into();
        if !endpoint.ends_with('/') {
            endpoint.push('/');
        }
        self.endpoint = endpoint;
        self
    }

    /// Builder: enable request/response logging
    pub fn with_debug(mut self, debug: bool) -> Self {
        self.debug = debug;
        self
    }

    /// Builder: set requests-per-second ceiling
    pub fn with_max_rps(mut self, max_rps: u32) -> Self {
        self.max_rps = max_rps;
        self
    }

    /// Builder: set default return URL for redirect confirmations
    pub fn with_redirect_url(mut self, url: impl Into<String>) -> Self {
        self.redirect_url = Some(url.into());
        self
    }

    /// Builder: set retry policy
    pub fn with_retry_policy(mut self, retry: RetryPolicy) -> Self {
        self.retry = retry;
        self
    }

    /// Builder: set HTTP timeout
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

impl fmt::Debug for ConnectorConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConnectorConfig")
            .field("shop_id", &self.shop_id)
            .field("secret_key", &"***")
            .field("endpoint", &self.endpoint)
            .field("debug", &self.debug)
            .field("max_rps", &self.max_rps)
            .field("redirect_url", &self.redirect_url)
            .field("retry", &self.retry)
            .field("timeout", &self.timeout)
            .finish()
    }
}
