//! # Connector
//!
//! Executes one logical API call and returns the normalized [`ApiResult`].
//! Provider errors come back as [`ApiResult::Failure`]; only transport faults
//! (no structured body) are returned as `Err`.

use crate::config::ConnectorConfig;
use crate::transport::TransportFactory;
use kassa_core::{ApiResult, KassaError, KassaResult, QueryPair};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::fmt;
use std::sync::Arc;
use tracing::{field, instrument, Span};
use uuid::Uuid;

/// HTTP methods used by the API
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Method {
    Get,
    Post,
    Delete,
}

impl Method {
    pub fn as_str(&self) -> &'static str {
        match self {
            Method::Get => "GET",
            Method::Post => "POST",
            Method::Delete => "DELETE",
        }
    }

    pub(crate) fn to_reqwest(self) -> reqwest::Method {
        match self {
            Method::Get => reqwest::Method::GET,
            Method::Post => reqwest::Method::POST,
            Method::Delete => reqwest::Method::DELETE,
        }
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Description of one call, created fresh per operation
#[derive(Debug, Clone, PartialEq)]
pub struct RequestDescriptor {
    pub method: Method,

    /// Path relative to the endpoint, e.g. `payments/{id}/capture`
    pub path: String,

    pub query: Vec<QueryPair>,

    /// JSON body, sent only with `POST`
    pub body: Option<serde_json::Value>,

    /// Idempotence key; filled by the connector when absent
    pub request_id: Option<String>,

    /// Per-request rate override, capped by the configured ceiling
    pub max_rps: Option<u32>,

    /// Per-request debug logging
    pub debug: bool,
}

impl RequestDescriptor {
    fn new(method: Method, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            query: Vec::new(),
            body: None,
            request_id: None,
            max_rps: None,
            debug: false,
        }
    }

    pub fn get(path: impl Into<String>) -> Self {
        Self::new(Method::Get, path)
    }

    /// `POST` with a serialized body
    pub fn post<B: Serialize>(path: impl Into<String>, body: &B) -> KassaResult<Self> {
        let body = serde_json::to_value(body).map_err(|e| {
            KassaError::Serialization(format!("Failed to serialize request body: {}", e))
        })?;
        Ok(Self {
            body: Some(body),
            ..Self::new(Method::Post, path)
        })
    }

    pub fn delete(path: impl Into<String>) -> Self {
        Self::new(Method::Delete, path)
    }

    /// Builder: replace query parameters
    pub fn with_query(mut self, query: Vec<QueryPair>) -> Self {
        self.query = query;
        self
    }

    /// Builder: add one query parameter
    pub fn with_param(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.query.push((key.into(), value.into()));
        self
    }

    /// Builder: reuse an existing idempotence key
    pub fn with_request_id(mut self, request_id: impl Into<String>) -> Self {
        self.request_id = Some(request_id.into());
        self
    }

    /// Builder: lower the rate limit for this call
    pub fn with_max_rps(mut self, max_rps: u32) -> Self {
        self.max_rps = Some(max_rps);
        self
    }

    /// Builder: log this call's request and response
    pub fn with_debug(mut self, debug: bool) -> Self {
        self.debug = debug;
        self
    }
}

/// Low-level API access with idempotence, rate limiting and retries
#[derive(Debug)]
pub struct Connector {
    config: Arc<ConnectorConfig>,
    factory: TransportFactory,
}

impl Connector {
    /// Create a connector from validated configuration
    pub fn new(config: ConnectorConfig) -> KassaResult<Self> {
        config.validate()?;
        let config = Arc::new(config);
        Ok(Self {
            factory: TransportFactory::new(Arc::clone(&config)),
            config,
        })
    }

    /// Create from environment variables
    pub fn from_env() -> KassaResult<Self> {
        Self::new(ConnectorConfig::from_env()?)
    }

    pub fn config(&self) -> &ConnectorConfig {
        &self.config
    }

    pub fn transports(&self) -> &TransportFactory {
        &self.factory
    }

    /// Execute one call.
    ///
    /// The idempotence key is written back into `descriptor` before any
    /// network work, so calling again with the same descriptor reuses it.
    #[instrument(
        skip(self, descriptor),
        fields(method = %descriptor.method, path = %descriptor.path, request_id = field::Empty)
    )]
    pub async fn request<T: DeserializeOwned>(
        &self,
        descriptor: &mut RequestDescriptor,
    ) -> KassaResult<ApiResult<T>> {
        let request_id = descriptor
            .request_id
            .get_or_insert_with(|| Uuid::new_v4().to_string())
            .clone();
        Span::current().record("request_id", request_id.as_str());

        let transport = self.factory.resolve(descriptor)?;
        transport.execute(descriptor).await
    }
}
