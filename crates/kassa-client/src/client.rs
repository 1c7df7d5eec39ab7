//! # Kassa Facade
//!
//! Resource-oriented API on top of [`Connector`]. Facade methods unwrap
//! [`ApiResult`] values: a provider error becomes [`KassaError::Api`] with
//! the provider's error code.

use crate::config::ConnectorConfig;
use crate::connector::{Connector, RequestDescriptor};
use crate::payments::Payments;
use crate::receipts::Receipts;
use crate::refunds::Refunds;
use kassa_core::{ApiResult, KassaError, KassaResult, ListFilter, PagedResult};
use once_cell::sync::OnceCell;
use serde::de::DeserializeOwned;
use tracing::debug;

static SHARED: OnceCell<Kassa> = OnceCell::new();

/// YooKassa client
#[derive(Debug)]
pub struct Kassa {
    connector: Connector,
}

impl Kassa {
    /// Create an owned client
    pub fn new(config: ConnectorConfig) -> KassaResult<Self> {
        Ok(Self {
            connector: Connector::new(config)?,
        })
    }

    /// Create from environment variables
    pub fn from_env() -> KassaResult<Self> {
        Self::new(ConnectorConfig::from_env()?)
    }

    /// Process-wide client.
    ///
    /// The first successful call fixes the configuration; later calls return
    /// the same instance and ignore their `config`.
    pub fn shared(config: ConnectorConfig) -> KassaResult<&'static Kassa> {
        SHARED.get_or_try_init(|| Self::new(config))
    }

    /// Raw access returning [`ApiResult`] instead of unwrapping it
    pub fn connector(&self) -> &Connector {
        &self.connector
    }

    pub fn payments(&self) -> Payments<'_> {
        Payments::new(&self.connector)
    }

    pub fn refunds(&self) -> Refunds<'_> {
        Refunds::new(&self.connector)
    }

    pub fn receipts(&self) -> Receipts<'_> {
        Receipts::new(&self.connector)
    }
}

/// Execute one call and unwrap the result
pub(crate) async fn fetch<T: DeserializeOwned>(
    connector: &Connector,
    mut descriptor: RequestDescriptor,
) -> KassaResult<T> {
    connector.request(&mut descriptor).await?.into_result()
}

/// Walk a list endpoint to the end and collect every item.
///
/// All pages go out under the idempotence key of the first response.
pub(crate) async fn fetch_all<T: DeserializeOwned>(
    connector: &Connector,
    path: &str,
    filter: &impl ListFilter,
) -> KassaResult<Vec<T>> {
    let params = filter.query_pairs();
    let mut descriptor = RequestDescriptor::get(path).with_query(params.clone());
    let mut items = Vec::new();
    let mut pages = 0u32;
    let mut last_cursor: Option<String> = None;

    loop {
        let page: PagedResult<T> = match connector.request(&mut descriptor).await? {
            ApiResult::Success { request_id, data } => {
                descriptor.request_id = Some(request_id);
                data
            }
            ApiResult::Failure { error, .. } => return Err(KassaError::Api(error)),
        };

        pages += 1;
        items.extend(page.items);

        // An empty or repeated cursor ends the listing like a missing one
        match page.next_cursor.filter(|c| !c.is_empty()) {
            Some(cursor) if last_cursor.as_deref() != Some(cursor.as_str()) => {
                descriptor.query = params.clone();
                descriptor.query.push(("cursor".to_string(), cursor.clone()));
                last_cursor = Some(cursor);
            }
            _ => break,
        }
    }

    debug!("Listed {}: pages={}, items={}", path, pages, items.len());
    Ok(items)
}

/// Reject empty resource ids before they turn into a list call
pub(crate) fn require_id<'a>(kind: &str, id: &'a str) -> KassaResult<&'a str> {
    let id = id.trim();
    if id.is_empty() {
        return Err(KassaError::InvalidRequest(format!("{} id is empty", kind)));
    }
    Ok(id)
}
