//! # Refunds

use crate::client::{fetch, fetch_all, require_id};
use crate::connector::{Connector, RequestDescriptor};
use kassa_core::{CreateRefundRequest, KassaResult, Refund, RefundListFilter};
use tracing::{info, instrument};

/// Refund operations
#[derive(Debug, Clone, Copy)]
pub struct Refunds<'a> {
    connector: &'a Connector,
}

impl<'a> Refunds<'a> {
    pub(crate) fn new(connector: &'a Connector) -> Self {
        Self { connector }
    }

    /// Refund a succeeded payment, fully or partially
    #[instrument(skip(self, request), fields(payment_id = %request.payment_id, amount = %request.amount))]
    pub async fn create(&self, request: CreateRefundRequest) -> KassaResult<Refund> {
        require_id("payment", &request.payment_id)?;
        let descriptor = RequestDescriptor::post("refunds", &request)?;
        let refund: Refund = fetch(self.connector, descriptor).await?;

        info!(
            "Created refund: id={}, status={}",
            refund.id,
            refund.status.as_str()
        );
        Ok(refund)
    }

    #[instrument(skip(self))]
    pub async fn load(&self, refund_id: &str) -> KassaResult<Refund> {
        let refund_id = require_id("refund", refund_id)?;
        fetch(self.connector, RequestDescriptor::get(format!("refunds/{}", refund_id))).await
    }

    #[instrument(skip(self, filter))]
    pub async fn list(&self, filter: &RefundListFilter) -> KassaResult<Vec<Refund>> {
        fetch_all(self.connector, "refunds", filter).await
    }
}
