//! # Receipts
//!
//! Fiscal receipts registered through the provider. A receipt belongs either
//! to a payment or to a refund.

use crate::client::{fetch, fetch_all, require_id};
use crate::connector::{Connector, RequestDescriptor};
use kassa_core::{
    CreateReceiptRequest, KassaError, KassaResult, Receipt, ReceiptKind, ReceiptListFilter,
};
use tracing::{info, instrument};

/// Receipt operations
#[derive(Debug, Clone, Copy)]
pub struct Receipts<'a> {
    connector: &'a Connector,
}

impl<'a> Receipts<'a> {
    pub(crate) fn new(connector: &'a Connector) -> Self {
        Self { connector }
    }

    #[instrument(skip(self, request), fields(kind = ?request.kind))]
    pub async fn create(&self, request: CreateReceiptRequest) -> KassaResult<Receipt> {
        let linked = match request.kind {
            ReceiptKind::Payment => request.payment_id.is_some(),
            ReceiptKind::Refund => request.refund_id.is_some(),
        };
        if !linked {
            return Err(KassaError::InvalidRequest(
                "receipt must reference the payment or refund of its type".to_string(),
            ));
        }

        let descriptor = RequestDescriptor::post("receipts", &request)?;
        let receipt: Receipt = fetch(self.connector, descriptor).await?;

        info!("Created receipt: id={}, status={}", receipt.id, receipt.status.as_str());
        Ok(receipt)
    }

    #[instrument(skip(self))]
    pub async fn load(&self, receipt_id: &str) -> KassaResult<Receipt> {
        let receipt_id = require_id("receipt", receipt_id)?;
        fetch(self.connector, RequestDescriptor::get(format!("receipts/{}", receipt_id))).await
    }

    #[instrument(skip(self, filter))]
    pub async fn list(&self, filter: &ReceiptListFilter) -> KassaResult<Vec<Receipt>> {
        fetch_all(self.connector, "receipts", filter).await
    }
}
