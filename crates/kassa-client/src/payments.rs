//! # Payments
//!
//! `POST /payments`, `GET /payments/{id}`, `GET /payments`,
//! `POST /payments/{id}/capture`, `POST /payments/{id}/cancel`.

use crate::client::{fetch, fetch_all, require_id};
use crate::connector::{Connector, RequestDescriptor};
use kassa_core::{Confirmation, CreatePaymentRequest, KassaResult, Payment, PaymentListFilter};
use serde_json::json;
use tracing::{info, instrument};

/// Payment operations
#[derive(Debug, Clone, Copy)]
pub struct Payments<'a> {
    connector: &'a Connector,
}

impl<'a> Payments<'a> {
    pub(crate) fn new(connector: &'a Connector) -> Self {
        Self { connector }
    }

    /// Create a payment.
    ///
    /// Without an explicit confirmation, a redirect to the configured
    /// `redirect_url` is requested.
    #[instrument(skip(self, request), fields(amount = %request.amount))]
    pub async fn create(&self, mut request: CreatePaymentRequest) -> KassaResult<Payment> {
        if request.confirmation.is_none() {
            if let Some(url) = &self.connector.config().redirect_url {
                request.confirmation = Some(Confirmation::redirect(url.clone()));
            }
        }

        let descriptor = RequestDescriptor::post("payments", &request)?;
        let payment: Payment = fetch(self.connector, descriptor).await?;

        info!(
            "Created payment: id={}, status={}",
            payment.id,
            payment.status.as_str()
        );
        Ok(payment)
    }

    #[instrument(skip(self))]
    pub async fn load(&self, payment_id: &str) -> KassaResult<Payment> {
        let payment_id = require_id("payment", payment_id)?;
        fetch(self.connector, RequestDescriptor::get(format!("payments/{}", payment_id))).await
    }

    /// All payments matching `filter`, across every page
    #[instrument(skip(self, filter))]
    pub async fn list(&self, filter: &PaymentListFilter) -> KassaResult<Vec<Payment>> {
        fetch_all(self.connector, "payments", filter).await
    }

    /// Capture a payment in `waiting_for_capture`
    #[instrument(skip(self))]
    pub async fn capture(&self, payment_id: &str) -> KassaResult<Payment> {
        let payment_id = require_id("payment", payment_id)?;
        let path = format!("payments/{}/capture", payment_id);
        let descriptor = RequestDescriptor::post(path, &json!({}))?;
        let payment: Payment = fetch(self.connector, descriptor).await?;

        info!("Captured payment: id={}", payment.id);
        Ok(payment)
    }

    /// Cancel a payment in `waiting_for_capture`
    #[instrument(skip(self))]
    pub async fn cancel(&self, payment_id: &str) -> KassaResult<Payment> {
        let payment_id = require_id("payment", payment_id)?;
        let path = format!("payments/{}/cancel", payment_id);
        let descriptor = RequestDescriptor::post(path, &json!({}))?;
        let payment: Payment = fetch(self.connector, descriptor).await?;

        info!("Cancelled payment: id={}", payment.id);
        Ok(payment)
    }
}
