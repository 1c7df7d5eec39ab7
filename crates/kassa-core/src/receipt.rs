//! # Receipt Types
//!
//! Fiscal receipts (54-FZ) registered through the provider.

use crate::amount::Amount;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Whether the receipt accompanies a payment or a refund
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReceiptKind {
    Payment,
    Refund,
}

/// Registration status of a receipt
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReceiptStatus {
    Pending,
    Succeeded,
    Canceled,
}

impl ReceiptStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ReceiptStatus::Pending => "pending",
            ReceiptStatus::Succeeded => "succeeded",
            ReceiptStatus::Canceled => "canceled",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaymentMode {
    FullPrepayment,
    FullPayment,
}

/// Receipt recipient; at least one contact is required by the provider
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Customer {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub full_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub inn: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
}

impl Customer {
    pub fn with_email(email: impl Into<String>) -> Self {
        Self {
            email: Some(email.into()),
            ..Self::default()
        }
    }
}

/// A receipt line
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReceiptItem {
    pub description: String,
    pub amount: Amount,
    /// VAT rate code (1..=6 per provider dictionary)
    pub vat_code: u8,
    pub quantity: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub measure: Option<String>,
    /// Dictionary code such as `commodity` or `service`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub payment_subject: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub payment_mode: Option<PaymentMode>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub country_of_origin_code: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub product_code: Option<String>,
}

impl ReceiptItem {
    pub fn new(description: impl Into<String>, amount: Amount, quantity: f64, vat_code: u8) -> Self {
        Self {
            description: description.into(),
            amount,
            vat_code,
            quantity,
            measure: None,
            payment_subject: None,
            payment_mode: None,
            country_of_origin_code: None,
            product_code: None,
        }
    }

    /// Builder: set payment subject
    pub fn with_payment_subject(mut self, subject: impl Into<String>) -> Self {
        self.payment_subject = Some(subject.into());
        self
    }

    /// Builder: set payment mode
    pub fn with_payment_mode(mut self, mode: PaymentMode) -> Self {
        self.payment_mode = Some(mode);
        self
    }
}

/// Settlement kind code (`cashless`, `prepayment`, `postpayment`, `consideration`)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Settlement {
    #[serde(rename = "type")]
    pub kind: String,
    pub amount: Amount,
}

/// Receipt data sent inside a payment or refund creation request
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PaymentReceipt {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub customer: Option<Customer>,
    pub items: Vec<ReceiptItem>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tax_system_code: Option<u8>,
}

impl PaymentReceipt {
    pub fn new(items: Vec<ReceiptItem>) -> Self {
        Self {
            customer: None,
            items,
            tax_system_code: None,
        }
    }

    /// Builder: set customer
    pub fn with_customer(mut self, customer: Customer) -> Self {
        self.customer = Some(customer);
        self
    }
}

/// A receipt as returned by the provider
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Receipt {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: ReceiptKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub payment_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub refund_id: Option<String>,
    pub status: ReceiptStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fiscal_document_number: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fiscal_storage_number: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fiscal_attribute: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub registered_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fiscal_provider_id: Option<String>,
    pub items: Vec<ReceiptItem>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub settlements: Vec<Settlement>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub on_behalf_of: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tax_system_code: Option<u8>,
}

/// Payload for `POST /receipts`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreateReceiptRequest {
    #[serde(rename = "type")]
    pub kind: ReceiptKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub payment_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub refund_id: Option<String>,
    pub customer: Customer,
    pub items: Vec<ReceiptItem>,
    /// Send the receipt to the customer; the provider only accepts `true`
    pub send: bool,
    pub settlements: Vec<Settlement>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tax_system_code: Option<u8>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub on_behalf_of: Option<String>,
}

impl CreateReceiptRequest {
    /// Receipt for a payment
    pub fn for_payment(
        payment_id: impl Into<String>,
        customer: Customer,
        items: Vec<ReceiptItem>,
        settlements: Vec<Settlement>,
    ) -> Self {
        Self {
            kind: ReceiptKind::Payment,
            payment_id: Some(payment_id.into()),
            refund_id: None,
            customer,
            items,
            send: true,
            settlements,
            tax_system_code: None,
            on_behalf_of: None,
        }
    }

    /// Receipt for a refund
    pub fn for_refund(
        refund_id: impl Into<String>,
        customer: Customer,
        items: Vec<ReceiptItem>,
        settlements: Vec<Settlement>,
    ) -> Self {
        Self {
            kind: ReceiptKind::Refund,
            payment_id: None,
            refund_id: Some(refund_id.into()),
            customer,
            items,
            send: true,
            settlements,
            tax_system_code: None,
            on_behalf_of: None,
        }
    }
}
