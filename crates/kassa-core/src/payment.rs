//! # Payment Types
//!
//! Payment objects and the payload for creating them.

use crate::amount::Amount;
use crate::receipt::PaymentReceipt;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Lifecycle status of a payment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaymentStatus {
    /// Created, waiting for the payer
    Pending,
    /// Authorized, waiting for capture or cancellation
    WaitingForCapture,
    /// Completed (final)
    Succeeded,
    /// Cancelled or declined (final)
    Canceled,
}

impl PaymentStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            PaymentStatus::Pending => "pending",
            PaymentStatus::WaitingForCapture => "waiting_for_capture",
            PaymentStatus::Succeeded => "succeeded",
            PaymentStatus::Canceled => "canceled",
        }
    }

    /// Final statuses never change again
    pub fn is_final(&self) -> bool {
        matches!(self, PaymentStatus::Succeeded | PaymentStatus::Canceled)
    }
}

/// Payment method codes.
///
/// Codes this client does not know yet are kept verbatim in
/// [`PaymentMethodType::Other`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum PaymentMethodType {
    BankCard,
    YooMoney,
    Qiwi,
    Sberbank,
    Alfabank,
    TinkoffBank,
    B2bSberbank,
    Sbp,
    MobileBalance,
    Cash,
    Installments,
    SberLoan,
    Other(String),
}

impl PaymentMethodType {
    pub fn as_str(&self) -> &str {
        match self {
            PaymentMethodType::BankCard => "bank_card",
            PaymentMethodType::YooMoney => "yoo_money",
            PaymentMethodType::Qiwi => "qiwi",
            PaymentMethodType::Sberbank => "sberbank",
            PaymentMethodType::Alfabank => "alfabank",
            PaymentMethodType::TinkoffBank => "tinkoff_bank",
            PaymentMethodType::B2bSberbank => "b2b_sberbank",
            PaymentMethodType::Sbp => "sbp",
            PaymentMethodType::MobileBalance => "mobile_balance",
            PaymentMethodType::Cash => "cash",
            PaymentMethodType::Installments => "installments",
            PaymentMethodType::SberLoan => "sber_loan",
            PaymentMethodType::Other(code) => code.as_str(),
        }
    }
}

impl From<String> for PaymentMethodType {
    fn from(code: String) -> Self {
        match code.as_str() {
            "bank_card" => PaymentMethodType::BankCard,
            "yoo_money" => PaymentMethodType::YooMoney,
            "qiwi" => PaymentMethodType::Qiwi,
            "sberbank" => PaymentMethodType::Sberbank,
            "alfabank" => PaymentMethodType::Alfabank,
            "tinkoff_bank" => PaymentMethodType::TinkoffBank,
            "b2b_sberbank" => PaymentMethodType::B2bSberbank,
            "sbp" => PaymentMethodType::Sbp,
            "mobile_balance" => PaymentMethodType::MobileBalance,
            "cash" => PaymentMethodType::Cash,
            "installments" => PaymentMethodType::Installments,
            "sber_loan" => PaymentMethodType::SberLoan,
            _ => PaymentMethodType::Other(code),
        }
    }
}

impl From<PaymentMethodType> for String {
    fn from(kind: PaymentMethodType) -> Self {
        match kind {
            PaymentMethodType::Other(code) => code,
            known => known.as_str().to_string(),
        }
    }
}

/// Payment method attached to a payment.
///
/// Method-specific fields (card details, phone, login) stay in `details`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PaymentMethod {
    #[serde(rename = "type")]
    pub kind: PaymentMethodType,
    pub id: String,
    #[serde(default)]
    pub saved: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(flatten)]
    pub details: serde_json::Map<String, serde_json::Value>,
}

/// Payment method data supplied when creating a payment
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PaymentMethodData {
    #[serde(rename = "type")]
    pub kind: PaymentMethodType,
    #[serde(flatten)]
    pub details: serde_json::Map<String, serde_json::Value>,
}

impl PaymentMethodData {
    pub fn new(kind: PaymentMethodType) -> Self {
        Self {
            kind,
            details: serde_json::Map::new(),
        }
    }
}

/// Scenario the payer goes through to confirm the payment
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Confirmation {
    Redirect {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        confirmation_url: Option<String>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        return_url: Option<String>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        enforce: Option<bool>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        locale: Option<String>,
    },
    Embedded {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        confirmation_token: Option<String>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        locale: Option<String>,
    },
    External {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        locale: Option<String>,
    },
    Qr {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        confirmation_data: Option<String>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        locale: Option<String>,
    },
    MobileApplication {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        confirmation_url: Option<String>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        return_url: Option<String>,
    },
}

impl Confirmation {
    /// Redirect scenario returning the payer to `return_url`
    pub fn redirect(return_url: impl Into<String>) -> Self {
        Confirmation::Redirect {
            confirmation_url: None,
            return_url: Some(return_url.into()),
            enforce: None,
            locale: None,
        }
    }

    /// URL the payer must be sent to, if the scenario has one
    pub fn confirmation_url(&self) -> Option<&str> {
        match self {
            Confirmation::Redirect {
                confirmation_url, ..
            }
            | Confirmation::MobileApplication {
                confirmation_url, ..
            } => confirmation_url.as_deref(),
            _ => None,
        }
    }
}

/// Who cancelled the payment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CancellationParty {
    Merchant,
    YooMoney,
    PaymentNetwork,
}

/// Why and by whom a payment or refund was cancelled.
///
/// `reason` is a provider dictionary code such as `insufficient_funds`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CancellationDetails {
    pub party: CancellationParty,
    pub reason: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Recipient {
    pub account_id: String,
    pub gateway_id: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ThreeDSecure {
    pub applied: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthorizationDetails {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rrn: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub auth_code: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub three_d_secure: Option<ThreeDSecure>,
}

/// A payment as returned by the provider
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Payment {
    pub id: String,

    pub status: PaymentStatus,

    pub amount: Amount,

    /// Amount after the provider's commission
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub income_amount: Option<Amount>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub recipient: Option<Recipient>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub payment_method: Option<PaymentMethod>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub captured_at: Option<DateTime<Utc>>,

    pub created_at: DateTime<Utc>,

    /// Deadline for capture or cancellation while `waiting_for_capture`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expires_at: Option<DateTime<Utc>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub confirmation: Option<Confirmation>,

    /// Created with a test shop
    #[serde(default)]
    pub test: bool,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub refunded_amount: Option<Amount>,

    #[serde(default)]
    pub paid: bool,

    #[serde(default)]
    pub refundable: bool,

    #[serde(default, skip_serializing_if = "HashMap::is_empty")]
    pub metadata: HashMap<String, String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cancellation_details: Option<CancellationDetails>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub authorization_details: Option<AuthorizationDetails>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub merchant_customer_id: Option<String>,
}

impl Payment {
    /// URL to redirect the payer to, if confirmation requires one
    pub fn confirmation_url(&self) -> Option<&str> {
        self.confirmation.as_ref().and_then(|c| c.confirmation_url())
    }

    /// Only payments waiting for capture can be captured or cancelled
    pub fn is_capturable(&self) -> bool {
        self.status == PaymentStatus::WaitingForCapture
    }
}

/// Payload for `POST /payments`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreatePaymentRequest {
    pub amount: Amount,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub receipt: Option<PaymentReceipt>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub recipient: Option<Recipient>,

    /// One-time token from the checkout widget or mobile SDK
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub payment_token: Option<String>,

    /// Id of a previously saved payment method
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub payment_method_id: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub payment_method_data: Option<PaymentMethodData>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub confirmation: Option<Confirmation>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub save_payment_method: Option<bool>,

    /// Capture automatically; otherwise the payment stops at `waiting_for_capture`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub capture: Option<bool>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub client_ip: Option<String>,

    #[serde(default, skip_serializing_if = "HashMap::is_empty")]
    pub metadata: HashMap<String, String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub merchant_customer_id: Option<String>,
}

impl CreatePaymentRequest {
    /// Create a request for the given amount
    pub fn new(amount: Amount) -> Self {
        Self {
            amount,
            description: None,
            receipt: None,
            recipient: None,
            payment_token: None,
            payment_method_id: None,
            payment_method_data: None,
            confirmation: None,
            save_payment_method: None,
            capture: None,
            client_ip: None,
            metadata: HashMap::new(),
            merchant_customer_id: None,
        }
    }

    /// Builder: set description
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Builder: set confirmation scenario
    pub fn with_confirmation(mut self, confirmation: Confirmation) -> Self {
        self.confirmation = Some(confirmation);
        self
    }

    /// Builder: attach receipt data
    pub fn with_receipt(mut self, receipt: PaymentReceipt) -> Self {
        self.receipt = Some(receipt);
        self
    }

    /// Builder: set automatic capture
    pub fn with_capture(mut self, capture: bool) -> Self {
        self.capture = Some(capture);
        self
    }

    /// Builder: pay with a saved payment method
    pub fn with_payment_method_id(mut self, id: impl Into<String>) -> Self {
        self.payment_method_id = Some(id.into());
        self
    }

    /// Builder: force a payment method
    pub fn with_payment_method_data(mut self, data: PaymentMethodData) -> Self {
        self.payment_method_data = Some(data);
        self
    }

    /// Builder: add metadata
    pub fn with_metadata(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.metadata.insert(key.into(), value.into());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn payment_json() -> serde_json::Value {
        json!({
            "id": "2e3f90e3-000f-5000-a000-14f0028604a7",
            "status": "waiting_for_capture",
            "paid": true,
            "amount": {"value": "10.00", "currency": "RUB"},
            "confirmation": {
                "type": "redirect",
                "confirmation_url": "https://yoomoney.ru/checkout/payments/v2/contract?orderId=2e3f90e3"
            },
            "created_at": "2024-07-18T10:51:18.139Z",
            "description": "Order #72",
            "metadata": {"order_id": "72"},
            "payment_method": {
                "type": "bank_card",
                "id": "2e3f90e3-000f-5000-a000-14f0028604a7",
                "saved": false,
                "card": {"first6": "555555", "last4": "4444"}
            },
            "recipient": {"account_id": "909048", "gateway_id": "2276985"},
            "refundable": false,
            "test": true
        })
    }

    #[test]
    fn test_parse_payment() {
        let payment: Payment = serde_json::from_value(payment_json()).unwrap();

        assert_eq!(payment.status, PaymentStatus::WaitingForCapture);
        assert_eq!(payment.amount, Amount::rub("10.00"));
        assert!(payment.is_capturable());
        assert!(payment.test);
        assert_eq!(payment.metadata.get("order_id"), Some(&"72".to_string()));
        assert!(payment
            .confirmation_url()
            .unwrap()
            .starts_with("https://yoomoney.ru/checkout"));

        let method = payment.payment_method.unwrap();
        assert_eq!(method.kind, PaymentMethodType::BankCard);
        assert!(method.details.contains_key("card"));
    }

    #[test]
    fn test_unknown_payment_method_type_is_kept() {
        let method: PaymentMethod =
            serde_json::from_value(json!({"type": "electronic_certificate", "id": "x"})).unwrap();
        assert_eq!(
            method.kind,
            PaymentMethodType::Other("electronic_certificate".to_string())
        );

        let value = serde_json::to_value(&method).unwrap();
        assert_eq!(value["type"], "electronic_certificate");
    }

    #[test]
    fn test_known_payment_method_type() {
        let data = PaymentMethodData::new(PaymentMethodType::BankCard);
        assert_eq!(serde_json::to_value(&data).unwrap(), json!({"type": "bank_card"}));

        let kind: PaymentMethodType = serde_json::from_value(json!("sbp")).unwrap();
        assert_eq!(kind, PaymentMethodType::Sbp);
    }

    #[test]
    fn test_create_request_skips_empty_fields() {
        let request = CreatePaymentRequest::new(Amount::rub("10.00"))
            .with_description("Order #72")
            .with_confirmation(Confirmation::redirect("https://example.com/return"))
            .with_capture(true);

        let body = serde_json::to_value(&request).unwrap();
        assert_eq!(
            body,
            json!({
                "amount": {"value": "10.00", "currency": "RUB"},
                "description": "Order #72",
                "confirmation": {"type": "redirect", "return_url": "https://example.com/return"},
                "capture": true
            })
        );
    }

    #[test]
    fn test_status_finality() {
        assert!(PaymentStatus::Succeeded.is_final());
        assert!(PaymentStatus::Canceled.is_final());
        assert!(!PaymentStatus::Pending.is_final());
        assert_eq!(PaymentStatus::WaitingForCapture.as_str(), "waiting_for_capture");
    }
}
