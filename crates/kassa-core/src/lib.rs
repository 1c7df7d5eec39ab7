//! # kassa-core
//!
//! Core types for the kassa-rs YooKassa client.
//!
//! This crate provides:
//! - `Payment`, `Refund` and `Receipt` resources with their creation payloads
//! - `Amount` and `Currency` in the provider's wire format
//! - List filters rendered as query parameters
//! - `ApiResult` and `PagedResult` for normalized responses
//! - `KassaError` for typed error handling
//!
//! No networking lives here; see `kassa-client` for the connector and facade.
//!
//! ## Example
//!
//! ```rust,ignore
//! use kassa_core::{Amount, Confirmation, CreatePaymentRequest};
//!
//! let request = CreatePaymentRequest::new(Amount::rub("10.00"))
//!     .with_description("Order #72")
//!     .with_capture(true)
//!     .with_confirmation(Confirmation::redirect("https://shop.example/return"));
//! ```

pub mod amount;
pub mod error;
pub mod filter;
pub mod payment;
pub mod receipt;
pub mod refund;
pub mod result;

// Re-exports for convenience
pub use amount::{Amount, Currency};
pub use error::{ApiError, ErrorCode, KassaError, KassaResult};
pub use filter::{
    DateFilter, ListFilter, PaymentListFilter, QueryPair, ReceiptListFilter, RefundListFilter,
};
pub use payment::{
    AuthorizationDetails, CancellationDetails, CancellationParty, Confirmation,
    CreatePaymentRequest, Payment, PaymentMethod, PaymentMethodData, PaymentMethodType,
    PaymentStatus, Recipient, ThreeDSecure,
};
pub use receipt::{
    CreateReceiptRequest, Customer, PaymentMode, PaymentReceipt, Receipt, ReceiptItem,
    ReceiptKind, ReceiptStatus, Settlement,
};
pub use refund::{CreateRefundRequest, Refund, RefundSource, RefundStatus};
pub use result::{ApiResult, PagedResult};
