//! # kassa-client
//!
//! YooKassa API client for kassa-rs.
//!
//! The crate is layered:
//!
//! 1. **Kassa** - resource facade (`payments`, `refunds`, `receipts`)
//!    - Unwraps provider errors into `KassaError::Api`
//!    - Walks paginated lists to the end
//!
//! 2. **Connector** - one call in, one `ApiResult` out
//!    - Fills the `Idempotence-Key` before any network work
//!    - Never fails on provider errors, only on transport faults
//!
//! 3. **TransportFactory** - transports cached by idempotence key for 90 s
//!    - Basic auth, per-transport rate limiter, retry with exponential backoff
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use kassa_client::{ConnectorConfig, Kassa};
//! use kassa_core::{Amount, CreatePaymentRequest, PaymentListFilter};
//!
//! let kassa = Kassa::new(
//!     ConnectorConfig::new("123456", "test_secret")
//!         .with_redirect_url("https://shop.example/return"),
//! )?;
//!
//! let payment = kassa
//!     .payments()
//!     .create(CreatePaymentRequest::new(Amount::rub("10.00")).with_capture(true))
//!     .await?;
//!
//! // Redirect the payer to payment.confirmation_url()
//!
//! let all = kassa.payments().list(&PaymentListFilter::default()).await?;
//! ```
//!
//! ## Raw results
//!
//! ```rust,ignore
//! use kassa_client::RequestDescriptor;
//! use kassa_core::{ApiResult, Payment};
//!
//! let mut descriptor = RequestDescriptor::get("payments/2e3f90e3-000f-5000-a000-14f0028604a7");
//! match kassa.connector().request::<Payment>(&mut descriptor).await? {
//!     ApiResult::Success { data, .. } => println!("{}", data.status.as_str()),
//!     ApiResult::Failure { error, .. } => println!("{}", error),
//! }
//! ```

pub mod cache;
pub mod client;
pub mod config;
pub mod connector;
pub mod payments;
pub mod receipts;
pub mod refunds;
pub mod retry;
pub mod transport;

// Re-exports
pub use cache::IdempotencyCache;
pub use client::Kassa;
pub use config::{ConnectorConfig, DEFAULT_ENDPOINT, DEFAULT_MAX_RPS, IDEMPOTENCY_TTL};
pub use connector::{Connector, Method, RequestDescriptor};
pub use payments::Payments;
pub use receipts::Receipts;
pub use refunds::Refunds;
pub use retry::{RetryHint, RetryPolicy};
pub use transport::{Transport, TransportFactory, IDEMPOTENCE_HEADER};
