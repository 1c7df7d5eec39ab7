//! # List Filters
//!
//! Query filters for the list endpoints. The provider expects dotted keys for
//! time ranges, e.g. `created_at.gte=2024-07-18T10:51:18.139Z`.
//!
//! The pagination cursor is not part of any filter: the list loop owns it.

use crate::payment::{PaymentMethodType, PaymentStatus};
use crate::receipt::ReceiptStatus;
use crate::refund::RefundStatus;
use chrono::{DateTime, SecondsFormat, Utc};

/// Query pair as sent on the wire
pub type QueryPair = (String, String);

/// A filter that can be rendered as list-endpoint query parameters
pub trait ListFilter {
    fn query_pairs(&self) -> Vec<QueryPair>;
}

/// Time range filter; all bounds are optional
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DateFilter {
    pub gte: Option<DateTime<Utc>>,
    pub gt: Option<DateTime<Utc>>,
    pub lte: Option<DateTime<Utc>>,
    pub lt: Option<DateTime<Utc>>,
}

impl DateFilter {
    /// From `since` inclusive
    pub fn since(since: DateTime<Utc>) -> Self {
        Self {
            gte: Some(since),
            ..Self::default()
        }
    }

    /// Up to `until` exclusive
    pub fn before(until: DateTime<Utc>) -> Self {
        Self {
            lt: Some(until),
            ..Self::default()
        }
    }

    /// `[from, to)`
    pub fn between(from: DateTime<Utc>, to: DateTime<Utc>) -> Self {
        Self {
            gte: Some(from),
            lt: Some(to),
            ..Self::default()
        }
    }

    fn push_pairs(&self, field: &str, out: &mut Vec<QueryPair>) {
        let bounds = [
            ("gte", self.gte),
            ("gt", self.gt),
            ("lte", self.lte),
            ("lt", self.lt),
        ];
        for (op, bound) in bounds {
            if let Some(ts) = bound {
                out.push((
                    format!("{}.{}", field, op),
                    ts.to_rfc3339_opts(SecondsFormat::Millis, true),
                ));
            }
        }
    }
}

/// Filter for `GET /payments`
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PaymentListFilter {
    pub created_at: Option<DateFilter>,
    pub captured_at: Option<DateFilter>,
    pub payment_method: Option<PaymentMethodType>,
    pub status: Option<PaymentStatus>,
    /// Page size, 1..=100 (provider default 10)
    pub limit: Option<u8>,
}

impl PaymentListFilter {
    /// Builder: filter by status
    pub fn with_status(mut self, status: PaymentStatus) -> Self {
        self.status = Some(status);
        self
    }

    /// Builder: filter by creation time
    pub fn created(mut self, range: DateFilter) -> Self {
        self.created_at = Some(range);
        self
    }

    /// Builder: page size
    pub fn with_limit(mut self, limit: u8) -> Self {
        self.limit = Some(limit);
        self
    }
}

impl ListFilter for PaymentListFilter {
    fn query_pairs(&self) -> Vec<QueryPair> {
        let mut pairs = Vec::new();
        if let Some(range) = &self.created_at {
            range.push_pairs("created_at", &mut pairs);
        }
        if let Some(range) = &self.captured_at {
            range.push_pairs("captured_at", &mut pairs);
        }
        if let Some(method) = &self.payment_method {
            pairs.push(("payment_method".to_string(), method.as_str().to_string()));
        }
        if let Some(status) = self.status {
            pairs.push(("status".to_string(), status.as_str().to_string()));
        }
        if let Some(limit) = self.limit {
            pairs.push(("limit".to_string(), limit.to_string()));
        }
        pairs
    }
}

/// Filter for `GET /refunds`
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RefundListFilter {
    pub created_at: Option<DateFilter>,
    pub payment_id: Option<String>,
    pub status: Option<RefundStatus>,
    pub limit: Option<u8>,
}

impl RefundListFilter {
    /// All refunds of one payment
    pub fn for_payment(payment_id: impl Into<String>) -> Self {
        Self {
            payment_id: Some(payment_id.into()),
            ..Self::default()
        }
    }
}

impl ListFilter for RefundListFilter {
    fn query_pairs(&self) -> Vec<QueryPair> {
        let mut pairs = Vec::new();
        if let Some(range) = &self.created_at {
            range.push_pairs("created_at", &mut pairs);
        }
        if let Some(payment_id) = &self.payment_id {
            pairs.push(("payment_id".to_string(), payment_id.clone()));
        }
        if let Some(status) = self.status {
            pairs.push(("status".to_string(), status.as_str().to_string()));
        }
        if let Some(limit) = self.limit {
            pairs.push(("limit".to_string(), limit.to_string()));
        }
        pairs
    }
}

/// Filter for `GET /receipts`.
///
/// The provider accepts either `payment_id` or `refund_id`, not both.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReceiptListFilter {
    pub created_at: Option<DateFilter>,
    pub payment_id: Option<String>,
    pub refund_id: Option<String>,
    pub status: Option<ReceiptStatus>,
    pub limit: Option<u8>,
}

impl ReceiptListFilter {
    pub fn for_payment(payment_id: impl Into<String>) -> Self {
        Self {
            payment_id: Some(payment_id.into()),
            ..Self::default()
        }
    }

    pub fn for_refund(refund_id: impl Into<String>) -> Self {
        Self {
            refund_id: Some(refund_id.into()),
            ..Self::default()
        }
    }
}

impl ListFilter for ReceiptListFilter {
    fn query_pairs(&self) -> Vec<QueryPair> {
        let mut pairs = Vec::new();
        if let Some(range) = &self.created_at {
            range.push_pairs("created_at", &mut pairs);
        }
        if let Some(payment_id) = &self.payment_id {
            pairs.push(("payment_id".to_string(), payment_id.clone()));
        }
        if let Some(refund_id) = &self.refund_id {
            pairs.push(("refund_id".to_string(), refund_id.clone()));
        }
        if let Some(status) = self.status {
            pairs.push(("status".to_string(), status.as_str().to_string()));
        }
        if let Some(limit) = self.limit {
            pairs.push(("limit".to_string(), limit.to_string()));
        }
        pairs
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_empty_filter_has_no_pairs() {
        assert!(PaymentListFilter::default().query_pairs().is_empty());
        assert!(RefundListFilter::default().query_pairs().is_empty());
        assert!(ReceiptListFilter::default().query_pairs().is_empty());
    }

    #[test]
    fn test_payment_filter_pairs() {
        let since = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        let filter = PaymentListFilter::default()
            .created(DateFilter::since(since))
            .with_status(PaymentStatus::Succeeded)
            .with_limit(50);

        assert_eq!(
            filter.query_pairs(),
            vec![
                (
                    "created_at.gte".to_string(),
                    "2024-01-01T00:00:00.000Z".to_string()
                ),
                ("status".to_string(), "succeeded".to_string()),
                ("limit".to_string(), "50".to_string()),
            ]
        );
    }

    #[test]
    fn test_date_range_pairs() {
        let from = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        let to = Utc.with_ymd_and_hms(2024, 2, 1, 0, 0, 0).unwrap();
        let filter = RefundListFilter {
            created_at: Some(DateFilter::between(from, to)),
            ..RefundListFilter::for_payment("pay_1")
        };

        let keys: Vec<String> = filter.query_pairs().into_iter().map(|(k, _)| k).collect();
        assert_eq!(keys, vec!["created_at.gte", "created_at.lt", "payment_id"]);
    }

    #[test]
    fn test_payment_method_pair_keeps_unknown_code() {
        let filter = PaymentListFilter {
            payment_method: Some(PaymentMethodType::Other("electronic_certificate".to_string())),
            ..PaymentListFilter::default()
        };
        assert_eq!(
            filter.query_pairs(),
            vec![(
                "payment_method".to_string(),
                "electronic_certificate".to_string()
            )]
        );
    }

    #[test]
    fn test_receipt_filter_pairs() {
        let pairs = ReceiptListFilter::for_refund("rf_1").query_pairs();
        assert_eq!(pairs, vec![("refund_id".to_string(), "rf_1".to_string())]);
    }
}
