//! Refund and receipt facades against a mock YooKassa API

mod common;

use common::*;
use kassa_client::Kassa;
use kassa_core::{
    Amount, CreateReceiptRequest, CreateRefundRequest, Customer, ErrorCode, KassaError,
    ReceiptItem, ReceiptKind, ReceiptListFilter, RefundListFilter, RefundStatus, Settlement,
};
use serde_json::json;
use wiremock::matchers::{body_partial_json, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

#[tokio::test]
async fn test_create_and_load_refund() -> anyhow::Result<()> {
    init_tracing();
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v3/refunds"))
        .and(body_partial_json(json!({
            "payment_id": "p-1",
            "amount": {"value": "5.00", "currency": "RUB"}
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(refund_json("r-1", "p-1")))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/v3/refunds/r-1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(refund_json("r-1", "p-1")))
        .expect(1)
        .mount(&server)
        .await;

    let kassa = Kassa::new(config(&server))?;

    let refund = kassa
        .refunds()
        .create(CreateRefundRequest::new("p-1", Amount::rub("5.00")).with_description("Return"))
        .await?;
    assert_eq!(refund.status, RefundStatus::Succeeded);
    assert_eq!(refund.amount, Amount::rub("5.00"));

    let loaded = kassa.refunds().load("r-1").await?;
    assert_eq!(loaded, refund);
    Ok(())
}

#[tokio::test]
async fn test_list_refunds_for_payment() -> anyhow::Result<()> {
    init_tracing();
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v3/refunds"))
        .and(query_param("payment_id", "p-1"))
        .and(query_param("cursor", "c-1"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(page(vec![refund_json("r-2", "p-1")], None)),
        )
        .with_priority(1)
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/v3/refunds"))
        .and(query_param("payment_id", "p-1"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(page(vec![refund_json("r-1", "p-1")], Some("c-1"))),
        )
        .expect(1)
        .mount(&server)
        .await;

    let kassa = Kassa::new(config(&server))?;
    let refunds = kassa
        .refunds()
        .list(&RefundListFilter::for_payment("p-1"))
        .await?;

    let ids: Vec<&str> = refunds.iter().map(|r| r.id.as_str()).collect();
    assert_eq!(ids, vec!["r-1", "r-2"]);
    Ok(())
}

#[tokio::test]
async fn test_refund_error_code() -> anyhow::Result<()> {
    init_tracing();
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v3/refunds"))
        .respond_with(ResponseTemplate::new(400).set_body_json(error_json(
            "invalid_request",
            "Refund amount exceeds payment amount",
        )))
        .expect(1)
        .mount(&server)
        .await;

    let kassa = Kassa::new(config(&server))?;
    let err = kassa
        .refunds()
        .create(CreateRefundRequest::new("p-1", Amount::rub("500.00")))
        .await
        .unwrap_err();

    assert!(matches!(&err, KassaError::Api(_)));
    assert_eq!(err.code(), Some(&ErrorCode::InvalidRequest));
    Ok(())
}

#[tokio::test]
async fn test_create_load_list_receipts() -> anyhow::Result<()> {
    init_tracing();
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v3/receipts"))
        .and(body_partial_json(json!({
            "type": "payment",
            "payment_id": "p-1",
            "send": true,
            "customer": {"email": "buyer@example.com"}
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(receipt_json("rt-1", "p-1")))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/v3/receipts/rt-1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(receipt_json("rt-1", "p-1")))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/v3/receipts"))
        .and(query_param("payment_id", "p-1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(page(
            vec![receipt_json("rt-1", "p-1"), receipt_json("rt-2", "p-1")],
            None,
        )))
        .expect(1)
        .mount(&server)
        .await;

    let kassa = Kassa::new(config(&server))?;

    let request = CreateReceiptRequest::for_payment(
        "p-1",
        Customer::with_email("buyer@example.com"),
        vec![ReceiptItem::new("Service 1", Amount::rub("10.00"), 1.0, 1)],
        vec![Settlement {
            kind: "cashless".to_string(),
            amount: Amount::rub("10.00"),
        }],
    );
    let receipt = kassa.receipts().create(request).await?;
    assert_eq!(receipt.kind, ReceiptKind::Payment);
    assert_eq!(receipt.payment_id.as_deref(), Some("p-1"));

    let loaded = kassa.receipts().load("rt-1").await?;
    assert_eq!(loaded.id, "rt-1");

    let receipts = kassa
        .receipts()
        .list(&ReceiptListFilter::for_payment("p-1"))
        .await?;
    assert_eq!(receipts.len(), 2);
    Ok(())
}

#[tokio::test]
async fn test_receipt_without_link_is_rejected_locally() -> anyhow::Result<()> {
    let server = MockServer::start().await;
    let kassa = Kassa::new(config(&server))?;

    let mut request = CreateReceiptRequest::for_refund(
        "r-1",
        Customer::with_email("buyer@example.com"),
        vec![ReceiptItem::new("Service 1", Amount::rub("10.00"), 1.0, 1)],
        vec![],
    );
    request.refund_id = None;

    let err = kassa.receipts().create(request).await.unwrap_err();
    assert!(matches!(err, KassaError::InvalidRequest(_)));
    assert!(idempotence_keys(&server).await.is_empty());
    Ok(())
}
