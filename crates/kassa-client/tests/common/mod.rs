//! Shared helpers for kassa-client integration tests

#![allow(dead_code)]

use kassa_client::{ConnectorConfig, RetryPolicy};
use serde_json::{json, Value};
use std::time::Duration;
use tracing_subscriber::EnvFilter;
use wiremock::MockServer;

pub const SHOP_ID: &str = "123456";
pub const SECRET_KEY: &str = "test_Fh8hUAVVBGUGbjmlzba6TB0iyUbos_lueTHE-axOwM0";

/// Install a test-writer subscriber once per binary
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("kassa_client=debug")),
        )
        .with_test_writer()
        .try_init();
}

/// Config pointing at the mock server, with millisecond backoff
pub fn config(server: &MockServer) -> ConnectorConfig {
    ConnectorConfig::new(SHOP_ID, SECRET_KEY)
        .with_endpoint(format!("{}/v3", server.uri()))
        .with_max_rps(50)
        .with_retry_policy(
            RetryPolicy::default()
                .with_max_retries(3)
                .with_base_delay(Duration::from_millis(5)),
        )
}

pub fn amount(value: &str) -> Value {
    json!({"value": value, "currency": "RUB"})
}

pub fn payment_json(id: &str, status: &str) -> Value {
    json!({
        "id": id,
        "status": status,
        "paid": status != "pending",
        "amount": amount("10.00"),
        "created_at": "2024-07-18T10:51:18.139Z",
        "description": "Order #72",
        "metadata": {},
        "recipient": {"account_id": SHOP_ID, "gateway_id": "2276985"},
        "refundable": status == "succeeded",
        "test": true
    })
}

pub fn refund_json(id: &str, payment_id: &str) -> Value {
    json!({
        "id": id,
        "payment_id": payment_id,
        "status": "succeeded",
        "created_at": "2024-07-19T08:00:00.000Z",
        "amount": amount("5.00")
    })
}

pub fn receipt_json(id: &str, payment_id: &str) -> Value {
    json!({
        "id": id,
        "type": "payment",
        "payment_id": payment_id,
        "status": "pending",
        "items": [{
            "description": "Service 1",
            "quantity": 1.0,
            "amount": amount("10.00"),
            "vat_code": 1
        }],
        "settlements": [{"type": "cashless", "amount": amount("10.00")}]
    })
}

pub fn error_json(code: &str, description: &str) -> Value {
    json!({
        "type": "error",
        "id": "ab56f1c1-c9c1-4f3e-9e1b-2f1b2e7c1d2a",
        "code": code,
        "description": description
    })
}

pub fn page(items: Vec<Value>, next_cursor: Option<&str>) -> Value {
    match next_cursor {
        Some(cursor) => json!({"type": "list", "items": items, "next_cursor": cursor}),
        None => json!({"type": "list", "items": items}),
    }
}

/// `Idempotence-Key` values of every request the server saw, in order
pub async fn idempotence_keys(server: &MockServer) -> Vec<String> {
    server
        .received_requests()
        .await
        .unwrap_or_default()
        .iter()
        .filter_map(|request| request.headers.get("Idempotence-Key"))
        .filter_map(|value| value.to_str().ok())
        .map(String::from)
        .collect()
}
