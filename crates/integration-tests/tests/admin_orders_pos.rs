//! Order management and the point of sale.

use reqwest::StatusCode;
use robusta_integration_tests::{ADMIN_EMAIL, STAFF_EMAIL, TestContext};
use serde_json::{Value, json};

/// Seed one pending order through the storefront.
async fn seed_order(ctx: &TestContext) {
    let client = TestContext::client();
    client
        .post(format!("{}/cart/add", ctx.storefront_url))
        .json(&json!({ "product_id": 1, "quantity": 2 }))
        .send()
        .await
        .unwrap();
    let resp = client
        .post(format!("{}/checkout", ctx.storefront_url))
        .json(&json!({
            "payment_method": "cash",
            "customer_name": "Thu Hà",
            "phone": "0901234567",
            "address": "12 Nguyễn Huệ",
        }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_order_status_transitions_are_guarded() {
    let ctx = TestContext::new().await;
    seed_order(&ctx).await;

    let client = TestContext::client();
    ctx.login_admin(&client, ADMIN_EMAIL).await;

    let pending: Value = client
        .get(format!("{}/orders?status=pending", ctx.admin_url))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(pending.as_array().unwrap().len(), 1);

    // Skipping straight to completed is rejected before the backend is hit.
    let resp = client
        .post(format!("{}/orders/1/status", ctx.admin_url))
        .json(&json!({ "status": "completed" }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    let resp = client
        .post(format!("{}/orders/1/status", ctx.admin_url))
        .json(&json!({ "status": "confirmed" }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let order: Value = resp.json().await.unwrap();
    assert_eq!(order["status"], "confirmed");

    let resp = client
        .post(format!("{}/orders/1/status", ctx.admin_url))
        .json(&json!({ "status": "preparing" }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);

    // Unknown status strings are a validation error.
    let resp = client
        .post(format!("{}/orders/1/status", ctx.admin_url))
        .json(&json!({ "status": "vaporized" }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_pos_places_a_priced_order() {
    let ctx = TestContext::new().await;
    let client = TestContext::client();
    ctx.login_admin(&client, STAFF_EMAIL).await;

    // The register only offers sellable products.
    let sellable: Value = client
        .get(format!("{}/pos", ctx.admin_url))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(sellable.as_array().unwrap().len(), 3);

    let resp = client
        .post(format!("{}/pos/orders", ctx.admin_url))
        .json(&json!({
            "items": [
                { "product_id": 1, "quantity": 2 },
            ],
            "promotion_code": "COFFEE10",
            "payment_method": "cash",
            "table_id": 5,
        }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::CREATED);
    let order: Value = resp.json().await.unwrap();
    // 90 000 subtotal + 20 000 shipping - 9 000 discount.
    assert_eq!(order["subtotal"], 90_000);
    assert_eq!(order["discount"], 9_000);
    assert_eq!(order["total"], 101_000);
    assert_eq!(order["table_id"], 5);
    assert_eq!(order["status"], "pending");
}

#[tokio::test]
async fn test_pos_rejects_bad_lines() {
    let ctx = TestContext::new().await;
    let client = TestContext::client();
    ctx.login_admin(&client, STAFF_EMAIL).await;

    // Unknown product.
    let resp = client
        .post(format!("{}/pos/orders", ctx.admin_url))
        .json(&json!({
            "items": [{ "product_id": 99, "quantity": 1 }],
            "payment_method": "cash",
        }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    // Unavailable product.
    let resp = client
        .post(format!("{}/pos/orders", ctx.admin_url))
        .json(&json!({
            "items": [{ "product_id": 4, "quantity": 1 }],
            "payment_method": "cash",
        }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    // No items at all.
    let resp = client
        .post(format!("{}/pos/orders", ctx.admin_url))
        .json(&json!({ "items": [], "payment_method": "cash" }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_dashboard_summary() {
    let ctx = TestContext::new().await;
    let client = TestContext::client();
    ctx.login_admin(&client, STAFF_EMAIL).await;

    let resp = client
        .get(format!("{}/dashboard", ctx.admin_url))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let summary: Value = resp.json().await.unwrap();
    assert_eq!(summary["orders_today"], 12);
    assert_eq!(summary["pending_orders"], 3);
}
