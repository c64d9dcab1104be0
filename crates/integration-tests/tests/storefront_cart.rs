//! Cart, pricing, and checkout flows on the storefront.

use reqwest::StatusCode;
use robusta_integration_tests::TestContext;
use serde_json::{Value, json};

async fn add_to_cart(
    ctx: &TestContext,
    client: &reqwest::Client,
    product_id: i64,
    quantity: u32,
) -> reqwest::Response {
    client
        .post(format!("{}/cart/add", ctx.storefront_url))
        .json(&json!({ "product_id": product_id, "quantity": quantity }))
        .send()
        .await
        .expect("cart add failed")
}

#[tokio::test]
async fn test_cart_add_update_remove() {
    let ctx = TestContext::new().await;
    let client = TestContext::client();

    // 2 x 45 000 = 90 000, below free shipping.
    let resp = add_to_cart(&ctx, &client, 1, 2).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let cart: Value = resp.json().await.unwrap();
    assert_eq!(cart["lines"].as_array().unwrap().len(), 1);
    assert_eq!(cart["item_count"], 2);
    assert_eq!(cart["totals"]["subtotal"]["amount"], 90_000);
    assert_eq!(cart["totals"]["shipping_fee"]["amount"], 20_000);
    assert_eq!(cart["totals"]["total"]["amount"], 110_000);
    assert_eq!(cart["totals"]["subtotal"]["display"], "90.000 ₫");

    // Adding the same product merges lines.
    let cart: Value = add_to_cart(&ctx, &client, 1, 1).await.json().await.unwrap();
    assert_eq!(cart["lines"].as_array().unwrap().len(), 1);
    assert_eq!(cart["lines"][0]["quantity"], 3);

    let resp = client
        .post(format!("{}/cart/update", ctx.storefront_url))
        .json(&json!({ "product_id": 1, "quantity": 1 }))
        .send()
        .await
        .unwrap();
    let cart: Value = resp.json().await.unwrap();
    assert_eq!(cart["totals"]["subtotal"]["amount"], 45_000);

    let resp = client
        .post(format!("{}/cart/remove", ctx.storefront_url))
        .json(&json!({ "product_id": 1 }))
        .send()
        .await
        .unwrap();
    let cart: Value = resp.json().await.unwrap();
    assert!(cart["lines"].as_array().unwrap().is_empty());
    assert_eq!(cart["totals"]["total"]["amount"], 0);
}

#[tokio::test]
async fn test_cart_survives_across_requests() {
    let ctx = TestContext::new().await;
    let client = TestContext::client();

    add_to_cart(&ctx, &client, 2, 1).await;
    let resp = client
        .get(format!("{}/cart", ctx.storefront_url))
        .send()
        .await
        .unwrap();
    let cart: Value = resp.json().await.unwrap();
    assert_eq!(cart["lines"][0]["name"], "Bạc xỉu");
}

#[tokio::test]
async fn test_unavailable_product_rejected() {
    let ctx = TestContext::new().await;
    let client = TestContext::client();

    let resp = add_to_cart(&ctx, &client, 4, 1).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: Value = resp.json().await.unwrap();
    assert!(body["error"].as_str().unwrap().contains("unavailable"));
}

#[tokio::test]
async fn test_unknown_product_is_404() {
    let ctx = TestContext::new().await;
    let client = TestContext::client();

    let resp = add_to_cart(&ctx, &client, 99, 1).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_free_shipping_threshold() {
    let ctx = TestContext::new().await;
    let client = TestContext::client();

    // 2 x 120 000 = 240 000, at/above the 200 000 threshold.
    let cart: Value = add_to_cart(&ctx, &client, 3, 2).await.json().await.unwrap();
    assert_eq!(cart["totals"]["shipping_fee"]["amount"], 0);
    assert_eq!(cart["totals"]["total"]["amount"], 240_000);
}

#[tokio::test]
async fn test_promotion_apply_and_remove() {
    let ctx = TestContext::new().await;
    let client = TestContext::client();

    add_to_cart(&ctx, &client, 1, 2).await;

    let resp = client
        .post(format!("{}/cart/promotion", ctx.storefront_url))
        .json(&json!({ "code": "NOPE" }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    let resp = client
        .post(format!("{}/cart/promotion", ctx.storefront_url))
        .json(&json!({ "code": "COFFEE10" }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let cart: Value = resp.json().await.unwrap();
    // 10% of 90 000.
    assert_eq!(cart["totals"]["discount"]["amount"], 9_000);
    assert_eq!(cart["totals"]["total"]["amount"], 101_000);
    assert_eq!(cart["promotion"]["code"], "COFFEE10");

    let resp = client
        .post(format!("{}/cart/promotion/remove", ctx.storefront_url))
        .send()
        .await
        .unwrap();
    let cart: Value = resp.json().await.unwrap();
    assert_eq!(cart["totals"]["discount"]["amount"], 0);
    assert!(cart["promotion"].is_null());
}

#[tokio::test]
async fn test_promotion_discount_is_capped() {
    let ctx = TestContext::new().await;
    let client = TestContext::client();

    // 240 000 subtotal; 10% would be 24 000 but the code caps at 20 000.
    add_to_cart(&ctx, &client, 3, 2).await;
    let resp = client
        .post(format!("{}/cart/promotion", ctx.storefront_url))
        .json(&json!({ "code": "COFFEE10" }))
        .send()
        .await
        .unwrap();
    let cart: Value = resp.json().await.unwrap();
    assert_eq!(cart["totals"]["discount"]["amount"], 20_000);
    assert_eq!(cart["totals"]["total"]["amount"], 220_000);
}

#[tokio::test]
async fn test_checkout_clears_cart_and_promotion() {
    let ctx = TestContext::new().await;
    let client = TestContext::client();

    add_to_cart(&ctx, &client, 1, 2).await;
    client
        .post(format!("{}/cart/promotion", ctx.storefront_url))
        .json(&json!({ "code": "COFFEE10" }))
        .send()
        .await
        .unwrap();

    let resp = client
        .post(format!("{}/checkout", ctx.storefront_url))
        .json(&json!({
            "payment_method": "cash",
            "customer_name": "Thu Hà",
            "phone": "0901234567",
            "address": "12 Nguyễn Huệ, Quận 1",
        }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let order: Value = resp.json().await.unwrap();
    assert_eq!(order["code"], "ORD-0001");
    assert_eq!(order["status"], "pending");
    assert_eq!(order["total"]["amount"], 101_000);

    let cart: Value = client
        .get(format!("{}/cart", ctx.storefront_url))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert!(cart["lines"].as_array().unwrap().is_empty());
    assert!(cart["promotion"].is_null());
}

#[tokio::test]
async fn test_checkout_validation() {
    let ctx = TestContext::new().await;
    let client = TestContext::client();

    // Empty cart.
    let resp = client
        .post(format!("{}/checkout", ctx.storefront_url))
        .json(&json!({
            "payment_method": "cash",
            "customer_name": "A",
            "phone": "0901234567",
            "address": "somewhere",
        }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    // Bad payment method.
    add_to_cart(&ctx, &client, 1, 1).await;
    let resp = client
        .post(format!("{}/checkout", ctx.storefront_url))
        .json(&json!({
            "payment_method": "paypal",
            "customer_name": "A",
            "phone": "0901234567",
            "address": "somewhere",
        }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    // Missing phone.
    let resp = client
        .post(format!("{}/checkout", ctx.storefront_url))
        .json(&json!({
            "payment_method": "cash",
            "customer_name": "A",
            "phone": "",
            "address": "somewhere",
        }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}
