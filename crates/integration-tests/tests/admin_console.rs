//! Admin console CRUD surfaces: catalog, inventory, staff, tables,
//! promotions, settings.

use reqwest::StatusCode;
use robusta_integration_tests::{ADMIN_EMAIL, TestContext};
use serde_json::{Value, json};

#[tokio::test]
async fn test_product_create_update_delete() {
    let ctx = TestContext::new().await;
    let client = TestContext::client();
    ctx.login_admin(&client, ADMIN_EMAIL).await;

    let resp = client
        .post(format!("{}/products", ctx.admin_url))
        .json(&json!({ "name": "Trà đào cam sả", "price": 50_000, "available": true }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::CREATED);
    let product: Value = resp.json().await.unwrap();
    assert_eq!(product["name"], "Trà đào cam sả");
    let id = product["id"].as_i64().unwrap();

    // It shows up in the full catalog listing.
    let products: Value = client
        .get(format!("{}/products", ctx.admin_url))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(products.as_array().unwrap().len(), 5);

    let resp = client
        .put(format!("{}/products/{id}", ctx.admin_url))
        .json(&json!({ "name": "Trà đào", "price": 52_000, "available": false }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let product: Value = resp.json().await.unwrap();
    assert_eq!(product["price"], 52_000);
    assert_eq!(product["available"], false);

    let resp = client
        .delete(format!("{}/products/{id}", ctx.admin_url))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::NO_CONTENT);

    // Blank names never reach the backend.
    let resp = client
        .post(format!("{}/products", ctx.admin_url))
        .json(&json!({ "name": "   ", "price": 50_000, "available": true }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_inventory_adjustments() {
    let ctx = TestContext::new().await;
    let client = TestContext::client();
    ctx.login_admin(&client, ADMIN_EMAIL).await;

    let levels: Value = client
        .get(format!("{}/inventory", ctx.admin_url))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(levels.as_array().unwrap().len(), 4);

    let resp = client
        .post(format!("{}/inventory/adjust", ctx.admin_url))
        .json(&json!({ "product_id": 1, "delta": -10 }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let level: Value = resp.json().await.unwrap();
    assert_eq!(level["stock"], 90);

    // A zero delta is rejected before the backend is hit.
    let resp = client
        .post(format!("{}/inventory/adjust", ctx.admin_url))
        .json(&json!({ "product_id": 1, "delta": 0 }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    // Writing off more than is on hand is refused by the backend; the
    // message passes through as a 400.
    let resp = client
        .post(format!("{}/inventory/adjust", ctx.admin_url))
        .json(&json!({ "product_id": 1, "delta": -1_000 }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: Value = resp.json().await.unwrap();
    assert!(body["error"].as_str().unwrap().contains("stock"));
}

#[tokio::test]
async fn test_staff_management() {
    let ctx = TestContext::new().await;
    let client = TestContext::client();
    ctx.login_admin(&client, ADMIN_EMAIL).await;

    let staff: Value = client
        .get(format!("{}/staff", ctx.admin_url))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(staff.as_array().unwrap().len(), 2);

    let resp = client
        .post(format!("{}/staff", ctx.admin_url))
        .json(&json!({
            "name": "Ngọc Lan",
            "email": "lan@robusta.vn",
            "password": "password123",
            "role": "staff",
        }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::CREATED);
    let user: Value = resp.json().await.unwrap();
    assert_eq!(user["role"], "staff");

    // Customer accounts are made through storefront registration only.
    let resp = client
        .post(format!("{}/staff", ctx.admin_url))
        .json(&json!({
            "name": "Ngọc Lan",
            "email": "lan@robusta.vn",
            "password": "password123",
            "role": "customer",
        }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    let resp = client
        .put(format!("{}/staff/2/role", ctx.admin_url))
        .json(&json!({ "role": "admin" }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let user: Value = resp.json().await.unwrap();
    assert_eq!(user["role"], "admin");

    // The signed-in admin has id 1.
    let resp = client
        .post(format!("{}/staff/1/deactivate", ctx.admin_url))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    let resp = client
        .post(format!("{}/staff/2/deactivate", ctx.admin_url))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::NO_CONTENT);
}

#[tokio::test]
async fn test_table_management() {
    let ctx = TestContext::new().await;
    let client = TestContext::client();
    ctx.login_admin(&client, ADMIN_EMAIL).await;

    let tables: Value = client
        .get(format!("{}/tables", ctx.admin_url))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(tables.as_array().unwrap().len(), 2);

    let resp = client
        .post(format!("{}/tables", ctx.admin_url))
        .json(&json!({ "name": "Bàn 9", "seats": 4 }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::CREATED);
    let table: Value = resp.json().await.unwrap();
    assert_eq!(table["occupied"], false);
    let id = table["id"].as_i64().unwrap();

    let resp = client
        .put(format!("{}/tables/{id}", ctx.admin_url))
        .json(&json!({ "occupied": true }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let table: Value = resp.json().await.unwrap();
    assert_eq!(table["occupied"], true);

    // An empty update is a client mistake.
    let resp = client
        .put(format!("{}/tables/{id}", ctx.admin_url))
        .json(&json!({}))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_promotion_management() {
    let ctx = TestContext::new().await;
    let client = TestContext::client();
    ctx.login_admin(&client, ADMIN_EMAIL).await;

    let promotions: Value = client
        .get(format!("{}/promotions", ctx.admin_url))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(promotions.as_array().unwrap().len(), 1);

    // The code is normalized to uppercase on the way in.
    let resp = client
        .post(format!("{}/promotions", ctx.admin_url))
        .json(&json!({
            "code": "tet25",
            "discount_type": "percentage",
            "discount_value": "25",
        }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::CREATED);
    let promotion: Value = resp.json().await.unwrap();
    assert_eq!(promotion["code"], "TET25");

    let resp = client
        .post(format!("{}/promotions", ctx.admin_url))
        .json(&json!({
            "code": "BIG",
            "discount_type": "percentage",
            "discount_value": "150",
        }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    let resp = client
        .delete(format!("{}/promotions/TET25", ctx.admin_url))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::NO_CONTENT);

    let promotions: Value = client
        .get(format!("{}/promotions", ctx.admin_url))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(promotions.as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn test_settings_update() {
    let ctx = TestContext::new().await;
    let client = TestContext::client();
    ctx.login_admin(&client, ADMIN_EMAIL).await;

    let resp = client
        .put(format!("{}/settings", ctx.admin_url))
        .json(&json!({
            "shop_name": "Robusta Roastery",
            "address": "12 Nguyễn Huệ, Quận 1, TP.HCM",
            "phone": "028 3822 1234",
            "opening_hours": "06:30 - 22:30",
        }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let settings: Value = resp.json().await.unwrap();
    assert_eq!(settings["shop_name"], "Robusta Roastery");

    // The console reads back what it wrote.
    let settings: Value = client
        .get(format!("{}/settings", ctx.admin_url))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(settings["opening_hours"], "06:30 - 22:30");

    let resp = client
        .put(format!("{}/settings", ctx.admin_url))
        .json(&json!({
            "shop_name": "  ",
            "address": "somewhere",
            "phone": "028 3822 1234",
            "opening_hours": "06:30 - 22:30",
        }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}
