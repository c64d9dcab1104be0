//! The console's permission gate, end to end.

use reqwest::StatusCode;
use robusta_integration_tests::{ADMIN_EMAIL, CUSTOMER_EMAIL, STAFF_EMAIL, TestContext};
use serde_json::Value;

#[tokio::test]
async fn test_unauthenticated_requests_redirect_to_login() {
    let ctx = TestContext::new().await;
    let client = TestContext::client();

    for page in ["/dashboard", "/orders", "/settings", "/navigation"] {
        let resp = client
            .get(format!("{}{page}", ctx.admin_url))
            .send()
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::SEE_OTHER, "page {page}");
        assert_eq!(resp.headers()["location"], "/auth/login", "page {page}");
    }
}

#[tokio::test]
async fn test_customer_account_cannot_sign_in() {
    let ctx = TestContext::new().await;
    let client = TestContext::client();

    let resp = ctx.login_admin(&client, CUSTOMER_EMAIL).await;
    assert_eq!(resp.status(), StatusCode::FORBIDDEN);

    // And no session was created.
    let resp = client
        .get(format!("{}/dashboard", ctx.admin_url))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::SEE_OTHER);
}

#[tokio::test]
async fn test_staff_gate_and_fallback_redirect() {
    let ctx = TestContext::new().await;
    let client = TestContext::client();

    let resp = ctx.login_admin(&client, STAFF_EMAIL).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let resp = client
        .get(format!("{}/orders", ctx.admin_url))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);

    // Admin-only pages bounce staff to the first page they can see.
    for page in ["/settings", "/staff", "/products", "/promotions"] {
        let resp = client
            .get(format!("{}{page}", ctx.admin_url))
            .send()
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::SEE_OTHER, "page {page}");
        assert_eq!(resp.headers()["location"], "/dashboard", "page {page}");
    }
}

#[tokio::test]
async fn test_navigation_is_filtered_by_role() {
    let ctx = TestContext::new().await;

    let staff_client = TestContext::client();
    ctx.login_admin(&staff_client, STAFF_EMAIL).await;
    let nav: Value = staff_client
        .get(format!("{}/navigation", ctx.admin_url))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    let paths: Vec<&str> = nav
        .as_array()
        .unwrap()
        .iter()
        .map(|entry| entry["path"].as_str().unwrap())
        .collect();
    assert_eq!(
        paths,
        vec!["/dashboard", "/pos", "/orders", "/inventory", "/tables"]
    );

    let admin_client = TestContext::client();
    ctx.login_admin(&admin_client, ADMIN_EMAIL).await;
    let nav: Value = admin_client
        .get(format!("{}/navigation", ctx.admin_url))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(nav.as_array().unwrap().len(), 9);
}

#[tokio::test]
async fn test_admin_can_open_settings() {
    let ctx = TestContext::new().await;
    let client = TestContext::client();

    ctx.login_admin(&client, ADMIN_EMAIL).await;
    let resp = client
        .get(format!("{}/settings", ctx.admin_url))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let settings: Value = resp.json().await.unwrap();
    assert_eq!(settings["shop_name"], "Robusta Coffee");
}

#[tokio::test]
async fn test_logout_closes_the_session() {
    let ctx = TestContext::new().await;
    let client = TestContext::client();

    ctx.login_admin(&client, STAFF_EMAIL).await;
    let resp = client
        .post(format!("{}/auth/logout", ctx.admin_url))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::NO_CONTENT);

    let resp = client
        .get(format!("{}/orders", ctx.admin_url))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::SEE_OTHER);
    assert_eq!(resp.headers()["location"], "/auth/login");
}
