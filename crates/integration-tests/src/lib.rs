//! End-to-end test harness.
//!
//! Spins up an in-process stub of the shop backend plus the real storefront
//! and admin routers, each on its own ephemeral port, and drives them with a
//! cookie-holding reqwest client. No external services required; `cargo test`
//! is the whole setup.

pub mod stub;

use std::net::{IpAddr, Ipv4Addr};

use axum::Router;
use reqwest::redirect::Policy;
use reqwest::{Client, Response};
use serde_json::json;

/// Password shared by every stub account.
pub const PASSWORD: &str = "password123";
pub const ADMIN_EMAIL: &str = "admin@robusta.vn";
pub const STAFF_EMAIL: &str = "staff@robusta.vn";
pub const CUSTOMER_EMAIL: &str = "customer@robusta.vn";

/// One backend stub plus both live apps wired against it.
pub struct TestContext {
    pub backend_url: String,
    pub storefront_url: String,
    pub admin_url: String,
}

impl TestContext {
    pub async fn new() -> Self {
        let backend_url = serve(stub::router()).await;
        let storefront_url = spawn_storefront(&backend_url).await;
        let admin_url = spawn_admin(&backend_url).await;
        Self {
            backend_url,
            storefront_url,
            admin_url,
        }
    }

    /// A client that keeps cookies and does not follow redirects, so tests
    /// can assert on the redirects themselves.
    #[must_use]
    pub fn client() -> Client {
        Client::builder()
            .cookie_store(true)
            .redirect(Policy::none())
            .build()
            .expect("failed to build HTTP client")
    }

    pub async fn login_storefront(&self, client: &Client, email: &str) -> Response {
        client
            .post(format!("{}/auth/login", self.storefront_url))
            .json(&json!({ "email": email, "password": PASSWORD }))
            .send()
            .await
            .expect("login request failed")
    }

    pub async fn login_admin(&self, client: &Client, email: &str) -> Response {
        client
            .post(format!("{}/auth/login", self.admin_url))
            .json(&json!({ "email": email, "password": PASSWORD }))
            .send()
            .await
            .expect("login request failed")
    }
}

async fn spawn_storefront(backend_url: &str) -> String {
    let config = robusta_storefront::config::StorefrontConfig {
        host: IpAddr::V4(Ipv4Addr::LOCALHOST),
        port: 0,
        base_url: "http://localhost:3000".to_string(),
        api: robusta_storefront::config::BackendConfig {
            base_url: format!("{backend_url}/api"),
            timeout_secs: 5,
        },
    };
    let state = robusta_storefront::state::AppState::new(config).expect("storefront state");
    serve(robusta_storefront::routes::app(state)).await
}

async fn spawn_admin(backend_url: &str) -> String {
    let config = robusta_admin::config::AdminConfig {
        host: IpAddr::V4(Ipv4Addr::LOCALHOST),
        port: 0,
        base_url: "http://localhost:3001".to_string(),
        api: robusta_admin::config::BackendConfig {
            base_url: format!("{backend_url}/api"),
            timeout_secs: 5,
        },
    };
    let state = robusta_admin::state::AppState::new(config).expect("admin state");
    serve(robusta_admin::routes::app(state)).await
}

async fn serve(app: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("failed to bind test listener");
    let addr = listener.local_addr().expect("listener address");
    tokio::spawn(async move {
        axum::serve(listener, app).await.expect("test server");
    });
    format!("http://{addr}")
}
