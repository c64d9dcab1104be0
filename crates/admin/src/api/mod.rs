//! HTTP client for the shop backend API, admin scope.
//!
//! Same envelope protocol as the storefront client, but every call carries
//! the signed-in staff member's bearer token and nothing is cached: the
//! console must always show current data.

pub mod types;

use std::sync::Arc;
use std::time::Duration;

use reqwest::{Method, RequestBuilder, StatusCode};
use robusta_core::catalog::Product;
use robusta_core::order::{NewOrder, Order};
use robusta_core::permissions::Role;
use robusta_core::promotion::Promotion;
use robusta_core::types::{OrderId, OrderStatus, ProductId, TableId, UserId};
use robusta_core::user::User;
use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::instrument;

use crate::config::BackendConfig;
use self::types::{
    AuthResponse, DashboardSummary, LoginRequest, ProductInput, RoleUpdate, ShopSettings,
    StaffInput, StockAdjustment, StockLevel, TableInput, TableRecord, TableUpdate,
};

#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("transport error: {0}")]
    Http(#[from] reqwest::Error),

    /// The backend rejected the bearer token.
    #[error("unauthorized")]
    Unauthorized,

    #[error("forbidden")]
    Forbidden,

    #[error("{0}")]
    NotFound(String),

    /// A 4xx or an envelope with `success: false`; safe to show as-is.
    #[error("{0}")]
    Rejected(String),

    #[error("backend returned HTTP {status}: {message}")]
    Backend { status: u16, message: String },

    #[error("malformed response body: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("response envelope carried no data")]
    MissingData,
}

#[derive(Debug, serde::Deserialize)]
struct Envelope<T> {
    success: bool,
    data: Option<T>,
    #[serde(default)]
    message: Option<String>,
}

/// Typed client for the shop backend. Cheap to clone.
#[derive(Clone)]
pub struct ApiClient {
    inner: Arc<ApiClientInner>,
}

struct ApiClientInner {
    http: reqwest::Client,
    base_url: String,
}

impl ApiClient {
    pub fn new(config: &BackendConfig) -> Result<Self, reqwest::Error> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            inner: Arc::new(ApiClientInner {
                http,
                base_url: config.base_url.clone(),
            }),
        })
    }

    #[instrument(skip(self, request))]
    pub async fn login(&self, request: &LoginRequest) -> Result<AuthResponse, ApiError> {
        let envelope = self
            .execute(self.request(Method::POST, "auth/login", None).json(request))
            .await?;
        envelope.data.ok_or(ApiError::MissingData)
    }

    /// Full catalog, including products hidden from the storefront.
    #[instrument(skip(self, token))]
    pub async fn products(&self, token: &str) -> Result<Vec<Product>, ApiError> {
        self.get("products?include_unavailable=true", token).await
    }

    #[instrument(skip(self, token, input))]
    pub async fn create_product(
        &self,
        token: &str,
        input: &ProductInput,
    ) -> Result<Product, ApiError> {
        self.send(Method::POST, "products", token, input).await
    }

    #[instrument(skip(self, token, input))]
    pub async fn update_product(
        &self,
        token: &str,
        id: ProductId,
        input: &ProductInput,
    ) -> Result<Product, ApiError> {
        self.send(Method::PUT, &format!("products/{id}"), token, input)
            .await
    }

    #[instrument(skip(self, token))]
    pub async fn delete_product(&self, token: &str, id: ProductId) -> Result<(), ApiError> {
        self.send_no_data(Method::DELETE, &format!("products/{id}"), token)
            .await
    }

    #[instrument(skip(self, token))]
    pub async fn inventory(&self, token: &str) -> Result<Vec<StockLevel>, ApiError> {
        self.get("inventory", token).await
    }

    #[instrument(skip(self, token, adjustment))]
    pub async fn adjust_stock(
        &self,
        token: &str,
        adjustment: &StockAdjustment,
    ) -> Result<StockLevel, ApiError> {
        self.send(Method::POST, "inventory/adjust", token, adjustment)
            .await
    }

    #[instrument(skip(self, token))]
    pub async fn orders(
        &self,
        token: &str,
        status: Option<OrderStatus>,
    ) -> Result<Vec<Order>, ApiError> {
        let path = match status {
            Some(status) => format!("orders?status={status}"),
            None => "orders".to_string(),
        };
        self.get(&path, token).await
    }

    #[instrument(skip(self, token))]
    pub async fn order(&self, token: &str, id: OrderId) -> Result<Order, ApiError> {
        self.get(&format!("orders/{id}"), token).await
    }

    #[instrument(skip(self, token))]
    pub async fn update_order_status(
        &self,
        token: &str,
        id: OrderId,
        status: OrderStatus,
    ) -> Result<Order, ApiError> {
        self.send(
            Method::POST,
            &format!("orders/{id}/status"),
            token,
            &serde_json::json!({ "status": status }),
        )
        .await
    }

    /// Place an order on a customer's behalf (point of sale).
    #[instrument(skip(self, token, order))]
    pub async fn create_order(&self, token: &str, order: &NewOrder) -> Result<Order, ApiError> {
        self.send(Method::POST, "orders", token, order).await
    }

    #[instrument(skip(self, token))]
    pub async fn staff_users(&self, token: &str) -> Result<Vec<User>, ApiError> {
        self.get("staff", token).await
    }

    #[instrument(skip(self, token, input))]
    pub async fn create_staff(&self, token: &str, input: &StaffInput) -> Result<User, ApiError> {
        self.send(Method::POST, "staff", token, input).await
    }

    #[instrument(skip(self, token))]
    pub async fn update_staff_role(
        &self,
        token: &str,
        id: UserId,
        role: Role,
    ) -> Result<User, ApiError> {
        self.send(
            Method::PUT,
            &format!("staff/{id}/role"),
            token,
            &RoleUpdate { role },
        )
        .await
    }

    #[instrument(skip(self, token))]
    pub async fn deactivate_staff(&self, token: &str, id: UserId) -> Result<(), ApiError> {
        self.send_no_data(Method::POST, &format!("staff/{id}/deactivate"), token)
            .await
    }

    #[instrument(skip(self, token))]
    pub async fn tables(&self, token: &str) -> Result<Vec<TableRecord>, ApiError> {
        self.get("tables", token).await
    }

    #[instrument(skip(self, token, input))]
    pub async fn create_table(
        &self,
        token: &str,
        input: &TableInput,
    ) -> Result<TableRecord, ApiError> {
        self.send(Method::POST, "tables", token, input).await
    }

    #[instrument(skip(self, token, update))]
    pub async fn update_table(
        &self,
        token: &str,
        id: TableId,
        update: &TableUpdate,
    ) -> Result<TableRecord, ApiError> {
        self.send(Method::PUT, &format!("tables/{id}"), token, update)
            .await
    }

    #[instrument(skip(self, token))]
    pub async fn promotions(&self, token: &str) -> Result<Vec<Promotion>, ApiError> {
        self.get("promotions", token).await
    }

    #[instrument(skip(self, token, promotion))]
    pub async fn create_promotion(
        &self,
        token: &str,
        promotion: &Promotion,
    ) -> Result<Promotion, ApiError> {
        self.send(Method::POST, "promotions", token, promotion).await
    }

    #[instrument(skip(self, token))]
    pub async fn promotion(&self, token: &str, code: &str) -> Result<Promotion, ApiError> {
        self.get(&format!("promotions/{code}"), token).await
    }

    #[instrument(skip(self, token))]
    pub async fn delete_promotion(&self, token: &str, code: &str) -> Result<(), ApiError> {
        self.send_no_data(Method::DELETE, &format!("promotions/{code}"), token)
            .await
    }

    #[instrument(skip(self, token))]
    pub async fn settings(&self, token: &str) -> Result<ShopSettings, ApiError> {
        self.get("settings", token).await
    }

    #[instrument(skip(self, token, settings))]
    pub async fn update_settings(
        &self,
        token: &str,
        settings: &ShopSettings,
    ) -> Result<ShopSettings, ApiError> {
        self.send(Method::PUT, "settings", token, settings).await
    }

    #[instrument(skip(self, token))]
    pub async fn reports_summary(&self, token: &str) -> Result<DashboardSummary, ApiError> {
        self.get("reports/summary", token).await
    }

    async fn get<T: DeserializeOwned>(&self, path: &str, token: &str) -> Result<T, ApiError> {
        let envelope = self
            .execute(self.request(Method::GET, path, Some(token)))
            .await?;
        envelope.data.ok_or(ApiError::MissingData)
    }

    async fn send<T: DeserializeOwned, B: Serialize + ?Sized>(
        &self,
        method: Method,
        path: &str,
        token: &str,
        body: &B,
    ) -> Result<T, ApiError> {
        let envelope = self
            .execute(self.request(method, path, Some(token)).json(body))
            .await?;
        envelope.data.ok_or(ApiError::MissingData)
    }

    /// Mutation where a successful envelope may carry no `data`.
    async fn send_no_data(&self, method: Method, path: &str, token: &str) -> Result<(), ApiError> {
        self.execute::<serde_json::Value>(self.request(method, path, Some(token)))
            .await?;
        Ok(())
    }

    fn request(&self, method: Method, path: &str, token: Option<&str>) -> RequestBuilder {
        let url = format!("{}/{path}", self.inner.base_url);
        let builder = self.inner.http.request(method, url);
        match token {
            Some(token) => builder.bearer_auth(token),
            None => builder,
        }
    }

    async fn execute<T: DeserializeOwned>(
        &self,
        request: RequestBuilder,
    ) -> Result<Envelope<T>, ApiError> {
        let response = request.send().await?;
        let status = response.status();

        if status == StatusCode::UNAUTHORIZED {
            return Err(ApiError::Unauthorized);
        }
        if status == StatusCode::FORBIDDEN {
            return Err(ApiError::Forbidden);
        }

        let body = response.text().await?;

        if status == StatusCode::NOT_FOUND {
            return Err(ApiError::NotFound(
                extract_message(&body).unwrap_or_else(|| "Not found".to_string()),
            ));
        }
        if !status.is_success() {
            let message = extract_message(&body).unwrap_or_default();
            if status.is_client_error() {
                return Err(ApiError::Rejected(message));
            }
            return Err(ApiError::Backend {
                status: status.as_u16(),
                message,
            });
        }

        let envelope: Envelope<T> = serde_json::from_str(&body)?;
        if !envelope.success {
            return Err(ApiError::Rejected(
                envelope
                    .message
                    .unwrap_or_else(|| "Request rejected".to_string()),
            ));
        }
        Ok(envelope)
    }
}

fn extract_message(body: &str) -> Option<String> {
    serde_json::from_str::<Envelope<serde_json::Value>>(body)
        .ok()
        .and_then(|envelope| envelope.message)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    // Product deliberately has no Default impl; this keeps the envelope
    // decodable for arbitrary payload types.
    #[test]
    fn test_envelope_tolerates_missing_fields() {
        let envelope: Envelope<Product> = serde_json::from_str(r#"{ "success": true }"#).unwrap();
        assert!(envelope.success);
        assert!(envelope.data.is_none());
        assert!(envelope.message.is_none());

        let envelope: Envelope<Product> =
            serde_json::from_str(r#"{ "success": false, "message": "out of stock" }"#).unwrap();
        assert_eq!(envelope.message.as_deref(), Some("out of stock"));
    }
}
