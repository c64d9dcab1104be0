//! HTTP client for the shop backend API.
//!
//! Every backend response is wrapped in a `{ success, data, message }`
//! envelope; [`ApiClient`] unwraps it and maps failures onto [`ApiError`].
//! Catalog and settings reads are cached for a few minutes since they change
//! rarely and back every page render.

pub mod types;

use std::sync::Arc;
use std::time::Duration;

use moka::future::Cache;
use reqwest::{Method, RequestBuilder, StatusCode};
use robusta_core::catalog::{Category, Product};
use robusta_core::order::{NewOrder, Order};
use robusta_core::promotion::Promotion;
use robusta_core::types::{CategoryId, OrderId, ProductId};
use robusta_core::user::User;
use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::instrument;

use crate::config::BackendConfig;
use self::types::{AuthResponse, ChangePasswordRequest, LoginRequest, RegisterRequest, ShopSettings};

const CACHE_TTL: Duration = Duration::from_secs(300);
const CACHE_CAPACITY: u64 = 256;

#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("transport error: {0}")]
    Http(#[from] reqwest::Error),

    /// The backend rejected our bearer token (or we sent none).
    #[error("unauthorized")]
    Unauthorized,

    #[error("forbidden")]
    Forbidden,

    #[error("{0}")]
    NotFound(String),

    /// A 4xx or an envelope with `success: false`; the message is safe to
    /// show to the customer.
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

#[derive(Clone, Hash, PartialEq, Eq)]
enum CacheKey {
    Products(Option<i64>),
    Product(i64),
    Categories,
    Settings,
}

#[derive(Clone)]
enum CacheEntry {
    Products(Arc<Vec<Product>>),
    Product(Arc<Product>),
    Categories(Arc<Vec<Category>>),
    Settings(Arc<ShopSettings>),
}

/// Typed client for the shop backend. Cheap to clone.
#[derive(Clone)]
pub struct ApiClient {
    inner: Arc<ApiClientInner>,
}

struct ApiClientInner {
    http: reqwest::Client,
    base_url: String,
    cache: Cache<CacheKey, CacheEntry>,
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
                cache: Cache::builder()
                    .max_capacity(CACHE_CAPACITY)
                    .time_to_live(CACHE_TTL)
                    .build(),
            }),
        })
    }

    /// Catalog listing, optionally narrowed to one category.
    #[instrument(skip(self))]
    pub async fn list_products(
        &self,
        category: Option<CategoryId>,
    ) -> Result<Vec<Product>, ApiError> {
        let key = CacheKey::Products(category.map(Into::into));
        if let Some(CacheEntry::Products(products)) = self.inner.cache.get(&key).await {
            return Ok(products.as_ref().clone());
        }

        let path = match category {
            Some(id) => format!("products?category={id}"),
            None => "products".to_string(),
        };
        let products: Vec<Product> = self.get(&path, None).await?;
        self.inner
            .cache
            .insert(key, CacheEntry::Products(Arc::new(products.clone())))
            .await;
        Ok(products)
    }

    #[instrument(skip(self))]
    pub async fn product(&self, id: ProductId) -> Result<Product, ApiError> {
        let key = CacheKey::Product(id.into());
        if let Some(CacheEntry::Product(product)) = self.inner.cache.get(&key).await {
            return Ok(product.as_ref().clone());
        }

        let product: Product = self.get(&format!("products/{id}"), None).await?;
        self.inner
            .cache
            .insert(key, CacheEntry::Product(Arc::new(product.clone())))
            .await;
        Ok(product)
    }

    #[instrument(skip(self))]
    pub async fn categories(&self) -> Result<Vec<Category>, ApiError> {
        if let Some(CacheEntry::Categories(categories)) =
            self.inner.cache.get(&CacheKey::Categories).await
        {
            return Ok(categories.as_ref().clone());
        }

        let categories: Vec<Category> = self.get("categories", None).await?;
        self.inner
            .cache
            .insert(
                CacheKey::Categories,
                CacheEntry::Categories(Arc::new(categories.clone())),
            )
            .await;
        Ok(categories)
    }

    #[instrument(skip(self))]
    pub async fn settings(&self) -> Result<ShopSettings, ApiError> {
        if let Some(CacheEntry::Settings(settings)) =
            self.inner.cache.get(&CacheKey::Settings).await
        {
            return Ok(settings.as_ref().clone());
        }

        let settings: ShopSettings = self.get("settings", None).await?;
        self.inner
            .cache
            .insert(
                CacheKey::Settings,
                CacheEntry::Settings(Arc::new(settings.clone())),
            )
            .await;
        Ok(settings)
    }

    /// Look up a promotion code. `NotFound` means the code is invalid or
    /// expired.
    #[instrument(skip(self))]
    pub async fn promotion(&self, code: &str) -> Result<Promotion, ApiError> {
        self.get(&format!("promotions/{code}"), None).await
    }

    #[instrument(skip(self, request))]
    pub async fn login(&self, request: &LoginRequest) -> Result<AuthResponse, ApiError> {
        self.post("auth/login", None, request).await
    }

    #[instrument(skip(self, request))]
    pub async fn register(&self, request: &RegisterRequest) -> Result<AuthResponse, ApiError> {
        self.post("auth/register", None, request).await
    }

    #[instrument(skip(self, token))]
    pub async fn profile(&self, token: &str) -> Result<User, ApiError> {
        self.get("auth/profile", Some(token)).await
    }

    #[instrument(skip(self, token, request))]
    pub async fn change_password(
        &self,
        token: &str,
        request: &ChangePasswordRequest,
    ) -> Result<(), ApiError> {
        self.post_no_data("auth/password", Some(token), request)
            .await
    }

    /// Submit an order. Guests may order without a token.
    #[instrument(skip(self, token, order))]
    pub async fn create_order(
        &self,
        token: Option<&str>,
        order: &NewOrder,
    ) -> Result<Order, ApiError> {
        self.post("orders", token, order).await
    }

    #[instrument(skip(self, token))]
    pub async fn my_orders(&self, token: &str) -> Result<Vec<Order>, ApiError> {
        self.get("orders/mine", Some(token)).await
    }

    #[instrument(skip(self, token))]
    pub async fn my_order(&self, token: &str, id: OrderId) -> Result<Order, ApiError> {
        self.get(&format!("orders/mine/{id}"), Some(token)).await
    }

    async fn get<T: DeserializeOwned>(
        &self,
        path: &str,
        token: Option<&str>,
    ) -> Result<T, ApiError> {
        let envelope = self.execute(self.request(Method::GET, path, token)).await?;
        envelope.data.ok_or(ApiError::MissingData)
    }

    async fn post<T: DeserializeOwned, B: Serialize + ?Sized>(
        &self,
        path: &str,
        token: Option<&str>,
        body: &B,
    ) -> Result<T, ApiError> {
        let envelope = self
            .execute(self.request(Method::POST, path, token).json(body))
            .await?;
        envelope.data.ok_or(ApiError::MissingData)
    }

    /// POST where a successful envelope may legitimately carry no `data`.
    async fn post_no_data<B: Serialize + ?Sized>(
        &self,
        path: &str,
        token: Option<&str>,
        body: &B,
    ) -> Result<(), ApiError> {
        self.execute::<serde_json::Value>(self.request(Method::POST, path, token).json(body))
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
