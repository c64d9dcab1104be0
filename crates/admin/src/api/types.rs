//! Request and response payloads for the shop backend, admin scope.

use robusta_core::permissions::Role;
use robusta_core::types::{Money, ProductId, TableId};
use robusta_core::user::User;
use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Deserialize)]
pub struct AuthResponse {
    pub token: String,
    pub user: User,
}

/// Product fields as edited in the console; used for both create and update.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProductInput {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub price: Money,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category_id: Option<i64>,
    pub available: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StockLevel {
    pub product_id: ProductId,
    pub name: String,
    pub stock: i64,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct StockAdjustment {
    pub product_id: ProductId,
    /// Signed change; positive restocks, negative writes off.
    pub delta: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct StaffInput {
    pub name: String,
    pub email: String,
    pub password: String,
    pub role: Role,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct RoleUpdate {
    pub role: Role,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TableRecord {
    pub id: TableId,
    pub name: String,
    pub seats: u32,
    pub occupied: bool,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct TableInput {
    pub name: String,
    pub seats: u32,
}

/// Partial table update; absent fields are left unchanged.
#[derive(Debug, Default, Serialize, Deserialize)]
pub struct TableUpdate {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub seats: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub occupied: Option<bool>,
}

/// Shop-wide presentation settings shown on the storefront.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ShopSettings {
    pub shop_name: String,
    pub address: String,
    pub phone: String,
    pub opening_hours: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub announcement: Option<String>,
}

/// Today-at-a-glance numbers for the dashboard.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DashboardSummary {
    pub orders_today: u64,
    pub revenue_today: Money,
    pub pending_orders: u64,
    pub low_stock_count: u64,
}
