//! In-process stand-in for the shop backend API.
//!
//! Implements just enough of the `/api` surface for the apps under test:
//! a small mutable catalog, three accounts (one per role), promotions, floor
//! tables, shop settings, and an in-memory order book. Responses use the same
//! `{ success, data, message }` envelope as the real backend.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

use axum::extract::{Path, State};
use axum::http::{HeaderMap, StatusCode, header};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post, put};
use axum::{Json, Router};
use chrono::Utc;
use robusta_core::catalog::{Category, Product};
use robusta_core::order::{NewOrder, Order};
use robusta_core::promotion::Promotion;
use robusta_core::types::{CategoryId, Money, OrderId, OrderStatus, ProductId};
use rust_decimal::Decimal;
use serde::Deserialize;
use serde_json::{Value, json};

use crate::{ADMIN_EMAIL, CUSTOMER_EMAIL, PASSWORD, STAFF_EMAIL};

/// (email, name, role, token, id)
const USERS: &[(&str, &str, &str, &str, i64)] = &[
    (ADMIN_EMAIL, "Quỳnh Anh", "admin", "tok-admin", 1),
    (STAFF_EMAIL, "Minh Đức", "staff", "tok-staff", 2),
    (CUSTOMER_EMAIL, "Thu Hà", "customer", "tok-customer", 3),
];

#[derive(Clone)]
struct StubState {
    orders: Arc<Mutex<Vec<Order>>>,
    products: Arc<Mutex<Vec<Product>>>,
    tables: Arc<Mutex<Vec<Value>>>,
    promotions: Arc<Mutex<Vec<Promotion>>>,
    settings: Arc<Mutex<Value>>,
    tokens_revoked: Arc<AtomicBool>,
}

impl StubState {
    fn seeded() -> Self {
        Self {
            orders: Arc::default(),
            products: Arc::new(Mutex::new(seed_catalog())),
            tables: Arc::new(Mutex::new(vec![
                json!({ "id": 1, "name": "Bàn 1", "seats": 2, "occupied": false }),
                json!({ "id": 2, "name": "Bàn 2", "seats": 4, "occupied": true }),
            ])),
            promotions: Arc::new(Mutex::new(vec![Promotion::percentage(
                "COFFEE10",
                Decimal::from(10u32),
                Some(Money::new(20_000)),
            )])),
            settings: Arc::new(Mutex::new(json!({
                "shop_name": "Robusta Coffee",
                "address": "12 Nguyễn Huệ, Quận 1, TP.HCM",
                "phone": "028 3822 1234",
                "opening_hours": "07:00 - 22:00",
            }))),
            tokens_revoked: Arc::default(),
        }
    }
}

#[must_use]
pub fn router() -> Router {
    let api = Router::new()
        .route("/products", get(products).post(create_product))
        .route(
            "/products/{id}",
            get(product).put(update_product).delete(delete_product),
        )
        .route("/categories", get(categories))
        .route("/settings", get(settings).put(update_settings))
        .route("/promotions", get(list_promotions).post(create_promotion))
        .route("/promotions/{code}", get(promotion).delete(delete_promotion))
        .route("/inventory", get(inventory))
        .route("/inventory/adjust", post(adjust_stock))
        .route("/staff", get(staff_users).post(create_staff))
        .route("/staff/{id}/role", put(update_staff_role))
        .route("/staff/{id}/deactivate", post(deactivate_staff))
        .route("/tables", get(tables).post(create_table))
        .route("/tables/{id}", put(update_table))
        .route("/auth/login", post(login))
        .route("/auth/profile", get(profile))
        .route("/auth/revoke", post(revoke_tokens))
        .route("/orders", get(list_orders).post(create_order))
        .route("/orders/mine", get(my_orders))
        .route("/orders/mine/{id}", get(order_detail))
        .route("/orders/{id}", get(order_detail))
        .route("/orders/{id}/status", post(update_status))
        .route("/reports/summary", get(reports_summary))
        .with_state(StubState::seeded());

    Router::new().nest("/api", api)
}

fn seed_catalog() -> Vec<Product> {
    let coffee = Category {
        id: CategoryId::new(1),
        name: "Cà phê".to_string(),
    };
    vec![
        Product {
            id: ProductId::new(1),
            name: "Cà phê sữa đá".to_string(),
            description: Some("Phin coffee with condensed milk over ice".to_string()),
            price: Money::new(45_000),
            image_url: Some("/images/ca-phe-sua-da.jpg".to_string()),
            category: Some(coffee.clone()),
            available: true,
            stock: Some(100),
        },
        Product {
            id: ProductId::new(2),
            name: "Bạc xỉu".to_string(),
            description: None,
            price: Money::new(55_000),
            image_url: None,
            category: Some(coffee.clone()),
            available: true,
            stock: Some(80),
        },
        Product {
            id: ProductId::new(3),
            name: "Cold brew 1L".to_string(),
            description: None,
            price: Money::new(120_000),
            image_url: None,
            category: Some(coffee),
            available: true,
            stock: Some(20),
        },
        Product {
            id: ProductId::new(4),
            name: "Bánh mì chảo".to_string(),
            description: None,
            price: Money::new(65_000),
            image_url: None,
            category: None,
            available: false,
            stock: Some(0),
        },
    ]
}

fn ok<T: serde::Serialize>(data: &T) -> Response {
    Json(json!({ "success": true, "data": data })).into_response()
}

fn not_found(message: &str) -> Response {
    (
        StatusCode::NOT_FOUND,
        Json(json!({ "success": false, "message": message })),
    )
        .into_response()
}

fn rejected(message: &str) -> Response {
    (
        StatusCode::BAD_REQUEST,
        Json(json!({ "success": false, "message": message })),
    )
        .into_response()
}

fn unauthorized() -> Response {
    (
        StatusCode::UNAUTHORIZED,
        Json(json!({ "success": false, "message": "Unauthorized" })),
    )
        .into_response()
}

fn bearer(headers: &HeaderMap) -> Option<String> {
    headers
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.strip_prefix("Bearer "))
        .map(ToString::to_string)
}

fn user_json(email: &str, name: &str, role: &str, id: i64) -> Value {
    json!({ "id": id, "email": email, "name": name, "role": role })
}

async fn products(State(state): State<StubState>) -> Response {
    let products = state.products.lock().expect("catalog");
    ok(&*products)
}

async fn product(State(state): State<StubState>, Path(id): Path<i64>) -> Response {
    let products = state.products.lock().expect("catalog");
    products
        .iter()
        .find(|product| product.id == ProductId::new(id))
        .map_or_else(|| not_found("Product not found"), |product| ok(product))
}

#[derive(Deserialize)]
struct ProductBody {
    name: String,
    #[serde(default)]
    description: Option<String>,
    price: Money,
    #[serde(default)]
    image_url: Option<String>,
    available: bool,
}

async fn create_product(
    State(state): State<StubState>,
    headers: HeaderMap,
    Json(body): Json<ProductBody>,
) -> Response {
    if bearer(&headers).is_none() {
        return unauthorized();
    }
    let mut products = state.products.lock().expect("catalog");
    let id = products
        .iter()
        .map(|product| product.id.as_i64())
        .max()
        .unwrap_or(0)
        + 1;
    let product = Product {
        id: ProductId::new(id),
        name: body.name,
        description: body.description,
        price: body.price,
        image_url: body.image_url,
        category: None,
        available: body.available,
        stock: Some(0),
    };
    products.push(product.clone());
    ok(&product)
}

async fn update_product(
    State(state): State<StubState>,
    headers: HeaderMap,
    Path(id): Path<i64>,
    Json(body): Json<ProductBody>,
) -> Response {
    if bearer(&headers).is_none() {
        return unauthorized();
    }
    let mut products = state.products.lock().expect("catalog");
    match products
        .iter_mut()
        .find(|product| product.id == ProductId::new(id))
    {
        Some(product) => {
            product.name = body.name;
            product.description = body.description;
            product.price = body.price;
            product.image_url = body.image_url;
            product.available = body.available;
            ok(product)
        }
        None => not_found("Product not found"),
    }
}

async fn delete_product(
    State(state): State<StubState>,
    headers: HeaderMap,
    Path(id): Path<i64>,
) -> Response {
    if bearer(&headers).is_none() {
        return unauthorized();
    }
    let mut products = state.products.lock().expect("catalog");
    let before = products.len();
    products.retain(|product| product.id != ProductId::new(id));
    if products.len() == before {
        return not_found("Product not found");
    }
    ok(&json!({}))
}

async fn categories() -> Response {
    ok(&[Category {
        id: CategoryId::new(1),
        name: "Cà phê".to_string(),
    }])
}

async fn settings(State(state): State<StubState>) -> Response {
    let settings = state.settings.lock().expect("settings");
    ok(&*settings)
}

async fn update_settings(
    State(state): State<StubState>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> Response {
    if bearer(&headers).is_none() {
        return unauthorized();
    }
    let mut settings = state.settings.lock().expect("settings");
    *settings = body;
    ok(&*settings)
}

async fn list_promotions(State(state): State<StubState>, headers: HeaderMap) -> Response {
    if bearer(&headers).is_none() {
        return unauthorized();
    }
    let promotions = state.promotions.lock().expect("promotions");
    ok(&*promotions)
}

async fn create_promotion(
    State(state): State<StubState>,
    headers: HeaderMap,
    Json(promotion): Json<Promotion>,
) -> Response {
    if bearer(&headers).is_none() {
        return unauthorized();
    }
    let mut promotions = state.promotions.lock().expect("promotions");
    promotions.push(promotion.clone());
    ok(&promotion)
}

async fn promotion(State(state): State<StubState>, Path(code): Path<String>) -> Response {
    let promotions = state.promotions.lock().expect("promotions");
    promotions
        .iter()
        .find(|promotion| promotion.code == code)
        .map_or_else(|| not_found("Promotion not found"), |promotion| ok(promotion))
}

async fn delete_promotion(
    State(state): State<StubState>,
    headers: HeaderMap,
    Path(code): Path<String>,
) -> Response {
    if bearer(&headers).is_none() {
        return unauthorized();
    }
    let mut promotions = state.promotions.lock().expect("promotions");
    let before = promotions.len();
    promotions.retain(|promotion| promotion.code != code);
    if promotions.len() == before {
        return not_found("Promotion not found");
    }
    ok(&json!({}))
}

async fn inventory(State(state): State<StubState>, headers: HeaderMap) -> Response {
    if bearer(&headers).is_none() {
        return unauthorized();
    }
    let products = state.products.lock().expect("catalog");
    let levels: Vec<Value> = products
        .iter()
        .map(|product| {
            json!({
                "product_id": product.id,
                "name": product.name,
                "stock": product.stock.unwrap_or(0),
            })
        })
        .collect();
    ok(&levels)
}

#[derive(Deserialize)]
struct AdjustBody {
    product_id: i64,
    delta: i64,
}

async fn adjust_stock(
    State(state): State<StubState>,
    headers: HeaderMap,
    Json(body): Json<AdjustBody>,
) -> Response {
    if bearer(&headers).is_none() {
        return unauthorized();
    }
    let mut products = state.products.lock().expect("catalog");
    let Some(product) = products
        .iter_mut()
        .find(|product| product.id == ProductId::new(body.product_id))
    else {
        return not_found("Product not found");
    };
    let stock = product.stock.unwrap_or(0) + body.delta;
    if stock < 0 {
        return rejected("Not enough stock on hand");
    }
    product.stock = Some(stock);
    ok(&json!({
        "product_id": product.id,
        "name": product.name,
        "stock": stock,
    }))
}

async fn staff_users(headers: HeaderMap) -> Response {
    if bearer(&headers).is_none() {
        return unauthorized();
    }
    let staff: Vec<Value> = USERS
        .iter()
        .filter(|(.., role, _, _)| *role != "customer")
        .map(|(email, name, role, _, id)| user_json(email, name, role, *id))
        .collect();
    ok(&staff)
}

#[derive(Deserialize)]
struct StaffBody {
    name: String,
    email: String,
    role: String,
}

async fn create_staff(headers: HeaderMap, Json(body): Json<StaffBody>) -> Response {
    if bearer(&headers).is_none() {
        return unauthorized();
    }
    ok(&user_json(&body.email, &body.name, &body.role, 50))
}

#[derive(Deserialize)]
struct RoleBody {
    role: String,
}

async fn update_staff_role(
    headers: HeaderMap,
    Path(id): Path<i64>,
    Json(body): Json<RoleBody>,
) -> Response {
    if bearer(&headers).is_none() {
        return unauthorized();
    }
    USERS
        .iter()
        .find(|(.., user_id)| *user_id == id)
        .map_or_else(
            || not_found("User not found"),
            |(email, name, _, _, user_id)| ok(&user_json(email, name, &body.role, *user_id)),
        )
}

async fn deactivate_staff(headers: HeaderMap, Path(id): Path<i64>) -> Response {
    if bearer(&headers).is_none() {
        return unauthorized();
    }
    if USERS.iter().all(|(.., user_id)| *user_id != id) {
        return not_found("User not found");
    }
    ok(&json!({}))
}

async fn tables(State(state): State<StubState>, headers: HeaderMap) -> Response {
    if bearer(&headers).is_none() {
        return unauthorized();
    }
    let tables = state.tables.lock().expect("tables");
    ok(&*tables)
}

#[derive(Deserialize)]
struct TableBody {
    name: String,
    seats: u32,
}

async fn create_table(
    State(state): State<StubState>,
    headers: HeaderMap,
    Json(body): Json<TableBody>,
) -> Response {
    if bearer(&headers).is_none() {
        return unauthorized();
    }
    let mut tables = state.tables.lock().expect("tables");
    let id = tables.len() + 1;
    let table = json!({
        "id": id,
        "name": body.name,
        "seats": body.seats,
        "occupied": false,
    });
    tables.push(table.clone());
    ok(&table)
}

async fn update_table(
    State(state): State<StubState>,
    headers: HeaderMap,
    Path(id): Path<i64>,
    Json(body): Json<Value>,
) -> Response {
    if bearer(&headers).is_none() {
        return unauthorized();
    }
    let mut tables = state.tables.lock().expect("tables");
    match tables.iter_mut().find(|table| table["id"] == id) {
        Some(table) => {
            for field in ["name", "seats", "occupied"] {
                if let Some(value) = body.get(field) {
                    table[field] = value.clone();
                }
            }
            ok(table)
        }
        None => not_found("Table not found"),
    }
}

async fn login(Json(body): Json<LoginBody>) -> Response {
    if body.password != PASSWORD {
        return unauthorized();
    }
    USERS
        .iter()
        .find(|(email, ..)| *email == body.email)
        .map_or_else(unauthorized, |(email, name, role, token, id)| {
            ok(&json!({
                "token": token,
                "user": user_json(email, name, role, *id),
            }))
        })
}

#[derive(Deserialize)]
struct LoginBody {
    email: String,
    password: String,
}

/// Invalidates every issued token, so tests can exercise how the apps react
/// when the backend stops honoring a stored bearer token.
async fn revoke_tokens(State(state): State<StubState>) -> Response {
    state.tokens_revoked.store(true, Ordering::SeqCst);
    ok(&json!({}))
}

async fn profile(State(state): State<StubState>, headers: HeaderMap) -> Response {
    let Some(token) = bearer(&headers) else {
        return unauthorized();
    };
    if state.tokens_revoked.load(Ordering::SeqCst) {
        return unauthorized();
    }
    USERS
        .iter()
        .find(|(.., user_token, _)| *user_token == token)
        .map_or_else(unauthorized, |(email, name, role, _, id)| {
            ok(&user_json(email, name, role, *id))
        })
}

async fn create_order(State(state): State<StubState>, Json(new_order): Json<NewOrder>) -> Response {
    let mut orders = state.orders.lock().expect("order book");
    let id = i64::try_from(orders.len()).expect("order count") + 1;
    let order = Order {
        id: OrderId::new(id),
        code: format!("ORD-{id:04}"),
        items: new_order.items,
        subtotal: new_order.subtotal,
        shipping_fee: new_order.shipping_fee,
        discount: new_order.discount,
        total: new_order.total,
        payment_method: new_order.payment_method,
        status: OrderStatus::Pending,
        table_id: new_order.table_id,
        created_at: Utc::now(),
    };
    orders.push(order.clone());
    ok(&order)
}

#[derive(Deserialize)]
struct OrderQuery {
    status: Option<String>,
}

async fn list_orders(
    State(state): State<StubState>,
    headers: HeaderMap,
    axum::extract::Query(query): axum::extract::Query<OrderQuery>,
) -> Response {
    if bearer(&headers).is_none() {
        return unauthorized();
    }
    let orders = state.orders.lock().expect("order book");
    let filtered: Vec<&Order> = orders
        .iter()
        .filter(|order| {
            query
                .status
                .as_deref()
                .is_none_or(|status| order.status.as_str() == status)
        })
        .collect();
    ok(&filtered)
}

async fn my_orders(State(state): State<StubState>, headers: HeaderMap) -> Response {
    if bearer(&headers).is_none() || state.tokens_revoked.load(Ordering::SeqCst) {
        return unauthorized();
    }
    let orders = state.orders.lock().expect("order book");
    ok(&*orders)
}

async fn order_detail(
    State(state): State<StubState>,
    headers: HeaderMap,
    Path(id): Path<i64>,
) -> Response {
    if bearer(&headers).is_none() {
        return unauthorized();
    }
    let orders = state.orders.lock().expect("order book");
    orders
        .iter()
        .find(|order| order.id == OrderId::new(id))
        .map_or_else(|| not_found("Order not found"), |order| ok(order))
}

#[derive(Deserialize)]
struct StatusBody {
    status: OrderStatus,
}

/// Trusts the caller; the transition rules live in the console under test.
async fn update_status(
    State(state): State<StubState>,
    headers: HeaderMap,
    Path(id): Path<i64>,
    Json(body): Json<StatusBody>,
) -> Response {
    if bearer(&headers).is_none() {
        return unauthorized();
    }
    let mut orders = state.orders.lock().expect("order book");
    match orders
        .iter_mut()
        .find(|order| order.id == OrderId::new(id))
    {
        Some(order) => {
            order.status = body.status;
            ok(order)
        }
        None => not_found("Order not found"),
    }
}

async fn reports_summary(headers: HeaderMap) -> Response {
    if bearer(&headers).is_none() {
        return unauthorized();
    }
    ok(&json!({
        "orders_today": 12,
        "revenue_today": 1_540_000,
        "pending_orders": 3,
        "low_stock_count": 1,
    }))
}
