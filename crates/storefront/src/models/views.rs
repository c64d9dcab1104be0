//! JSON view models returned to the browser.
//!
//! Prices are serialized twice: the raw amount for scripts and a
//! pre-formatted display string (`"45.000 ₫"`) for rendering.

use robusta_core::cart::CartLine;
use robusta_core::catalog::{Category, Product};
use robusta_core::order::Order;
use robusta_core::pricing::CartTotals;
use robusta_core::promotion::Promotion;
use robusta_core::types::Money;
use serde::Serialize;

use crate::models::session::CurrentUser;
use crate::services::cart::CartState;

#[derive(Debug, Serialize)]
pub struct ProductView {
    pub id: i64,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub price: i64,
    pub price_display: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<CategoryView>,
    pub available: bool,
}

impl From<&Product> for ProductView {
    fn from(product: &Product) -> Self {
        Self {
            id: product.id.into(),
            name: product.name.clone(),
            description: product.description.clone(),
            price: product.price.amount(),
            price_display: product.price.to_string(),
            image_url: product.image_url.clone(),
            category: product.category.as_ref().map(CategoryView::from),
            available: product.available,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct CategoryView {
    pub id: i64,
    pub name: String,
}

impl From<&Category> for CategoryView {
    fn from(category: &Category) -> Self {
        Self {
            id: category.id.into(),
            name: category.name.clone(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct CartLineView {
    pub product_id: i64,
    pub name: String,
    pub unit_price: i64,
    pub unit_price_display: String,
    pub quantity: u32,
    pub line_total: i64,
    pub line_total_display: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
}

impl From<&CartLine> for CartLineView {
    fn from(line: &CartLine) -> Self {
        let total = line.line_total();
        Self {
            product_id: line.product_id.into(),
            name: line.name.clone(),
            unit_price: line.unit_price.amount(),
            unit_price_display: line.unit_price.to_string(),
            quantity: line.quantity,
            line_total: total.amount(),
            line_total_display: total.to_string(),
            image_url: line.image_url.clone(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct TotalsView {
    pub subtotal: MoneyView,
    pub shipping_fee: MoneyView,
    pub discount: MoneyView,
    pub total: MoneyView,
}

impl From<CartTotals> for TotalsView {
    fn from(totals: CartTotals) -> Self {
        Self {
            subtotal: totals.subtotal.into(),
            shipping_fee: totals.shipping_fee.into(),
            discount: totals.discount.into(),
            total: totals.total.into(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct MoneyView {
    pub amount: i64,
    pub display: String,
}

impl From<Money> for MoneyView {
    fn from(money: Money) -> Self {
        Self {
            amount: money.amount(),
            display: money.to_string(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct PromotionView {
    pub code: String,
    pub description: String,
}

impl From<&Promotion> for PromotionView {
    fn from(promotion: &Promotion) -> Self {
        Self {
            code: promotion.code.clone(),
            description: promotion.describe(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct CartView {
    pub lines: Vec<CartLineView>,
    pub item_count: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub promotion: Option<PromotionView>,
    pub totals: TotalsView,
}

impl CartView {
    #[must_use]
    pub fn build(state: &CartState, totals: CartTotals) -> Self {
        Self {
            lines: state.cart.lines().iter().map(CartLineView::from).collect(),
            item_count: state.cart.item_count(),
            promotion: state.promotion.as_ref().map(PromotionView::from),
            totals: totals.into(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct UserView {
    pub id: i64,
    pub email: String,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
}

impl From<&CurrentUser> for UserView {
    fn from(user: &CurrentUser) -> Self {
        Self {
            id: user.id.into(),
            email: user.email.to_string(),
            name: user.name.clone(),
            role: user.role.map(|role| role.to_string()),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct OrderView {
    pub id: i64,
    pub code: String,
    pub status: String,
    pub payment_method: String,
    pub items: Vec<OrderItemView>,
    pub subtotal: MoneyView,
    pub shipping_fee: MoneyView,
    pub discount: MoneyView,
    pub total: MoneyView,
    pub created_at: String,
}

#[derive(Debug, Serialize)]
pub struct OrderItemView {
    pub product_id: i64,
    pub name: String,
    pub quantity: u32,
    pub line_total: MoneyView,
}

impl From<&Order> for OrderView {
    fn from(order: &Order) -> Self {
        Self {
            id: order.id.into(),
            code: order.code.clone(),
            status: order.status.to_string(),
            payment_method: order.payment_method.to_string(),
            items: order
                .items
                .iter()
                .map(|item| OrderItemView {
                    product_id: item.product_id.into(),
                    name: item.name.clone(),
                    quantity: item.quantity,
                    line_total: item.line_total().into(),
                })
                .collect(),
            subtotal: order.subtotal.into(),
            shipping_fee: order.shipping_fee.into(),
            discount: order.discount.into(),
            total: order.total.into(),
            created_at: order.created_at.to_rfc3339(),
        }
    }
}
