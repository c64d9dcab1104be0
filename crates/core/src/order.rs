//! Order payloads and persisted order records.
//!
//! An order is constructed client-side from a cart plus a pricing quote and
//! persisted by the backend. [`NewOrder`] is the submission payload;
//! [`Order`] is the record the backend hands back.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::cart::{Cart, CartLine};
use crate::pricing::CartTotals;
use crate::types::{Money, OrderId, OrderStatus, PaymentMethod, ProductId, TableId};

/// One product entry on an order, derived from a cart line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderItem {
    pub product_id: ProductId,
    pub name: String,
    pub unit_price: Money,
    pub quantity: u32,
}

impl OrderItem {
    /// Price of the whole item (unit price x quantity).
    #[must_use]
    pub fn line_total(&self) -> Money {
        self.unit_price * self.quantity
    }
}

impl From<&CartLine> for OrderItem {
    fn from(line: &CartLine) -> Self {
        Self {
            product_id: line.product_id,
            name: line.name.clone(),
            unit_price: line.unit_price,
            quantity: line.quantity,
        }
    }
}

/// A client-constructed order submission.
///
/// Carries the full pricing breakdown that was shown to the buyer, so the
/// backend can verify it against its own records.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewOrder {
    pub items: Vec<OrderItem>,
    pub subtotal: Money,
    pub shipping_fee: Money,
    pub discount: Money,
    pub total: Money,
    pub payment_method: PaymentMethod,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub promotion_code: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub customer_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub table_id: Option<TableId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

impl NewOrder {
    /// Snapshot a cart and its quote into a submission payload.
    #[must_use]
    pub fn from_cart(cart: &Cart, totals: CartTotals, payment_method: PaymentMethod) -> Self {
        Self {
            items: cart.lines().iter().map(OrderItem::from).collect(),
            subtotal: totals.subtotal,
            shipping_fee: totals.shipping_fee,
            discount: totals.discount,
            total: totals.total,
            payment_method,
            promotion_code: None,
            customer_name: None,
            phone: None,
            address: None,
            table_id: None,
            note: None,
        }
    }
}

/// An order as persisted by the backend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Order {
    pub id: OrderId,
    /// Short human-facing order code (e.g. printed on receipts).
    pub code: String,
    pub items: Vec<OrderItem>,
    pub subtotal: Money,
    pub shipping_fee: Money,
    pub discount: Money,
    pub total: Money,
    pub payment_method: PaymentMethod,
    pub status: OrderStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub table_id: Option<TableId>,
    pub created_at: DateTime<Utc>,
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::pricing;

    #[test]
    fn test_from_cart_snapshots_lines_and_totals() {
        let mut cart = Cart::new();
        cart.add_line(CartLine::new(
            ProductId::new(1),
            "cà phê sữa đá",
            Money::new(45_000),
            2,
        ));

        let totals = pricing::quote(cart.lines(), None);
        let order = NewOrder::from_cart(&cart, totals, PaymentMethod::Cash);

        assert_eq!(order.items.len(), 1);
        assert_eq!(order.items[0].line_total(), Money::new(90_000));
        assert_eq!(order.subtotal, Money::new(90_000));
        assert_eq!(order.shipping_fee, Money::new(20_000));
        assert_eq!(order.total, Money::new(110_000));
    }
}
