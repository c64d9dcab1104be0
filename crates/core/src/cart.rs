//! Cart lines and cart mutation rules.
//!
//! A cart is an ordered list of lines keyed by product ID. Quantities are
//! always at least 1; a line whose quantity would drop to 0 is removed.

use serde::{Deserialize, Serialize};

use crate::types::{Money, ProductId};

/// One product entry in a cart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartLine {
    /// Product the line refers to.
    pub product_id: ProductId,
    /// Product name, snapshotted at add time.
    pub name: String,
    /// Unit price, snapshotted at add time.
    pub unit_price: Money,
    /// Quantity, always >= 1.
    pub quantity: u32,
    /// Product image, if any.
    pub image_url: Option<String>,
    /// Category name, if any.
    pub category: Option<String>,
}

impl CartLine {
    /// Create a line. A zero quantity is bumped to 1 to uphold the
    /// quantity >= 1 invariant; removal is a cart operation, not a line state.
    #[must_use]
    pub fn new(product_id: ProductId, name: impl Into<String>, unit_price: Money, quantity: u32) -> Self {
        Self {
            product_id,
            name: name.into(),
            unit_price,
            quantity: quantity.max(1),
            image_url: None,
            category: None,
        }
    }

    /// Attach an image URL.
    #[must_use]
    pub fn with_image(mut self, image_url: impl Into<String>) -> Self {
        self.image_url = Some(image_url.into());
        self
    }

    /// Attach a category name.
    #[must_use]
    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    /// Price of the whole line (unit price x quantity).
    #[must_use]
    pub fn line_total(&self) -> Money {
        self.unit_price * self.quantity
    }
}

/// An ordered list of cart lines, keyed by product ID.
///
/// Lines keep their first-insertion order; adding a product that is already
/// in the cart merges quantities instead of appending a duplicate line.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Cart {
    lines: Vec<CartLine>,
}

impl Cart {
    /// An empty cart.
    #[must_use]
    pub const fn new() -> Self {
        Self { lines: Vec::new() }
    }

    /// The lines in insertion order.
    #[must_use]
    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    /// Whether the cart has no lines.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Total number of units across all lines.
    #[must_use]
    pub fn item_count(&self) -> u32 {
        self.lines.iter().map(|line| line.quantity).sum()
    }

    /// Sum of line totals. No rounding.
    #[must_use]
    pub fn subtotal(&self) -> Money {
        self.lines.iter().map(CartLine::line_total).sum()
    }

    /// Add a line. If the product is already in the cart the quantities are
    /// merged and the existing position is kept.
    pub fn add_line(&mut self, line: CartLine) {
        if let Some(existing) = self
            .lines
            .iter_mut()
            .find(|l| l.product_id == line.product_id)
        {
            existing.quantity += line.quantity;
        } else {
            self.lines.push(line);
        }
    }

    /// Set the quantity of a product's line. A quantity of 0 removes the
    /// line; an unknown product ID is a no-op.
    pub fn set_quantity(&mut self, product_id: ProductId, quantity: u32) {
        if quantity == 0 {
            self.remove_line(product_id);
            return;
        }
        if let Some(line) = self.lines.iter_mut().find(|l| l.product_id == product_id) {
            line.quantity = quantity;
        }
    }

    /// Remove a product's line, if present.
    pub fn remove_line(&mut self, product_id: ProductId) {
        self.lines.retain(|line| line.product_id != product_id);
    }

    /// Remove every line.
    pub fn clear(&mut self) {
        self.lines.clear();
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn line(id: i64, price: i64, quantity: u32) -> CartLine {
        CartLine::new(
            ProductId::new(id),
            format!("product {id}"),
            Money::new(price),
            quantity,
        )
    }

    #[test]
    fn test_add_merges_by_product() {
        let mut cart = Cart::new();
        cart.add_line(line(1, 45_000, 1));
        cart.add_line(line(2, 30_000, 1));
        cart.add_line(line(1, 45_000, 2));

        assert_eq!(cart.lines().len(), 2);
        assert_eq!(cart.lines()[0].quantity, 3);
        assert_eq!(cart.lines()[0].product_id, ProductId::new(1));
    }

    #[test]
    fn test_subtotal_independent_of_insertion_order() {
        let mut forward = Cart::new();
        forward.add_line(line(1, 45_000, 2));
        forward.add_line(line(2, 30_000, 3));

        let mut reversed = Cart::new();
        reversed.add_line(line(2, 30_000, 3));
        reversed.add_line(line(1, 45_000, 2));

        assert_eq!(forward.subtotal(), reversed.subtotal());
        assert_eq!(forward.subtotal(), Money::new(180_000));
    }

    #[test]
    fn test_set_quantity_zero_removes() {
        let mut cart = Cart::new();
        cart.add_line(line(1, 45_000, 2));
        cart.set_quantity(ProductId::new(1), 0);
        assert!(cart.is_empty());
        assert_eq!(cart.subtotal(), Money::ZERO);
    }

    #[test]
    fn test_set_quantity_unknown_product_is_noop() {
        let mut cart = Cart::new();
        cart.add_line(line(1, 45_000, 2));
        cart.set_quantity(ProductId::new(99), 5);
        assert_eq!(cart.lines().len(), 1);
        assert_eq!(cart.lines()[0].quantity, 2);
    }

    #[test]
    fn test_remove_last_line_empties_cart() {
        let mut cart = Cart::new();
        cart.add_line(line(1, 45_000, 1));
        cart.remove_line(ProductId::new(1));
        assert!(cart.is_empty());
        assert_eq!(cart.item_count(), 0);
    }

    #[test]
    fn test_zero_quantity_line_bumped_to_one() {
        let l = line(1, 45_000, 0);
        assert_eq!(l.quantity, 1);
    }

    #[test]
    fn test_serde_is_a_plain_list() {
        let mut cart = Cart::new();
        cart.add_line(line(1, 45_000, 2));
        let json = serde_json::to_value(&cart).unwrap();
        assert!(json.is_array());
        let back: Cart = serde_json::from_value(json).unwrap();
        assert_eq!(back, cart);
    }
}
