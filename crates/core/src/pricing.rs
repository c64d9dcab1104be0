//! Subtotal, shipping fee, discount, and grand total.
//!
//! Pure functions over cart lines and an optional promotion. Every surface
//! that shows a price (storefront cart, checkout, point of sale) goes through
//! [`quote`] so the breakdown is computed in exactly one place.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::cart::CartLine;
use crate::promotion::{DiscountType, Promotion};
use crate::types::Money;

/// Orders at or above this subtotal ship for free.
pub const FREE_SHIPPING_THRESHOLD: Money = Money::new(200_000);

/// Flat delivery fee below the free-shipping threshold.
pub const STANDARD_SHIPPING_FEE: Money = Money::new(20_000);

/// A full pricing breakdown for a cart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct CartTotals {
    pub subtotal: Money,
    pub shipping_fee: Money,
    pub discount: Money,
    pub total: Money,
}

/// Sum of line totals. No rounding.
#[must_use]
pub fn subtotal(lines: &[CartLine]) -> Money {
    lines.iter().map(CartLine::line_total).sum()
}

/// Shipping fee for a given subtotal: free at or above
/// [`FREE_SHIPPING_THRESHOLD`], the flat [`STANDARD_SHIPPING_FEE`] below it,
/// and nothing for an empty cart.
#[must_use]
pub fn shipping_fee(subtotal: Money) -> Money {
    if subtotal >= FREE_SHIPPING_THRESHOLD || subtotal.is_zero() {
        Money::ZERO
    } else {
        STANDARD_SHIPPING_FEE
    }
}

/// Discount a promotion grants on a subtotal.
///
/// Percentage promotions round half away from zero and honor `max_discount`
/// when present. Fixed promotions never exceed the subtotal.
#[must_use]
pub fn discount(subtotal: Money, promotion: Option<&Promotion>) -> Money {
    let Some(promotion) = promotion else {
        return Money::ZERO;
    };

    match promotion.discount_type {
        DiscountType::Percentage => {
            let raw = subtotal.as_decimal() * promotion.discount_value / Decimal::from(100u32);
            let amount = Money::from_decimal_rounded(raw);
            match promotion.max_discount {
                Some(cap) => amount.min(cap),
                None => amount,
            }
        }
        DiscountType::Fixed => Money::from_decimal_rounded(promotion.discount_value).min(subtotal),
    }
}

/// Price a cart: subtotal, shipping, discount, and grand total.
///
/// The grand total is clamped at zero; a promotion can never make the shop
/// owe the customer money.
#[must_use]
pub fn quote(lines: &[CartLine], promotion: Option<&Promotion>) -> CartTotals {
    let subtotal = self::subtotal(lines);
    let shipping_fee = self::shipping_fee(subtotal);
    let discount = self::discount(subtotal, promotion);
    let total = (subtotal + shipping_fee).saturating_sub(discount);

    CartTotals {
        subtotal,
        shipping_fee,
        discount,
        total,
    }
}
