//! Promotion (discount code) records.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::types::Money;

/// How a promotion's value is interpreted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DiscountType {
    /// `discount_value` is a percentage of the subtotal.
    Percentage,
    /// `discount_value` is a flat amount of đồng.
    Fixed,
}

/// A discount rule identified by a code, applied at checkout.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Promotion {
    /// The code the customer enters.
    pub code: String,
    /// Percentage or fixed amount.
    pub discount_type: DiscountType,
    /// Percentage (e.g. 10 for 10%) or flat đồng amount, per `discount_type`.
    pub discount_value: Decimal,
    /// Cap on the computed discount. Only meaningful for percentage
    /// promotions; fixed promotions are already bounded by their value.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_discount: Option<Money>,
}

impl Promotion {
    /// A percentage-off promotion, optionally capped.
    #[must_use]
    pub fn percentage(code: impl Into<String>, percent: Decimal, max_discount: Option<Money>) -> Self {
        Self {
            code: code.into(),
            discount_type: DiscountType::Percentage,
            discount_value: percent,
            max_discount,
        }
    }

    /// A fixed-amount promotion.
    #[must_use]
    pub fn fixed(code: impl Into<String>, amount: Money) -> Self {
        Self {
            code: code.into(),
            discount_type: DiscountType::Fixed,
            discount_value: amount.as_decimal(),
            max_discount: None,
        }
    }

    /// Short human-readable summary of the discount ("Giảm 10%",
    /// "Giảm 15.000 ₫").
    #[must_use]
    pub fn describe(&self) -> String {
        match self.discount_type {
            DiscountType::Percentage => format!("Giảm {}%", self.discount_value.normalize()),
            DiscountType::Fixed => {
                format!("Giảm {}", Money::from_decimal_rounded(self.discount_value))
            }
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_serde_shape() {
        let promo = Promotion::percentage("COFFEE10", Decimal::from(10u32), Some(Money::new(20_000)));
        let json = serde_json::to_value(&promo).unwrap();
        assert_eq!(json["code"], "COFFEE10");
        assert_eq!(json["discount_type"], "percentage");
        assert_eq!(json["max_discount"], 20_000);
    }

    #[test]
    fn test_describe() {
        let percent = Promotion::percentage("COFFEE10", Decimal::from(10u32), None);
        assert_eq!(percent.describe(), "Giảm 10%");

        let fixed = Promotion::fixed("FLAT15K", Money::new(15_000));
        assert_eq!(fixed.describe(), "Giảm 15.000 ₫");
    }

    #[test]
    fn test_max_discount_omitted_when_absent() {
        let promo = Promotion::fixed("FLAT15K", Money::new(15_000));
        let json = serde_json::to_value(&promo).unwrap();
        assert!(json.get("max_discount").is_none());
    }
}
