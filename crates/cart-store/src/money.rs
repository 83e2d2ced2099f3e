//! Price type for product and cart amounts.
//!
//! Uses cents-based integer representation so cart totals never accumulate
//! floating-point error. On the wire a price is a decimal number (`179.9`),
//! matching the product API and snapshots written by older clients.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A price in Brazilian reais, held in centavos.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
#[serde(from = "f64", into = "f64")]
pub struct Price {
    cents: i64,
}

impl Price {
    /// Create a price from cents.
    pub const fn from_cents(cents: i64) -> Self {
        Self { cents }
    }

    /// Create a price from a decimal amount.
    ///
    /// ```
    /// use cart_store::Price;
    /// let price = Price::from_decimal(179.9);
    /// assert_eq!(price.cents(), 17990);
    /// ```
    pub fn from_decimal(amount: f64) -> Self {
        Self::from_cents((amount * 100.0).round() as i64)
    }

    /// A zero price.
    pub const fn zero() -> Self {
        Self::from_cents(0)
    }

    /// Amount in cents.
    pub const fn cents(&self) -> i64 {
        self.cents
    }

    /// Convert to a decimal value.
    pub fn to_decimal(&self) -> f64 {
        self.cents as f64 / 100.0
    }

    /// Multiply by a quantity, returning `None` on overflow.
    pub fn try_multiply(&self, quantity: i64) -> Option<Price> {
        self.cents.checked_mul(quantity).map(Price::from_cents)
    }

    /// Add another price, returning `None` on overflow.
    pub fn try_add(&self, other: &Price) -> Option<Price> {
        self.cents.checked_add(other.cents).map(Price::from_cents)
    }
}

impl From<f64> for Price {
    fn from(amount: f64) -> Self {
        Price::from_decimal(amount)
    }
}

impl From<Price> for f64 {
    fn from(price: Price) -> Self {
        price.to_decimal()
    }
}

/// Formats as the storefront displays prices, e.g. `R$ 1.179,90`.
impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.cents < 0 { "-" } else { "" };
        let abs = self.cents.unsigned_abs();
        let units = (abs / 100).to_string();
        let cents = abs % 100;

        let mut grouped = String::with_capacity(units.len() + units.len() / 3);
        for (i, ch) in units.chars().enumerate() {
            if i > 0 && (units.len() - i) % 3 == 0 {
                grouped.push('.');
            }
            grouped.push(ch);
        }

        write!(f, "{}R$ {},{:02}", sign, grouped, cents)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_decimal_rounds() {
        assert_eq!(Price::from_decimal(179.9).cents(), 17990);
        assert_eq!(Price::from_decimal(0.1 + 0.2).cents(), 30);
    }

    #[test]
    fn test_serde_as_decimal() {
        let price = Price::from_cents(13990);
        assert_eq!(serde_json::to_string(&price).unwrap(), "139.9");

        let parsed: Price = serde_json::from_str("139.9").unwrap();
        assert_eq!(parsed, price);

        let integer: Price = serde_json::from_str("100").unwrap();
        assert_eq!(integer.cents(), 10000);
    }

    #[test]
    fn test_display() {
        assert_eq!(Price::from_cents(17990).to_string(), "R$ 179,90");
        assert_eq!(Price::from_cents(117990).to_string(), "R$ 1.179,90");
        assert_eq!(Price::from_cents(5).to_string(), "R$ 0,05");
        assert_eq!(Price::from_cents(-250).to_string(), "-R$ 2,50");
    }

    #[test]
    fn test_checked_arithmetic() {
        let price = Price::from_cents(1000);
        assert_eq!(price.try_multiply(3), Some(Price::from_cents(3000)));
        assert_eq!(Price::from_cents(i64::MAX).try_multiply(2), None);
        assert_eq!(
            Price::from_cents(100).try_add(&Price::from_cents(250)),
            Some(Price::from_cents(350))
        );
        assert_eq!(Price::from_cents(i64::MAX).try_add(&Price::from_cents(1)), None);
    }
}
