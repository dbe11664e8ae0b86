//! Prices

use std::{fmt, iter::Sum, ops::Deref};

use rusty_money::{Money, iso::Currency};

/// Represents a price in whole currency units (rupees on the built-in menu).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Price {
    value: u64,
}

impl Price {
    /// A zero price, the total of an empty cart.
    pub const ZERO: Price = Price { value: 0 };

    /// Creates a new Price
    #[must_use]
    pub const fn new(value: u64) -> Self {
        Price { value }
    }

    /// Multiplies the price by a quantity, saturating rather than wrapping.
    #[must_use]
    pub fn times(self, quantity: u32) -> Self {
        Price {
            value: self.value.saturating_mul(u64::from(quantity)),
        }
    }

    /// Whether the price is zero.
    #[must_use]
    pub fn is_zero(self) -> bool {
        self.value == 0
    }

    /// Converts the price into money in the given currency.
    pub fn to_money(self, currency: &'static Currency) -> Money<'static, Currency> {
        let major = i64::try_from(self.value).unwrap_or(i64::MAX);
        let minor = major.saturating_mul(10_i64.pow(currency.exponent));

        Money::from_minor(minor, currency)
    }
}

impl Deref for Price {
    type Target = u64;

    fn deref(&self) -> &Self::Target {
        &self.value
    }
}

impl From<u64> for Price {
    fn from(value: u64) -> Self {
        Price { value }
    }
}

impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.value)
    }
}

impl Sum for Price {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Price::ZERO, |acc, price| Price {
            value: acc.value.saturating_add(price.value),
        })
    }
}

impl<'a> Sum<&'a Price> for Price {
    fn sum<I: Iterator<Item = &'a Price>>(iter: I) -> Self {
        iter.copied().sum()
    }
}

#[cfg(test)]
mod tests {
    use rusty_money::iso::INR;

    use super::*;

    #[test]
    fn new_price() {
        let price = Price::new(1000);

        assert_eq!(price.value, 1000);
    }

    #[test]
    fn price_derefs_to_u64() {
        let price = Price { value: 100 };

        assert_eq!(*price, 100);
    }

    #[test]
    fn times_multiplies_by_quantity() {
        assert_eq!(Price::new(130).times(2), Price::new(260));
        assert_eq!(Price::new(70).times(1), Price::new(70));
    }

    #[test]
    fn sum_of_prices() {
        let prices = [Price::new(260), Price::new(70)];

        assert_eq!(prices.iter().sum::<Price>(), Price::new(330));
        assert_eq!(std::iter::empty::<Price>().sum::<Price>(), Price::ZERO);
    }

    #[test]
    fn to_money_uses_minor_units() {
        let money = Price::new(330).to_money(INR);

        assert_eq!(money.to_minor_units(), 33_000);
    }
}
