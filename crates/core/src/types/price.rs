//! Type-safe price representation using decimal arithmetic.

use core::fmt;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Errors that can occur when constructing a [`Price`].
#[derive(thiserror::Error, Debug, Clone)]
pub enum PriceError {
    /// The amount is negative.
    #[error("price amount cannot be negative: {0}")]
    Negative(Decimal),
}

/// A price with currency information.
///
/// Amounts are held as [`Decimal`] in the currency's standard unit
/// (dinars, not centimes) and are never negative.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Price {
    amount: Decimal,
    currency_code: CurrencyCode,
}

impl Price {
    /// Create a new price.
    ///
    /// # Errors
    ///
    /// Returns [`PriceError::Negative`] if `amount` is below zero.
    pub fn new(amount: Decimal, currency_code: CurrencyCode) -> Result<Self, PriceError> {
        if amount.is_sign_negative() && !amount.is_zero() {
            return Err(PriceError::Negative(amount));
        }
        Ok(Self {
            amount,
            currency_code,
        })
    }

    /// Create a price in the store's default currency (Algerian dinar).
    ///
    /// # Errors
    ///
    /// Returns [`PriceError::Negative`] if `amount` is below zero.
    pub fn from_dinars(amount: Decimal) -> Result<Self, PriceError> {
        Self::new(amount, CurrencyCode::Dzd)
    }

    /// A zero price in the default currency.
    #[must_use]
    pub const fn zero() -> Self {
        Self {
            amount: Decimal::ZERO,
            currency_code: CurrencyCode::Dzd,
        }
    }

    /// The amount in the currency's standard unit.
    #[must_use]
    pub const fn amount(&self) -> Decimal {
        self.amount
    }

    /// The ISO 4217 currency code.
    #[must_use]
    pub const fn currency_code(&self) -> CurrencyCode {
        self.currency_code
    }
}

impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.currency_code {
            CurrencyCode::Dzd => write!(f, "{:.2} DA", self.amount),
            CurrencyCode::Usd => write!(f, "${:.2}", self.amount),
            CurrencyCode::Eur => write!(f, "€{:.2}", self.amount),
        }
    }
}

/// ISO 4217 currency codes accepted by the storefront.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "UPPERCASE")]
pub enum CurrencyCode {
    /// Algerian dinar (store default).
    #[default]
    Dzd,
    Usd,
    Eur,
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_new_rejects_negative() {
        let result = Price::new(Decimal::from(-5), CurrencyCode::Dzd);
        assert!(matches!(result, Err(PriceError::Negative(_))));
    }

    #[test]
    fn test_zero_is_valid() {
        assert_eq!(Price::zero().amount(), Decimal::ZERO);
        assert!(Price::from_dinars(Decimal::ZERO).is_ok());
    }

    #[test]
    fn test_display_dinars() {
        let price = Price::from_dinars(Decimal::new(123_450, 2)).unwrap();
        assert_eq!(price.to_string(), "1234.50 DA");
    }

    #[test]
    fn test_display_usd() {
        let price = Price::new(Decimal::from(20), CurrencyCode::Usd).unwrap();
        assert_eq!(price.to_string(), "$20.00");
    }

    #[test]
    fn test_default_currency() {
        assert_eq!(CurrencyCode::default(), CurrencyCode::Dzd);
    }
}
