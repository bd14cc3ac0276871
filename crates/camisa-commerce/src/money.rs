//! Display prices.
//!
//! Amounts are integer cents. Prices are optional in the catalog and never
//! affect filtering or cart identity.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Currencies a price column can be shown in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum Currency {
    #[default]
    MXN,
    USD,
}

impl Currency {
    pub fn code(&self) -> &'static str {
        match self {
            Currency::MXN => "MXN",
            Currency::USD => "USD",
        }
    }

    /// Prefix used when rendering an amount.
    pub fn symbol(&self) -> &'static str {
        match self {
            Currency::MXN => "$",
            Currency::USD => "US$",
        }
    }
}

/// A price in cents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub struct Money {
    pub amount_cents: i64,
    pub currency: Currency,
}

impl Money {
    pub fn new(amount_cents: i64, currency: Currency) -> Self {
        Self {
            amount_cents,
            currency,
        }
    }

    /// Convert a decimal amount as stored in the `precio` column.
    ///
    /// ```
    /// use camisa_commerce::money::{Currency, Money};
    /// let price = Money::from_decimal(249.90, Currency::MXN);
    /// assert_eq!(price.amount_cents, 24990);
    /// ```
    pub fn from_decimal(amount: f64, currency: Currency) -> Self {
        Self::new((amount * 100.0).round() as i64, currency)
    }

    pub fn zero(currency: Currency) -> Self {
        Self::new(0, currency)
    }

    pub fn to_decimal(&self) -> f64 {
        self.amount_cents as f64 / 100.0
    }

    /// Rendered as symbol plus two decimals, e.g. `$249.90`.
    pub fn display(&self) -> String {
        format!("{}{:.2}", self.currency.symbol(), self.to_decimal())
    }

    /// `None` on currency mismatch or overflow.
    pub fn try_add(&self, other: &Money) -> Option<Money> {
        if self.currency != other.currency {
            return None;
        }
        self.amount_cents
            .checked_add(other.amount_cents)
            .map(|cents| Money::new(cents, self.currency))
    }

    /// `None` on overflow.
    pub fn try_multiply(&self, factor: i64) -> Option<Money> {
        self.amount_cents
            .checked_mul(factor)
            .map(|cents| Money::new(cents, self.currency))
    }

    /// Whole percent this price sits below `previous`, rounded.
    ///
    /// `None` unless both share a currency and this price is strictly lower
    /// than a positive `previous`.
    pub fn percent_below(&self, previous: &Money) -> Option<u8> {
        if previous.currency != self.currency
            || previous.amount_cents <= 0
            || self.amount_cents >= previous.amount_cents
        {
            return None;
        }
        let off = (previous.amount_cents - self.amount_cents) as f64 / previous.amount_cents as f64;
        Some((off * 100.0).round() as u8)
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.display())
    }
}
