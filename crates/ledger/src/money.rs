//! Money value object.
//!
//! Amounts are `Decimal`s normalized to exactly two fractional digits
//! (round half away from zero) on every construction, including deserialization.

use core::cmp::Ordering;
use core::fmt;
use core::str::FromStr;

use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

use bankledger_core::{DomainError, DomainResult, ValueObject};

/// Number of fractional digits every amount is normalized to.
pub const SCALE: u32 = 2;

/// ISO-4217 style currency code (e.g. `EUR`).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Currency(String);

impl Currency {
    /// Validate and upper-case a currency code.
    pub fn new(code: impl AsRef<str>) -> DomainResult<Self> {
        let code = code.as_ref().trim();
        if code.is_empty() {
            return Err(DomainError::validation("currency code must not be empty"));
        }
        if !code.chars().all(|c| c.is_ascii_alphabetic()) {
            return Err(DomainError::validation(format!(
                "currency code must be alphabetic: '{code}'"
            )));
        }
        Ok(Self(code.to_ascii_uppercase()))
    }

    pub fn eur() -> Self {
        Self("EUR".to_string())
    }

    pub fn code(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Currency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<String> for Currency {
    type Error = DomainError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Currency> for String {
    fn from(value: Currency) -> Self {
        value.0
    }
}

impl FromStr for Currency {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

/// An immutable amount of money in a single currency.
///
/// Arithmetic and comparison are only defined between amounts of the same
/// currency; anything else fails with [`DomainError::CurrencyMismatch`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "RawMoney")]
pub struct Money {
    amount: Decimal,
    currency: Currency,
}

#[derive(Deserialize)]
struct RawMoney {
    amount: Decimal,
    currency: Currency,
}

impl From<RawMoney> for Money {
    fn from(raw: RawMoney) -> Self {
        Money::of(raw.amount, raw.currency)
    }
}

impl ValueObject for Money {}

fn normalize(amount: Decimal) -> Decimal {
    let mut rounded = amount.round_dp_with_strategy(SCALE, RoundingStrategy::MidpointAwayFromZero);
    rounded.rescale(SCALE);
    rounded
}

impl Money {
    pub fn of(amount: Decimal, currency: Currency) -> Self {
        Self {
            amount: normalize(amount),
            currency,
        }
    }

    pub fn zero(currency: Currency) -> Self {
        Self::of(Decimal::ZERO, currency)
    }

    pub fn euro(amount: Decimal) -> Self {
        Self::of(amount, Currency::eur())
    }

    pub fn zero_euro() -> Self {
        Self::zero(Currency::eur())
    }

    /// Parse user input such as `"2500"`, `"100.45"` or `"100,45"`.
    pub fn parse(text: &str, currency: Currency) -> DomainResult<Self> {
        let cleaned = text.trim().replace(',', ".");
        let amount = Decimal::from_str(&cleaned)
            .map_err(|e| DomainError::validation(format!("invalid amount '{}': {e}", text.trim())))?;
        Ok(Self::of(amount, currency))
    }

    pub fn amount(&self) -> Decimal {
        self.amount
    }

    pub fn currency(&self) -> &Currency {
        &self.currency
    }

    pub fn is_zero(&self) -> bool {
        self.amount.is_zero()
    }

    pub fn is_negative(&self) -> bool {
        self.amount.is_sign_negative() && !self.amount.is_zero()
    }

    pub fn is_positive(&self) -> bool {
        self.amount.is_sign_positive() && !self.amount.is_zero()
    }

    pub fn add(&self, other: &Money) -> DomainResult<Money> {
        self.require_same_currency(other)?;
        let sum = self
            .amount
            .checked_add(other.amount)
            .ok_or_else(|| DomainError::validation("amount overflow"))?;
        Ok(Self::of(sum, self.currency.clone()))
    }

    pub fn subtract(&self, other: &Money) -> DomainResult<Money> {
        self.require_same_currency(other)?;
        let difference = self
            .amount
            .checked_sub(other.amount)
            .ok_or_else(|| DomainError::validation("amount overflow"))?;
        Ok(Self::of(difference, self.currency.clone()))
    }

    /// Order two amounts of the same currency.
    pub fn try_cmp(&self, other: &Money) -> DomainResult<Ordering> {
        self.require_same_currency(other)?;
        Ok(self.amount.cmp(&other.amount))
    }

    pub fn require_currency(&self, expected: &Currency) -> DomainResult<()> {
        if &self.currency != expected {
            return Err(DomainError::currency_mismatch(expected, &self.currency));
        }
        Ok(())
    }

    fn require_same_currency(&self, other: &Money) -> DomainResult<()> {
        other.require_currency(&self.currency)
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.amount, self.currency)
    }
}
