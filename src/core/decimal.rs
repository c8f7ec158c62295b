//! Fixed-precision numeric wrappers for money, percentages and quantities.
//!
//! Arithmetic is carried out at full [`Decimal`] precision. Rounding to two
//! decimals (half away from zero) only happens through [`Amount::rounded_value`],
//! which is what every business rule comparison uses. Sums are accumulated
//! unrounded and rounded once at the end.

use std::iter::Sum;
use std::ops::{Add, Neg, Sub};

use rust_decimal::{Decimal, RoundingStrategy};
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

/// Number of decimals monetary amounts are compared at.
pub const AMOUNT_SCALE: u32 = 2;

/// Round a Decimal to `dp` decimal places using half-up (commercial rounding).
pub(crate) fn round_half_up(value: Decimal, dp: u32) -> Decimal {
    value.round_dp_with_strategy(dp, RoundingStrategy::MidpointAwayFromZero)
}

/// Monetary amount in the invoice currency.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Amount(Decimal);

impl Amount {
    pub const ZERO: Amount = Amount(Decimal::ZERO);

    pub fn new(value: Decimal) -> Self {
        Self(value)
    }

    /// Unrounded value.
    pub fn value(&self) -> Decimal {
        self.0
    }

    /// Value rounded half away from zero to 2 decimals.
    pub fn rounded_value(&self) -> Decimal {
        round_half_up(self.0, AMOUNT_SCALE)
    }

    /// Value rounded half away from zero to `scale` decimals.
    pub fn rounded_to(&self, scale: u32) -> Decimal {
        round_half_up(self.0, scale)
    }

    pub fn add(self, other: Amount) -> Amount {
        Amount(self.0 + other.0)
    }

    pub fn subtract(self, other: Amount) -> Amount {
        Amount(self.0 - other.0)
    }

    pub fn multiply(self, factor: Decimal) -> Amount {
        Amount(self.0 * factor)
    }

    /// `self × rate / 100`, unrounded. Panics on overflow like the
    /// [`Decimal`] operators, see [`Self::checked_of_percentage`].
    pub fn of_percentage(self, rate: Percentage) -> Amount {
        Amount(self.0 * rate.value() / dec!(100))
    }

    pub fn checked_add(self, other: Amount) -> Option<Amount> {
        self.0.checked_add(other.0).map(Amount)
    }

    pub fn checked_sub(self, other: Amount) -> Option<Amount> {
        self.0.checked_sub(other.0).map(Amount)
    }

    /// `self × rate / 100`, or `None` outside the [`Decimal`] range.
    pub fn checked_of_percentage(self, rate: Percentage) -> Option<Amount> {
        self.0
            .checked_mul(rate.value())?
            .checked_div(dec!(100))
            .map(Amount)
    }

    /// Sum of `amounts`, or `None` as soon as a partial sum overflows.
    pub fn checked_sum(amounts: impl IntoIterator<Item = Amount>) -> Option<Amount> {
        amounts
            .into_iter()
            .try_fold(Amount::ZERO, Amount::checked_add)
    }

    /// Equality after rounding both sides to 2 decimals.
    pub fn matches(self, other: Amount) -> bool {
        self.rounded_value() == other.rounded_value()
    }

    pub fn is_zero(&self) -> bool {
        self.0.is_zero()
    }

    pub fn is_positive(&self) -> bool {
        self.0 > Decimal::ZERO
    }

    pub fn is_negative(&self) -> bool {
        self.0 < Decimal::ZERO
    }
}

impl From<Decimal> for Amount {
    fn from(value: Decimal) -> Self {
        Self(value)
    }
}

impl Add for Amount {
    type Output = Amount;

    fn add(self, rhs: Amount) -> Amount {
        Amount(self.0 + rhs.0)
    }
}

impl Sub for Amount {
    type Output = Amount;

    fn sub(self, rhs: Amount) -> Amount {
        Amount(self.0 - rhs.0)
    }
}

impl Neg for Amount {
    type Output = Amount;

    fn neg(self) -> Amount {
        Amount(-self.0)
    }
}

impl Sum for Amount {
    fn sum<I: Iterator<Item = Amount>>(iter: I) -> Amount {
        iter.fold(Amount::ZERO, |acc, a| acc + a)
    }
}

impl<'a> Sum<&'a Amount> for Amount {
    fn sum<I: Iterator<Item = &'a Amount>>(iter: I) -> Amount {
        iter.copied().sum()
    }
}

impl std::fmt::Display for Amount {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Percentage, e.g. a VAT rate of `19` meaning 19 %.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Percentage(Decimal);

impl Percentage {
    pub const ZERO: Percentage = Percentage(Decimal::ZERO);

    pub fn new(value: Decimal) -> Self {
        Self(value)
    }

    pub fn value(&self) -> Decimal {
        self.0
    }

    pub fn rounded_value(&self) -> Decimal {
        round_half_up(self.0, AMOUNT_SCALE)
    }

    pub fn is_zero(&self) -> bool {
        self.0.is_zero()
    }

    pub fn is_positive(&self) -> bool {
        self.0 > Decimal::ZERO
    }

    pub fn is_negative(&self) -> bool {
        self.0 < Decimal::ZERO
    }

    /// Normalised form (trailing zeros stripped), so `19` and `19.00` group together.
    pub(crate) fn normalized(&self) -> Percentage {
        Percentage(self.0.normalize())
    }
}

impl From<Decimal> for Percentage {
    fn from(value: Decimal) -> Self {
        Self(value)
    }
}

impl std::fmt::Display for Percentage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Invoiced or base quantity.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Quantity(Decimal);

impl Quantity {
    pub const ONE: Quantity = Quantity(Decimal::ONE);

    pub fn new(value: Decimal) -> Self {
        Self(value)
    }

    pub fn value(&self) -> Decimal {
        self.0
    }

    pub fn is_zero(&self) -> bool {
        self.0.is_zero()
    }

    pub fn add(self, other: Quantity) -> Quantity {
        Quantity(self.0 + other.0)
    }

    pub fn subtract(self, other: Quantity) -> Quantity {
        Quantity(self.0 - other.0)
    }

    pub fn multiply(self, factor: Decimal) -> Quantity {
        Quantity(self.0 * factor)
    }
}

impl From<Decimal> for Quantity {
    fn from(value: Decimal) -> Self {
        Self(value)
    }
}

impl std::fmt::Display for Quantity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
