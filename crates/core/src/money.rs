//! Money and quantity value objects.
//!
//! `Money` is a signed amount in minor units (cents); `Quantity` is a
//! unit-denominated volume (e.g. m³ of timber). All arithmetic is checked:
//! overflow surfaces as a `DomainError` instead of wrapping silently.

use serde::{Deserialize, Serialize};

use crate::error::{DomainError, DomainResult};
use crate::value_object::ValueObject;

/// Signed cash amount in minor units.
///
/// Positive values are outflows in expense context; the ledger formula gives
/// negative expense amounts the meaning of income.
#[derive(
    Debug, Copy, Clone, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct Money(i64);

impl Money {
    pub const ZERO: Money = Money(0);

    pub const fn from_minor(minor: i64) -> Self {
        Self(minor)
    }

    pub const fn minor(self) -> i64 {
        self.0
    }

    pub const fn is_negative(self) -> bool {
        self.0 < 0
    }

    pub const fn is_zero(self) -> bool {
        self.0 == 0
    }

    pub fn abs(self) -> Money {
        Money(self.0.abs())
    }

    pub fn checked_add(self, other: Money) -> DomainResult<Money> {
        self.0
            .checked_add(other.0)
            .map(Money)
            .ok_or_else(|| DomainError::validation("money overflow in addition"))
    }

    pub fn checked_sub(self, other: Money) -> DomainResult<Money> {
        self.0
            .checked_sub(other.0)
            .map(Money)
            .ok_or_else(|| DomainError::validation("money overflow in subtraction"))
    }

    /// `unit_price * quantity`, with an i128 intermediate.
    pub fn checked_mul_quantity(self, quantity: Quantity) -> DomainResult<Money> {
        let wide = (self.0 as i128) * (quantity.0 as i128);
        i64::try_from(wide)
            .map(Money)
            .map_err(|_| DomainError::validation("money overflow in multiplication"))
    }

    /// The share of `self` attributable to `part` out of `whole`.
    ///
    /// Remainder method: callers keep `self - prorated` on the other side of a
    /// split, so the two parts always sum back to the original exactly.
    pub fn prorate(self, part: Quantity, whole: Quantity) -> DomainResult<Money> {
        if whole.0 <= 0 {
            return Err(DomainError::validation(
                "cannot prorate against a non-positive whole",
            ));
        }
        if part.0 < 0 || part.0 > whole.0 {
            return Err(DomainError::validation(
                "prorated part must lie within the whole",
            ));
        }
        let wide = (self.0 as i128) * (part.0 as i128) / (whole.0 as i128);
        i64::try_from(wide)
            .map(Money)
            .map_err(|_| DomainError::validation("money overflow in proration"))
    }
}

impl ValueObject for Money {}

impl core::fmt::Display for Money {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        let abs = self.0.unsigned_abs();
        write!(f, "{sign}{}.{:02}", abs / 100, abs % 100)
    }
}

/// Unit-denominated volume (whole units of the order's unit of measurement).
#[derive(
    Debug, Copy, Clone, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct Quantity(i64);

impl Quantity {
    pub const ZERO: Quantity = Quantity(0);

    pub const fn from_units(units: i64) -> Self {
        Self(units)
    }

    pub const fn units(self) -> i64 {
        self.0
    }

    pub const fn is_zero(self) -> bool {
        self.0 == 0
    }

    pub const fn is_positive(self) -> bool {
        self.0 > 0
    }

    pub fn checked_add(self, other: Quantity) -> DomainResult<Quantity> {
        self.0
            .checked_add(other.0)
            .map(Quantity)
            .ok_or_else(|| DomainError::validation("quantity overflow in addition"))
    }

    pub fn checked_sub(self, other: Quantity) -> DomainResult<Quantity> {
        let v = self
            .0
            .checked_sub(other.0)
            .ok_or_else(|| DomainError::validation("quantity overflow in subtraction"))?;
        Ok(Quantity(v))
    }

    pub fn min(self, other: Quantity) -> Quantity {
        Quantity(self.0.min(other.0))
    }
}

impl ValueObject for Quantity {}

impl core::fmt::Display for Quantity {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        core::fmt::Display::fmt(&self.0, f)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn prorate_plus_remainder_reconstructs_the_whole() {
        let total = Money::from_minor(1_000_003);
        let part = total
            .prorate(Quantity::from_units(40), Quantity::from_units(100))
            .unwrap();
        let rest = total.checked_sub(part).unwrap();
        assert_eq!(part.checked_add(rest).unwrap(), total);
    }

    #[test]
    fn prorate_rejects_part_outside_whole() {
        let total = Money::from_minor(500);
        let err = total
            .prorate(Quantity::from_units(101), Quantity::from_units(100))
            .unwrap_err();
        assert!(matches!(err, DomainError::Validation(_)));
    }

    #[test]
    fn mul_quantity_uses_wide_intermediate() {
        let price = Money::from_minor(5_000); // $50.00
        let total = price
            .checked_mul_quantity(Quantity::from_units(100))
            .unwrap();
        assert_eq!(total, Money::from_minor(500_000)); // $5,000.00
    }

    #[test]
    fn display_formats_minor_units() {
        assert_eq!(Money::from_minor(520_000).to_string(), "5200.00");
        assert_eq!(Money::from_minor(-150).to_string(), "-1.50");
    }

    #[test]
    fn overflow_is_reported_not_wrapped() {
        let err = Money::from_minor(i64::MAX)
            .checked_add(Money::from_minor(1))
            .unwrap_err();
        assert!(matches!(err, DomainError::Validation(_)));
    }
}
