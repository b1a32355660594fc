//! Special charge (tax/tip) calculation.

use crate::bill::{ChargeMethod, SpecialCharge};
use crate::error::{EngineError, Result};
use crate::money::Money;
use rust_decimal::Decimal;

/// A special charge resolved against a concrete subtotal.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ChargeTotals {
    /// The concrete charge amount.
    pub amount: Money,

    /// Every bill person's equal share of `amount`.
    pub per_person_share: Money,
}

/// Resolves a charge's nominal value into a concrete amount and its equal
/// per-person share.
///
/// A percentage charge is taken relative to `subtotal`; a fixed charge ignores
/// it. `people_count` is the bill's *full* person count — tax and tip are
/// always split across everyone, not just the people on any one item.
///
/// # Errors
///
/// Returns [`EngineError::DivisionByZero`] if `people_count` is 0. The bill
/// level requires at least one person whenever charges exist, so hitting this
/// means the caller let an invalid bill through.
pub fn calculate(
    charge: &SpecialCharge,
    subtotal: Money,
    people_count: usize,
) -> Result<ChargeTotals> {
    if people_count == 0 {
        return Err(EngineError::DivisionByZero(format!(
            "charge {} cannot be split across zero people",
            charge.id
        )));
    }

    let amount = match charge.method {
        ChargeMethod::Percentage => {
            Money::new(subtotal.value() * charge.value / Decimal::ONE_HUNDRED)
        }
        ChargeMethod::Fixed => Money::new(charge.value),
    };

    let per_person_share = Money::new(amount.value() / Decimal::from(people_count));

    Ok(ChargeTotals {
        amount,
        per_person_share,
    })
}
