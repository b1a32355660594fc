//! Per-item share allocation.
//!
//! [`allocate`] is a pure function of the line item it is given: it derives
//! each participant's share under the item's split method and performs no
//! renormalization whatsoever. If a percentage map does not sum to 100 (as
//! after a clamped slider edit), the shares come out exactly as stored — the
//! rebalance engine owns map hygiene, not the allocator.

use crate::bill::{LineItem, PersonId, SplitMethod};
use crate::error::{EngineError, Result};
use crate::money::{self, Money};
use rust_decimal::Decimal;
use std::collections::BTreeMap;

/// Derives the per-participant shares of one line item.
///
/// - `equal`: the amount is distributed at minor-unit precision, rounding
///   remainder to the first participant in list order.
/// - `percentage`: `amount * share / 100` per participant; participants
///   missing from the map count as 0.
/// - `value`: the stored amounts pass through unchanged; missing entries
///   count as 0.
/// - `full`: the single participant owes the full amount.
///
/// # Errors
///
/// - [`EngineError::InvalidAmount`] for an `equal` item with no participants.
/// - [`EngineError::InvalidParticipantSet`] for a `full` item whose
///   participant count is not exactly 1.
pub fn allocate(item: &LineItem) -> Result<BTreeMap<PersonId, Money>> {
    let mut shares = BTreeMap::new();

    match item.method {
        SplitMethod::Equal => {
            let split = money::distribute_equally(item.amount, item.participants.len())?;
            for (person, share) in item.participants.iter().zip(split) {
                shares.insert(person.clone(), share);
            }
        }
        SplitMethod::Percentage => {
            for person in &item.participants {
                let percentage = item
                    .percentage_shares
                    .get(person)
                    .copied()
                    .unwrap_or(Decimal::ZERO);
                let share = item.amount.value() * percentage / Decimal::ONE_HUNDRED;
                shares.insert(person.clone(), Money::new(share));
            }
        }
        SplitMethod::Value => {
            for person in &item.participants {
                let share = item
                    .value_shares
                    .get(person)
                    .copied()
                    .unwrap_or(Money::ZERO);
                shares.insert(person.clone(), share);
            }
        }
        SplitMethod::FullToOne => {
            if item.participants.len() != 1 {
                return Err(EngineError::InvalidParticipantSet(format!(
                    "full-to-one item {} must have exactly 1 participant, got {}",
                    item.id,
                    item.participants.len()
                )));
            }
            shares.insert(item.participants[0].clone(), item.amount);
        }
    }

    Ok(shares)
}
