//! Interactive rebalancing of percentage/value share maps.
//!
//! Every function here is one user action on one line item: add or remove a
//! participant, switch the split method, change the amount, or drag a single
//! share slider. Structural changes (add/remove/switch) always *reset* the
//! map to an equal distribution — they never try to preserve prior ratios.
//! Only the live slider edit ([`set_share`]) works incrementally.

use crate::bill::{LineItem, PersonId, SplitMethod};
use crate::error::{EngineError, Result};
use crate::money::{clamp, Money};
use log::debug;
use rust_decimal::Decimal;

/// Adds a participant to an item. No-op if already present.
///
/// Under `percentage` and `value` the whole share map is recomputed as an
/// equal split over the enlarged set; editing participants re-flattens shares
/// by design.
pub fn add_participant(item: &mut LineItem, person_id: &str) {
    if item.participants.iter().any(|p| p == person_id) {
        return;
    }
    item.participants.push(person_id.to_string());
    debug!("Item {}: added participant {}", item.id, person_id);

    match item.method {
        SplitMethod::Percentage => reset_percentage_shares(item),
        SplitMethod::Value => reset_value_shares(item),
        SplitMethod::Equal | SplitMethod::FullToOne => {}
    }
}

/// Removes a participant from an item. No-op if absent.
///
/// The removed person's share is discarded entirely; under `percentage` and
/// `value` the remaining participants are reset to an equal split (not scaled
/// proportionally). An item may end up with zero participants, in which case
/// it keeps no allocation and callers must guard before summing it.
pub fn remove_participant(item: &mut LineItem, person_id: &str) {
    if !item.participants.iter().any(|p| p == person_id) {
        return;
    }
    item.participants.retain(|p| p != person_id);
    item.percentage_shares.remove(person_id);
    item.value_shares.remove(person_id);
    debug!("Item {}: removed participant {}", item.id, person_id);

    match item.method {
        SplitMethod::Percentage => reset_percentage_shares(item),
        SplitMethod::Value => reset_value_shares(item),
        SplitMethod::Equal | SplitMethod::FullToOne => {}
    }
}

/// Switches an item's split method.
///
/// Switching to `percentage` or `value` reinitializes the relevant map as an
/// equal split over the current participants; switching to `full` truncates
/// the participant list to its first element. The map belonging to the old
/// method is always cleared.
pub fn change_method(item: &mut LineItem, method: SplitMethod) {
    item.method = method;
    if method == SplitMethod::FullToOne {
        item.participants.truncate(1);
    }
    item.percentage_shares.clear();
    item.value_shares.clear();

    match method {
        SplitMethod::Percentage => reset_percentage_shares(item),
        SplitMethod::Value => reset_value_shares(item),
        SplitMethod::Equal | SplitMethod::FullToOne => {}
    }
}

/// Changes an item's amount.
///
/// Under `value` the share map is re-seeded as an equal split of the new
/// amount; percentages are dimensionless and stay as they are.
///
/// # Errors
///
/// Returns [`EngineError::InvalidAmount`] if `amount` is negative.
pub fn change_amount(item: &mut LineItem, amount: Money) -> Result<()> {
    if amount.is_negative() {
        return Err(EngineError::InvalidAmount(format!(
            "line item amount must not be negative, got {}",
            amount
        )));
    }
    item.amount = amount;
    if item.method == SplitMethod::Value {
        reset_value_shares(item);
    }
    Ok(())
}

/// Applies a live single-slider edit: sets one participant's share and spreads
/// the difference evenly across the others.
///
/// Each *other* participant's share is clamped into `[0, upper]` (`upper` is
/// 100 for `percentage`, the item amount for `value`); the edited share is
/// stored unclamped. When a clamp trims an adjustment, the map's total drifts
/// away from 100 / the amount. That drift is intentional source behavior: it
/// stays visible in downstream totals until the next structural rebalance
/// resets the map, and is never silently corrected here.
///
/// On `equal` and `full` items there is no share map to edit and the call
/// does nothing.
///
/// # Errors
///
/// Returns [`EngineError::InvalidParticipantSet`] if `person_id` is not a
/// participant of the item. Drift is never an error.
pub fn set_share(item: &mut LineItem, person_id: &str, new_value: Decimal) -> Result<()> {
    if !item.participants.iter().any(|p| p == person_id) {
        return Err(EngineError::InvalidParticipantSet(format!(
            "{} is not a participant of item {}",
            person_id, item.id
        )));
    }

    let others: Vec<PersonId> = item
        .participants
        .iter()
        .filter(|p| p.as_str() != person_id)
        .cloned()
        .collect();

    match item.method {
        SplitMethod::Percentage => {
            let old = item
                .percentage_shares
                .get(person_id)
                .copied()
                .unwrap_or(Decimal::ZERO);
            let diff = new_value - old;

            if !others.is_empty() {
                let adjustment = -diff / Decimal::from(others.len());
                for other in &others {
                    let current = item
                        .percentage_shares
                        .get(other)
                        .copied()
                        .unwrap_or(Decimal::ZERO);
                    item.percentage_shares.insert(
                        other.clone(),
                        clamp(current + adjustment, Decimal::ZERO, Decimal::ONE_HUNDRED),
                    );
                }
            }

            // The edited share itself is never clamped.
            item.percentage_shares
                .insert(person_id.to_string(), new_value);
        }
        SplitMethod::Value => {
            let old = item
                .value_shares
                .get(person_id)
                .map(Money::value)
                .unwrap_or(Decimal::ZERO);
            let diff = new_value - old;

            if !others.is_empty() {
                let adjustment = -diff / Decimal::from(others.len());
                for other in &others {
                    let current = item
                        .value_shares
                        .get(other)
                        .map(Money::value)
                        .unwrap_or(Decimal::ZERO);
                    item.value_shares.insert(
                        other.clone(),
                        Money::new(clamp(
                            current + adjustment,
                            Decimal::ZERO,
                            item.amount.value(),
                        )),
                    );
                }
            }

            item.value_shares
                .insert(person_id.to_string(), Money::new(new_value));
        }
        SplitMethod::Equal | SplitMethod::FullToOne => {
            debug!(
                "Item {}: ignoring share edit under method {}",
                item.id, item.method
            );
        }
    }

    Ok(())
}

/// Resets `percentage_shares` to an equal split: `base = floor(100 / n)`,
/// remainder to the first participant in list order.
fn reset_percentage_shares(item: &mut LineItem) {
    item.percentage_shares.clear();
    let n = item.participants.len();
    if n == 0 {
        return;
    }

    let count = Decimal::from(n);
    let base = (Decimal::ONE_HUNDRED / count).floor();
    let remainder = Decimal::ONE_HUNDRED - base * count;

    for (idx, id) in item.participants.iter().enumerate() {
        let share = if idx == 0 { base + remainder } else { base };
        item.percentage_shares.insert(id.clone(), share);
    }
}

/// Resets `value_shares` to an equal split of the item amount at minor-unit
/// precision, remainder to the first participant in list order.
fn reset_value_shares(item: &mut LineItem) {
    item.value_shares.clear();
    let n = item.participants.len();
    if n == 0 {
        return;
    }

    let count = Decimal::from(n);
    let base =
        (item.amount.value() * Decimal::ONE_HUNDRED / count).floor() / Decimal::ONE_HUNDRED;
    let remainder = item.amount.value() - base * count;

    for (idx, id) in item.participants.iter().enumerate() {
        let share = if idx == 0 { base + remainder } else { base };
        item.value_shares.insert(id.clone(), Money::new(share));
    }
}
