//! Bill-level aggregation: subtotal, charges, total, per-person breakdown.

use crate::allocator;
use crate::bill::{Bill, ChargeKind, ChargeMethod, PersonId};
use crate::charge;
use crate::error::Result;
use crate::money::Money;
use log::{debug, warn};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// One item's contribution to one person's total.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ItemShare {
    /// Item display name.
    pub name: String,

    /// This person's share of the item.
    pub amount: Money,
}

/// A special charge resolved during aggregation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChargeLine {
    /// Charge identifier.
    pub id: String,

    /// Tax or tip.
    pub kind: ChargeKind,

    /// Percentage or fixed.
    pub method: ChargeMethod,

    /// Nominal value as entered (percent points or fixed amount).
    pub value: Decimal,

    /// Calculated charge amount.
    pub amount: Money,

    /// Each bill person's equal share of the amount.
    pub per_person_share: Money,
}

/// One person's aggregated totals.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PersonTotal {
    /// Per-item contribution lines, in bill item order.
    pub items: Vec<ItemShare>,

    /// Sum of this person's item shares.
    pub regular_total: Money,

    /// This person's share of all special charges; identical for everyone.
    pub charges_share: Money,

    /// `regular_total + charges_share`.
    pub total: Money,
}

/// The aggregated view of a whole bill.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BillTotals {
    /// Sum of all line item amounts.
    pub subtotal: Money,

    /// Resolved special charges, in bill order.
    pub charges: Vec<ChargeLine>,

    /// Sum of all charge amounts.
    pub charges_total: Money,

    /// `subtotal + charges_total`.
    pub total: Money,

    /// Per-person breakdown, keyed by person id.
    pub per_person: BTreeMap<PersonId, PersonTotal>,
}

/// Aggregates a bill into its totals and per-person breakdown.
///
/// Percentage charges resolve against the subtotal of *all* items, and every
/// charge splits equally across every person in the bill. Item shares come
/// from the allocator as stored, so a drifted percentage map flows straight
/// into the per-person totals — the drifted sum is what gets displayed.
///
/// Items with no participants contribute to the subtotal but allocate to
/// nobody; shares allocated to ids no longer in `people` are dropped. Both
/// cases are logged. The sum of person totals equals `total` up to the
/// minor-unit remainder rule of equal distribution, and exactly when neither
/// case above occurs and all share maps are balanced.
///
/// A bill with zero people is not a valid aggregation input once charges
/// exist; it surfaces as [`crate::EngineError::DivisionByZero`] from the
/// charge calculator.
pub fn aggregate(bill: &Bill) -> Result<BillTotals> {
    let subtotal: Money = bill.items.iter().map(|i| i.amount).sum();

    let mut charges = Vec::with_capacity(bill.special_charges.len());
    for special in &bill.special_charges {
        let totals = charge::calculate(special, subtotal, bill.people.len())?;
        charges.push(ChargeLine {
            id: special.id.clone(),
            kind: special.kind,
            method: special.method,
            value: special.value,
            amount: totals.amount,
            per_person_share: totals.per_person_share,
        });
    }

    let charges_total: Money = charges.iter().map(|c| c.amount).sum();
    let total = subtotal + charges_total;

    let mut per_person: BTreeMap<PersonId, PersonTotal> = bill
        .people
        .iter()
        .map(|p| (p.id.clone(), PersonTotal::default()))
        .collect();

    for item in &bill.items {
        if item.participants.is_empty() {
            warn!("Item {}: no participants, skipping allocation", item.id);
            continue;
        }
        let shares = allocator::allocate(item)?;
        for (person_id, amount) in shares {
            match per_person.get_mut(&person_id) {
                Some(person_total) => {
                    person_total.items.push(ItemShare {
                        name: item.name.clone(),
                        amount,
                    });
                    person_total.regular_total += amount;
                }
                None => {
                    warn!(
                        "Item {}: participant {} is not in the bill, dropping share {}",
                        item.id, person_id, amount
                    );
                }
            }
        }
    }

    let charges_share: Money = charges.iter().map(|c| c.per_person_share).sum();
    for person_total in per_person.values_mut() {
        person_total.charges_share = charges_share;
        person_total.total = person_total.regular_total + charges_share;
    }

    debug!(
        "Aggregated bill {}: subtotal {}, total {}, {} people",
        bill.id,
        subtotal,
        total,
        per_person.len()
    );

    Ok(BillTotals {
        subtotal,
        charges,
        charges_total,
        total,
        per_person,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bill::{LineItem, Person, SpecialCharge, SplitMethod};
    use std::str::FromStr;

    fn money(s: &str) -> Money {
        Money::from_str(s).unwrap()
    }

    fn person(id: &str) -> Person {
        Person {
            id: id.to_string(),
            name: id.to_uppercase(),
            icon: "👤".to_string(),
        }
    }

    fn ids(names: &[&str]) -> Vec<PersonId> {
        names.iter().map(|s| s.to_string()).collect()
    }

    fn person_total_sum(totals: &BillTotals) -> Money {
        totals.per_person.values().map(|p| p.total).sum()
    }

    #[test]
    fn test_empty_bill_aggregates_to_zero() {
        let bill = Bill::new("b1", "Empty");
        let totals = aggregate(&bill).unwrap();

        assert!(totals.subtotal.is_zero());
        assert!(totals.total.is_zero());
        assert!(totals.charges.is_empty());
        assert!(totals.per_person.is_empty());
    }

    #[test]
    fn test_zero_items_with_fixed_charge_still_totals() {
        let mut bill = Bill::new("b1", "Tip only");
        bill.add_person(person("a"));
        bill.add_person(person("b"));
        bill.add_charge(SpecialCharge {
            id: "c1".to_string(),
            kind: ChargeKind::Tip,
            method: ChargeMethod::Fixed,
            value: Decimal::from(5),
        });
        bill.add_charge(SpecialCharge {
            id: "c2".to_string(),
            kind: ChargeKind::Tax,
            method: ChargeMethod::Percentage,
            value: Decimal::from(10),
        });

        let totals = aggregate(&bill).unwrap();

        // Percentage charges resolve against a zero subtotal; the fixed tip
        // still applies.
        assert!(totals.subtotal.is_zero());
        assert_eq!(totals.total, money("5"));
        assert_eq!(totals.per_person["a"].charges_share, money("2.5"));
        assert_eq!(person_total_sum(&totals), totals.total);
    }

    #[test]
    fn test_charges_split_across_everyone_regardless_of_participation() {
        let mut bill = Bill::new("b1", "Dinner");
        for id in ["a", "b", "c", "d"] {
            bill.add_person(person(id));
        }
        // Only a participates in the single item.
        bill.add_item(
            LineItem::new(
                "i1",
                "Pizza",
                money("100.00"),
                SplitMethod::FullToOne,
                ids(&["a"]),
            )
            .unwrap(),
        );
        bill.add_charge(SpecialCharge {
            id: "tax".to_string(),
            kind: ChargeKind::Tax,
            method: ChargeMethod::Percentage,
            value: Decimal::from(10),
        });
        bill.add_charge(SpecialCharge {
            id: "tip".to_string(),
            kind: ChargeKind::Tip,
            method: ChargeMethod::Fixed,
            value: Decimal::new(500, 2),
        });

        let totals = aggregate(&bill).unwrap();

        assert_eq!(totals.subtotal, money("100.00"));
        assert_eq!(totals.charges_total, money("15.00"));
        assert_eq!(totals.total, money("115.00"));
        for id in ["a", "b", "c", "d"] {
            assert_eq!(totals.per_person[id].charges_share, money("3.75"));
        }
        assert_eq!(totals.per_person["a"].regular_total, money("100.00"));
        assert_eq!(totals.per_person["b"].regular_total, Money::ZERO);
        assert_eq!(person_total_sum(&totals), totals.total);
    }

    #[test]
    fn test_person_totals_sum_to_bill_total_across_methods() {
        let mut bill = Bill::new("b1", "Mixed");
        for id in ["a", "b", "c"] {
            bill.add_person(person(id));
        }
        bill.add_item(
            LineItem::new(
                "i1",
                "Starter",
                money("10.00"),
                SplitMethod::Equal,
                ids(&["a", "b", "c"]),
            )
            .unwrap(),
        );
        bill.add_item(
            LineItem::new(
                "i2",
                "Main",
                money("47.50"),
                SplitMethod::Percentage,
                ids(&["a", "b"]),
            )
            .unwrap(),
        );
        bill.add_item(
            LineItem::new(
                "i3",
                "Wine",
                money("23.75"),
                SplitMethod::Value,
                ids(&["b", "c"]),
            )
            .unwrap(),
        );
        bill.add_charge(SpecialCharge {
            id: "tip".to_string(),
            kind: ChargeKind::Tip,
            method: ChargeMethod::Percentage,
            value: Decimal::from(12),
        });

        let totals = aggregate(&bill).unwrap();

        assert_eq!(totals.subtotal, money("81.25"));
        assert_eq!(totals.total, totals.subtotal + totals.charges_total);
        assert_eq!(person_total_sum(&totals), totals.total);
    }

    #[test]
    fn test_zero_participant_item_counts_toward_subtotal_only() {
        let mut bill = Bill::new("b1", "Odd");
        bill.add_person(person("a"));
        let mut item = LineItem::new(
            "i1",
            "Orphan",
            money("10.00"),
            SplitMethod::Equal,
            ids(&["a"]),
        )
        .unwrap();
        item.participants.clear();
        bill.add_item(item);

        let totals = aggregate(&bill).unwrap();

        assert_eq!(totals.subtotal, money("10.00"));
        assert_eq!(totals.per_person["a"].total, Money::ZERO);
    }

    #[test]
    fn test_stale_participant_share_is_dropped() {
        let mut bill = Bill::new("b1", "Stale");
        bill.add_person(person("a"));
        let mut item = LineItem::new(
            "i1",
            "Pizza",
            money("20.00"),
            SplitMethod::Equal,
            ids(&["a"]),
        )
        .unwrap();
        // A participant id the bill no longer knows about.
        item.participants.push("ghost".to_string());
        bill.add_item(item);

        let totals = aggregate(&bill).unwrap();

        assert_eq!(totals.per_person["a"].regular_total, money("10.00"));
        assert!(!totals.per_person.contains_key("ghost"));
    }

    #[test]
    fn test_drifted_share_map_flows_into_totals() {
        let mut bill = Bill::new("b1", "Drift");
        bill.add_person(person("a"));
        bill.add_person(person("b"));
        let mut item = LineItem::new(
            "i1",
            "Pizza",
            money("100.00"),
            SplitMethod::Percentage,
            ids(&["a", "b"]),
        )
        .unwrap();
        item.percentage_shares
            .insert("a".to_string(), Decimal::from(80));
        item.percentage_shares
            .insert("b".to_string(), Decimal::from(40));
        bill.add_item(item);

        let totals = aggregate(&bill).unwrap();

        // 120% of the amount: the drift is visible, not corrected.
        let regular: Money = totals.per_person.values().map(|p| p.regular_total).sum();
        assert_eq!(regular, money("120.00"));
        assert_ne!(person_total_sum(&totals), totals.total);
    }

    #[test]
    fn test_charges_with_zero_people_fail() {
        let mut bill = Bill::new("b1", "Nobody");
        bill.add_charge(SpecialCharge {
            id: "tip".to_string(),
            kind: ChargeKind::Tip,
            method: ChargeMethod::Fixed,
            value: Decimal::from(5),
        });

        let err = aggregate(&bill).unwrap_err();
        assert!(matches!(err, crate::EngineError::DivisionByZero(_)));
    }
}
