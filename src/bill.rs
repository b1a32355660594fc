//! Bill data model: people, line items, special charges.
//!
//! The bill owns all of its entities. Items and charges reference people by id
//! only (a weak reference), so removing a person must cascade into every
//! item's participant set — `Bill::remove_person` does exactly that. The bill
//! is the sole mutator: one user action maps to one mutating call on one bill
//! value, with no ambient state anywhere.

use crate::error::{EngineError, Result};
use crate::money::Money;
use crate::rebalance;
use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

/// Identifier for a person within a bill.
pub type PersonId = String;

/// A person sharing a bill.
///
/// Identity is `id`; `name` uniqueness within a bill (case-insensitive) is
/// enforced by the caller, not here.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Person {
    /// Unique identifier.
    pub id: PersonId,

    /// Display name.
    pub name: String,

    /// Avatar glyph chosen by the UI.
    pub icon: String,
}

/// The rule used to partition a line item's amount across its participants.
///
/// This is a closed set: adding or removing a method is a compile-time-checked
/// change thanks to exhaustive matching in the allocator and the rebalance
/// engine. The string tags (`equal`, `percentage`, `value`, `full`) are the
/// persistence format.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SplitMethod {
    /// Every participant pays the same, remainder to the first.
    Equal,

    /// Each participant pays a stored percentage of the amount.
    Percentage,

    /// Each participant pays a stored absolute amount.
    Value,

    /// A single participant pays the full amount.
    FullToOne,
}

impl SplitMethod {
    /// The persistence tag for this method.
    pub fn as_str(&self) -> &'static str {
        match self {
            SplitMethod::Equal => "equal",
            SplitMethod::Percentage => "percentage",
            SplitMethod::Value => "value",
            SplitMethod::FullToOne => "full",
        }
    }
}

impl FromStr for SplitMethod {
    type Err = EngineError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "equal" => Ok(SplitMethod::Equal),
            "percentage" => Ok(SplitMethod::Percentage),
            "value" => Ok(SplitMethod::Value),
            "full" => Ok(SplitMethod::FullToOne),
            other => Err(EngineError::UnknownSplitMethod(other.to_string())),
        }
    }
}

impl fmt::Display for SplitMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for SplitMethod {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for SplitMethod {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

/// One line of a bill: a named amount and the rule for splitting it.
///
/// # Invariants
///
/// - `participants` order is the allocation tie-break order: the first
///   participant absorbs any rounding remainder.
/// - `percentage_shares` is meaningful under [`SplitMethod::Percentage`] only
///   and sums to 100 across participants after a rebalance (a live slider edit
///   may leave it drifted until the next structural change).
/// - `value_shares` is meaningful under [`SplitMethod::Value`] only and sums
///   to `amount` within a minor unit after a rebalance.
/// - Under [`SplitMethod::FullToOne`], `participants` holds exactly one id.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LineItem {
    /// Unique identifier.
    pub id: String,

    /// Display name ("Pizza", "Taxi", ...).
    pub name: String,

    /// Item amount; never negative.
    pub amount: Money,

    /// How the amount is split across participants.
    pub method: SplitMethod,

    /// Participating people, in insertion order.
    pub participants: Vec<PersonId>,

    /// Per-person percentages, method `percentage` only.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub percentage_shares: BTreeMap<PersonId, Decimal>,

    /// Per-person absolute amounts, method `value` only.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub value_shares: BTreeMap<PersonId, Money>,
}

impl LineItem {
    /// Creates a line item and seeds its share maps for the chosen method.
    ///
    /// Percentage and value items start from an equal distribution across
    /// `participants`; a full-to-one item keeps only the first participant.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::InvalidAmount`] if `amount` is negative.
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        amount: Money,
        method: SplitMethod,
        participants: Vec<PersonId>,
    ) -> Result<Self> {
        if amount.is_negative() {
            return Err(EngineError::InvalidAmount(format!(
                "line item amount must not be negative, got {}",
                amount
            )));
        }

        let mut item = LineItem {
            id: id.into(),
            name: name.into(),
            amount,
            method,
            participants,
            percentage_shares: BTreeMap::new(),
            value_shares: BTreeMap::new(),
        };
        rebalance::change_method(&mut item, method);
        Ok(item)
    }
}

/// Whether a special charge is a tax or a tip.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChargeKind {
    Tax,
    Tip,
}

impl ChargeKind {
    /// Human-readable label, used by the text summary.
    pub fn label(&self) -> &'static str {
        match self {
            ChargeKind::Tax => "Tax",
            ChargeKind::Tip => "Tip",
        }
    }
}

/// How a special charge's nominal value is interpreted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChargeMethod {
    /// Percentage of the bill subtotal, computed at aggregation time.
    Percentage,

    /// Fixed amount, independent of the subtotal.
    Fixed,
}

/// A tax or tip applied on top of the bill subtotal.
///
/// Always split equally across *all* people in the bill, regardless of who
/// participates in which item.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpecialCharge {
    /// Unique identifier.
    pub id: String,

    /// Tax or tip.
    pub kind: ChargeKind,

    /// Percentage-of-subtotal or fixed amount.
    pub method: ChargeMethod,

    /// Nominal value: percent points or a fixed amount.
    pub value: Decimal,
}

/// A bill: people, line items, and special charges.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Bill {
    /// Unique identifier.
    pub id: String,

    /// Display name.
    pub name: String,

    /// Everyone sharing the bill.
    #[serde(default)]
    pub people: Vec<Person>,

    /// Line items.
    #[serde(default)]
    pub items: Vec<LineItem>,

    /// Taxes and tips.
    #[serde(default)]
    pub special_charges: Vec<SpecialCharge>,
}

impl Bill {
    /// Creates an empty bill.
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Bill {
            id: id.into(),
            name: name.into(),
            people: Vec::new(),
            items: Vec::new(),
            special_charges: Vec::new(),
        }
    }

    /// Adds a person to the bill.
    pub fn add_person(&mut self, person: Person) {
        self.people.push(person);
    }

    /// Removes a person and cascades into every item's participant set.
    ///
    /// Percentage and value items re-flatten to an equal distribution among
    /// the remaining participants; the removed person's share is discarded,
    /// not redistributed proportionally.
    pub fn remove_person(&mut self, person_id: &str) {
        self.people.retain(|p| p.id != person_id);
        for item in &mut self.items {
            rebalance::remove_participant(item, person_id);
        }
    }

    /// Looks a person up by id.
    pub fn find_person(&self, person_id: &str) -> Option<&Person> {
        self.people.iter().find(|p| p.id == person_id)
    }

    /// Adds a line item.
    pub fn add_item(&mut self, item: LineItem) {
        self.items.push(item);
    }

    /// Removes a line item. Special charges are untouched even when the last
    /// item goes away.
    pub fn remove_item(&mut self, item_id: &str) {
        self.items.retain(|i| i.id != item_id);
    }

    /// Adds a special charge.
    pub fn add_charge(&mut self, charge: SpecialCharge) {
        self.special_charges.push(charge);
    }

    /// Removes a special charge.
    pub fn remove_charge(&mut self, charge_id: &str) {
        self.special_charges.retain(|c| c.id != charge_id);
    }
}
